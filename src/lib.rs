//! Constraint-aware class assignment for student cohorts.
//!
//! Assigns a cohort of students to a fixed set of destination classes,
//! honoring hard placement constraints (elective offerings, affinity
//! and antinomy groups, mobility) while balancing a weighted objective
//! over headcounts, academic profiles, gender parity, and score
//! distributions.
//!
//! # Modules
//!
//! - **`models`**: domain types — `Student`, `Class`, `Offerings`,
//!   `Snapshot`, `CohortStats`
//! - **`codes`**: canonical elective code lists
//! - **`config`**: optimizer weights, bands, and search parameters
//! - **`validation`**: snapshot integrity checks
//! - **`mobility`**: movable/fixed labeling
//! - **`oracle`**: swap feasibility rules
//! - **`optimizer`**: two-way and three-way local search
//! - **`audit`**: antinomy certification and assignment audits
//!
//! # Quick Start
//!
//! ```
//! use classforge::models::{Class, ClassOffering, Gender, Offerings, Snapshot, Student};
//! use classforge::{audit, optimize, OptimizerConfig};
//!
//! let students = vec![
//!     Student::new("s1").with_gender(Gender::F),
//!     Student::new("s2").with_gender(Gender::M),
//!     Student::new("s3").with_gender(Gender::M),
//!     Student::new("s4").with_gender(Gender::F),
//! ];
//! let classes = vec![
//!     Class::new("6A", 2).with_members(vec![0, 1]),
//!     Class::new("6B", 2).with_members(vec![2, 3]),
//! ];
//! let offerings = Offerings::new(vec![ClassOffering::new(), ClassOffering::new()]);
//! let snapshot = Snapshot::new(students, classes, offerings);
//!
//! let outcome = optimize(snapshot, OptimizerConfig::default().with_seed(42));
//! assert!(outcome.ok);
//!
//! let report = audit(&outcome.snapshot);
//! assert_eq!(report.classes.len(), 2);
//! ```
//!
//! # Determinism
//!
//! All randomness is drawn from one seeded generator injected into the
//! driver. A fixed seed and identical inputs reproduce a run exactly.
//!
//! # References
//!
//! - Aarts & Lenstra (2003), "Local Search in Combinatorial Optimization"
//! - Hoos & Stutzle (2005), "Stochastic Local Search: Foundations and
//!   Applications"

pub mod audit;
pub mod codes;
pub mod config;
pub mod mobility;
pub mod models;
pub mod optimizer;
pub mod oracle;
pub mod validation;

pub use audit::{audit, check_antinomies, AuditReport, ValidationReport};
pub use config::OptimizerConfig;
pub use mobility::compute_mobility;
pub use models::{build_offerings, Snapshot};
pub use optimizer::{optimize, OptimizeOutcome};
pub use oracle::Oracle;
pub use validation::validate_snapshot;
