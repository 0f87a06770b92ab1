//! Placement domain models.
//!
//! Core data types for representing a cohort-to-class assignment
//! problem and its solution state.
//!
//! - **`Student`**: identity, gender, academic scores, elective codes,
//!   social-constraint codes, mobility
//! - **`Class`**: a destination with a target headcount and its members
//! - **`Offerings`**: per-class elective quotas and the universal set
//! - **`Snapshot`**: the complete mutable placement state
//! - **`CohortStats`**: cohort-wide aggregates for the cost function

mod class;
mod offerings;
mod snapshot;
mod student;

pub use class::Class;
pub use offerings::{build_offerings, ClassOffering, Offerings};
pub use snapshot::{CohortStats, Snapshot};
pub use student::{Gender, Mobility, Student, DEFAULT_SCORE};
