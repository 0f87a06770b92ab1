//! Constraint-aware local-search optimizer.
//!
//! A stochastic hill climber over class assignments. Moves are
//! pairwise exchanges and three-way rotations of students; every
//! candidate is vetted by the feasibility oracle before it is scored.
//!
//! # Phases
//!
//! 1. **Two-way**: worst class, complementary partner, best sampled
//!    exchange, until the stagnation limit or the iteration budget.
//! 2. **Three-way**: sampled rotations across class triples, escaping
//!    optima the pairwise neighborhood cannot leave.
//!
//! # Submodules
//!
//! - [`cost`]: class cost function and per-term breakdown
//! - [`partner`]: worst-class and complementarity heuristics
//! - [`swap`]: pairwise search and application
//! - [`cycle`]: rotation phase
//! - [`driver`]: outer loop, stagnation control, entry point
//!
//! # References
//!
//! - Aarts & Lenstra (2003), "Local Search in Combinatorial Optimization"
//! - Hoos & Stutzle (2005), "Stochastic Local Search"

pub mod cost;
pub mod cycle;
pub mod driver;
pub mod partner;
pub mod swap;

pub use cost::{CostModel, ScoreTerms, EMPTY_CLASS_SCORE};
pub use cycle::Rotation;
pub use driver::{optimize, DriverState, OptimizeOutcome, Optimizer, RunStats, GAIN_EPSILON};
pub use partner::{select_partner, worst_class};
pub use swap::{apply_swap, find_best_swap, SwapMove};
