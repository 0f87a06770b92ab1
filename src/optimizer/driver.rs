//! Optimization driver.
//!
//! Outer loop of the local search: pick the worst class, pick a
//! complementary partner, try the best sampled exchange, and track
//! stagnation. After convergence a three-way rotation phase runs to
//! escape pairwise-exchange optima. A final antinomy audit certifies
//! the result.
//!
//! All randomness flows through one seeded generator, so a fixed seed
//! reproduces a run bit for bit.
//!
//! # Reference
//! Aarts & Lenstra (2003), "Local Search in Combinatorial
//! Optimization", Ch. 1

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::cost::CostModel;
use super::cycle::run_cycle_phase;
use super::partner::{select_partner, worst_class};
use super::swap::{apply_swap, find_best_swap};
use crate::audit::{check_antinomies, AntinomyViolation};
use crate::config::OptimizerConfig;
use crate::models::{CohortStats, Snapshot};

/// Gains at or below this threshold do not count as improvement.
pub const GAIN_EPSILON: f64 = 1e-4;

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Improving moves are still being found.
    Running,
    /// Recent iterations produced no improvement.
    Stagnating,
    /// The search stopped on its own.
    Converged,
    /// The iteration budget ran out first.
    Exhausted,
}

/// Counters from one driver run.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    /// Terminal state.
    pub state: DriverState,
    /// Pairwise exchanges applied.
    pub swaps_applied: u32,
    /// Rotations applied in the cycle phase.
    pub swaps_3way: u32,
}

/// Result of a full optimization.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    /// No duplicated antinomy codes remain (vacuously true when the
    /// attribute was absent).
    pub ok: bool,
    /// The iteration budget ran out before convergence.
    pub exhausted: bool,
    /// Pairwise exchanges applied.
    pub swaps_applied: u32,
    /// Rotations applied.
    pub swaps_3way: u32,
    /// Whether antinomy separation could be validated at all.
    pub antinomy_checked: bool,
    /// Duplicated antinomy codes in the final assignment.
    pub violations: Vec<AntinomyViolation>,
    /// The final placement state.
    pub snapshot: Snapshot,
}

/// The constraint-aware local-search optimizer.
///
/// # Example
/// ```
/// use classforge::models::{Class, ClassOffering, Offerings, Snapshot, Student};
/// use classforge::{optimize, OptimizerConfig};
///
/// let students = vec![Student::new("a"), Student::new("b")];
/// let classes = vec![
///     Class::new("A", 1).with_members(vec![0]),
///     Class::new("B", 1).with_members(vec![1]),
/// ];
/// let offerings = Offerings::new(vec![ClassOffering::new(), ClassOffering::new()]);
/// let snapshot = Snapshot::new(students, classes, offerings);
///
/// let outcome = optimize(snapshot, OptimizerConfig::default().with_seed(42));
/// assert!(outcome.ok);
/// ```
pub struct Optimizer {
    config: OptimizerConfig,
    rng: SmallRng,
}

impl Optimizer {
    /// Creates an optimizer, seeding the generator from the config.
    pub fn new(config: OptimizerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self { config, rng }
    }

    /// Runs both search phases on the snapshot.
    pub fn run(&mut self, snapshot: &mut Snapshot) -> RunStats {
        let stats = CohortStats::compute(&snapshot.students);
        let mut state = DriverState::Running;
        let mut stagnation = 0u32;
        let mut swaps = 0u32;

        for _ in 0..self.config.max_swaps {
            let best = {
                let model = CostModel::new(&snapshot.students, stats, &self.config);
                let Some((worst, score)) = worst_class(&model, &snapshot.classes) else {
                    state = DriverState::Converged;
                    break;
                };
                if score <= GAIN_EPSILON {
                    // Every class already sits at zero cost.
                    state = DriverState::Converged;
                    break;
                }
                let Some(partner) =
                    select_partner(&model, &snapshot.classes, worst, &self.config, &mut self.rng)
                else {
                    if stagnation > 10 {
                        state = DriverState::Converged;
                        break;
                    }
                    stagnation += 1;
                    continue;
                };
                find_best_swap(snapshot, &model, &self.config, worst, partner, &mut self.rng)
            };

            match best {
                Some(mv) if mv.gain > GAIN_EPSILON => {
                    apply_swap(snapshot, &mv);
                    swaps += 1;
                    stagnation = 0;
                    state = DriverState::Running;
                    if swaps <= 5 || swaps % 10 == 0 {
                        debug!(
                            swap = swaps,
                            gain = mv.gain,
                            from = %snapshot.classes[mv.class_a].name,
                            to = %snapshot.classes[mv.class_b].name,
                            "applied exchange"
                        );
                    }
                }
                _ => {
                    stagnation += 1;
                    state = DriverState::Stagnating;
                }
            }

            if stagnation >= self.config.stagnation_limit {
                state = DriverState::Converged;
                break;
            }
        }

        if !matches!(state, DriverState::Converged) {
            state = DriverState::Exhausted;
        }

        let swaps_3way = if state == DriverState::Converged {
            run_cycle_phase(snapshot, &self.config, &mut self.rng)
        } else {
            0
        };

        info!(
            swaps_applied = swaps,
            swaps_3way, state = ?state,
            "search finished"
        );

        RunStats {
            state,
            swaps_applied: swaps,
            swaps_3way,
        }
    }
}

/// Optimizes an assignment and certifies the result.
///
/// Never fails: every negative outcome is carried in the returned
/// value. An empty cohort converges immediately; a missing antinomy
/// attribute produces zero swaps and an unvalidated report.
pub fn optimize(mut snapshot: Snapshot, config: OptimizerConfig) -> OptimizeOutcome {
    let stats = if snapshot.students.is_empty() {
        RunStats {
            state: DriverState::Converged,
            swaps_applied: 0,
            swaps_3way: 0,
        }
    } else {
        Optimizer::new(config).run(&mut snapshot)
    };

    let report = check_antinomies(&snapshot);
    OptimizeOutcome {
        ok: report.violations.is_empty(),
        exhausted: stats.state == DriverState::Exhausted,
        swaps_applied: stats.swaps_applied,
        swaps_3way: stats.swaps_3way,
        antinomy_checked: report.antinomy_checked,
        violations: report.violations,
        snapshot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Class, ClassOffering, Gender, Offerings, Student};

    fn offerings(n: usize) -> Offerings {
        Offerings::new(vec![ClassOffering::new(); n])
    }

    #[test]
    fn test_empty_cohort() {
        let snap = Snapshot::new(Vec::new(), Vec::new(), offerings(0));
        let outcome = optimize(snap, OptimizerConfig::default().with_seed(1));
        assert!(outcome.ok);
        assert!(!outcome.exhausted);
        assert_eq!(outcome.swaps_applied, 0);
        assert_eq!(outcome.swaps_3way, 0);
    }

    #[test]
    fn test_single_class_converges() {
        let students = vec![Student::new("a"), Student::new("b")];
        let classes = vec![Class::new("A", 2).with_members(vec![0, 1])];
        let snap = Snapshot::new(students, classes, offerings(1));
        let outcome = optimize(snap, OptimizerConfig::default().with_seed(1));
        assert!(outcome.ok);
        assert!(!outcome.exhausted);
        assert_eq!(outcome.swaps_applied, 0);
    }

    #[test]
    fn test_missing_antinomy_attribute_blocks_swaps() {
        let students = vec![
            Student::new("f").with_gender(Gender::F),
            Student::new("m").with_gender(Gender::M),
        ];
        let classes = vec![
            Class::new("A", 1).with_members(vec![0]),
            Class::new("B", 1).with_members(vec![1]),
        ];
        let snap = Snapshot::new(students, classes, offerings(2)).without_antinomy_data();
        let outcome = optimize(snap, OptimizerConfig::default().with_seed(1));
        assert_eq!(outcome.swaps_applied, 0);
        assert_eq!(outcome.swaps_3way, 0);
        assert!(!outcome.antinomy_checked);
        // No violations can be reported without the attribute.
        assert!(outcome.ok);
    }

    #[test]
    fn test_budget_exhaustion_reported() {
        // One improving class pair exists, but the budget is zero.
        let students = vec![
            Student::new("f").with_gender(Gender::F),
            Student::new("m").with_gender(Gender::M),
        ];
        let classes = vec![
            Class::new("A", 1).with_members(vec![0]),
            Class::new("B", 1).with_members(vec![1]),
        ];
        let snap = Snapshot::new(students, classes, offerings(2));
        let config = OptimizerConfig::default().with_seed(1).with_max_swaps(0);
        let outcome = optimize(snap, config);
        assert!(outcome.exhausted);
        assert!(outcome.ok);
        assert_eq!(outcome.swaps_applied, 0);
    }
}
