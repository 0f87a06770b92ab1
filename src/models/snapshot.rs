//! In-memory placement snapshot and cohort statistics.
//!
//! The snapshot is the optimizer's whole world: the student table, the
//! class memberships, the offerings, and a flag recording whether the
//! antinomy attribute existed in the source data. The optimizer owns it
//! exclusively during a run; collaborators read the result afterwards.

use serde::{Deserialize, Serialize};

use super::{Class, Gender, Offerings, Student};

/// A complete placement state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// All students, indexed by class membership entries.
    pub students: Vec<Student>,
    /// Destination classes with their current members.
    pub classes: Vec<Class>,
    /// Elective offerings, parallel to `classes`.
    pub offerings: Offerings,
    /// Whether the antinomy attribute was present at ingestion.
    ///
    /// When false, every swap is refused and separation rules go
    /// unvalidated.
    pub antinomy_present: bool,
}

impl Snapshot {
    /// Creates a snapshot. The antinomy attribute is assumed present.
    pub fn new(students: Vec<Student>, classes: Vec<Class>, offerings: Offerings) -> Self {
        Self {
            students,
            classes,
            offerings,
            antinomy_present: true,
        }
    }

    /// Marks the antinomy attribute as absent from the source data.
    pub fn without_antinomy_data(mut self) -> Self {
        self.antinomy_present = false;
        self
    }

    /// The class currently holding a student, if any.
    pub fn class_of(&self, student: usize) -> Option<usize> {
        self.classes
            .iter()
            .position(|c| c.members.contains(&student))
    }

    /// Student index at a membership slot.
    #[inline]
    pub fn member(&self, class: usize, pos: usize) -> usize {
        self.classes[class].members[pos]
    }
}

/// Cohort-wide aggregates the cost function compares classes against.
///
/// Computed once at optimizer entry; class compositions change during a
/// run but the cohort as a whole does not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    /// Share of female students over the whole cohort.
    pub ratio_f: f64,
    /// Cohort mean of the communication score.
    pub mean_com: f64,
    /// Cohort mean of the work score.
    pub mean_tra: f64,
    /// Cohort mean of the participation score.
    pub mean_part: f64,
}

impl CohortStats {
    /// Computes aggregates over the student table.
    ///
    /// An empty cohort yields all-zero statistics.
    pub fn compute(students: &[Student]) -> Self {
        if students.is_empty() {
            return Self {
                ratio_f: 0.0,
                mean_com: 0.0,
                mean_tra: 0.0,
                mean_part: 0.0,
            };
        }
        let n = students.len() as f64;
        let females = students.iter().filter(|s| s.gender == Gender::F).count();
        let sum_com: f64 = students.iter().map(|s| s.com_score()).sum();
        let sum_tra: f64 = students.iter().map(|s| s.tra_score()).sum();
        let sum_part: f64 = students.iter().map(|s| s.part_score()).sum();

        Self {
            ratio_f: females as f64 / n,
            mean_com: sum_com / n,
            mean_tra: sum_tra / n,
            mean_part: sum_part / n,
        }
    }
}
