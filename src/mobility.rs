//! Mobility labeling.
//!
//! Decides, per student, whether the optimizer may move them at all.
//! Social-constraint codes pin a student in place (their group was
//! resolved at ingestion), and so does an elective profile only one
//! class can host.

use crate::models::{Mobility, Offerings, Student};

/// Labels each student movable or fixed.
///
/// A student is fixed iff any of:
/// - it carries an affinity code,
/// - it carries an antinomy code,
/// - at most one class admits its elective profile.
///
/// Returned flags are parallel to `students`; callers typically write
/// them back into the table before building a snapshot.
pub fn compute_mobility(students: &[Student], offerings: &Offerings) -> Vec<Mobility> {
    students
        .iter()
        .map(|s| {
            let pinned = !s.affinity.is_empty()
                || !s.antinomy.is_empty()
                || offerings.admissible_count(&s.lv2, &s.opt) <= 1;
            if pinned {
                Mobility::Fixed
            } else {
                Mobility::Movable
            }
        })
        .collect()
}
