//! Swap feasibility oracle.
//!
//! A pure predicate deciding whether exchanging two students between
//! their classes would violate a hard placement rule. Infeasibility is
//! an ordinary `false`, never an error.
//!
//! Rules, all required:
//! 1. Both students are movable.
//! 2. Antinomy exclusion: the destination must hold no other student
//!    sharing the incoming student's antinomy code. The partner being
//!    swapped out does not count.
//! 3. Affinity integrity: a student may leave its class only if no
//!    other member shares its affinity code, so groups never split.
//! 4. Second-language offering: a known, non-universal LV2 must be
//!    offered by the destination.
//! 5. Option offering: a known OPT must be offered by the destination.
//! 6. Specialization preservation: a class offering a specialized
//!    option refuses students who carry none of those options and
//!    whose LV2 is a non-default code. Seats in specialized classes
//!    are reserved for profiles that need them.
//! 7. If the antinomy attribute is absent from the source data, every
//!    swap is refused.

use crate::codes::{is_known_lv2, is_known_opt};
use crate::config::OptimizerConfig;
use crate::models::{Snapshot, Student};

/// Borrowed evaluation context for swap feasibility.
pub struct Oracle<'a> {
    snapshot: &'a Snapshot,
    config: &'a OptimizerConfig,
}

impl<'a> Oracle<'a> {
    /// Creates an oracle over a snapshot.
    pub fn new(snapshot: &'a Snapshot, config: &'a OptimizerConfig) -> Self {
        Self { snapshot, config }
    }

    /// Whether exchanging the members at the two slots is admissible.
    ///
    /// `(class_a, pos_a)` and `(class_b, pos_b)` address membership
    /// slots; the students there would trade places. Every rule is
    /// checked symmetrically and the first failure decides.
    pub fn can_swap(&self, class_a: usize, pos_a: usize, class_b: usize, pos_b: usize) -> bool {
        if !self.snapshot.antinomy_present {
            return false;
        }

        let a = self.snapshot.member(class_a, pos_a);
        let b = self.snapshot.member(class_b, pos_b);
        let sa = &self.snapshot.students[a];
        let sb = &self.snapshot.students[b];

        if !sa.is_movable() || !sb.is_movable() {
            return false;
        }
        if !self.antinomy_clear(sa, class_b, b) || !self.antinomy_clear(sb, class_a, a) {
            return false;
        }
        if !self.affinity_clear(sa, class_a, a) || !self.affinity_clear(sb, class_b, b) {
            return false;
        }
        if !self.lv2_admissible(sa, class_b) || !self.lv2_admissible(sb, class_a) {
            return false;
        }
        if !self.opt_admissible(sa, class_b) || !self.opt_admissible(sb, class_a) {
            return false;
        }
        if !self.specialization_ok(sa, class_b) || !self.specialization_ok(sb, class_a) {
            return false;
        }
        true
    }

    /// No other student in the destination shares the incoming
    /// student's antinomy code. `leaving` is the partner moving out.
    fn antinomy_clear(&self, incoming: &Student, dest: usize, leaving: usize) -> bool {
        if incoming.antinomy.is_empty() {
            return true;
        }
        !self.snapshot.classes[dest]
            .members
            .iter()
            .any(|&m| m != leaving && self.snapshot.students[m].antinomy == incoming.antinomy)
    }

    /// The departing student is the last of its affinity group in its
    /// origin class.
    fn affinity_clear(&self, departing: &Student, origin: usize, self_idx: usize) -> bool {
        if departing.affinity.is_empty() {
            return true;
        }
        !self.snapshot.classes[origin]
            .members
            .iter()
            .any(|&m| m != self_idx && self.snapshot.students[m].affinity == departing.affinity)
    }

    fn lv2_admissible(&self, student: &Student, dest: usize) -> bool {
        let lv2 = student.lv2.as_str();
        if lv2.is_empty() || self.snapshot.offerings.is_universal(lv2) || !is_known_lv2(lv2) {
            return true;
        }
        self.snapshot.offerings.classes[dest].offers_lv2(lv2)
    }

    fn opt_admissible(&self, student: &Student, dest: usize) -> bool {
        if !is_known_opt(&student.opt) {
            return true;
        }
        self.snapshot.offerings.classes[dest].offers_opt(&student.opt)
    }

    fn specialization_ok(&self, student: &Student, dest: usize) -> bool {
        let offering = &self.snapshot.offerings.classes[dest];
        let specialized = self
            .config
            .specialized_opts
            .iter()
            .any(|opt| offering.offers_opt(opt));
        if !specialized {
            return true;
        }
        let carries = self
            .config
            .specialized_opts
            .iter()
            .any(|opt| student.opt == *opt);
        if carries {
            return true;
        }
        let non_default = !student.lv2.is_empty() && student.lv2 != self.config.default_lv2;
        !non_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Class, ClassOffering, Offerings, Snapshot, Student};

    /// Two classes of two, everything open unless a test narrows it.
    fn base_snapshot(students: Vec<Student>, offerings: Offerings) -> Snapshot {
        let classes = vec![
            Class::new("A", 2).with_members(vec![0, 1]),
            Class::new("B", 2).with_members(vec![2, 3]),
        ];
        Snapshot::new(students, classes, offerings)
    }

    fn open_offerings() -> Offerings {
        let open = ClassOffering::new()
            .with_lv2("ESP", 20)
            .with_lv2("ITA", 10)
            .with_opt("LATIN", 8);
        Offerings::new(vec![open.clone(), open])
    }

    fn plain(id: &str) -> Student {
        Student::new(id)
    }

    #[test]
    fn test_plain_swap_allowed() {
        let snap = base_snapshot(
            vec![plain("a"), plain("b"), plain("c"), plain("d")],
            open_offerings(),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_fixed_student_refused() {
        let snap = base_snapshot(
            vec![plain("a").fixed(), plain("b"), plain("c"), plain("d")],
            open_offerings(),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(!oracle.can_swap(0, 0, 1, 0));
        assert!(oracle.can_swap(0, 1, 1, 0));
    }

    #[test]
    fn test_antinomy_exclusion() {
        // d in B shares a's code: a may not enter B.
        let snap = base_snapshot(
            vec![
                plain("a").with_antinomy("D1"),
                plain("b"),
                plain("c"),
                plain("d").with_antinomy("D1"),
            ],
            open_offerings(),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(!oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_antinomy_partner_leaving_does_not_count() {
        // The only D1 carrier in B is the partner being swapped out.
        let snap = base_snapshot(
            vec![
                plain("a").with_antinomy("D1"),
                plain("b"),
                plain("c").with_antinomy("D1"),
                plain("d"),
            ],
            open_offerings(),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_affinity_split_refused() {
        // a and b share G1 in class A: a may not leave without b.
        let snap = base_snapshot(
            vec![
                plain("a").with_affinity("G1"),
                plain("b").with_affinity("G1"),
                plain("c"),
                plain("d"),
            ],
            open_offerings(),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(!oracle.can_swap(0, 0, 1, 0));
        assert!(!oracle.can_swap(0, 1, 1, 0));
    }

    #[test]
    fn test_affinity_last_member_may_leave() {
        // a is alone in its group: free to go.
        let snap = base_snapshot(
            vec![plain("a").with_affinity("G1"), plain("b"), plain("c"), plain("d")],
            open_offerings(),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_lv2_not_offered_refused() {
        // B teaches ESP only; a needs ITA.
        let a_off = ClassOffering::new().with_lv2("ESP", 20).with_lv2("ITA", 10);
        let b_off = ClassOffering::new().with_lv2("ESP", 20);
        let snap = base_snapshot(
            vec![
                plain("a").with_lv2("ITA"),
                plain("b"),
                plain("c"),
                plain("d"),
            ],
            Offerings::new(vec![a_off, b_off]),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(!oracle.can_swap(0, 0, 1, 0));
        // A student without the scarce language still moves freely.
        assert!(oracle.can_swap(0, 1, 1, 0));
    }

    #[test]
    fn test_universal_lv2_never_restricts() {
        // ESP offered everywhere: universal, so quota checks are skipped.
        let snap = base_snapshot(
            vec![plain("a").with_lv2("ESP"), plain("b"), plain("c"), plain("d")],
            open_offerings(),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(snap.offerings.is_universal("ESP"));
        assert!(oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_unknown_lv2_never_restricts() {
        let no_lv2 = ClassOffering::new();
        let snap = base_snapshot(
            vec![plain("a").with_lv2("JPN"), plain("b"), plain("c"), plain("d")],
            Offerings::new(vec![no_lv2.clone(), no_lv2]),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_opt_not_offered_refused() {
        let a_off = ClassOffering::new().with_opt("LATIN", 8);
        let b_off = ClassOffering::new();
        let snap = base_snapshot(
            vec![
                plain("a").with_opt("LATIN"),
                plain("b"),
                plain("c"),
                plain("d"),
            ],
            Offerings::new(vec![a_off, b_off]),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(!oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_specialization_preserved() {
        // B offers LATIN. A non-latinist with a non-default language
        // would waste a specialized seat.
        let a_off = ClassOffering::new().with_lv2("ALL", 10).with_lv2("ESP", 20);
        let b_off = ClassOffering::new()
            .with_lv2("ALL", 10)
            .with_lv2("ESP", 20)
            .with_opt("LATIN", 8);
        let offerings = Offerings::new(vec![a_off, b_off]);
        let snap = base_snapshot(
            vec![
                plain("a").with_lv2("ALL"),
                plain("b").with_lv2("ESP"),
                plain("c"),
                plain("d"),
            ],
            offerings,
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        // ALL speaker without LATIN: refused by B.
        assert!(!oracle.can_swap(0, 0, 1, 0));
        // Default-language student: admitted.
        assert!(oracle.can_swap(0, 1, 1, 0));
    }

    #[test]
    fn test_specialization_carrier_admitted() {
        let a_off = ClassOffering::new().with_lv2("ALL", 10).with_opt("LATIN", 8);
        let b_off = ClassOffering::new().with_lv2("ALL", 10).with_opt("LATIN", 8);
        let snap = base_snapshot(
            vec![
                plain("a").with_lv2("ALL").with_opt("LATIN"),
                plain("b"),
                plain("c"),
                plain("d"),
            ],
            Offerings::new(vec![a_off, b_off]),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_empty_lv2_passes_specialization() {
        let off = ClassOffering::new().with_opt("CHAV", 6);
        let snap = base_snapshot(
            vec![plain("a"), plain("b"), plain("c"), plain("d")],
            Offerings::new(vec![off.clone(), off]),
        );
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(oracle.can_swap(0, 0, 1, 0));
    }

    #[test]
    fn test_missing_antinomy_attribute_fails_closed() {
        let snap = base_snapshot(
            vec![plain("a"), plain("b"), plain("c"), plain("d")],
            open_offerings(),
        )
        .without_antinomy_data();
        let config = OptimizerConfig::default();
        let oracle = Oracle::new(&snap, &config);
        assert!(!oracle.can_swap(0, 0, 1, 0));
    }
}
