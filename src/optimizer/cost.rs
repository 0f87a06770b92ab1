//! Class cost function.
//!
//! Maps a class composition to a non-negative scalar where lower is
//! better. The search minimizes the sum of class costs.
//!
//! # Terms
//!
//! | Term | Shape |
//! |------|-------|
//! | Headcount deviation | quadratic, weight 800 |
//! | Head-profile deficit | quadratic, weight 500 |
//! | Head-profile excess | linear, weight 200 |
//! | Low-tier excess | cubic, weight 100 |
//! | Gender-ratio deviation | linear, weight 1000 x parity weight |
//! | Academic-mean deviation | linear, 100 (COM, TRA) / 50 (PART) x distribution weight |
//!
//! The head band is asymmetric on purpose: a class missing strong
//! profiles degrades faster than one with a surplus. The cubic
//! low-tier term makes any excess dominate the other criteria.

use crate::config::OptimizerConfig;
use crate::models::{Class, CohortStats, Gender, Student};

/// Sentinel cost of an empty class.
pub const EMPTY_CLASS_SCORE: f64 = 10_000.0;

/// Per-term decomposition of a class score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreTerms {
    /// Headcount deviation from target.
    pub headcount: f64,
    /// Head-profile band deviation.
    pub heads: f64,
    /// Low-tier excess.
    pub low_tier: f64,
    /// Gender-ratio deviation from the cohort.
    pub gender: f64,
    /// Academic-mean deviation from the cohort.
    pub academic: f64,
}

impl ScoreTerms {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.headcount + self.heads + self.low_tier + self.gender + self.academic
    }
}

/// Evaluates class compositions against cohort statistics.
///
/// Pure: holds read-only borrows of the student table and config plus
/// the cohort aggregates captured at optimizer entry.
pub struct CostModel<'a> {
    students: &'a [Student],
    stats: CohortStats,
    config: &'a OptimizerConfig,
}

impl<'a> CostModel<'a> {
    /// Creates a cost model.
    pub fn new(students: &'a [Student], stats: CohortStats, config: &'a OptimizerConfig) -> Self {
        Self {
            students,
            stats,
            config,
        }
    }

    /// Scalar cost of a class in its current composition.
    pub fn class_score(&self, class: &Class) -> f64 {
        self.score_members(&class.members, class.target).total()
    }

    /// Per-term cost of a hypothetical composition.
    pub fn score_members(&self, members: &[usize], target: usize) -> ScoreTerms {
        let n = members.len();
        if n == 0 {
            return ScoreTerms {
                headcount: EMPTY_CLASS_SCORE,
                ..ScoreTerms::default()
            };
        }

        let delta = n as f64 - target as f64;
        let headcount = delta * delta * 800.0;

        let heads = members
            .iter()
            .filter(|&&m| self.students[m].is_head())
            .count();
        let heads_term = if heads < self.config.head_min {
            let deficit = (self.config.head_min - heads) as f64;
            deficit * deficit * 500.0
        } else if heads > self.config.head_max {
            (heads - self.config.head_max) as f64 * 200.0
        } else {
            0.0
        };

        let low = members
            .iter()
            .filter(|&&m| self.students[m].is_low_tier())
            .count();
        let low_term = if low > self.config.niv1_max {
            let excess = (low - self.config.niv1_max) as f64;
            excess * excess * excess * 100.0
        } else {
            0.0
        };

        let gender = (self.ratio_f(members) - self.stats.ratio_f).abs()
            * 1000.0
            * self.config.w_parity;

        let academic = ((self.mean(members, Student::com_score) - self.stats.mean_com).abs()
            * 100.0
            + (self.mean(members, Student::tra_score) - self.stats.mean_tra).abs() * 100.0
            + (self.mean(members, Student::part_score) - self.stats.mean_part).abs() * 50.0)
            * self.config.w_distrib;

        ScoreTerms {
            headcount,
            heads: heads_term,
            low_tier: low_term,
            gender,
            academic,
        }
    }

    /// Sum of class scores over the whole assignment.
    pub fn total_score(&self, classes: &[Class]) -> f64 {
        classes.iter().map(|c| self.class_score(c)).sum()
    }

    /// Cost change from exchanging two membership slots.
    ///
    /// Positive gain means the swap improves the assignment.
    pub fn swap_gain(
        &self,
        classes: &[Class],
        class_a: usize,
        pos_a: usize,
        class_b: usize,
        pos_b: usize,
    ) -> f64 {
        let ca = &classes[class_a];
        let cb = &classes[class_b];
        let before = self.class_score(ca) + self.class_score(cb);

        let mut ma = ca.members.clone();
        let mut mb = cb.members.clone();
        std::mem::swap(&mut ma[pos_a], &mut mb[pos_b]);

        let after = self.score_members(&ma, ca.target).total()
            + self.score_members(&mb, cb.target).total();
        before - after
    }

    /// Cost change from rotating three membership slots:
    /// the first student to the second class, the second to the third,
    /// the third to the first.
    pub fn rotation_gain(
        &self,
        classes: &[Class],
        slots: [(usize, usize); 3],
    ) -> f64 {
        let [(c1, p1), (c2, p2), (c3, p3)] = slots;
        let before = self.class_score(&classes[c1])
            + self.class_score(&classes[c2])
            + self.class_score(&classes[c3]);

        let mut m1 = classes[c1].members.clone();
        let mut m2 = classes[c2].members.clone();
        let mut m3 = classes[c3].members.clone();
        let a = m1[p1];
        let b = m2[p2];
        let c = m3[p3];
        m2[p2] = a;
        m3[p3] = b;
        m1[p1] = c;

        let after = self.score_members(&m1, classes[c1].target).total()
            + self.score_members(&m2, classes[c2].target).total()
            + self.score_members(&m3, classes[c3].target).total();
        before - after
    }

    /// Female ratio of a composition (0 for an empty one).
    pub fn ratio_f(&self, members: &[usize]) -> f64 {
        if members.is_empty() {
            return 0.0;
        }
        let f = members
            .iter()
            .filter(|&&m| self.students[m].gender == Gender::F)
            .count();
        f as f64 / members.len() as f64
    }

    /// Mean of a score accessor over a composition (0 for an empty one).
    pub fn mean(&self, members: &[usize], score: fn(&Student) -> f64) -> f64 {
        if members.is_empty() {
            return 0.0;
        }
        let sum: f64 = members.iter().map(|&m| score(&self.students[m])).sum();
        sum / members.len() as f64
    }

    /// Head-profile count of a composition.
    pub fn head_count(&self, members: &[usize]) -> usize {
        members
            .iter()
            .filter(|&&m| self.students[m].is_head())
            .count()
    }

    /// Low-tier count of a composition.
    pub fn low_count(&self, members: &[usize]) -> usize {
        members
            .iter()
            .filter(|&&m| self.students[m].is_low_tier())
            .count()
    }

    /// Cohort aggregates this model compares against.
    pub fn stats(&self) -> CohortStats {
        self.stats
    }
}
