//! Student model.
//!
//! A student carries identity, gender, four academic scores, elective
//! codes, social-constraint codes, and a mobility flag. Profile flags
//! (head, low-tier) are derived from the scores on demand and never
//! stored.

use serde::{Deserialize, Serialize};

/// Score used when a criterion is missing from the source data.
pub const DEFAULT_SCORE: f64 = 2.5;

/// A student to be placed in a destination class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Family name.
    pub family_name: String,
    /// Given name.
    pub given_name: String,
    /// Declared gender.
    pub gender: Gender,
    /// Communication score (1..4 scale). `None` = missing.
    pub com: Option<f64>,
    /// Work score. `None` = missing.
    pub tra: Option<f64>,
    /// Participation score. `None` = missing.
    pub part: Option<f64>,
    /// Absences criterion score. `None` = missing.
    pub abs: Option<f64>,
    /// Second-language code (may be empty).
    pub lv2: String,
    /// Option code (may be empty).
    pub opt: String,
    /// Affinity group code: students sharing it must stay together.
    pub affinity: String,
    /// Antinomy group code: students sharing it must be separated.
    pub antinomy: String,
    /// Whether the optimizer may move this student.
    pub mobility: Mobility,
}

/// Declared gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    F,
    M,
    Unknown,
}

/// Placement mobility.
///
/// Fixed students are immovable inputs; only ingestion assigns this
/// state (see [`crate::mobility::compute_mobility`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mobility {
    Movable,
    Fixed,
}

fn effective(score: Option<f64>) -> f64 {
    match score {
        Some(s) => s.clamp(0.0, 5.0),
        None => DEFAULT_SCORE,
    }
}

impl Student {
    /// Creates a movable student with no scores and no codes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            family_name: String::new(),
            given_name: String::new(),
            gender: Gender::Unknown,
            com: None,
            tra: None,
            part: None,
            abs: None,
            lv2: String::new(),
            opt: String::new(),
            affinity: String::new(),
            antinomy: String::new(),
            mobility: Mobility::Movable,
        }
    }

    /// Sets family and given names.
    pub fn with_name(mut self, family: impl Into<String>, given: impl Into<String>) -> Self {
        self.family_name = family.into();
        self.given_name = given.into();
        self
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Sets the three main academic scores.
    pub fn with_scores(mut self, com: f64, tra: f64, part: f64) -> Self {
        self.com = Some(com);
        self.tra = Some(tra);
        self.part = Some(part);
        self
    }

    /// Sets the absences score.
    pub fn with_abs(mut self, abs: f64) -> Self {
        self.abs = Some(abs);
        self
    }

    /// Sets the second-language code.
    pub fn with_lv2(mut self, lv2: impl Into<String>) -> Self {
        self.lv2 = lv2.into();
        self
    }

    /// Sets the option code.
    pub fn with_opt(mut self, opt: impl Into<String>) -> Self {
        self.opt = opt.into();
        self
    }

    /// Sets the affinity group code.
    pub fn with_affinity(mut self, code: impl Into<String>) -> Self {
        self.affinity = code.into();
        self
    }

    /// Sets the antinomy group code.
    pub fn with_antinomy(mut self, code: impl Into<String>) -> Self {
        self.antinomy = code.into();
        self
    }

    /// Marks the student immovable.
    pub fn fixed(mut self) -> Self {
        self.mobility = Mobility::Fixed;
        self
    }

    /// Communication score, clamped, with missing fallback.
    #[inline]
    pub fn com_score(&self) -> f64 {
        effective(self.com)
    }

    /// Work score, clamped, with missing fallback.
    #[inline]
    pub fn tra_score(&self) -> f64 {
        effective(self.tra)
    }

    /// Participation score, clamped, with missing fallback.
    #[inline]
    pub fn part_score(&self) -> f64 {
        effective(self.part)
    }

    /// Absences score, clamped, with missing fallback.
    #[inline]
    pub fn abs_score(&self) -> f64 {
        effective(self.abs)
    }

    /// Academically strong profile: excellent in communication or work,
    /// or a high mean over the three main criteria.
    pub fn is_head(&self) -> bool {
        let com = self.com_score();
        let tra = self.tra_score();
        com >= 4.0 || tra >= 4.0 || (com + tra + self.part_score()) / 3.0 >= 3.5
    }

    /// Academically struggling profile.
    pub fn is_low_tier(&self) -> bool {
        self.com_score() <= 1.0 || self.tra_score() <= 1.0
    }

    /// Whether the optimizer may move this student.
    #[inline]
    pub fn is_movable(&self) -> bool {
        self.mobility == Mobility::Movable
    }

    /// Name shown in reports.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
            .trim()
            .to_string()
    }
}
