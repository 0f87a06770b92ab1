//! Post-run auditing.
//!
//! Two read-only passes over a snapshot:
//! - [`check_antinomies`] certifies that no class holds two students
//!   sharing an antinomy code;
//! - [`audit`] summarizes every class (headcounts, gender split,
//!   elective histograms, mobility split) and lists elective
//!   placements the offerings cannot justify.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::codes::{is_known_lv2, is_known_opt};
use crate::models::{Gender, Snapshot};

/// A duplicated antinomy code inside one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntinomyViolation {
    /// Class name.
    pub class: String,
    /// Duplicated code.
    pub code: String,
    /// Carriers in the class.
    pub count: usize,
    /// Display names of the carriers.
    pub students: Vec<String>,
}

/// Result of the antinomy pass.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// False when the antinomy attribute was absent from the source
    /// data and separation could not be checked.
    pub antinomy_checked: bool,
    /// Duplications found, ordered by class then code.
    pub violations: Vec<AntinomyViolation>,
}

impl ValidationReport {
    /// Whether the assignment is certified.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Finds duplicated antinomy codes within each class.
pub fn check_antinomies(snapshot: &Snapshot) -> ValidationReport {
    if !snapshot.antinomy_present {
        warn!("antinomy attribute absent; separation not validated");
        return ValidationReport {
            antinomy_checked: false,
            violations: Vec::new(),
        };
    }

    let mut violations = Vec::new();
    for class in &snapshot.classes {
        let mut carriers: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for &m in &class.members {
            let code = snapshot.students[m].antinomy.as_str();
            if !code.is_empty() {
                carriers.entry(code).or_default().push(m);
            }
        }
        for (code, members) in carriers {
            if members.len() > 1 {
                violations.push(AntinomyViolation {
                    class: class.name.clone(),
                    code: code.to_string(),
                    count: members.len(),
                    students: members
                        .iter()
                        .map(|&m| snapshot.students[m].display_name())
                        .collect(),
                });
            }
        }
    }

    ValidationReport {
        antinomy_checked: true,
        violations,
    }
}

/// Composition summary of one class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassAudit {
    /// Class name.
    pub name: String,
    /// Current headcount.
    pub headcount: usize,
    /// Intended headcount.
    pub target: usize,
    /// Female members.
    pub f_count: usize,
    /// Male members.
    pub m_count: usize,
    /// Members with unknown gender.
    pub unknown_count: usize,
    /// Second-language code histogram (empty codes excluded).
    pub lv2_histogram: BTreeMap<String, usize>,
    /// Option code histogram (empty codes excluded).
    pub opt_histogram: BTreeMap<String, usize>,
    /// Movable members.
    pub movable: usize,
    /// Fixed members.
    pub fixed: usize,
}

/// A student sitting in a class that does not offer their elective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferViolation {
    /// Class name.
    pub class: String,
    /// Student display name.
    pub student: String,
    /// The elective code the class lacks.
    pub code: String,
}

/// Realized versus expected seats for one offered code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaDeviation {
    /// Class name.
    pub class: String,
    /// Offered code.
    pub code: String,
    /// Quota recorded in the offering.
    pub expected: u32,
    /// Carriers actually assigned.
    pub realized: usize,
    /// `realized - expected`.
    pub deviation: i64,
}

/// Full audit of an assignment against its offerings.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Per-class composition summaries, in class order.
    pub classes: Vec<ClassAudit>,
    /// Second-language codes offered by every class, sorted.
    pub universal_lv2: Vec<String>,
    /// Known, non-universal second languages placed where not offered.
    pub lv2_violations: Vec<OfferViolation>,
    /// Known options placed where not offered.
    pub opt_violations: Vec<OfferViolation>,
    /// Seat deviations per offered code, in class order then code order.
    pub quota_deviations: Vec<QuotaDeviation>,
}

/// Audits an assignment.
///
/// Pure summary: nothing is mutated and nothing fails. Histograms and
/// deviation lists are ordered deterministically.
pub fn audit(snapshot: &Snapshot) -> AuditReport {
    let mut classes = Vec::with_capacity(snapshot.classes.len());
    let mut lv2_violations = Vec::new();
    let mut opt_violations = Vec::new();
    let mut quota_deviations = Vec::new();

    for (idx, class) in snapshot.classes.iter().enumerate() {
        let offering = &snapshot.offerings.classes[idx];
        let mut entry = ClassAudit {
            name: class.name.clone(),
            headcount: class.members.len(),
            target: class.target,
            f_count: 0,
            m_count: 0,
            unknown_count: 0,
            lv2_histogram: BTreeMap::new(),
            opt_histogram: BTreeMap::new(),
            movable: 0,
            fixed: 0,
        };

        for &m in &class.members {
            let s = &snapshot.students[m];
            match s.gender {
                Gender::F => entry.f_count += 1,
                Gender::M => entry.m_count += 1,
                Gender::Unknown => entry.unknown_count += 1,
            }
            if s.is_movable() {
                entry.movable += 1;
            } else {
                entry.fixed += 1;
            }
            if !s.lv2.is_empty() {
                *entry.lv2_histogram.entry(s.lv2.clone()).or_insert(0) += 1;
            }
            if !s.opt.is_empty() {
                *entry.opt_histogram.entry(s.opt.clone()).or_insert(0) += 1;
            }

            if is_known_lv2(&s.lv2)
                && !snapshot.offerings.is_universal(&s.lv2)
                && !offering.offers_lv2(&s.lv2)
            {
                lv2_violations.push(OfferViolation {
                    class: class.name.clone(),
                    student: s.display_name(),
                    code: s.lv2.clone(),
                });
            }
            if is_known_opt(&s.opt) && !offering.offers_opt(&s.opt) {
                opt_violations.push(OfferViolation {
                    class: class.name.clone(),
                    student: s.display_name(),
                    code: s.opt.clone(),
                });
            }
        }

        let mut offered: BTreeMap<&str, u32> = BTreeMap::new();
        for (code, &quota) in &offering.lv2_quotas {
            if quota > 0 {
                offered.insert(code, quota);
            }
        }
        for (code, &quota) in &offering.opt_quotas {
            if quota > 0 {
                offered.insert(code, quota);
            }
        }
        for (code, expected) in offered {
            let realized = entry.lv2_histogram.get(code).copied().unwrap_or(0)
                + entry.opt_histogram.get(code).copied().unwrap_or(0);
            quota_deviations.push(QuotaDeviation {
                class: class.name.clone(),
                code: code.to_string(),
                expected,
                realized,
                deviation: realized as i64 - expected as i64,
            });
        }

        classes.push(entry);
    }

    let mut universal_lv2: Vec<String> =
        snapshot.offerings.universal_lv2.iter().cloned().collect();
    universal_lv2.sort();

    AuditReport {
        classes,
        universal_lv2,
        lv2_violations,
        opt_violations,
        quota_deviations,
    }
}
