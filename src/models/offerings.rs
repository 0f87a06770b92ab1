//! Elective offering model.
//!
//! Each destination class is equipped to teach a set of second
//! languages and options, with a numeric quota per code. A positive
//! quota is both the offering test and the expected count used by the
//! audit. The derived universal set contains the LV2 codes every class
//! offers; those never restrict placement.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::codes::{is_known_lv2, is_known_opt, KNOWN_LV2};

/// Elective quotas for one destination class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassOffering {
    /// Second-language code to quota.
    pub lv2_quotas: HashMap<String, u32>,
    /// Option code to quota.
    pub opt_quotas: HashMap<String, u32>,
}

impl ClassOffering {
    /// Creates an empty offering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a second-language quota.
    pub fn with_lv2(mut self, code: impl Into<String>, quota: u32) -> Self {
        self.lv2_quotas.insert(code.into(), quota);
        self
    }

    /// Adds an option quota.
    pub fn with_opt(mut self, code: impl Into<String>, quota: u32) -> Self {
        self.opt_quotas.insert(code.into(), quota);
        self
    }

    /// Whether the class offers a second language (positive quota).
    pub fn offers_lv2(&self, code: &str) -> bool {
        self.lv2_quotas.get(code).copied().unwrap_or(0) > 0
    }

    /// Whether the class offers an option (positive quota).
    pub fn offers_opt(&self, code: &str) -> bool {
        self.opt_quotas.get(code).copied().unwrap_or(0) > 0
    }

    /// Whether a student with the given elective codes could sit here.
    ///
    /// Unknown or empty codes never restrict admission.
    pub fn admits(&self, lv2: &str, opt: &str) -> bool {
        let lv2_ok = !is_known_lv2(lv2) || self.offers_lv2(lv2);
        let opt_ok = !is_known_opt(opt) || self.offers_opt(opt);
        lv2_ok && opt_ok
    }
}

/// Per-class offerings plus the derived universal-LV2 set.
///
/// The offering list is parallel to the snapshot's class list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Offerings {
    /// Offering per class, in class order.
    pub classes: Vec<ClassOffering>,
    /// Second-language codes offered by every class.
    pub universal_lv2: HashSet<String>,
}

impl Offerings {
    /// Builds offerings from a list of per-class offerings, deriving
    /// the universal set.
    pub fn new(classes: Vec<ClassOffering>) -> Self {
        let universal_lv2 = derive_universal(&classes);
        Self {
            classes,
            universal_lv2,
        }
    }

    /// Whether an LV2 code is offered everywhere.
    pub fn is_universal(&self, code: &str) -> bool {
        self.universal_lv2.contains(code)
    }

    /// Number of classes admitting the given elective pair.
    pub fn admissible_count(&self, lv2: &str, opt: &str) -> usize {
        self.classes.iter().filter(|o| o.admits(lv2, opt)).count()
    }
}

fn derive_universal(classes: &[ClassOffering]) -> HashSet<String> {
    if classes.is_empty() {
        return HashSet::new();
    }
    KNOWN_LV2
        .iter()
        .filter(|code| classes.iter().all(|o| o.offers_lv2(code)))
        .map(|code| code.to_string())
        .collect()
}

/// Derives offerings from raw per-class quota maps.
///
/// Raw quotas mix LV2 and OPT codes in a single `code -> quota` map per
/// class name; the classifier lists decide which table each code lands
/// in. Codes recognized by neither list are dropped. Classes without an
/// entry in `quotas_by_class` get an empty offering.
pub fn build_offerings(
    quotas_by_class: &HashMap<String, HashMap<String, u32>>,
    class_names: &[String],
) -> Offerings {
    let classes = class_names
        .iter()
        .map(|name| {
            let mut offering = ClassOffering::new();
            if let Some(quotas) = quotas_by_class.get(name) {
                for (code, &quota) in quotas {
                    if is_known_lv2(code) {
                        offering.lv2_quotas.insert(code.clone(), quota);
                    } else if is_known_opt(code) {
                        offering.opt_quotas.insert(code.clone(), quota);
                    }
                }
            }
            offering
        })
        .collect();
    Offerings::new(classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotas(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs
            .iter()
            .map(|(c, q)| (c.to_string(), *q))
            .collect()
    }

    #[test]
    fn test_offering_predicates() {
        let o = ClassOffering::new().with_lv2("ESP", 12).with_opt("LATIN", 8);
        assert!(o.offers_lv2("ESP"));
        assert!(!o.offers_lv2("ITA"));
        assert!(o.offers_opt("LATIN"));
        assert!(!o.offers_opt("CHAV"));
    }

    #[test]
    fn test_zero_quota_is_not_offered() {
        let o = ClassOffering::new().with_lv2("ITA", 0);
        assert!(!o.offers_lv2("ITA"));
    }

    #[test]
    fn test_admits() {
        let o = ClassOffering::new().with_lv2("ESP", 10).with_opt("LATIN", 5);
        assert!(o.admits("ESP", "LATIN"));
        assert!(o.admits("", ""));
        // Unknown codes never restrict.
        assert!(o.admits("JPN", "THEATRE"));
        assert!(!o.admits("ITA", ""));
        assert!(!o.admits("ESP", "CHAV"));
    }

    #[test]
    fn test_build_offerings_splits_codes() {
        let mut by_class = HashMap::new();
        by_class.insert(
            "6A".to_string(),
            quotas(&[("ESP", 20), ("LATIN", 8), ("XYZ", 3)]),
        );
        let names = vec!["6A".to_string(), "6B".to_string()];
        let offerings = build_offerings(&by_class, &names);

        assert_eq!(offerings.classes.len(), 2);
        assert!(offerings.classes[0].offers_lv2("ESP"));
        assert!(offerings.classes[0].offers_opt("LATIN"));
        // Unrecognized code is dropped.
        assert!(!offerings.classes[0].lv2_quotas.contains_key("XYZ"));
        assert!(!offerings.classes[0].opt_quotas.contains_key("XYZ"));
        // Missing class gets an empty offering.
        assert!(offerings.classes[1].lv2_quotas.is_empty());
    }

    #[test]
    fn test_universal_lv2() {
        let mut by_class = HashMap::new();
        by_class.insert("A".to_string(), quotas(&[("ESP", 20), ("ITA", 5)]));
        by_class.insert("B".to_string(), quotas(&[("ESP", 18)]));
        let names = vec!["A".to_string(), "B".to_string()];
        let offerings = build_offerings(&by_class, &names);

        // ESP is offered by both classes, ITA only by A.
        assert!(offerings.is_universal("ESP"));
        assert!(!offerings.is_universal("ITA"));
    }

    #[test]
    fn test_universal_empty_without_classes() {
        let offerings = Offerings::new(Vec::new());
        assert!(offerings.universal_lv2.is_empty());
    }

    #[test]
    fn test_admissible_count() {
        let a = ClassOffering::new().with_lv2("ITA", 4);
        let b = ClassOffering::new().with_lv2("ESP", 20);
        let offerings = Offerings::new(vec![a, b]);

        assert_eq!(offerings.admissible_count("ITA", ""), 1);
        assert_eq!(offerings.admissible_count("ESP", ""), 1);
        assert_eq!(offerings.admissible_count("", ""), 2);
    }
}
