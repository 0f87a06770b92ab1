//! Worst-class identification and partner selection.
//!
//! The search always works on the highest-cost class and a partner
//! whose surpluses mirror its deficits. A small exploration rate
//! replaces the heuristic pick with a uniform draw so the search does
//! not lock onto a single pair.
//!
//! # Reference
//! Hoos & Stutzle (2005), "Stochastic Local Search", Ch. 2 (noise
//! strategies)

use rand::prelude::IndexedRandom;
use rand::Rng;

use super::cost::CostModel;
use crate::config::OptimizerConfig;
use crate::models::Class;

/// Profile deviations of one class against the configured targets.
#[derive(Debug, Clone, Copy)]
struct Deviations {
    heads: f64,
    low: f64,
    gender: f64,
    com: f64,
}

fn deviations(model: &CostModel<'_>, class: &Class, config: &OptimizerConfig) -> Deviations {
    let members = &class.members;
    Deviations {
        heads: model.head_count(members) as f64 - config.head_min as f64,
        low: model.low_count(members) as f64 - config.niv1_max as f64,
        gender: model.ratio_f(members) - model.stats().ratio_f,
        com: model.mean(members, crate::models::Student::com_score) - model.stats().mean_com,
    }
}

/// Index and score of the highest-cost class.
///
/// Ties break on iteration order, so a stable class ordering gives a
/// deterministic pick. `None` only when there are no classes.
pub fn worst_class(model: &CostModel<'_>, classes: &[Class]) -> Option<(usize, f64)> {
    let mut worst: Option<(usize, f64)> = None;
    for (idx, class) in classes.iter().enumerate() {
        let score = model.class_score(class);
        match worst {
            Some((_, best)) if score <= best => {}
            _ => worst = Some((idx, score)),
        }
    }
    worst
}

/// Picks a partner for the worst class.
///
/// Scores every other class by complementarity: large opposing
/// head-profile and low-tier deviations, plus bonuses when the gender
/// ratios or communication means straddle the cohort mean. With
/// probability `exploration_rate` a uniformly random other class is
/// returned instead.
///
/// Returns `None` iff the worst class is the only one.
pub fn select_partner<R: Rng>(
    model: &CostModel<'_>,
    classes: &[Class],
    worst: usize,
    config: &OptimizerConfig,
    rng: &mut R,
) -> Option<usize> {
    if classes.len() < 2 {
        return None;
    }

    let others: Vec<usize> = (0..classes.len()).filter(|&i| i != worst).collect();
    if rng.random_bool(config.exploration_rate) {
        return others.choose(rng).copied();
    }

    let w = deviations(model, &classes[worst], config);
    let mut best: Option<(usize, f64)> = None;
    for &idx in &others {
        let c = deviations(model, &classes[idx], config);
        let mut complementarity =
            3.0 * (w.heads - c.heads).abs() + 3.0 * (w.low - c.low).abs();
        if w.gender * c.gender < 0.0 {
            complementarity += 2.0;
        }
        if w.com * c.com < 0.0 {
            complementarity += 2.0 * (w.com - c.com).abs();
        }
        match best {
            Some((_, top)) if complementarity <= top => {}
            _ => best = Some((idx, complementarity)),
        }
    }
    best.map(|(idx, _)| idx)
}
