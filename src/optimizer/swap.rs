//! Two-way swap search.
//!
//! Samples candidate pairs between two classes, filters them through
//! the feasibility oracle, and keeps the best positive-gain exchange.
//! Best-improvement within the sample, not the full neighborhood: the
//! sample cap keeps each iteration cheap on large classes.

use rand::seq::index;
use rand::Rng;

use super::cost::CostModel;
use crate::config::OptimizerConfig;
use crate::models::Snapshot;
use crate::oracle::Oracle;

/// An applicable exchange of two membership slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMove {
    /// First class.
    pub class_a: usize,
    /// Slot in the first class.
    pub pos_a: usize,
    /// Second class.
    pub class_b: usize,
    /// Slot in the second class.
    pub pos_b: usize,
    /// Cost improvement when applied.
    pub gain: f64,
}

/// Searches sampled pairs between two classes for the best improving
/// exchange.
///
/// Up to `sample_size` distinct slots are drawn from each side. Fixed
/// students and oracle-refused pairs are skipped. Returns `None` when
/// no sampled pair improves the cost.
pub fn find_best_swap<R: Rng>(
    snapshot: &Snapshot,
    model: &CostModel<'_>,
    config: &OptimizerConfig,
    class_a: usize,
    class_b: usize,
    rng: &mut R,
) -> Option<SwapMove> {
    let len_a = snapshot.classes[class_a].members.len();
    let len_b = snapshot.classes[class_b].members.len();
    if len_a == 0 || len_b == 0 {
        return None;
    }

    let picks_a = index::sample(rng, len_a, config.sample_size.min(len_a));
    let picks_b = index::sample(rng, len_b, config.sample_size.min(len_b));
    let oracle = Oracle::new(snapshot, config);

    let ca = &snapshot.classes[class_a];
    let cb = &snapshot.classes[class_b];
    let before = model.class_score(ca) + model.class_score(cb);

    let mut best: Option<SwapMove> = None;
    for pos_a in picks_a.iter() {
        let a = snapshot.member(class_a, pos_a);
        if !snapshot.students[a].is_movable() {
            continue;
        }
        for pos_b in picks_b.iter() {
            let b = snapshot.member(class_b, pos_b);
            if !snapshot.students[b].is_movable() {
                continue;
            }
            if !oracle.can_swap(class_a, pos_a, class_b, pos_b) {
                continue;
            }
            let mut ma = ca.members.clone();
            let mut mb = cb.members.clone();
            std::mem::swap(&mut ma[pos_a], &mut mb[pos_b]);
            let after = model.score_members(&ma, ca.target).total()
                + model.score_members(&mb, cb.target).total();
            let gain = before - after;
            if gain > 0.0 && best.map_or(true, |m| gain > m.gain) {
                best = Some(SwapMove {
                    class_a,
                    pos_a,
                    class_b,
                    pos_b,
                    gain,
                });
            }
        }
    }
    best
}

/// Exchanges the two membership slots in place.
pub fn apply_swap(snapshot: &mut Snapshot, mv: &SwapMove) {
    let a = snapshot.classes[mv.class_a].members[mv.pos_a];
    let b = snapshot.classes[mv.class_b].members[mv.pos_b];
    snapshot.classes[mv.class_a].members[mv.pos_a] = b;
    snapshot.classes[mv.class_b].members[mv.pos_b] = a;
}
