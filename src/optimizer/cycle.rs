//! Three-way cycle swap phase.
//!
//! Runs after the pairwise search converges. Exchanges can get stuck
//! where only a rotation of three students across three classes
//! improves the assignment; this phase samples such rotations.
//!
//! Feasibility is checked with the pair predicate on the first two
//! legs only; the third leg follows by construction and is not checked
//! separately. This mirrors the historical behavior and is a known
//! simplification.
//!
//! # Reference
//! Lin & Kernighan (1973) popularized escaping 2-exchange optima with
//! deeper moves.

use rand::seq::index;
use rand::Rng;

use super::cost::CostModel;
use super::driver::GAIN_EPSILON;
use crate::config::OptimizerConfig;
use crate::models::Snapshot;
use crate::oracle::Oracle;

/// Cap on phase rounds.
const MAX_ROUNDS: usize = 200;
/// Class triples sampled per round.
const TRIPLE_SAMPLES: usize = 15;
/// Student triples sampled per class triple.
const MEMBER_SAMPLES: usize = 10;

/// A rotation of three membership slots: the first student moves to
/// the second class, the second to the third, the third to the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// (class, slot) per leg.
    pub slots: [(usize, usize); 3],
    /// Cost improvement when applied.
    pub gain: f64,
}

/// Runs the rotation phase until a full round finds no improvement.
///
/// Returns the number of rotations applied.
pub fn run_cycle_phase<R: Rng>(
    snapshot: &mut Snapshot,
    config: &OptimizerConfig,
    rng: &mut R,
) -> u32 {
    if snapshot.classes.len() < 3 {
        return 0;
    }

    let stats = crate::models::CohortStats::compute(&snapshot.students);
    let mut applied = 0u32;

    for _ in 0..MAX_ROUNDS {
        let best = {
            let model = CostModel::new(&snapshot.students, stats, config);
            best_rotation(snapshot, &model, config, rng)
        };
        match best {
            Some(rotation) if rotation.gain > GAIN_EPSILON => {
                apply_rotation(snapshot, &rotation);
                applied += 1;
            }
            _ => break,
        }
    }
    applied
}

/// Best improving rotation across one round of sampling.
fn best_rotation<R: Rng>(
    snapshot: &Snapshot,
    model: &CostModel<'_>,
    config: &OptimizerConfig,
    rng: &mut R,
) -> Option<Rotation> {
    let oracle = Oracle::new(snapshot, config);
    let n = snapshot.classes.len();
    let mut best: Option<Rotation> = None;

    for _ in 0..TRIPLE_SAMPLES {
        let triple = index::sample(rng, n, 3);
        let (c1, c2, c3) = (triple.index(0), triple.index(1), triple.index(2));
        if snapshot.classes[c1].is_empty()
            || snapshot.classes[c2].is_empty()
            || snapshot.classes[c3].is_empty()
        {
            continue;
        }

        for _ in 0..MEMBER_SAMPLES {
            let p1 = rng.random_range(0..snapshot.classes[c1].members.len());
            let p2 = rng.random_range(0..snapshot.classes[c2].members.len());
            let p3 = rng.random_range(0..snapshot.classes[c3].members.len());

            let movable = [(c1, p1), (c2, p2), (c3, p3)].iter().all(|&(c, p)| {
                snapshot.students[snapshot.member(c, p)].is_movable()
            });
            if !movable {
                continue;
            }
            if !oracle.can_swap(c1, p1, c2, p2) || !oracle.can_swap(c2, p2, c3, p3) {
                continue;
            }

            let slots = [(c1, p1), (c2, p2), (c3, p3)];
            let gain = model.rotation_gain(&snapshot.classes, slots);
            if gain > 0.0 && best.map_or(true, |b| gain > b.gain) {
                best = Some(Rotation { slots, gain });
            }
        }
    }
    best
}

/// Applies a rotation in place.
fn apply_rotation(snapshot: &mut Snapshot, rotation: &Rotation) {
    let [(c1, p1), (c2, p2), (c3, p3)] = rotation.slots;
    let a = snapshot.classes[c1].members[p1];
    let b = snapshot.classes[c2].members[p2];
    let c = snapshot.classes[c3].members[p3];
    snapshot.classes[c2].members[p2] = a;
    snapshot.classes[c3].members[p3] = b;
    snapshot.classes[c1].members[p1] = c;
}
