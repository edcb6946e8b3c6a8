//! Greedy local-search optimizers: per-edge and per-vertex best-placement
//! primitives, and the two optimizers built from them.

use super::harness::{OptimizerHarness, Termination};
use super::swap_gain::swap_gain;
use crate::embedding::Embedding;
use crate::error::{CoreError, CoreResult};
use crate::rng::RandomSource;

/// Moves `edge` to whichever page minimizes the crossings it contributes
/// against every other already-placed edge, breaking ties toward the
/// lowest page index. Returns the gain (crossings removed).
pub fn best_page_for_edge(emb: &mut Embedding, edge: usize) -> i64 {
    let k = emb.pages();
    let m = emb.edge_count();
    let current_page = emb.page_of(edge);

    let mut page_counts = vec![0u64; k];
    for other in 0..m {
        if other == edge {
            continue;
        }
        if let Some(op) = emb.page_of(other) {
            if emb.can_edges_cross(edge, other) {
                page_counts[op] += 1;
            }
        }
    }
    let old_cost = current_page.map(|p| page_counts[p]).unwrap_or(0);
    let (best_page, best_cost) = (0..k).map(|p| (p, page_counts[p])).min_by_key(|&(_, c)| c).unwrap();
    let gain = old_cost as i64 - best_cost as i64;

    let cached_before = if emb.is_cache_valid() { Some(emb.crossings()) } else { None };
    if Some(best_page) != current_page {
        emb.move_edge_to_page(edge, Some(best_page));
        if let Some(before) = cached_before {
            emb.set_cached_crossings((before as i64 - gain).max(0) as u64);
        }
    }
    gain
}

/// Sweeps `v` across every other spine position using the swap-gain
/// micro-kernel (right, then left, from its starting position), and leaves
/// it at whichever position accumulated the best cumulative gain. Returns
/// that gain (0 if `v` stays put).
pub fn best_position_for_vertex(emb: &mut Embedding, v: usize) -> i64 {
    let n = emb.vertex_count();
    if n < 2 {
        return 0;
    }
    let start_pos = emb.pos(v);
    let cached_before = if emb.is_cache_valid() { Some(emb.crossings()) } else { None };

    let mut best_gain = 0i64;
    let mut best_offset: i64 = 0;

    // Sweep right.
    let mut cumulative = 0i64;
    let mut pos = start_pos;
    for step in 1..n {
        let gain = swap_gain(emb, pos);
        cumulative += gain;
        let q = (pos + 1) % n;
        emb.swap_positions(pos, q);
        pos = q;
        if cumulative > best_gain {
            best_gain = cumulative;
            best_offset = step as i64;
        }
    }
    // Undo back to the start.
    while pos != start_pos {
        let prev = (pos + n - 1) % n;
        emb.swap_positions(prev, pos);
        pos = prev;
    }

    // Sweep left.
    cumulative = 0;
    pos = start_pos;
    for step in 1..n {
        let prev = (pos + n - 1) % n;
        let gain = swap_gain(emb, prev);
        cumulative += gain;
        emb.swap_positions(prev, pos);
        pos = prev;
        if cumulative > best_gain {
            best_gain = cumulative;
            best_offset = -(step as i64);
        }
    }
    // Undo back to the start.
    while pos != start_pos {
        let next = (pos + 1) % n;
        emb.swap_positions(pos, next);
        pos = next;
    }

    if best_offset > 0 {
        for _ in 0..best_offset {
            let p = emb.pos(v);
            let q = (p + 1) % n;
            emb.swap_positions(p, q);
        }
    } else if best_offset < 0 {
        for _ in 0..(-best_offset) {
            let p = emb.pos(v);
            let prev = (p + n - 1) % n;
            emb.swap_positions(prev, p);
        }
    }

    if let Some(before) = cached_before {
        emb.set_cached_crossings((before as i64 - best_gain).max(0) as u64);
    }
    best_gain
}

fn optimize_incident_edges(emb: &mut Embedding, v: usize) -> i64 {
    let edges: Vec<usize> = emb.problem().graph().vertex(v).incident_edges().to_vec();
    edges.into_iter().map(|e| best_page_for_edge(emb, e)).sum()
}

/// One round: a full best-position-for-vertex pass followed by a full
/// best-page-for-edge pass, each over a freshly shuffled order.
pub fn two_step_round(emb: &mut Embedding, rng: &mut impl RandomSource) -> i64 {
    let n = emb.vertex_count();
    let m = emb.edge_count();
    let mut vertex_order: Vec<usize> = (0..n).collect();
    rng.shuffle(&mut vertex_order);
    let mut edge_order: Vec<usize> = (0..m).collect();
    rng.shuffle(&mut edge_order);

    let mut total_gain = 0i64;
    for v in vertex_order {
        total_gain += best_position_for_vertex(emb, v);
    }
    for e in edge_order {
        total_gain += best_page_for_edge(emb, e);
    }
    total_gain
}

/// One round: for each vertex in random order, re-page its incident edges,
/// try relocating it (via the swap-gain sweep), then re-page its incident
/// edges again at the new position.
pub fn combined_round(emb: &mut Embedding, rng: &mut impl RandomSource) -> i64 {
    let n = emb.vertex_count();
    let mut order: Vec<usize> = (0..n).collect();
    rng.shuffle(&mut order);

    let mut total_gain = 0i64;
    for v in order {
        total_gain += optimize_incident_edges(emb, v);
        total_gain += best_position_for_vertex(emb, v);
        total_gain += optimize_incident_edges(emb, v);
    }
    total_gain
}

fn check_invariant(harness: &OptimizerHarness, known_optimum: Option<u64>) -> CoreResult<()> {
    if let Some(target) = known_optimum {
        if harness.best_crossings() < target {
            return Err(CoreError::invariant(format!(
                "crossings {} fell below the known optimum {}",
                harness.best_crossings(),
                target
            )));
        }
    }
    Ok(())
}

fn budget_or_optimum(harness: &OptimizerHarness, known_optimum: Option<u64>) -> Option<Termination> {
    if harness.reached_known_optimum(known_optimum) {
        Some(Termination::OptimumReached)
    } else if harness.budget_exceeded() {
        Some(Termination::BudgetExceeded)
    } else {
        None
    }
}

/// Runs the two-step optimizer to termination: a round with zero gain, the
/// known optimum reached, or the harness's wall-clock budget exceeded.
pub fn run_two_step(
    emb: &mut Embedding,
    rng: &mut impl RandomSource,
    harness: &mut OptimizerHarness,
    known_optimum: Option<u64>,
) -> CoreResult<Termination> {
    log::info!("two-step optimizer starting, current best {}", harness.best_crossings());
    let termination = loop {
        if let Some(t) = budget_or_optimum(harness, known_optimum) {
            break t;
        }
        let gain = two_step_round(emb, rng);
        harness.record_iteration();
        harness.set_local_best(emb);
        log::debug!("round {} gain {} current best {}", harness.iterations(), gain, harness.best_crossings());
        check_invariant(harness, known_optimum)?;
        if gain <= 0 {
            break Termination::Converged;
        }
    };
    log::info!("two-step optimizer done after {} rounds, best {}", harness.iterations(), harness.best_crossings());
    Ok(termination)
}

/// Runs the combined optimizer to the same termination conditions.
pub fn run_combined(
    emb: &mut Embedding,
    rng: &mut impl RandomSource,
    harness: &mut OptimizerHarness,
    known_optimum: Option<u64>,
) -> CoreResult<Termination> {
    log::info!("combined optimizer starting, current best {}", harness.best_crossings());
    let termination = loop {
        if let Some(t) = budget_or_optimum(harness, known_optimum) {
            break t;
        }
        let gain = combined_round(emb, rng);
        harness.record_iteration();
        harness.set_local_best(emb);
        log::debug!("round {} gain {} current best {}", harness.iterations(), gain, harness.best_crossings());
        check_invariant(harness, known_optimum)?;
        if gain <= 0 {
            break Termination::Converged;
        }
    };
    log::info!("combined optimizer done after {} rounds, best {}", harness.iterations(), harness.best_crossings());
    Ok(termination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptimizerBudget;
    use crate::graph::Graph;
    use crate::problem::Problem;
    use crate::rng::ThreadRandomSource;
    use std::rc::Rc;

    fn k5_embedding() -> Embedding {
        let g = Graph::from_edges(
            5,
            vec![(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)],
        )
        .unwrap();
        let problem = Rc::new(Problem::new(g, 2).unwrap().with_known_optimum(1));
        Embedding::new(problem)
    }

    #[test]
    fn best_page_for_edge_never_increases_crossings() {
        let mut emb = k5_embedding();
        let before = emb.crossings();
        let _ = best_page_for_edge(&mut emb, 0);
        assert!(emb.crossings() <= before);
    }

    #[test]
    fn best_position_for_vertex_never_increases_crossings() {
        let mut emb = k5_embedding();
        let before = emb.crossings();
        let _ = best_position_for_vertex(&mut emb, 2);
        assert!(emb.crossings() <= before);
    }

    #[test]
    fn two_step_round_is_monotone_non_increasing() {
        let mut emb = k5_embedding();
        let mut rng = ThreadRandomSource::seeded(7);
        let before = emb.crossings();
        two_step_round(&mut emb, &mut rng);
        assert!(emb.crossings() <= before);
    }

    #[test]
    fn combined_round_is_monotone_non_increasing() {
        let mut emb = k5_embedding();
        let mut rng = ThreadRandomSource::seeded(8);
        let before = emb.crossings();
        combined_round(&mut emb, &mut rng);
        assert!(emb.crossings() <= before);
    }

    #[test]
    fn combined_optimizer_reaches_k5_known_optimum() {
        let _ = env_logger::try_init();
        let mut emb = k5_embedding();
        let mut rng = ThreadRandomSource::seeded(123);
        let known_optimum = emb.problem().known_optimum();
        let mut harness = OptimizerHarness::new(&emb, OptimizerBudget::default());
        run_combined(&mut emb, &mut rng, &mut harness, known_optimum).unwrap();
        assert!(harness.best_crossings() <= 1);
    }
}
