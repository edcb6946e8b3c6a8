//! Simulated-annealing optimizer: a fixed 980-iteration schedule, four
//! nested move types per iteration, each accepted or rejected by a
//! Boltzmann criterion against the iteration's temperature.

use super::greedy::{best_page_for_edge, best_position_for_vertex};
use super::harness::{OptimizerHarness, Termination};
use super::swap_gain::swap_gain;
use crate::config::AnnealingSchedule;
use crate::embedding::Embedding;
use crate::rng::RandomSource;

fn accept(delta: i64, temperature: f64, rng: &mut impl RandomSource) -> bool {
    if delta <= 0 {
        return true;
    }
    rng.uniform_f64() < (-(delta as f64) / temperature).exp()
}

fn edge_cost_on_page(emb: &Embedding, edge: usize, page: usize) -> u64 {
    let m = emb.edge_count();
    (0..m)
        .filter(|&other| other != edge && emb.page_of(other) == Some(page) && emb.can_edges_cross(edge, other))
        .count() as u64
}

/// Picks a random edge and a uniformly random *different* page for it;
/// accepts immediately on non-positive Δ, else by the Boltzmann criterion.
fn edge_repage_phase(emb: &mut Embedding, rng: &mut impl RandomSource, temperature: f64, harness: &mut OptimizerHarness) {
    let k = emb.pages();
    if k < 2 {
        return;
    }
    let m = emb.edge_count();
    for _ in 0..m {
        let edge = rng.uniform_usize(m);
        let current = match emb.page_of(edge) {
            Some(p) => p,
            None => continue,
        };
        let mut new_page = rng.uniform_usize(k);
        while new_page == current {
            new_page = rng.uniform_usize(k);
        }
        let old_cost = edge_cost_on_page(emb, edge, current);
        let new_cost = edge_cost_on_page(emb, edge, new_page);
        let delta = new_cost as i64 - old_cost as i64;
        if accept(delta, temperature, rng) {
            let cached_before = if emb.is_cache_valid() { Some(emb.crossings()) } else { None };
            emb.move_edge_to_page(edge, Some(new_page));
            if let Some(before) = cached_before {
                emb.set_cached_crossings((before as i64 + delta).max(0) as u64);
            }
            harness.set_local_best(emb);
        }
    }
}

/// Picks a random vertex and evaluates swap-gain against its cyclic right
/// neighbor; accepts on non-negative gain or by the Boltzmann criterion.
fn neighbor_swap_phase(emb: &mut Embedding, rng: &mut impl RandomSource, temperature: f64, harness: &mut OptimizerHarness) {
    let n = emb.vertex_count();
    if n < 2 {
        return;
    }
    let repeats = n * (n as f64).sqrt().floor() as usize;
    for _ in 0..repeats {
        let v = rng.uniform_usize(n);
        let p = emb.pos(v);
        let gain = swap_gain(emb, p);
        let delta = -gain;
        if accept(delta, temperature, rng) {
            let q = (p + 1) % n;
            let cached_before = if emb.is_cache_valid() { Some(emb.crossings()) } else { None };
            emb.swap_positions(p, q);
            if let Some(before) = cached_before {
                emb.set_cached_crossings((before as i64 - gain).max(0) as u64);
            }
            harness.set_local_best(emb);
        }
    }
}

/// Picks a random vertex and a random new position, moves it there, and
/// greedily re-pages its incident edges; on rejection restores both the
/// original position and the original distribution.
fn vertex_teleport_phase(emb: &mut Embedding, rng: &mut impl RandomSource, temperature: f64, harness: &mut OptimizerHarness) {
    let n = emb.vertex_count();
    if n < 2 {
        return;
    }
    for _ in 0..n {
        let v = rng.uniform_usize(n);
        let old_pos = emb.pos(v);
        let mut new_pos = rng.uniform_usize(n);
        while new_pos == old_pos {
            new_pos = rng.uniform_usize(n);
        }

        let snapshot_distribution = emb.distribution().to_vec();
        let before = emb.crossings();

        emb.move_vertex_to(old_pos, new_pos);
        let incident: Vec<usize> = emb.problem().graph().vertex(v).incident_edges().to_vec();
        for e in incident {
            let _ = best_page_for_edge(emb, e);
        }
        let after = emb.crossings();
        let delta = after as i64 - before as i64;

        if accept(delta, temperature, rng) {
            harness.set_local_best(emb);
        } else {
            emb.move_vertex_to(emb.pos(v), old_pos);
            emb.set_distribution(snapshot_distribution);
        }
    }
}

/// Applies best-position-for-vertex and then re-pages the moved vertex's
/// edges; this operator is itself non-worsening, so the Boltzmann check
/// here only ever confirms acceptance.
fn greedy_vertex_refine_phase(emb: &mut Embedding, rng: &mut impl RandomSource, temperature: f64, harness: &mut OptimizerHarness) {
    let n = emb.vertex_count();
    if n == 0 {
        return;
    }
    let repeats = n / 4 + 1;
    for _ in 0..repeats {
        let v = rng.uniform_usize(n);
        let before = emb.crossings();
        best_position_for_vertex(emb, v);
        let incident: Vec<usize> = emb.problem().graph().vertex(v).incident_edges().to_vec();
        for e in incident {
            let _ = best_page_for_edge(emb, e);
        }
        let after = emb.crossings();
        let delta = after as i64 - before as i64;
        if accept(delta, temperature, rng) {
            harness.set_local_best(emb);
        }
    }
}

/// Runs the full 980-iteration annealing schedule against `emb`, updating
/// `harness`'s local best after every accepted move.
pub fn run_annealing(
    emb: &mut Embedding,
    rng: &mut impl RandomSource,
    schedule: &AnnealingSchedule,
    harness: &mut OptimizerHarness,
) -> Termination {
    log::info!("annealing starting, {} iterations, current best {}", schedule.iterations, harness.best_crossings());
    let mut termination = Termination::Converged;
    for t in 1..=schedule.iterations {
        if harness.budget_exceeded() {
            log::warn!("annealing stopped at iteration {}/{}: wall-clock budget exceeded", t, schedule.iterations);
            termination = Termination::BudgetExceeded;
            break;
        }
        let temperature = schedule.temperature(t);
        edge_repage_phase(emb, rng, temperature, harness);
        neighbor_swap_phase(emb, rng, temperature, harness);
        vertex_teleport_phase(emb, rng, temperature, harness);
        greedy_vertex_refine_phase(emb, rng, temperature, harness);
        harness.record_iteration();
        log::debug!("iteration {} t={:.3} current best {}", t, temperature, harness.best_crossings());
    }
    log::info!("annealing done, best {}", harness.best_crossings());
    termination
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
        let problem = Rc::new(Problem::new(g, 2).unwrap());
        Embedding::new(problem)
    }

    #[test]
    fn annealing_never_leaves_the_harness_worse_than_the_start() {
        let _ = env_logger::try_init();
        let mut emb = k5_embedding();
        let start = emb.crossings();
        let mut rng = ThreadRandomSource::seeded(17);
        let schedule = AnnealingSchedule::new(50.0);
        let mut harness = OptimizerHarness::new(&emb, OptimizerBudget::default());
        run_annealing(&mut emb, &mut rng, &schedule, &mut harness);
        assert!(harness.best_crossings() <= start);
    }

    #[test]
    fn annealing_keeps_the_embedding_structurally_valid() {
        let mut emb = k5_embedding();
        let mut rng = ThreadRandomSource::seeded(23);
        let schedule = AnnealingSchedule::new(20.0);
        let mut harness = OptimizerHarness::new(&emb, OptimizerBudget::default());
        run_annealing(&mut emb, &mut rng, &schedule, &mut harness);
        emb.validate_invariants().unwrap();
    }
}
