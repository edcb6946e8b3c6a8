//! Crossing counters: three interchangeable algorithms that must
//! agree bit-for-bit on every valid embedding. The
//! [`Embedding`] resolves to one of them once, via
//! [`crate::embedding::CounterKind`]; all three remain independently
//! callable (used by tests and by anything cross-checking results).

pub mod divide_conquer;
pub mod pairwise;
pub mod sweep;

use crate::embedding::{CounterKind, Embedding};

/// Total crossing count using the embedding's configured counter.
pub fn count_crossings(emb: &Embedding) -> u64 {
    match emb.counter_kind() {
        CounterKind::Pairwise => pairwise::count(emb),
        CounterKind::Sweep => sweep::count(emb),
        CounterKind::DivideAndConquer => divide_conquer::count(emb),
    }
}

/// Crossings restricted to a single page, using the embedding's configured
/// counter.
pub fn count_crossings_on_page(emb: &Embedding, page: usize) -> u64 {
    match emb.counter_kind() {
        CounterKind::Pairwise => pairwise::count_on_page(emb, page),
        CounterKind::Sweep => sweep::count_on_page(emb, page),
        CounterKind::DivideAndConquer => divide_conquer::count_on_page(emb, page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::CounterKind;
    use crate::graph::Graph;
    use crate::problem::Problem;
    use crate::rng::{RandomSource, ThreadRandomSource};
    use std::rc::Rc;

    fn all_counters_agree(emb: &Embedding) -> (u64, u64, u64) {
        (pairwise::count(emb), sweep::count(emb), divide_conquer::count(emb))
    }

    /// S1 — K4 on 2 pages, optimum 0. Under the identity spine the only
    /// interleaving pair among K4's edges (in the order listed in the
    /// scenario) is the two diagonals `(0,2)` and `(1,3)` (edge indices 1
    /// and 4): they must land on different pages for zero crossings. The
    /// scenario's literal `distribution` array places both on page 1 (see
    /// DESIGN.md), so this uses the corrected distribution that actually
    /// realizes the stated optimum of 0.
    #[test]
    fn s1_k4_two_pages() {
        let g = Graph::from_edges(4, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        let problem = Rc::new(Problem::new(g, 2).unwrap());
        let mut emb = Embedding::new(problem);
        emb.set_distribution(vec![0, 1, 1, 0, 0, 0]);
        let (p, s, d) = all_counters_agree(&emb);
        assert_eq!((p, s, d), (0, 0, 0));
    }

    /// S3 — Path P_6, 1 page, optimum 0.
    #[test]
    fn s3_path_one_page() {
        let g = Graph::from_edges(6, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        let problem = Rc::new(Problem::new(g, 1).unwrap());
        let emb = Embedding::new(problem);
        let (p, s, d) = all_counters_agree(&emb);
        assert_eq!((p, s, d), (0, 0, 0));
    }

    /// S4 — C6 on 1 page with an adversarial spine. Applying
    /// `positions_interleave` literally to this spine and the standard
    /// 6-cycle edge set yields 5 interleaving pairs — see DESIGN.md for
    /// how that figure was derived. What matters here is that all three
    /// counters agree with each other and with direct application of the
    /// predicate, which this asserts.
    #[test]
    fn s4_c6_adversarial_spine() {
        let g = Graph::from_edges(6, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]).unwrap();
        let problem = Rc::new(Problem::new(g, 1).unwrap());
        let mut emb = Embedding::new(problem);
        emb.set_spine(vec![0, 3, 1, 4, 2, 5]);
        let (p, s, d) = all_counters_agree(&emb);
        assert_eq!((p, s, d), (5, 5, 5));
    }

    /// S2 — K5 on 2 pages: best distribution should yield exactly 1 crossing,
    /// verified by brute force over the small distribution space.
    #[test]
    fn s2_k5_two_pages_best_is_one() {
        let g = Graph::from_edges(5, vec![(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]).unwrap();
        let problem = Rc::new(Problem::new(g, 2).unwrap());
        let mut emb = Embedding::new(problem);
        let m = emb.edge_count();
        let mut best = u64::MAX;
        for mask in 0..(1u32 << m) {
            let dist: Vec<i32> = (0..m).map(|i| ((mask >> i) & 1) as i32).collect();
            emb.set_distribution(dist);
            best = best.min(emb.crossings());
        }
        assert_eq!(best, 1);
    }

    /// S6 — divide-and-conquer vs pairwise on random graphs.
    #[test]
    fn s6_random_graphs_agree() {
        let mut rng = ThreadRandomSource::seeded(2024);
        for &n in &[8usize, 16, 32] {
            for &k in &[2usize, 3, 4] {
                for _trial in 0..6 {
                    let mut edges = Vec::new();
                    for i in 0..n {
                        for j in (i + 1)..n {
                            if rng.uniform_f64() < 0.3 {
                                edges.push((i, j));
                            }
                        }
                    }
                    let g = Graph::from_edges(n, edges).unwrap();
                    let problem = Rc::new(Problem::new(g, k).unwrap());
                    let mut emb = Embedding::new(problem);
                    let spine = rng.permutation(n);
                    emb.set_spine(spine);
                    let m = emb.edge_count();
                    let dist: Vec<i32> = (0..m).map(|_| rng.uniform_usize(k) as i32).collect();
                    emb.set_distribution(dist);
                    let pw = pairwise::count(&emb);
                    let dc = divide_conquer::count(&emb);
                    assert_eq!(pw, dc, "n={} k={} spine={:?}", n, k, emb.spine());
                }
            }
        }
    }

    /// S5 — swap-gain closed form on K5. Exhaustively covering every spine
    /// permutation (120) against all 1024 two-page distributions is over
    /// 100k swap checks; sampling a handful of distributions per
    /// permutation under a fixed seed keeps this a unit test rather than a
    /// benchmark while still exercising every permutation.
    #[test]
    fn s5_swap_gain_closed_form_on_k5() {
        use crate::optimize::swap_gain::swap_gain;
        use itertools::Itertools;

        let g = Graph::from_edges(
            5,
            vec![(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)],
        )
        .unwrap();
        let problem = Rc::new(Problem::new(g, 2).unwrap());
        let mut emb = Embedding::new(problem);
        let m = emb.edge_count();
        let mut rng = ThreadRandomSource::seeded(2026);

        for spine in (0..5).permutations(5) {
            emb.set_spine(spine);
            for _ in 0..8 {
                let dist: Vec<i32> = (0..m).map(|_| rng.uniform_usize(2) as i32).collect();
                emb.set_distribution(dist);
                for p in 0..5 {
                    let before = pairwise::count(&emb);
                    let gain = swap_gain(&emb, p);
                    let q = (p + 1) % 5;
                    emb.swap_positions(p, q);
                    let after = pairwise::count(&emb);
                    assert_eq!(after as i64, before as i64 - gain);
                    emb.swap_positions(p, q);
                }
            }
        }
    }

    #[test]
    fn counter_kind_dispatch_matches_direct_calls() {
        let g = Graph::from_edges(6, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]).unwrap();
        let problem = Rc::new(Problem::new(g, 1).unwrap());
        let mut emb = Embedding::new(problem);
        emb.set_spine(vec![0, 3, 1, 4, 2, 5]);
        for kind in [CounterKind::Pairwise, CounterKind::Sweep, CounterKind::DivideAndConquer] {
            let e = emb.clone().with_counter(kind);
            assert_eq!(count_crossings(&e), 5);
        }
    }
}
