//! Optimizer harness: holds the best embedding an optimizer run has seen,
//! a wall-clock budget, and progress counters.

use crate::config::OptimizerBudget;
use crate::embedding::Embedding;
use std::time::{Duration, Instant};

/// Why an optimizer run stopped. Per §7, budget exhaustion and reaching a
/// known optimum are both normal termination, not errors — this is how
/// that distinction reaches the caller instead of an `Err`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    /// A full round/iteration produced zero gain.
    Converged,
    /// `crossings <= known_optimum`.
    OptimumReached,
    /// The wall-clock budget was exceeded before convergence.
    BudgetExceeded,
}

/// A deep-copy snapshot of the best embedding found, handed out by value so
/// external readers never observe a half-updated embedding.
pub struct BestSolution {
    pub embedding: Embedding,
    pub crossings: u64,
    pub iterations: u64,
    pub elapsed: Duration,
    pub termination: Termination,
}

pub struct OptimizerHarness {
    best: Embedding,
    best_crossings: u64,
    budget: OptimizerBudget,
    start: Instant,
    iterations: u64,
}

impl OptimizerHarness {
    pub fn new(initial: &Embedding, budget: OptimizerBudget) -> Self {
        let crossings = initial.crossings();
        Self { best: initial.deep_copy(), best_crossings: crossings, budget, start: Instant::now(), iterations: 0 }
    }

    pub fn best_crossings(&self) -> u64 {
        self.best_crossings
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Copies `candidate` into the snapshot only when it is strictly better
    /// than what is currently held.
    pub fn set_local_best(&mut self, candidate: &Embedding) {
        let c = candidate.crossings();
        if c < self.best_crossings {
            log::trace!("local best improved {} -> {}", self.best_crossings, c);
            self.best_crossings = c;
            self.best = candidate.deep_copy();
        }
    }

    pub fn budget_exceeded(&self) -> bool {
        self.start.elapsed() >= self.budget.wall_clock
    }

    pub fn reached_known_optimum(&self, known_optimum: Option<u64>) -> bool {
        known_optimum.map_or(false, |target| self.best_crossings <= target)
    }

    pub fn snapshot(&self, termination: Termination) -> BestSolution {
        BestSolution {
            embedding: self.best.deep_copy(),
            crossings: self.best_crossings,
            iterations: self.iterations,
            elapsed: self.start.elapsed(),
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::problem::Problem;
    use std::rc::Rc;

    fn embedding() -> Embedding {
        let g = Graph::from_edges(4, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        let problem = Rc::new(Problem::new(g, 2).unwrap());
        Embedding::new(problem)
    }

    #[test]
    fn set_local_best_only_copies_strict_improvements() {
        let mut harness = OptimizerHarness::new(&embedding(), OptimizerBudget::default());
        let worse = embedding();
        let mut worse = worse;
        worse.set_distribution(vec![0, 0, 0, 0, 0, 0]);
        let before = harness.best_crossings();
        harness.set_local_best(&worse);
        assert_eq!(harness.best_crossings(), before.min(worse.crossings()));

        let mut better = embedding();
        better.set_distribution(vec![0, 1, 1, 0, 0, 0]);
        harness.set_local_best(&better);
        assert_eq!(harness.best_crossings(), 0);
    }

    #[test]
    fn snapshot_is_independent_of_later_harness_mutation() {
        let mut harness = OptimizerHarness::new(&embedding(), OptimizerBudget::default());
        let snap = harness.snapshot(Termination::Converged);
        let mut better = embedding();
        better.set_distribution(vec![0, 1, 1, 0, 0, 0]);
        harness.set_local_best(&better);
        assert_eq!(snap.crossings, embedding().crossings());
        assert_eq!(snap.termination, Termination::Converged);
    }
}
