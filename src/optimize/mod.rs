//! Local-search optimizers: the swap-gain micro-kernel, greedy hill
//! climbing built on it, the simulated-annealing loop, and the harness that
//! tracks best-so-far across either.

pub mod annealing;
pub mod greedy;
pub mod harness;
pub mod swap_gain;

use crate::config::{AnnealingSchedule, OptimizerBudget};
use crate::embedding::Embedding;
use crate::error::CoreResult;
use crate::rng::RandomSource;
use harness::{BestSolution, OptimizerHarness, Termination};

/// Which optimizer to run against an embedding, and its parameters.
pub enum Optimizer {
    TwoStep,
    Combined,
    Annealing(AnnealingSchedule),
}

/// Runs `optimizer` against `embedding` to termination under `budget`,
/// returning a deep-copy snapshot of the best embedding found.
pub fn optimize(
    embedding: &mut Embedding,
    optimizer: Optimizer,
    rng: &mut impl RandomSource,
    budget: OptimizerBudget,
) -> CoreResult<BestSolution> {
    let known_optimum = embedding.problem().known_optimum();
    let mut harness = OptimizerHarness::new(embedding, budget);
    let termination: Termination = match optimizer {
        Optimizer::TwoStep => greedy::run_two_step(embedding, rng, &mut harness, known_optimum)?,
        Optimizer::Combined => greedy::run_combined(embedding, rng, &mut harness, known_optimum)?,
        Optimizer::Annealing(schedule) => annealing::run_annealing(embedding, rng, &schedule, &mut harness),
    };
    Ok(harness.snapshot(termination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::problem::Problem;
    use crate::rng::ThreadRandomSource;
    use std::rc::Rc;

    #[test]
    fn optimize_dispatches_to_combined() {
        let g = Graph::from_edges(
            5,
            vec![(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)],
        )
        .unwrap();
        let problem = Rc::new(Problem::new(g, 2).unwrap().with_known_optimum(1));
        let mut emb = Embedding::new(problem);
        let mut rng = ThreadRandomSource::seeded(41);
        let result = optimize(&mut emb, Optimizer::Combined, &mut rng, OptimizerBudget::default()).unwrap();
        assert!(result.crossings <= 1);
        assert!(matches!(result.termination, Termination::OptimumReached | Termination::Converged));
    }
}
