//! Constructive heuristics and local-search optimizers for minimum-crossing
//! k-page book embeddings of undirected graphs.
//!
//! The external surface is deliberately small: build a [`graph::Graph`] and
//! a [`problem::Problem`], call [`make_embedding`] to get an identity-spine
//! starting point, [`apply`] a constructive heuristic from [`heuristics`],
//! then [`optimize::optimize`] it with a local-search optimizer from
//! [`optimize`]. Crossing counts come from [`crossings`]/[`crossings_on_page`].
//! There is no I/O, no CLI, and no persistent state at this level — graph
//! loading, driver programs, and reporting are all external collaborators.

pub mod config;
pub mod counters;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod heuristics;
pub mod optimize;
pub mod problem;
pub mod rng;

use embedding::Embedding;
use error::CoreResult;
use problem::Problem;
use std::rc::Rc;

/// Fresh embedding on `problem`: identity spine, every edge on page 0.
pub fn make_embedding(problem: Rc<Problem>) -> Embedding {
    Embedding::new(problem)
}

/// Applies a constructive heuristic (any `FnOnce(&mut Embedding) -> CoreResult<()>`,
/// matching every function in [`heuristics`]) to `embedding` in place.
pub fn apply<F>(heuristic: F, embedding: &mut Embedding) -> CoreResult<()>
where
    F: FnOnce(&mut Embedding) -> CoreResult<()>,
{
    heuristic(embedding)
}

/// Total crossings under `embedding`'s configured counter.
pub fn crossings(embedding: &Embedding) -> u64 {
    embedding.crossings()
}

/// Crossings restricted to a single page.
pub fn crossings_on_page(embedding: &Embedding, page: usize) -> u64 {
    embedding.crossings_on_page(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::heuristics::edge_distribution;
    use crate::rng::ThreadRandomSource;

    #[test]
    fn end_to_end_make_apply_and_count() {
        let g = Graph::from_edges(6, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        let problem = Rc::new(Problem::new(g, 1).unwrap());
        let mut emb = make_embedding(problem);
        let mut rng = ThreadRandomSource::seeded(1);
        apply(|e| Ok(edge_distribution::random(e, &mut rng)), &mut emb).unwrap();
        assert_eq!(crossings(&emb), 0);
        assert_eq!(crossings_on_page(&emb, 0), 0);
    }
}
