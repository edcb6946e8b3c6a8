//! A [`Problem`] is an immutable `(graph, k)` pair, optionally carrying a
//! known-optimum crossing count used by optimizer termination.

use crate::error::{CoreError, CoreResult};
use crate::graph::Graph;

#[derive(Clone, Debug)]
pub struct Problem {
    graph: Graph,
    pages: usize,
    known_optimum: Option<u64>,
}

impl Problem {
    /// Errors with [`CoreError::ContractViolation`] if `pages < 1`.
    pub fn new(graph: Graph, pages: usize) -> CoreResult<Self> {
        if pages < 1 {
            return Err(CoreError::contract("page budget k must be >= 1"));
        }
        Ok(Self { graph, pages, known_optimum: None })
    }

    pub fn with_known_optimum(mut self, known_optimum: u64) -> Self {
        self.known_optimum = Some(known_optimum);
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn known_optimum(&self) -> Option<u64> {
        self.known_optimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_pages() {
        let g = Graph::from_edges(2, vec![(0, 1)]).unwrap();
        assert!(Problem::new(g, 0).is_err());
    }

    #[test]
    fn carries_known_optimum() {
        let g = Graph::from_edges(2, vec![(0, 1)]).unwrap();
        let p = Problem::new(g, 2).unwrap().with_known_optimum(0);
        assert_eq!(p.known_optimum(), Some(0));
    }
}
