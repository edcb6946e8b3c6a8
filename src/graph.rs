//! Graph model: index-addressed vertices and edges, adjacency
//! lists, validation.
//!
//! Edges are stored as `(smaller, larger)` primitive index pairs indexed by
//! edge-id, and adjacency is a per-vertex contiguous array of edge-ids —
//! this keeps every counter/heuristic hot loop free of indirection through
//! vertex references, keying everything off a lightweight, `Copy` id rather
//! than owned node objects.

use crate::error::{CoreError, CoreResult};
use std::collections::HashSet;

/// A vertex: identity is its `index` alone. Holds the insertion-ordered list
/// of incident edge-ids; some heuristics permute this list as their source
/// of randomness, which is a normal, observable mutation — not a
/// violation of any adjacency invariant.
#[derive(Clone, Debug)]
pub struct Vertex {
    index: usize,
    incident_edges: Vec<usize>,
}

impl Vertex {
    fn new(index: usize) -> Self {
        Self { index, incident_edges: Vec::new() }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn degree(&self) -> usize {
        self.incident_edges.len()
    }

    /// Incident edge-ids in their current (possibly shuffled) order.
    pub fn incident_edges(&self) -> &[usize] {
        &self.incident_edges
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl Eq for Vertex {}
impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// An undirected edge `(start, target)` with `start < target` (canonicalized
/// on construction) and a stable `index` assigned once by the owning
/// [`Graph`]. Equality and hashing are defined on the endpoint pair alone.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    start: usize,
    target: usize,
    index: usize,
}

impl Edge {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The endpoint on the far side of `v`. Panics (a programming error) if
    /// `v` is not one of this edge's endpoints.
    pub fn other(&self, v: usize) -> usize {
        if v == self.start {
            self.target
        } else if v == self.target {
            self.start
        } else {
            panic!("vertex {} is not an endpoint of edge {}", v, self.index);
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.target == other.target
    }
}
impl Eq for Edge {}
impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.target.hash(state);
    }
}

/// Owns two parallel arrays, `vertices[0..n)` and `edges[0..m)`, indexed by
/// position. No self-loops, no parallel edges, directed edges; see
/// [`Graph::validate`] for the full invariant list.
#[derive(Clone, Debug)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds a graph on `n` vertices from a list of `(u, v)` endpoint
    /// pairs (order within each pair is irrelevant; edges are canonicalized).
    ///
    /// Errors with [`CoreError::ContractViolation`] on a self-loop, a
    /// parallel edge, or an out-of-range endpoint.
    pub fn from_edges(n: usize, raw_edges: impl IntoIterator<Item = (usize, usize)>) -> CoreResult<Self> {
        let mut vertices: Vec<Vertex> = (0..n).map(Vertex::new).collect();
        let mut edges = Vec::new();
        let mut seen = HashSet::new();
        for (a, b) in raw_edges {
            if a >= n || b >= n {
                return Err(CoreError::contract(format!(
                    "edge ({}, {}) references a vertex outside [0, {})",
                    a, b, n
                )));
            }
            if a == b {
                return Err(CoreError::contract(format!("self-loop at vertex {} is not allowed", a)));
            }
            let (start, target) = if a < b { (a, b) } else { (b, a) };
            if !seen.insert((start, target)) {
                return Err(CoreError::contract(format!(
                    "parallel edge ({}, {}) is not allowed",
                    start, target
                )));
            }
            let index = edges.len();
            edges.push(Edge { start, target, index });
            vertices[start].incident_edges.push(index);
            vertices[target].incident_edges.push(index);
        }
        let g = Self { vertices, edges };
        g.validate()?;
        Ok(g)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex(&self, v: usize) -> &Vertex {
        &self.vertices[v]
    }

    pub fn edge(&self, e: usize) -> &Edge {
        &self.edges[e]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn degree(&self, v: usize) -> usize {
        self.vertices[v].degree()
    }

    /// The vertex at the opposite end of each edge incident to `v`, in the
    /// current (possibly shuffled) incident-edge order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.vertices[v].incident_edges.iter().map(move |&e| self.edges[e].other(v))
    }

    /// Permutes `vertex`'s incident-edge list; some heuristics use this as
    /// their source of randomized traversal order.
    pub fn shuffle_incident_edges(&mut self, vertex: usize, rng: &mut impl crate::rng::RandomSource) {
        rng.shuffle(&mut self.vertices[vertex].incident_edges);
    }

    /// Deep copy: rebuilds vertices and edges with fresh storage, preserving
    /// indices. Since every field here is owned (no shared references),
    /// `Clone` already satisfies this; exposed under its own name to make
    /// call sites self-documenting.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Verifies every structural invariant: endpoint ordering, matching edge
    /// index, degree-sum, no self-loops, no parallel edges.
    pub fn validate(&self) -> CoreResult<()> {
        let n = self.vertices.len();
        let m = self.edges.len();
        let mut degree_sum = 0usize;
        let mut seen = HashSet::with_capacity(m);
        for (i, e) in self.edges.iter().enumerate() {
            if e.index != i {
                return Err(CoreError::invariant(format!(
                    "edge at slot {} carries index {}", i, e.index
                )));
            }
            if e.start >= n || e.target >= n {
                return Err(CoreError::invariant(format!(
                    "edge {} references vertex outside [0, {})", i, n
                )));
            }
            if e.start >= e.target {
                return Err(CoreError::invariant(format!(
                    "edge {} endpoints are not canonicalized: start={} target={}",
                    i, e.start, e.target
                )));
            }
            if !seen.insert((e.start, e.target)) {
                return Err(CoreError::invariant(format!(
                    "parallel edge between {} and {}", e.start, e.target
                )));
            }
        }
        for v in &self.vertices {
            degree_sum += v.degree();
        }
        if degree_sum != 2 * m {
            return Err(CoreError::invariant(format!(
                "degree sum {} does not equal 2m ({})", degree_sum, 2 * m
            )));
        }
        Ok(())
    }
}
