//! Vertex-order heuristics: each writes a full permutation into a window of
//! the embedding's spine, leaving everything outside the window untouched.
//!
//! All of these operate on the *universe* of vertices currently occupying
//! the window — the set of vertex ids found at those spine positions before
//! reordering — rather than on the whole graph, so a partial window reorders
//! exactly the vertices it names and nothing else. Adjacency is restricted
//! to the universe: an edge leaving the window plays no role in the
//! within-window ordering decision.

use crate::embedding::Embedding;
use crate::error::{CoreError, CoreResult};
use crate::graph::Graph;
use crate::heuristics::window::SpineWindow;
use crate::rng::RandomSource;
use std::collections::{HashMap, HashSet, VecDeque};

fn universe_for_window(emb: &Embedding, window: SpineWindow) -> Vec<usize> {
    let n = emb.vertex_count();
    window.positions(n).into_iter().map(|p| emb.vertex_at(p)).collect()
}

fn write_window_order(emb: &mut Embedding, window: SpineWindow, order: &[usize]) {
    let n = emb.vertex_count();
    let positions = window.positions(n);
    debug_assert_eq!(positions.len(), order.len());
    let mut spine = emb.spine().to_vec();
    for (&pos, &v) in positions.iter().zip(order.iter()) {
        spine[pos] = v;
    }
    emb.set_spine(spine);
}

fn in_universe_neighbors(graph: &Graph, v: usize, universe: &HashSet<usize>) -> Vec<usize> {
    graph.neighbors(v).filter(|u| universe.contains(u)).collect()
}

fn in_universe_degree(graph: &Graph, v: usize, universe: &HashSet<usize>) -> usize {
    graph.neighbors(v).filter(|u| universe.contains(u)).count()
}

fn is_connected_within(graph: &Graph, universe: &[usize]) -> bool {
    if universe.is_empty() {
        return true;
    }
    let set: HashSet<usize> = universe.iter().cloned().collect();
    let mut visited = HashSet::new();
    let mut stack = vec![universe[0]];
    visited.insert(universe[0]);
    while let Some(v) = stack.pop() {
        for u in in_universe_neighbors(graph, v, &set) {
            if visited.insert(u) {
                stack.push(u);
            }
        }
    }
    visited.len() == universe.len()
}

fn require_connected(graph: &Graph, universe: &[usize], heuristic: &str) -> CoreResult<()> {
    if !is_connected_within(graph, universe) {
        return Err(CoreError::contract(format!(
            "{} requires a connected vertex set; the window's {} vertices are not all mutually reachable",
            heuristic,
            universe.len()
        )));
    }
    Ok(())
}

// -- DFS / BFS family ---------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum DegreeOrder {
    Random,
    SmallestFirst,
}

/// Generic stack-based DFS over the universe's induced subgraph. Assigns
/// positions at pop time; if the universe is disconnected, advances to the
/// next unvisited vertex (by the same root rule) and continues.
fn dfs_order(graph: &Graph, universe: &[usize], rng: &mut impl RandomSource, mode: DegreeOrder) -> Vec<usize> {
    let universe_set: HashSet<usize> = universe.iter().cloned().collect();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut order = Vec::with_capacity(universe.len());

    while order.len() < universe.len() {
        let remaining: Vec<usize> = universe.iter().cloned().filter(|v| !visited.contains(v)).collect();
        if !order.is_empty() {
            log::warn!("DFS window is disconnected; cycling root to an unvisited vertex, {} remaining", remaining.len());
        }
        let root = match mode {
            DegreeOrder::Random => remaining[rng.uniform_usize(remaining.len())],
            DegreeOrder::SmallestFirst => *remaining
                .iter()
                .min_by_key(|&&v| in_universe_degree(graph, v, &universe_set))
                .unwrap(),
        };
        let mut stack = vec![root];
        visited.insert(root);
        while let Some(u) = stack.pop() {
            order.push(u);
            let mut neighbors = in_universe_neighbors(graph, u, &universe_set);
            neighbors.retain(|v| !visited.contains(v));
            match mode {
                DegreeOrder::Random => rng.shuffle(&mut neighbors),
                // Sorted by decreasing degree so that, once pushed onto the
                // stack, the smallest-degree neighbor sits on top and is
                // popped (explored) first.
                DegreeOrder::SmallestFirst => {
                    neighbors.sort_by_key(|&v| std::cmp::Reverse(in_universe_degree(graph, v, &universe_set)))
                }
            }
            for v in neighbors {
                if visited.insert(v) {
                    stack.push(v);
                }
            }
        }
    }
    order
}

/// Root uniformly at random; unvisited neighbors pushed in randomized order.
pub fn random_dfs(emb: &mut Embedding, window: SpineWindow, rng: &mut impl RandomSource) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    let order = dfs_order(emb.problem().graph(), &universe, rng, DegreeOrder::Random);
    write_window_order(emb, window, &order);
    Ok(())
}

/// Root is the window's smallest-degree vertex; unvisited neighbors pushed
/// sorted by decreasing degree (so the smallest degree is explored first).
pub fn smallest_degree_dfs(emb: &mut Embedding, window: SpineWindow, rng: &mut impl RandomSource) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    let order = dfs_order(emb.problem().graph(), &universe, rng, DegreeOrder::SmallestFirst);
    write_window_order(emb, window, &order);
    Ok(())
}

/// Classic BFS with randomized neighbor order; positions assigned in visit
/// (dequeue) order. Disconnected universes restart from a fresh unvisited
/// root, picked uniformly at random, until everything is covered.
pub fn random_bfs(emb: &mut Embedding, window: SpineWindow, rng: &mut impl RandomSource) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    let graph = emb.problem().graph();
    let universe_set: HashSet<usize> = universe.iter().cloned().collect();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut order = Vec::with_capacity(universe.len());

    while order.len() < universe.len() {
        let remaining: Vec<usize> = universe.iter().cloned().filter(|v| !visited.contains(v)).collect();
        let root = remaining[rng.uniform_usize(remaining.len())];
        visited.insert(root);
        let mut queue = VecDeque::new();
        queue.push_back(root);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            let mut neighbors = in_universe_neighbors(graph, u, &universe_set);
            neighbors.retain(|v| !visited.contains(v));
            rng.shuffle(&mut neighbors);
            for v in neighbors {
                if visited.insert(v) {
                    queue.push_back(v);
                }
            }
        }
    }
    write_window_order(emb, window, &order);
    Ok(())
}

/// Builds a BFS spanning tree of the window's induced subgraph (restarting
/// on every remaining component), then orders it with smallest-degree DFS
/// using tree-degree rather than graph-degree.
pub fn bfs_tree(emb: &mut Embedding, window: SpineWindow, rng: &mut impl RandomSource) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    let graph = emb.problem().graph();
    let universe_set: HashSet<usize> = universe.iter().cloned().collect();

    let mut tree_adj: HashMap<usize, Vec<usize>> = universe.iter().map(|&v| (v, Vec::new())).collect();
    let mut visited: HashSet<usize> = HashSet::new();
    while visited.len() < universe.len() {
        let remaining: Vec<usize> = universe.iter().cloned().filter(|v| !visited.contains(v)).collect();
        let root = remaining[rng.uniform_usize(remaining.len())];
        visited.insert(root);
        let mut queue = VecDeque::new();
        queue.push_back(root);
        while let Some(u) = queue.pop_front() {
            for v in in_universe_neighbors(graph, u, &universe_set) {
                if visited.insert(v) {
                    tree_adj.get_mut(&u).unwrap().push(v);
                    tree_adj.get_mut(&v).unwrap().push(u);
                    queue.push_back(v);
                }
            }
        }
    }

    // Smallest-degree DFS over the tree adjacency built above.
    let mut dfs_visited: HashSet<usize> = HashSet::new();
    let mut order = Vec::with_capacity(universe.len());
    while order.len() < universe.len() {
        let remaining: Vec<usize> = universe.iter().cloned().filter(|v| !dfs_visited.contains(v)).collect();
        let root = *remaining.iter().min_by_key(|&&v| tree_adj[&v].len()).unwrap();
        let mut stack = vec![root];
        dfs_visited.insert(root);
        while let Some(u) = stack.pop() {
            order.push(u);
            let mut neighbors: Vec<usize> = tree_adj[&u].iter().cloned().filter(|v| !dfs_visited.contains(v)).collect();
            neighbors.sort_by_key(|&v| std::cmp::Reverse(tree_adj[&v].len()));
            for v in neighbors {
                if dfs_visited.insert(v) {
                    stack.push(v);
                }
            }
        }
    }
    write_window_order(emb, window, &order);
    Ok(())
}

// -- MaxNbr --------------------------------------------------------------------

/// Repeatedly picks the unprocessed vertex of highest degree, assigns it the
/// next position, then assigns its unprocessed neighbors in increasing
/// degree. When `removing` is set, degree is "effective degree": each
/// processed vertex decrements the degree counters of its still-unprocessed
/// neighbors, so later picks see a shrinking graph rather than static
/// whole-graph degree.
fn max_nbr_order(graph: &Graph, universe: &[usize], removing: bool) -> Vec<usize> {
    let universe_set: HashSet<usize> = universe.iter().cloned().collect();
    let mut degree: HashMap<usize, i64> =
        universe.iter().map(|&v| (v, in_universe_degree(graph, v, &universe_set) as i64)).collect();
    let mut processed: HashSet<usize> = HashSet::new();
    let mut order = Vec::with_capacity(universe.len());

    let mut process = |v: usize, order: &mut Vec<usize>, processed: &mut HashSet<usize>, degree: &mut HashMap<usize, i64>| {
        order.push(v);
        processed.insert(v);
        if removing {
            for u in in_universe_neighbors(graph, v, &universe_set) {
                if !processed.contains(&u) {
                    if let Some(d) = degree.get_mut(&u) {
                        *d -= 1;
                    }
                }
            }
        }
    };

    while order.len() < universe.len() {
        let best = *universe
            .iter()
            .filter(|v| !processed.contains(v))
            .max_by_key(|&&v| degree[&v])
            .unwrap();
        process(best, &mut order, &mut processed, &mut degree);

        let mut neighbors: Vec<usize> = in_universe_neighbors(graph, best, &universe_set)
            .into_iter()
            .filter(|u| !processed.contains(u))
            .collect();
        neighbors.sort_by_key(|&u| degree[&u]);
        for u in neighbors {
            if !processed.contains(&u) {
                process(u, &mut order, &mut processed, &mut degree);
            }
        }
    }
    order
}

pub fn max_nbr(emb: &mut Embedding, window: SpineWindow) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    require_connected(emb.problem().graph(), &universe, "MaxNbr")?;
    let order = max_nbr_order(emb.problem().graph(), &universe, false);
    write_window_order(emb, window, &order);
    Ok(())
}

pub fn max_nbr_removing(emb: &mut Embedding, window: SpineWindow) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    require_connected(emb.problem().graph(), &universe, "MaxNbr (removing)")?;
    let order = max_nbr_order(emb.problem().graph(), &universe, true);
    write_window_order(emb, window, &order);
    Ok(())
}

// -- Hamilton-path (Angluin-Valiant) -------------------------------------------

fn canon_pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// One attempt at a randomized Hamiltonian-path walk: extend at the current
/// endpoint via an unused edge to an unvisited vertex; if none exists, try
/// an unused edge back to an already-visited vertex and reverse the
/// intervening path segment (a "short-circuit" rotation) to free up new
/// extension options. Gives up after a bounded number of rotations.
fn attempt_hamilton_walk(graph: &Graph, universe_set: &HashSet<usize>, universe: &[usize], rng: &mut impl RandomSource) -> Vec<usize> {
    let start = universe[rng.uniform_usize(universe.len())];
    let mut path = vec![start];
    let mut pos_in_path: HashMap<usize, usize> = [(start, 0)].into_iter().collect();
    let mut used_edges: HashSet<(usize, usize)> = HashSet::new();
    let mut rotations = 0usize;
    let rotation_budget = universe.len() * 4 + 4;

    loop {
        if path.len() == universe.len() {
            break;
        }
        let current = *path.last().unwrap();
        let mut extension_candidates: Vec<usize> = in_universe_neighbors(graph, current, universe_set)
            .into_iter()
            .filter(|u| !pos_in_path.contains_key(u) && !used_edges.contains(&canon_pair(current, *u)))
            .collect();
        if !extension_candidates.is_empty() {
            rng.shuffle(&mut extension_candidates);
            let pick = extension_candidates[0];
            used_edges.insert(canon_pair(current, pick));
            pos_in_path.insert(pick, path.len());
            path.push(pick);
            continue;
        }

        if rotations >= rotation_budget {
            break;
        }
        let mut rotation_candidates: Vec<usize> = in_universe_neighbors(graph, current, universe_set)
            .into_iter()
            .filter(|u| {
                pos_in_path.contains_key(u)
                    && !used_edges.contains(&canon_pair(current, *u))
                    && pos_in_path[u] + 1 < path.len()
            })
            .collect();
        if rotation_candidates.is_empty() {
            break;
        }
        rng.shuffle(&mut rotation_candidates);
        let w = rotation_candidates[0];
        used_edges.insert(canon_pair(current, w));
        let wi = pos_in_path[&w];
        path[wi + 1..].reverse();
        for (offset, &v) in path[wi + 1..].iter().enumerate() {
            pos_in_path.insert(v, wi + 1 + offset);
        }
        rotations += 1;
    }
    path
}

/// Attempts the randomized Hamiltonian-path walk (with up to two restarts);
/// if no attempt fully covers the universe, appends a random-DFS ordering of
/// whatever the best attempt left uncovered.
pub fn hamilton_path(emb: &mut Embedding, window: SpineWindow, rng: &mut impl RandomSource) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    let graph = emb.problem().graph();
    let universe_set: HashSet<usize> = universe.iter().cloned().collect();

    let mut best_attempt = Vec::new();
    for _ in 0..3 {
        let attempt = attempt_hamilton_walk(graph, &universe_set, &universe, rng);
        if attempt.len() == universe.len() {
            write_window_order(emb, window, &attempt);
            return Ok(());
        }
        if attempt.len() > best_attempt.len() {
            best_attempt = attempt;
        }
    }

    let covered: HashSet<usize> = best_attempt.iter().cloned().collect();
    let remaining: Vec<usize> = universe.iter().cloned().filter(|v| !covered.contains(v)).collect();
    let mut order = best_attempt;
    if !remaining.is_empty() {
        order.extend(dfs_order(graph, &remaining, rng, DegreeOrder::Random));
    }
    write_window_order(emb, window, &order);
    Ok(())
}

// -- Connectivity ---------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VertexSelector {
    Next,
    Random,
    /// Graphs here are undirected, so in-connectivity collapses to plain
    /// connectivity (placed-neighbor count); kept as a distinct name to
    /// mirror the directed-graph vocabulary this selector is drawn from.
    InCon,
    /// Same collapse as `InCon`, undirected graphs have no out-edges.
    OutCon,
    Connectivity,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VertexPlacer {
    Fixed,
    Random,
    Crossings,
    Elen,
}

struct ConnectivityState<'a> {
    graph: &'a Graph,
    universe_set: HashSet<usize>,
    placed: HashSet<usize>,
    placed_neighbors: HashMap<usize, usize>,
    unplaced_neighbors: HashMap<usize, usize>,
}

impl<'a> ConnectivityState<'a> {
    fn new(graph: &'a Graph, universe: &[usize]) -> Self {
        let universe_set: HashSet<usize> = universe.iter().cloned().collect();
        let unplaced_neighbors = universe
            .iter()
            .map(|&v| (v, in_universe_degree(graph, v, &universe_set)))
            .collect();
        let placed_neighbors = universe.iter().map(|&v| (v, 0)).collect();
        Self { graph, universe_set, placed: HashSet::new(), placed_neighbors, unplaced_neighbors }
    }

    fn mark_placed(&mut self, v: usize) {
        self.placed.insert(v);
        for u in in_universe_neighbors(self.graph, v, &self.universe_set) {
            if !self.placed.contains(&u) {
                *self.placed_neighbors.get_mut(&u).unwrap() += 1;
                *self.unplaced_neighbors.get_mut(&u).unwrap() -= 1;
            }
        }
    }
}

fn select_next_vertex(
    state: &ConnectivityState,
    universe: &[usize],
    selector: VertexSelector,
    rng: &mut impl RandomSource,
) -> usize {
    let unplaced: Vec<usize> = universe.iter().cloned().filter(|v| !state.placed.contains(v)).collect();
    match selector {
        VertexSelector::Next => unplaced[0],
        VertexSelector::Random => unplaced[rng.uniform_usize(unplaced.len())],
        VertexSelector::InCon | VertexSelector::OutCon | VertexSelector::Connectivity => *unplaced
            .iter()
            .max_by_key(|&&v| (state.placed_neighbors[&v], state.unplaced_neighbors[&v]))
            .unwrap(),
    }
}

/// Rank of an already-placed vertex at pre-insertion index `idx`, on a scale
/// where every candidate insertion rank (see `v_rank`) falls strictly
/// between two consecutive occupied ranks rather than coinciding with one.
fn occupied_rank(idx: usize) -> usize {
    2 * idx + 2
}

/// Rank of `v` if inserted at candidate position `v_pos` (i.e. just before
/// whatever currently sits at index `v_pos`): strictly between
/// `occupied_rank(v_pos - 1)` and `occupied_rank(v_pos)`, so a candidate
/// that numerically equals an occupied index no longer collapses to a
/// zero-length edge against it.
fn v_rank(v_pos: usize) -> usize {
    2 * v_pos + 1
}

/// Interleaving-pair count between `v`'s edges to already-placed neighbors
/// (assuming `v` takes position `v_pos`) and the edges fully internal to
/// `order` (using each vertex's index in `order` as its relative position).
fn crossings_if_placed_at(
    graph: &Graph,
    order: &[usize],
    pos_of: &HashMap<usize, usize>,
    v: usize,
    v_pos: usize,
    universe_set: &HashSet<usize>,
) -> u64 {
    let v_edges: Vec<usize> = in_universe_neighbors(graph, v, universe_set)
        .into_iter()
        .filter(|u| pos_of.contains_key(u))
        .collect();
    if v_edges.is_empty() {
        return 0;
    }
    let v_insertion_rank = v_rank(v_pos);
    let mut total = 0u64;
    for &a in &v_edges {
        let pa_rank = occupied_rank(pos_of[&a]);
        let (u1, v1) = if v_insertion_rank < pa_rank { (v_insertion_rank, pa_rank) } else { (pa_rank, v_insertion_rank) };
        for i in 0..order.len() {
            let x = order[i];
            if x == a {
                continue;
            }
            for y in in_universe_neighbors(graph, x, universe_set) {
                if !pos_of.contains_key(&y) || y == v {
                    continue;
                }
                let py = pos_of[&y];
                if i >= py {
                    continue; // count each internal edge once, from its lower endpoint
                }
                let px_rank = occupied_rank(i);
                let py_rank = occupied_rank(py);
                if Embedding::positions_interleave(u1, v1, px_rank, py_rank) {
                    total += 1;
                }
            }
        }
    }
    total
}

/// Sum of `|v_pos - pos(neighbor)|` over `v`'s already-placed neighbors: the
/// total span that would be newly closed by placing `v` at `v_pos`.
fn closed_length_if_placed_at(graph: &Graph, pos_of: &HashMap<usize, usize>, v: usize, v_pos: usize, universe_set: &HashSet<usize>) -> u64 {
    in_universe_neighbors(graph, v, universe_set)
        .into_iter()
        .filter_map(|u| pos_of.get(&u).map(|&pu| (pu as i64 - v_pos as i64).unsigned_abs()))
        .sum()
}

pub fn connectivity(
    emb: &mut Embedding,
    window: SpineWindow,
    rng: &mut impl RandomSource,
    selector: VertexSelector,
    placer: VertexPlacer,
) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    require_connected(emb.problem().graph(), &universe, "Connectivity")?;
    let graph = emb.problem().graph();
    let universe_set: HashSet<usize> = universe.iter().cloned().collect();
    let mut state = ConnectivityState::new(graph, &universe);
    let mut order: Vec<usize> = Vec::with_capacity(universe.len());

    while order.len() < universe.len() {
        let v = select_next_vertex(&state, &universe, selector, rng);
        let pos_of: HashMap<usize, usize> = order.iter().enumerate().map(|(i, &x)| (x, i)).collect();
        let at_front = match placer {
            VertexPlacer::Fixed => false,
            VertexPlacer::Random => rng.uniform_bool(),
            VertexPlacer::Crossings => {
                let front_cost = crossings_if_placed_at(graph, &order, &pos_of, v, 0, &universe_set);
                let back_cost = crossings_if_placed_at(graph, &order, &pos_of, v, order.len(), &universe_set);
                front_cost < back_cost
            }
            VertexPlacer::Elen => {
                let front_cost = closed_length_if_placed_at(graph, &pos_of, v, 0, &universe_set);
                let back_cost = closed_length_if_placed_at(graph, &pos_of, v, order.len(), &universe_set);
                front_cost < back_cost
            }
        };
        if at_front {
            order.insert(0, v);
        } else {
            order.push(v);
        }
        state.mark_placed(v);
    }
    write_window_order(emb, window, &order);
    Ok(())
}

/// Uses the `CONNECTIVITY` selector but inserts each new vertex at the
/// internal position (not just an end) minimizing crossings between its
/// edges-to-placed-neighbors and the already fully-placed edges.
pub fn greedy_connectivity(emb: &mut Embedding, window: SpineWindow, rng: &mut impl RandomSource) -> CoreResult<()> {
    let universe = universe_for_window(emb, window);
    require_connected(emb.problem().graph(), &universe, "Greedy-connectivity")?;
    let graph = emb.problem().graph();
    let universe_set: HashSet<usize> = universe.iter().cloned().collect();
    let mut state = ConnectivityState::new(graph, &universe);
    let mut order: Vec<usize> = Vec::with_capacity(universe.len());

    while order.len() < universe.len() {
        let v = select_next_vertex(&state, &universe, VertexSelector::Connectivity, rng);
        let pos_of: HashMap<usize, usize> = order.iter().enumerate().map(|(i, &x)| (x, i)).collect();
        let mut best_pos = 0usize;
        let mut best_cost = u64::MAX;
        for candidate in 0..=order.len() {
            let cost = crossings_if_placed_at(graph, &order, &pos_of, v, candidate, &universe_set);
            if cost < best_cost {
                best_cost = cost;
                best_pos = candidate;
            }
        }
        order.insert(best_pos, v);
        state.mark_placed(v);
    }
    write_window_order(emb, window, &order);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::problem::Problem;
    use crate::rng::ThreadRandomSource;
    use std::rc::Rc;

    fn embedding_for(edges: Vec<(usize, usize)>, n: usize) -> Embedding {
        let g = Graph::from_edges(n, edges).unwrap();
        let problem = Rc::new(Problem::new(g, 1).unwrap());
        Embedding::new(problem)
    }

    fn assert_is_permutation(spine: &[usize], n: usize) {
        let mut sorted = spine.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn random_dfs_produces_full_permutation() {
        let mut emb = embedding_for(vec![(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)], 4);
        let mut rng = ThreadRandomSource::seeded(11);
        random_dfs(&mut emb, SpineWindow::full(4), &mut rng).unwrap();
        assert_is_permutation(emb.spine(), 4);
    }

    #[test]
    fn partial_window_leaves_outside_positions_untouched() {
        let mut emb = embedding_for(vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)], 6);
        let before = emb.spine().to_vec();
        let mut rng = ThreadRandomSource::seeded(5);
        random_bfs(&mut emb, SpineWindow { begin: 1, end: 4 }, &mut rng).unwrap();
        assert_eq!(emb.vertex_at(0), before[0]);
        assert_eq!(emb.vertex_at(4), before[4]);
        assert_eq!(emb.vertex_at(5), before[5]);
        assert_is_permutation(emb.spine(), 6);
    }

    #[test]
    fn wraparound_window_reorders_modulo_n() {
        let mut emb = embedding_for(vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)], 5);
        let mut rng = ThreadRandomSource::seeded(9);
        smallest_degree_dfs(&mut emb, SpineWindow { begin: 3, end: 1 }, &mut rng).unwrap();
        assert_is_permutation(emb.spine(), 5);
        assert_eq!(emb.vertex_at(1), 1);
        assert_eq!(emb.vertex_at(2), 2);
    }

    #[test]
    fn max_nbr_rejects_disconnected_graph() {
        let mut emb = embedding_for(vec![(0, 1), (2, 3)], 4);
        assert!(max_nbr(&mut emb, SpineWindow::full(4)).is_err());
    }

    #[test]
    fn max_nbr_places_highest_degree_first() {
        // star: 0 has degree 3, everything else degree 1.
        let mut emb = embedding_for(vec![(0, 1), (0, 2), (0, 3)], 4);
        max_nbr(&mut emb, SpineWindow::full(4)).unwrap();
        assert_eq!(emb.vertex_at(0), 0);
        assert_is_permutation(emb.spine(), 4);
    }

    #[test]
    fn bfs_tree_produces_full_permutation_on_cycle() {
        let mut emb = embedding_for(vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)], 5);
        let mut rng = ThreadRandomSource::seeded(3);
        bfs_tree(&mut emb, SpineWindow::full(5), &mut rng).unwrap();
        assert_is_permutation(emb.spine(), 5);
    }

    #[test]
    fn hamilton_path_covers_a_genuine_hamiltonian_cycle() {
        let mut emb = embedding_for(vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)], 5);
        let mut rng = ThreadRandomSource::seeded(123);
        hamilton_path(&mut emb, SpineWindow::full(5), &mut rng).unwrap();
        assert_is_permutation(emb.spine(), 5);
    }

    #[test]
    fn connectivity_next_selector_fixed_placer_matches_universe_order() {
        let mut emb = embedding_for(vec![(0, 1), (1, 2), (2, 3)], 4);
        let mut rng = ThreadRandomSource::seeded(1);
        connectivity(&mut emb, SpineWindow::full(4), &mut rng, VertexSelector::Next, VertexPlacer::Fixed).unwrap();
        assert_eq!(emb.spine(), &[0, 1, 2, 3]);
    }

    #[test]
    fn greedy_connectivity_produces_full_permutation() {
        let mut emb = embedding_for(vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)], 4);
        let mut rng = ThreadRandomSource::seeded(42);
        greedy_connectivity(&mut emb, SpineWindow::full(4), &mut rng).unwrap();
        assert_is_permutation(emb.spine(), 4);
    }
}
