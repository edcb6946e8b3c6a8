//! Edge-distribution heuristics: each writes a full page assignment into
//! `distribution[0..m)`. Every one of these collapses to the trivial
//! assign-everything-to-page-0 when `k=1`.

use crate::embedding::{Embedding, PENDING};
use crate::rng::RandomSource;
use std::collections::BTreeMap;

fn assign_all_page_zero(emb: &mut Embedding) {
    let m = emb.edge_count();
    emb.set_distribution(vec![0; m]);
}

fn pick_different(avoid: usize, k: usize, rng: &mut impl RandomSource) -> usize {
    if k <= 1 {
        return 0;
    }
    loop {
        let p = rng.uniform_usize(k);
        if p != avoid {
            return p;
        }
    }
}

/// Uniform-random page per edge.
pub fn random(emb: &mut Embedding, rng: &mut impl RandomSource) {
    let k = emb.pages();
    if k <= 1 {
        assign_all_page_zero(emb);
        return;
    }
    let m = emb.edge_count();
    let dist: Vec<i32> = (0..m).map(|_| rng.uniform_usize(k) as i32).collect();
    emb.set_distribution(dist);
}

/// Folds each edge's endpoint-position sum into `[1,n]` as a stand-in for
/// its circle slope, then looks it up in a precomputed `angle -> page` map
/// that partitions `[1,n]` into `k` roughly equal contiguous ranges. Avoids
/// trigonometry entirely.
pub fn slope(emb: &mut Embedding) {
    let k = emb.pages();
    if k <= 1 {
        assign_all_page_zero(emb);
        return;
    }
    let n = emb.vertex_count();
    let base = n / k;
    let rem = n % k;
    let mut angle_to_page = vec![0usize; n + 1];
    let mut idx = 1usize;
    for page in 0..k {
        let size = base + if page < rem { 1 } else { 0 };
        for _ in 0..size {
            if idx <= n {
                angle_to_page[idx] = page;
                idx += 1;
            }
        }
    }
    let m = emb.edge_count();
    let dist: Vec<i32> = (0..m)
        .map(|e| {
            let (lo, hi) = emb.edge_span(e);
            let folded = (lo + hi) % n;
            let angle = if folded == 0 { n } else { folded };
            angle_to_page[angle] as i32
        })
        .collect();
    emb.set_distribution(dist);
}

/// Edge orderings the greedy distributor can iterate in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GreedyOrder {
    /// By smaller endpoint's vertex index, then target.
    RowMajor,
    /// Same, but using current spine positions rather than vertex ids.
    RowMajorBySpine,
    /// Decreasing `|posLarger - posSmaller|`.
    ELen,
    /// Bucketed by span length, interleaved from the middle bucket outward.
    CeilFloor,
    /// Ordered by the span's circular midpoint, a simplified stand-in for
    /// the diameter-pair-based circular ordering.
    Circular,
}

fn ceil_floor_order(emb: &Embedding, edges: &[usize]) -> Vec<usize> {
    let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &e in edges {
        let (lo, hi) = emb.edge_span(e);
        buckets.entry(hi - lo).or_default().push(e);
    }
    let bucket_lists: Vec<Vec<usize>> = buckets.into_values().collect();
    let b = bucket_lists.len();
    if b == 0 {
        return Vec::new();
    }
    let mid = b / 2;
    let mut order_idx = vec![mid];
    let mut lo_i: i64 = mid as i64;
    let mut hi_i: i64 = mid as i64;
    while order_idx.len() < b {
        lo_i -= 1;
        if lo_i >= 0 {
            order_idx.push(lo_i as usize);
        }
        if order_idx.len() == b {
            break;
        }
        hi_i += 1;
        if (hi_i as usize) < b {
            order_idx.push(hi_i as usize);
        }
    }
    let mut result = Vec::with_capacity(edges.len());
    for idx in order_idx {
        result.extend(bucket_lists[idx].iter().cloned());
    }
    result
}

fn edge_order(emb: &Embedding, order: GreedyOrder) -> Vec<usize> {
    let m = emb.edge_count();
    let graph = emb.problem().graph();
    let mut edges: Vec<usize> = (0..m).collect();
    match order {
        GreedyOrder::RowMajor => {
            edges.sort_by_key(|&e| {
                let ed = graph.edge(e);
                (ed.start(), ed.target())
            });
            edges
        }
        GreedyOrder::RowMajorBySpine => {
            edges.sort_by_key(|&e| emb.edge_span(e));
            edges
        }
        GreedyOrder::ELen => {
            edges.sort_by_key(|&e| {
                let (lo, hi) = emb.edge_span(e);
                std::cmp::Reverse(hi - lo)
            });
            edges
        }
        GreedyOrder::CeilFloor => ceil_floor_order(emb, &edges),
        GreedyOrder::Circular => {
            let n = emb.vertex_count();
            edges.sort_by_key(|&e| {
                let (lo, hi) = emb.edge_span(e);
                ((lo + hi) % n, hi - lo)
            });
            edges
        }
    }
}

/// Iterates edges in the chosen order; for each, evaluates per-page
/// crossings against already-placed edges via the can-cross predicate and
/// assigns the minimum-crossing page (ties broken toward the lowest index).
pub fn greedy(emb: &mut Embedding, order: GreedyOrder) {
    let k = emb.pages();
    if k <= 1 {
        assign_all_page_zero(emb);
        return;
    }
    let sequence = edge_order(emb, order);
    let mut placed_on_page: Vec<Vec<usize>> = vec![Vec::new(); k];
    let m = emb.edge_count();
    let mut dist = vec![0i32; m];
    for e in sequence {
        let mut best_page = 0usize;
        let mut best_cost = u64::MAX;
        for p in 0..k {
            let cost = placed_on_page[p].iter().filter(|&&other| emb.can_edges_cross(e, other)).count() as u64;
            if cost < best_cost {
                best_cost = cost;
                best_page = p;
            }
        }
        dist[e] = best_page as i32;
        placed_on_page[best_page].push(e);
    }
    emb.set_distribution(dist);
}

/// Builds the conflict set `{(e,f) : can-cross(e,f)}`, shuffles it, then for
/// each pair places unplaced edges on distinct pages (two random pages if
/// both unplaced, or any page other than the placed partner's if one is).
/// Remaining unplaced edges default to page 0.
pub fn conflict(emb: &mut Embedding, rng: &mut impl RandomSource) {
    let k = emb.pages();
    if k <= 1 {
        assign_all_page_zero(emb);
        return;
    }
    let m = emb.edge_count();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for i in 0..m {
        for j in (i + 1)..m {
            if emb.can_edges_cross(i, j) {
                pairs.push((i, j));
            }
        }
    }
    rng.shuffle(&mut pairs);
    let mut dist = vec![PENDING; m];
    for (a, b) in pairs {
        let pa = dist[a];
        let pb = dist[b];
        if pa == PENDING && pb == PENDING {
            let p1 = rng.uniform_usize(k);
            let p2 = pick_different(p1, k, rng);
            dist[a] = p1 as i32;
            dist[b] = p2 as i32;
        } else if pa == PENDING {
            dist[a] = pick_different(pb as usize, k, rng) as i32;
        } else if pb == PENDING {
            dist[b] = pick_different(pa as usize, k, rng) as i32;
        }
    }
    for d in dist.iter_mut() {
        if *d == PENDING {
            *d = 0;
        }
    }
    emb.set_distribution(dist);
}

/// Walks the DFS-tree path from `descendant` up through `parent` links to
/// `ancestor`, inclusive of both ends, in descendant-to-ancestor order.
fn ear_path(parent: &[usize], descendant: usize, ancestor: usize) -> Vec<usize> {
    let mut path = vec![descendant];
    let mut cur = descendant;
    while cur != ancestor && parent[cur] != usize::MAX {
        cur = parent[cur];
        path.push(cur);
    }
    path
}

/// Builds the conflict graph's DFS forest; each non-tree edge to a vertex
/// still on the recursion stack defines an "ear" — the cycle closed by the
/// tree path back to that ancestor. Ears are processed in discovery order:
/// interior vertices get the page with fewest already-placed conflict
/// neighbors on it; end vertices get a random page distinct from their
/// adjacent interior vertex's. Anything neither an ear interior/end nor
/// touched by any back edge (isolated or pure-tree leftovers) is placed
/// afterward, isolated ones uniformly at random and the rest by the same
/// fewest-neighbors rule.
pub fn ear_decomposition(emb: &mut Embedding, rng: &mut impl RandomSource) {
    let k = emb.pages();
    if k <= 1 {
        assign_all_page_zero(emb);
        return;
    }
    let m = emb.edge_count();
    let conflict_adj: Vec<Vec<usize>> =
        (0..m).map(|i| (0..m).filter(|&j| j != i && emb.can_edges_cross(i, j)).collect()).collect();

    let mut visited = vec![false; m];
    let mut in_stack = vec![false; m];
    let mut parent = vec![usize::MAX; m];
    let mut discovery_order = Vec::with_capacity(m);
    let mut back_edges: Vec<(usize, usize)> = Vec::new();

    for start in 0..m {
        if visited[start] {
            continue;
        }
        let mut stack = vec![start];
        let mut iter_idx = vec![0usize];
        visited[start] = true;
        in_stack[start] = true;
        discovery_order.push(start);
        while let Some(&v) = stack.last() {
            let i = *iter_idx.last().unwrap();
            if i < conflict_adj[v].len() {
                let u = conflict_adj[v][i];
                *iter_idx.last_mut().unwrap() += 1;
                if !visited[u] {
                    visited[u] = true;
                    in_stack[u] = true;
                    parent[u] = v;
                    discovery_order.push(u);
                    stack.push(u);
                    iter_idx.push(0);
                } else if in_stack[u] && u != parent[v] {
                    // `v` is the descendant (still on the stack), `u` the
                    // ancestor it closes back to; store in that order so the
                    // path walk below climbs from descendant to ancestor.
                    back_edges.push((v, u));
                }
            } else {
                in_stack[v] = false;
                stack.pop();
                iter_idx.pop();
            }
        }
    }
    back_edges.sort_unstable();
    back_edges.dedup();

    let mut placed: Vec<i32> = vec![PENDING; m];
    let neighbor_page_counts = |v: usize, placed: &[i32], conflict_adj: &[Vec<usize>], k: usize| -> Vec<u64> {
        let mut counts = vec![0u64; k];
        for &u in &conflict_adj[v] {
            if placed[u] != PENDING {
                counts[placed[u] as usize] += 1;
            }
        }
        counts
    };

    for &(u, v) in &back_edges {
        let path = ear_path(&parent, u, v);
        if path.len() < 2 {
            continue;
        }
        for &w in &path[1..path.len() - 1] {
            if placed[w] == PENDING {
                let counts = neighbor_page_counts(w, &placed, &conflict_adj, k);
                let best = (0..k).min_by_key(|&p| counts[p]).unwrap();
                placed[w] = best as i32;
            }
        }
        let u_adjacent_interior = path[1];
        let v_adjacent_interior = path[path.len() - 2];
        if placed[u] == PENDING {
            let avoid = if placed[u_adjacent_interior] != PENDING { placed[u_adjacent_interior] as usize } else { 0 };
            placed[u] = pick_different(avoid, k, rng) as i32;
        }
        if placed[v] == PENDING {
            let avoid = if placed[v_adjacent_interior] != PENDING { placed[v_adjacent_interior] as usize } else { 0 };
            placed[v] = pick_different(avoid, k, rng) as i32;
        }
    }

    for &v in &discovery_order {
        if placed[v] != PENDING {
            continue;
        }
        if conflict_adj[v].is_empty() {
            placed[v] = rng.uniform_usize(k) as i32;
        } else {
            let counts = neighbor_page_counts(v, &placed, &conflict_adj, k);
            let best = (0..k).min_by_key(|&p| counts[p]).unwrap();
            placed[v] = best as i32;
        }
    }

    emb.set_distribution(placed);
}
