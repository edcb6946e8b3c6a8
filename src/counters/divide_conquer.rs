//! C3 — divide-and-conquer counter: per page, a crossing upper bound
//! from a prefix-summed start count, minus the number of "nested" pairs
//! found via a merge-sort inversion count over a bipartite-reduction
//! ordering. `O(m log m + X)`.
//!
//! 1. Sort the page's edges by `(smallerPos, largerPos)`.
//! 2. `startsBefore[p]` = number of edges with smaller endpoint `<= p`,
//!    prefix-summed.
//! 3. For edge `(s,t)`, `startsBefore[t-1] - startsBefore[s]` counts every
//!    edge whose start lies strictly between `s` and `t` — every crossing
//!    pair *plus* every nested pair.
//! 4. Subtract nested pairs: these correspond exactly to inversions in the
//!    same edge list when re-ordered by `largerPos` ascending, ties by
//!    `smallerPos` descending, relative to the `(smallerPos, largerPos)`
//!    order from step 1.

use crate::embedding::Embedding;
use std::cmp::Ordering;

pub fn count(emb: &Embedding) -> u64 {
    let k = emb.pages();
    (0..k).map(|p| count_on_page(emb, p)).sum()
}

pub fn count_on_page(emb: &Embedding, page: usize) -> u64 {
    let n = emb.vertex_count();
    let m = emb.edge_count();

    let mut page_edges: Vec<usize> = (0..m).filter(|&e| emb.page_of(e) == Some(page)).collect();
    if page_edges.len() < 2 {
        return 0;
    }
    page_edges.sort_by(|&a, &b| emb.compare_edges(a, b));

    // startsBefore[p] = #edges on this page whose smaller endpoint <= p.
    let mut starts_before = vec![0u64; n];
    for &e in &page_edges {
        let (lo, _hi) = emb.edge_span(e);
        starts_before[lo] += 1;
    }
    for p in 1..n {
        starts_before[p] += starts_before[p - 1];
    }

    let mut upper_bound = 0u64;
    for &e in &page_edges {
        let (lo, hi) = emb.edge_span(e);
        // edges whose start lies strictly between lo and hi: starts in
        // (lo, hi-1], i.e. startsBefore[hi-1] - startsBefore[lo].
        upper_bound += starts_before[hi - 1] - starts_before[lo];
    }

    let nested = count_nested_pairs(emb, &page_edges);
    upper_bound - nested
}

/// Counts nested-but-non-crossing pairs via a merge-sort inversion count:
/// `page_edges` is already sorted by `(smallerPos, largerPos)`; inversions
/// relative to the target order `(largerPos asc, smallerPos desc)` are
/// exactly the nested pairs.
fn count_nested_pairs(emb: &Embedding, page_edges: &[usize]) -> u64 {
    let mut arr: Vec<usize> = page_edges.to_vec();
    merge_count(emb, &mut arr)
}

fn target_key(emb: &Embedding, e: usize) -> (usize, std::cmp::Reverse<usize>) {
    let (lo, hi) = emb.edge_span(e);
    (hi, std::cmp::Reverse(lo))
}

fn merge_count(emb: &Embedding, arr: &mut [usize]) -> u64 {
    let len = arr.len();
    if len <= 1 {
        return 0;
    }
    let mid = len / 2;
    let mut left = arr[..mid].to_vec();
    let mut right = arr[mid..].to_vec();
    let mut count = merge_count(emb, &mut left) + merge_count(emb, &mut right);

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        let ordering = target_key(emb, left[i]).cmp(&target_key(emb, right[j]));
        if ordering != Ordering::Greater {
            arr[k] = left[i];
            i += 1;
        } else {
            count += (left.len() - i) as u64;
            arr[k] = right[j];
            j += 1;
        }
        k += 1;
    }
    while i < left.len() {
        arr[k] = left[i];
        i += 1;
        k += 1;
    }
    while j < right.len() {
        arr[k] = right[j];
        j += 1;
        k += 1;
    }
    count
}
