//! C1 — pairwise counter: for all `i<j` on the same page, add 1 iff
//! they interleave. `O(m^2)`; the reference implementation tests compare
//! against.

use crate::embedding::Embedding;

pub fn count(emb: &Embedding) -> u64 {
    count_filtered(emb, None)
}

pub fn count_on_page(emb: &Embedding, page: usize) -> u64 {
    count_filtered(emb, Some(page))
}

fn count_filtered(emb: &Embedding, filter: Option<usize>) -> u64 {
    let m = emb.edge_count();
    let mut total = 0u64;
    for i in 0..m {
        let pi = match emb.page_of(i) {
            Some(p) => p,
            None => continue,
        };
        if let Some(f) = filter {
            if f != pi {
                continue;
            }
        }
        for j in (i + 1)..m {
            if emb.page_of(j) == Some(pi) && emb.can_edges_cross(i, j) {
                total += 1;
            }
        }
    }
    total
}
