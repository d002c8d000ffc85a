//! Quickselect-based top-k partial sort
//!
//! Given the heap's backing array `P[0..L)`, produce `P[0..min(L, top_k))`
//! sorted in descending `(score, doc_id)` order, leaving `P[top_k..L)` in
//! unspecified order. `select_nth_unstable_by` partitions in expected
//! O(L); only the selected prefix is then fully sorted, so the whole
//! operation is expected O(L) rather than O(L log L).

use crate::accumulator::{cmp_candidate, AccumulatorTable, Score};
use std::cmp::Ordering;

/// Sort `ids[0..min(ids.len(), top_k))` into descending
/// `(score, doc_id)` order in place.
pub(crate) fn partial_sort_desc<S: Score>(ids: &mut [u32], top_k: usize, table: &AccumulatorTable<S>) {
    let len = ids.len();
    let k = top_k.min(len);
    if k == 0 {
        return;
    }

    let cmp_desc = |a: &u32, b: &u32| -> Ordering { cmp_candidate(table.get(*b), *b, table.get(*a), *a) };

    if len > k {
        ids.select_nth_unstable_by(k - 1, cmp_desc);
    }
    ids[..k].sort_unstable_by(cmp_desc);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_from(scores: &[(u32, u32)]) -> AccumulatorTable<u32> {
        let max_doc = scores.iter().map(|&(d, _)| d).max().unwrap_or(0);
        let mut t = AccumulatorTable::new((max_doc as usize + 2).max(4), None);
        for &(doc, score) in scores {
            t.add(doc, score);
        }
        t
    }

    #[test]
    fn test_partial_sort_descending_by_score() {
        let table = table_from(&[(0, 3), (1, 9), (2, 1), (3, 7)]);
        let mut ids = vec![0u32, 1, 2, 3];
        partial_sort_desc(&mut ids, 4, &table);
        assert_eq!(ids, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_partial_sort_truncates_to_top_k() {
        let table = table_from(&[(0, 3), (1, 9), (2, 1), (3, 7), (4, 5)]);
        let mut ids = vec![0u32, 1, 2, 3, 4];
        partial_sort_desc(&mut ids, 2, &table);
        assert_eq!(&ids[..2], &[1, 3]); // top two by score
    }

    #[test]
    fn test_partial_sort_tie_break_by_doc_id_descending() {
        let table = table_from(&[(2, 5), (4, 5), (1, 5)]);
        let mut ids = vec![2u32, 4, 1];
        partial_sort_desc(&mut ids, 2, &table);
        assert_eq!(&ids[..2], &[4, 2]); // equal scores, higher doc_id first
    }

    #[test]
    fn test_partial_sort_empty_and_zero_k() {
        let table = table_from(&[(0, 1)]);
        let mut ids: Vec<u32> = vec![];
        partial_sort_desc(&mut ids, 5, &table);
        assert!(ids.is_empty());

        let mut ids2 = vec![0u32];
        partial_sort_desc(&mut ids2, 0, &table);
        assert_eq!(ids2, vec![0]); // untouched when k == 0
    }

    #[test]
    fn test_partial_sort_idempotent() {
        let table = table_from(&[(0, 3), (1, 9), (2, 1), (3, 7)]);
        let mut ids = vec![0u32, 1, 2, 3];
        partial_sort_desc(&mut ids, 3, &table);
        let first = ids.clone();
        partial_sort_desc(&mut ids, 3, &table);
        assert_eq!(ids[..3], first[..3]);
    }
}
