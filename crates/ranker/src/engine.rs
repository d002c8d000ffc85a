//! The query engine: lifecycle and the hot `add_rsv` path
//!
//! `RankingEngine` ties together the accumulator table (§4.2), the
//! bounded min-heap (§4.3), and the top-k partial sort (§4.4) into the
//! single surface this crate exports (see `spec.md` §6, "Engine API").
//! An instance is created once per worker thread and reused across many
//! queries via `rewind`; it is not safe to share or call concurrently
//! (see `spec.md` §5).

use crate::accumulator::{cmp_candidate, AccumulatorTable, Score};
use crate::arena::Arena;
use crate::config::RankerConfig;
use crate::error::{RankerError, RankerResult};
use crate::heap::BoundedHeap;
use crate::keys::PrimaryKeys;
use crate::sort::partial_sort_desc;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

/// Lifecycle state, per `spec.md` §4.5.
///
/// `add_rsv` is legal from `Ready` or `Accumulating`; `begin` is legal
/// from `Accumulating` or `Finalised` and is idempotent; `rewind` returns
/// to `Ready` from any state. Calling `add_rsv` again after `Finalised`
/// (i.e. without an intervening `rewind`) is a precondition violation,
/// not a runtime error, per `spec.md` §7 — the partial sort has already
/// reordered the heap's backing array in place at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Ready,
    Accumulating,
    Finalised,
}

/// The accumulator-and-heap ranking engine.
///
/// `S` is the accumulator score width (`u16`, `u32`, or `u64`); `K` is
/// the primary-key collaborator, shared read-only across every engine
/// instance built over the same index (`spec.md` §5).
#[derive(Debug)]
pub struct RankingEngine<S: Score, K: PrimaryKeys> {
    primary_keys: Arc<K>,
    documents: usize,
    top_k: usize,
    table: AccumulatorTable<S>,
    heap: BoundedHeap,
    state: EngineState,
    /// Capacity ledger only; see `arena.rs` and `DESIGN.md`. Construction
    /// proves the accumulator table and pointer array fit inside a
    /// nominal budget before allocating their real (`Vec`-backed)
    /// storage — the arena itself never backs live data.
    _arena: Arena,
}

impl<S: Score, K: PrimaryKeys> RankingEngine<S, K> {
    /// Construct an engine for an index of `documents` documents,
    /// surfacing the top `top_k` results per query.
    ///
    /// Fails if `documents == 0`, `top_k == 0`, `top_k > documents`, or if
    /// the computed working-set size does not fit the engine's internal
    /// capacity budget.
    pub fn new(primary_keys: Arc<K>, documents: usize, top_k: usize) -> RankerResult<Self> {
        Self::with_config(primary_keys, documents, top_k, RankerConfig::new())
    }

    /// Construct an engine with explicit tuning (`RankerConfig`).
    pub fn with_config(
        primary_keys: Arc<K>,
        documents: usize,
        top_k: usize,
        config: RankerConfig,
    ) -> RankerResult<Self> {
        if documents == 0 {
            return Err(RankerError::InvalidParameter(
                "documents must be >= 1".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(RankerError::InvalidParameter(
                "top_k must be >= 1".to_string(),
            ));
        }
        if top_k > documents {
            return Err(RankerError::InvalidParameter(format!(
                "top_k ({top_k}) must not exceed documents ({documents})"
            )));
        }

        let table = AccumulatorTable::<S>::new(documents, config.strip_bits);
        let cell_bytes = table.width() * table.strips() * std::mem::size_of::<S>();
        let dirty_bytes = table.strips();
        let pointer_bytes = top_k * std::mem::size_of::<u32>();

        let arena = Arena::new(cell_bytes + dirty_bytes + pointer_bytes);
        arena
            .malloc(cell_bytes + dirty_bytes, std::mem::align_of::<S>())
            .ok_or(RankerError::AllocationFailed {
                requested: cell_bytes + dirty_bytes,
                available: arena.remaining(),
            })?;
        arena
            .malloc(pointer_bytes, std::mem::align_of::<u32>())
            .ok_or(RankerError::AllocationFailed {
                requested: pointer_bytes,
                available: arena.remaining(),
            })?;

        info!(
            documents,
            top_k,
            strip_width = table.width(),
            strips = table.strips(),
            "constructed ranking engine"
        );

        Ok(RankingEngine {
            primary_keys,
            documents,
            top_k,
            table,
            heap: BoundedHeap::with_capacity(top_k),
            state: EngineState::Ready,
            _arena: arena,
        })
    }

    /// Number of documents this engine was sized for.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Configured top-k.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Return to `Ready`: empty the tracked set and mark every strip of
    /// the accumulator table clean, in O(H) time. Idempotent — calling
    /// it twice in a row is indistinguishable from calling it once.
    pub fn rewind(&mut self) {
        self.heap.clear();
        self.table.clear_all();
        self.state = EngineState::Ready;
        debug!("rewind");
    }

    /// Add `score` to `doc_id`'s running total. `doc_id` must be in
    /// `[0, documents)` and `score` should be positive; both are
    /// preconditions the caller (typically a posting-list decoder) is
    /// responsible for, not bounds-checked here (`spec.md` §6).
    pub fn add_rsv(&mut self, doc_id: u32, score: S) {
        if self.state == EngineState::Ready {
            self.state = EngineState::Accumulating;
        }

        let full_before = self.heap.len() == self.top_k;
        // Capture the root and its score *before* the update: if `doc_id`
        // is itself the root, reading it afterwards would observe the
        // already-grown value and wrongly fail the in-heap test below
        // (see `spec.md` §4.5's "before the update decides membership").
        let root_before = full_before.then(|| self.heap.root().expect("heap is full, so it is non-empty"));
        let root_score_before = root_before.map(|root| self.table.get(root));

        let old = self.table.add(doc_id, score);

        if !full_before {
            if old == S::ZERO {
                self.heap.append(doc_id);
                if self.heap.len() == self.top_k {
                    self.heap.make_heap(&self.table);
                }
            }
            return;
        }

        let root = root_before.expect("full_before implies a captured root");
        let root_score = root_score_before.expect("full_before implies a captured root score");
        let already_in_heap = cmp_candidate(old, doc_id, root_score, root) != Ordering::Less;

        if already_in_heap {
            self.heap.promote(doc_id, &self.table);
        } else {
            // `doc_id != root` here (the equal-id case always satisfies
            // `already_in_heap` above), so the root's score is unaffected
            // by this update and `root_score` is still current.
            let new_score = self.table.get(doc_id);
            if cmp_candidate(new_score, doc_id, root_score, root) == Ordering::Greater {
                self.heap.push_back(doc_id, &self.table);
            }
        }
    }

    /// Partially sort the tracked set and return an iterator over the
    /// results in descending `(score, doc_id)` order. Legal from
    /// `Accumulating` or `Finalised`, and idempotent: calling it again
    /// without an intervening `add_rsv`/`rewind` re-sorts (harmlessly)
    /// and yields the same sequence.
    ///
    /// The returned iterator borrows this engine immutably, so the
    /// borrow checker enforces the invalidation rule in `spec.md` §4.5
    /// ("the sequence ... is invalidated by the next `add_rsv` or
    /// `rewind`") at compile time: you cannot call either while a
    /// `RankedResults` from this `begin()` is still alive.
    pub fn begin(&mut self) -> RankedResults<'_, S, K> {
        self.state = EngineState::Finalised;
        let len = self.heap.len();
        partial_sort_desc(self.heap.as_mut_slice(), self.top_k, &self.table);
        let n = self.top_k.min(len);
        RankedResults {
            table: &self.table,
            keys: &self.primary_keys,
            ids: &self.heap.as_slice()[..n],
            pos: 0,
        }
    }
}

/// A finite, forward-only sequence of `(doc_id, key, score)` triples in
/// descending rank order, produced by [`RankingEngine::begin`].
pub struct RankedResults<'a, S: Score, K: PrimaryKeys> {
    table: &'a AccumulatorTable<S>,
    keys: &'a K,
    ids: &'a [u32],
    pos: usize,
}

impl<'a, S: Score, K: PrimaryKeys> Iterator for RankedResults<'a, S, K> {
    type Item = (u32, &'a str, S);

    fn next(&mut self) -> Option<Self::Item> {
        let doc_id = *self.ids.get(self.pos)?;
        self.pos += 1;
        Some((doc_id, self.keys.key(doc_id), self.table.get(doc_id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ids.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a, S: Score, K: PrimaryKeys> ExactSizeIterator for RankedResults<'a, S, K> {}
