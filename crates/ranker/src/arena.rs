//! Fixed-capacity bump allocator
//!
//! A single-shot arena over a caller-sized buffer: `malloc` advances an
//! atomic cursor and returns the start offset of the allocation, or
//! `None` once the buffer is exhausted. `rewind` resets the cursor to
//! zero in O(1); no destructors run and offsets handed out before the
//! rewind become meaningless (the caller must not dereference stale
//! offsets after a rewind).
//!
//! The cursor is a single atomic updated via compare-and-swap, so
//! concurrent callers see a consistent high-water mark without a lock.
//! This crate's [`crate::engine::RankingEngine`] uses the arena only at
//! construction time, to size-check the accumulator table and pointer
//! array against a capacity budget before allocating their backing
//! storage; it never calls `malloc` from the hot path (see `DESIGN.md`).

use std::sync::atomic::{AtomicUsize, Ordering};

/// A bump allocator over a fixed-size byte budget.
///
/// `Arena` hands out non-overlapping offset ranges `[start, start+bytes)`
/// within `[0, capacity)`. It does not own or address real memory itself
/// — callers combine the returned offset with their own storage. This
/// keeps the allocator usable both as a pure capacity ledger (as
/// `RankingEngine` uses it) and as the basis for a real bump allocator
/// over an externally owned buffer.
#[derive(Debug)]
pub struct Arena {
    capacity: usize,
    cursor: AtomicUsize,
}

impl Arena {
    /// Create a new arena with the given byte capacity.
    pub fn new(capacity: usize) -> Self {
        Arena {
            capacity,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Allocate `bytes` with the given alignment, returning the start
    /// offset of the allocation, or `None` if the arena does not have
    /// enough remaining capacity (including any padding needed to reach
    /// the requested alignment).
    ///
    /// `alignment` must be a power of two; `0` and `1` are both treated
    /// as "no alignment requirement".
    pub fn malloc(&self, bytes: usize, alignment: usize) -> Option<usize> {
        let align = alignment.max(1);
        debug_assert!(align.is_power_of_two(), "alignment must be a power of two");

        loop {
            let used = self.cursor.load(Ordering::Acquire);
            let padding = (align - (used % align)) % align;
            let start = used.checked_add(padding)?;
            let end = start.checked_add(bytes)?;
            if end > self.capacity {
                return None;
            }
            match self
                .cursor
                .compare_exchange_weak(used, end, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Some(start),
                Err(_) => continue,
            }
        }
    }

    /// Reset the cursor to zero. Offsets returned by earlier `malloc`
    /// calls must not be used after this call.
    pub fn rewind(&self) {
        self.cursor.store(0, Ordering::Release);
    }

    /// Bytes currently in use (the high-water mark since construction or
    /// the last `rewind`).
    pub fn size(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Total byte capacity of the arena.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes still available for allocation (ignoring alignment padding).
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.size())
    }
}
