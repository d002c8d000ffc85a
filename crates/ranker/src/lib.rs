//! Top-k accumulator/heap ranking engine for disjunctive query evaluation.
//!
//! Given postings that arrive in arbitrary order, [`RankingEngine`] keeps
//! a running score per document (the accumulator table, `accumulator`)
//! and a bounded set of the strongest candidates seen so far (the
//! min-heap, `heap`), then produces the final top-k ranking with a single
//! quickselect-based partial sort (`sort`) rather than a full sort over
//! every document ever touched. An instance is reused across many
//! queries via `rewind`, which clears its state in time proportional to
//! the accumulator table's strip count rather than the number of
//! documents in the index.
//!
//! This crate covers only the ranking core: decoding postings lists,
//! parsing queries, and loading an index are the caller's responsibility
//! (see [`keys::PrimaryKeys`] for the one collaborator this crate does
//! require).
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;
pub mod arena;
pub mod config;
pub mod engine;
pub mod error;
mod heap;
pub mod keys;
mod sort;

pub use accumulator::Score;
pub use config::RankerConfig;
pub use engine::{RankedResults, RankingEngine};
pub use error::{RankerError, RankerResult};
pub use keys::PrimaryKeys;
