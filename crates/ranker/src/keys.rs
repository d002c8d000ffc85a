//! The primary-key table collaborator
//!
//! The core treats the mapping from internal doc_id to external string
//! key as a read-only collaborator it does not own (see `spec.md` §1 and
//! §5: "Shared immutable state: the `primary_keys` table is shared
//! read-only across all engines for the lifetime of the index"). This
//! module defines the minimal trait the engine needs and one concrete
//! implementation sufficient for this crate's own tests; production
//! callers supply their own (e.g. backed by a segment's term/doc
//! dictionary, as in `in-mem-engine`'s `DocIdMap`).

/// A read-only, positional mapping from internal document id to its
/// external string key.
pub trait PrimaryKeys {
    /// The external key for `doc_id`. Implementations may panic if
    /// `doc_id` is out of range, consistent with this crate's general
    /// policy of not bounds-checking doc ids on the hot path.
    fn key(&self, doc_id: u32) -> &str;
}

impl PrimaryKeys for Vec<String> {
    fn key(&self, doc_id: u32) -> &str {
        &self[doc_id as usize]
    }
}

impl PrimaryKeys for [String] {
    fn key(&self, doc_id: u32) -> &str {
        &self[doc_id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_string_primary_keys() {
        let keys: Vec<String> = vec!["d0".into(), "d1".into(), "d2".into()];
        assert_eq!(keys.key(1), "d1");
    }

    #[test]
    fn test_slice_primary_keys() {
        let keys: Vec<String> = vec!["a".into(), "b".into()];
        let slice: &[String] = &keys;
        assert_eq!(slice.key(0), "a");
    }
}
