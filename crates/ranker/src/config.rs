//! Construction-time configuration
//!
//! `RankingEngine::new` takes its required parameters directly (mirroring
//! `in-mem-search`'s `BM25LiteScorer::new(k1, b)`); `RankerConfig` exists
//! for callers that also want to override the accumulator table's strip
//! width rather than accept the `floor(log2(documents)) / 2` default.

/// Optional tuning knobs layered over the engine's required
/// `documents`/`top_k` construction parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankerConfig {
    /// Overrides the accumulator table's strip-width exponent `S`
    /// (`W = 2^S`). `None` uses the `floor(log2(documents)) / 2`
    /// default described in `spec.md` §3.
    pub strip_bits: Option<u32>,
}

impl RankerConfig {
    /// Default configuration: strip width chosen automatically.
    pub fn new() -> Self {
        RankerConfig::default()
    }

    /// Builder: force a specific strip-width exponent.
    pub fn with_strip_bits(mut self, strip_bits: u32) -> Self {
        self.strip_bits = Some(strip_bits);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_override() {
        let cfg = RankerConfig::new();
        assert_eq!(cfg.strip_bits, None);
    }

    #[test]
    fn test_with_strip_bits_builder() {
        let cfg = RankerConfig::new().with_strip_bits(4);
        assert_eq!(cfg.strip_bits, Some(4));
    }
}
