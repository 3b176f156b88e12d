//! Manager configuration.

/// Sizing and growth policy of a [`ZddManager`](crate::zdd::ZddManager).
///
/// # Example
///
/// ```
/// use zdd_rs::config::ZddConfig;
/// use zdd_rs::zdd::ZddManager;
///
/// let config = ZddConfig::default().with_initial_nodes(1 << 12).with_max_nodes(1 << 20);
/// let mgr = ZddManager::with_config(config);
/// assert_eq!(mgr.num_vars(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZddConfig {
    /// Initial number of arena slots (terminals included).
    pub initial_nodes: usize,
    /// Ceiling on arena slots. Reaching it is fatal.
    pub max_nodes: usize,
    /// A collection that frees less than this share of the arena (in percent)
    /// is followed by growth.
    pub min_free_percent: usize,
    /// Growth multiplier applied to the arena capacity.
    pub grow_factor: f64,
    /// Above this many slots the arena collects even when no node was dereferenced.
    pub simple_deadcount_threshold: usize,
    /// Initial size of every operation cache, in bits.
    pub cache_bits: usize,
    /// Upper bound on operation cache size, in bits.
    pub max_cache_bits: usize,
    /// Arena slots per cache slot when a cache follows arena growth.
    pub cache_ratio: usize,
}

impl Default for ZddConfig {
    fn default() -> Self {
        Self {
            initial_nodes: 1 << 14,
            max_nodes: 1 << 28,
            min_free_percent: 20,
            grow_factor: 2.0,
            simple_deadcount_threshold: 1 << 16,
            cache_bits: 12,
            max_cache_bits: 22,
            cache_ratio: 4,
        }
    }
}

impl ZddConfig {
    /// Minimum number of arena slots; two are taken by the terminals.
    pub const MIN_NODES: usize = 8;

    pub fn with_initial_nodes(mut self, initial_nodes: usize) -> Self {
        self.initial_nodes = initial_nodes;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_min_free_percent(mut self, percent: usize) -> Self {
        self.min_free_percent = percent;
        self
    }

    pub fn with_grow_factor(mut self, factor: f64) -> Self {
        self.grow_factor = factor;
        self
    }

    /// A threshold of 0 makes every full arena collect before growing.
    pub fn with_simple_deadcount_threshold(mut self, threshold: usize) -> Self {
        self.simple_deadcount_threshold = threshold;
        self
    }

    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }

    pub fn with_max_cache_bits(mut self, bits: usize) -> Self {
        self.max_cache_bits = bits;
        self
    }

    /// Clamp the fields into a usable range.
    pub(crate) fn normalized(mut self) -> Self {
        self.initial_nodes = self.initial_nodes.clamp(Self::MIN_NODES, u32::MAX as usize - 1);
        self.max_nodes = self.max_nodes.clamp(self.initial_nodes, u32::MAX as usize - 1);
        self.min_free_percent = self.min_free_percent.min(90);
        if self.grow_factor.is_nan() || self.grow_factor <= 1.0 {
            self.grow_factor = 2.0;
        }
        self.max_cache_bits = self.max_cache_bits.min(31);
        self.cache_bits = self.cache_bits.min(self.max_cache_bits);
        self.cache_ratio = self.cache_ratio.max(1);
        self
    }

    /// Number of free slots a collection must produce to avoid growth.
    pub(crate) fn min_free_nodes(&self, capacity: usize) -> usize {
        (capacity * self.min_free_percent / 100).max(1)
    }

    /// Cache size (in bits) matching an arena of `capacity` slots.
    pub(crate) fn cache_bits_for(&self, capacity: usize) -> usize {
        let slots = (capacity / self.cache_ratio).max(1);
        let bits = usize::BITS as usize - 1 - slots.leading_zeros() as usize;
        bits.clamp(self.cache_bits, self.max_cache_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_bounds() {
        let config = ZddConfig::default()
            .with_initial_nodes(2)
            .with_max_nodes(1)
            .with_grow_factor(0.5)
            .with_cache_bits(40)
            .normalized();
        assert_eq!(config.initial_nodes, ZddConfig::MIN_NODES);
        assert_eq!(config.max_nodes, ZddConfig::MIN_NODES);
        assert_eq!(config.grow_factor, 2.0);
        assert!(config.cache_bits <= config.max_cache_bits);
    }

    #[test]
    fn test_cache_bits_follow_capacity() {
        let config = ZddConfig::default().normalized();
        assert_eq!(config.cache_bits_for(1 << 10), config.cache_bits);
        assert_eq!(config.cache_bits_for(1 << 20), 18);
        assert_eq!(config.cache_bits_for(1 << 30), config.max_cache_bits);
    }

    #[test]
    fn test_min_free_nodes() {
        let config = ZddConfig::default();
        assert_eq!(config.min_free_nodes(1000), 200);
        assert_eq!(config.min_free_nodes(1), 1);
    }
}
