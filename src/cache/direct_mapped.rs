//! Direct-mapped cache with generation-based O(1) clearing.
//!
//! Each key hashes to exactly one slot; inserting overwrites whatever the
//! slot held. Entries are stamped with the current generation, so `clear()`
//! only bumps a counter.

use crate::utils::MyHash;

/// A single cache entry with generation stamp.
#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    generation: u64,
}

/// A lossy, fixed-size memoization table.
pub struct DirectMappedCache<K, V> {
    entries: Vec<Option<Entry<K, V>>>,
    bitmask: u64,
    generation: u64,
    hits: usize,
    misses: usize,
    faults: usize,
}

impl<K, V> DirectMappedCache<K, V> {
    /// Creates a new cache with `2^bits` slots.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Cache bits must be in range 0..=31, got {}", bits);

        let size = 1usize << bits;
        Self {
            entries: (0..size).map(|_| None).collect(),
            bitmask: (size - 1) as u64,
            generation: 1,
            hits: 0,
            misses: 0,
            faults: 0,
        }
    }

    /// Returns the number of slots in the cache.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Returns the number of cache faults (collision misses).
    pub fn faults(&self) -> usize {
        self.faults
    }

    /// Invalidates every entry in O(1).
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Drops all entries and reallocates with `2^bits` slots.
    pub fn resize(&mut self, bits: usize) {
        assert!(bits <= 31, "Cache bits must be in range 0..=31, got {}", bits);

        let size = 1usize << bits;
        self.entries = (0..size).map(|_| None).collect();
        self.bitmask = (size - 1) as u64;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<K: MyHash, V> DirectMappedCache<K, V> {
    #[inline]
    fn index(&self, key: &K) -> usize {
        (key.hash() & self.bitmask) as usize
    }
}

impl<K, V> DirectMappedCache<K, V>
where
    K: MyHash + Eq,
    V: Copy,
{
    /// Looks up a key in the cache.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<V> {
        let idx = self.index(key);
        match &self.entries[idx] {
            Some(entry) if entry.generation == self.generation && entry.key == *key => {
                self.hits += 1;
                Some(entry.value)
            }
            Some(entry) if entry.generation == self.generation => {
                self.faults += 1;
                self.misses += 1;
                None
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a key-value pair, overwriting any entry at the same slot.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        let idx = self.index(&key);
        self.entries[idx] = Some(Entry {
            key,
            value,
            generation: self.generation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get() {
        let mut cache = DirectMappedCache::<(u64, u64), i32>::new(4);

        cache.insert((1, 2), 42);
        cache.insert((3, 4), 99);

        assert_eq!(cache.get(&(1, 2)), Some(42));
        assert_eq!(cache.get(&(3, 4)), Some(99));
        assert_eq!(cache.get(&(5, 6)), None);
    }

    #[test]
    fn test_overwrite() {
        let mut cache = DirectMappedCache::<(u64, u64), i32>::new(4);

        cache.insert((1, 2), 10);
        cache.insert((1, 2), 20);
        assert_eq!(cache.get(&(1, 2)), Some(20));
    }

    #[test]
    fn test_clear() {
        let mut cache = DirectMappedCache::<(u64, u64), i32>::new(4);

        cache.insert((1, 2), 42);
        cache.clear();
        assert_eq!(cache.get(&(1, 2)), None);

        cache.insert((1, 2), 43);
        assert_eq!(cache.get(&(1, 2)), Some(43));
    }

    #[test]
    fn test_resize_drops_entries() {
        let mut cache = DirectMappedCache::<(u64, u64), i32>::new(2);
        cache.insert((1, 2), 42);
        cache.resize(6);
        assert_eq!(cache.capacity(), 64);
        assert_eq!(cache.get(&(1, 2)), None);
    }

    #[test]
    fn test_collisions_evict() {
        let mut cache = DirectMappedCache::<(u64, u64), i32>::new(2); // 4 slots

        for i in 0..16 {
            cache.insert((i, 0), i as i32);
        }

        let found = (0..16).filter(|&i| cache.get(&(i, 0)).is_some()).count();
        assert!(found <= 4);
    }

    #[test]
    fn test_statistics() {
        let mut cache = DirectMappedCache::<(u64, u64), i32>::new(4);

        cache.get(&(1, 2));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 0);

        cache.insert((1, 2), 42);
        cache.get(&(1, 2));
        assert_eq!(cache.hits(), 1);
    }
}
