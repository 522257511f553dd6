//! Word frequency table with DJB2 hashing and separate chaining.
//!
//! ## Layout
//!
//! ```text
//!   buckets: Vec<Vec<FrequencyEntry>>
//!
//!   [0] -> ("the", 12, #0) -> ("fox", 2, #7)
//!   [1] -> (empty)
//!   [2] -> ("quick", 3, #1)
//!   ...
//!   [n-1] -> ("dog", 4, #9)
//! ```
//!
//! A word lives in bucket `djb2(word) % buckets.len()`. Each chain owns its
//! entries, so dropping the table frees everything. The bucket count doubles
//! once the load factor would pass 3/4, keeping chains short on average.
//!
//! ## Operations
//!
//! | Operation             | Complexity          |
//! |-----------------------|---------------------|
//! | `insert_or_increment` | amortized O(1)      |
//! | `get`                 | O(1) average        |
//! | `entries`             | O(buckets + len)    |

use std::fmt;

const INITIAL_BUCKETS: usize = 64;
const MAX_LOAD_NUMERATOR: usize = 3;
const MAX_LOAD_DENOMINATOR: usize = 4;

/// DJB2 string hash: `h = h * 33 + byte`, seeded with 5381
#[inline]
pub fn djb2(word: &str) -> u64 {
    word.bytes().fold(5381u64, |hash, byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte))
    })
}

/// One distinct word and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub word: String,
    pub count: u64,
    /// Position of this word among distinct words, in order of first occurrence
    pub first_seen: u64,
}

impl FrequencyEntry {
    pub fn new(word: impl Into<String>, count: u64, first_seen: u64) -> Self {
        Self {
            word: word.into(),
            count,
            first_seen,
        }
    }
}

impl fmt::Display for FrequencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.word, self.count)
    }
}

/// Word to count mapping
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    buckets: Vec<Vec<FrequencyEntry>>,
    len: usize,
    total_words: u64,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::with_buckets(INITIAL_BUCKETS)
    }

    fn with_buckets(count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); count],
            len: 0,
            total_words: 0,
        }
    }

    /// Count one occurrence of `word`, inserting it with count 1 if absent.
    /// Returns the updated count.
    pub fn insert_or_increment(&mut self, word: &str) -> u64 {
        self.total_words += 1;

        let index = self.bucket_index(word);
        if let Some(entry) = self.buckets[index].iter_mut().find(|e| e.word == word) {
            entry.count += 1;
            return entry.count;
        }

        if (self.len + 1) * MAX_LOAD_DENOMINATOR > self.buckets.len() * MAX_LOAD_NUMERATOR {
            self.grow();
        }

        let entry = FrequencyEntry::new(word, 1, self.len as u64);
        let index = self.bucket_index(word);
        self.buckets[index].push(entry);
        self.len += 1;
        1
    }

    /// Look up a word's entry
    pub fn get(&self, word: &str) -> Option<&FrequencyEntry> {
        self.buckets[self.bucket_index(word)]
            .iter()
            .find(|e| e.word == word)
    }

    /// Occurrence count for `word`, 0 when absent
    pub fn count(&self, word: &str) -> u64 {
        self.get(word).map_or(0, |e| e.count)
    }

    /// All entries in bucket order, then chain order
    pub fn entries(&self) -> impl Iterator<Item = &FrequencyEntry> + '_ {
        self.buckets.iter().flatten()
    }

    /// Consume the table, yielding its entries in the same order as `entries`
    pub fn into_entries(self) -> impl Iterator<Item = FrequencyEntry> {
        self.buckets.into_iter().flatten()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of all counts
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Distinct words per bucket
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[inline]
    fn bucket_index(&self, word: &str) -> usize {
        (djb2(word) % self.buckets.len() as u64) as usize
    }

    fn grow(&mut self) {
        let new_count = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, vec![Vec::new(); new_count]);
        for entry in old.into_iter().flatten() {
            let index = self.bucket_index(&entry.word);
            self.buckets[index].push(entry);
        }
        log::trace!("frequency table grew to {} buckets", new_count);
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Extend<&'a str> for FrequencyTable {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for word in words {
            self.insert_or_increment(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(words: I) -> Self {
        let mut table = Self::new();
        table.extend(words);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 5381 * 33 + 97);
        assert_eq!(djb2("ab"), (5381 * 33 + 97) * 33 + 98);
    }

    #[test]
    fn test_insert_then_increment() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.insert_or_increment("cat"), 1);
        assert_eq!(table.insert_or_increment("cat"), 2);
        assert_eq!(table.insert_or_increment("dog"), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_words(), 3);
        assert_eq!(table.count("cat"), 2);
        assert_eq!(table.count("dog"), 1);
        assert_eq!(table.count("cow"), 0);
    }

    #[test]
    fn test_first_seen_ordinals() {
        let table: FrequencyTable = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(table.get("b").unwrap().first_seen, 0);
        assert_eq!(table.get("a").unwrap().first_seen, 1);
        assert_eq!(table.get("c").unwrap().first_seen, 2);
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.entries().count(), 0);
        assert_eq!(table.total_words(), 0);
    }

    #[test]
    fn test_grows_and_keeps_counts() {
        let mut table = FrequencyTable::new();
        let initial = table.bucket_count();
        for i in 0..1_000 {
            let word = format!("w{}", i);
            table.insert_or_increment(&word);
            table.insert_or_increment(&word);
        }
        assert!(table.bucket_count() > initial);
        assert!(table.load_factor() <= 0.75);
        assert_eq!(table.len(), 1_000);
        for i in 0..1_000 {
            assert_eq!(table.count(&format!("w{}", i)), 2);
        }
    }

    #[test]
    fn test_entries_match_brute_force() {
        let words = ["x", "y", "x", "z", "x", "y"];
        let table: FrequencyTable = words.iter().copied().collect();

        let mut expected: HashMap<&str, u64> = HashMap::new();
        for w in words {
            *expected.entry(w).or_insert(0) += 1;
        }

        assert_eq!(table.entries().count(), expected.len());
        for entry in table.entries() {
            assert_eq!(expected[entry.word.as_str()], entry.count);
        }
    }

    #[test]
    fn test_into_entries_preserves_order() {
        let table: FrequencyTable = ["q", "w", "e", "r", "q"].into_iter().collect();
        let borrowed: Vec<_> = table.entries().cloned().collect();
        let owned: Vec<_> = table.into_entries().collect();
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn test_entry_display() {
        let entry = FrequencyEntry::new("cat", 3, 0);
        assert_eq!(entry.to_string(), "cat\t3");
    }
}
