//! Fixed-capacity min-heap that keeps the N best-ranked entries.
//!
//! The root always holds the weakest retained entry, so deciding whether a
//! candidate belongs in the top N is a single comparison. Accepted candidates
//! cost O(log N); rejected ones cost O(1).
//!
//! ## Ranking
//!
//! Higher counts rank higher. Equal counts are ordered by `first_seen`: the
//! word that appeared earlier in the text ranks higher. Since `first_seen` is
//! unique per word, the order is total and the retained set does not depend on
//! the order in which the frequency table hands out its entries.
//!
//! ```text
//!   capacity = 4, offers: a:5 b:2 c:7 d:3 e:4 f:1
//!
//!            b:2                   d:3                  d:3
//!           /   \     offer e:4   /   \    offer f:1   /   \
//!         d:3   c:7   ------->  e:4   c:7  -------->  e:4   c:7   (f rejected)
//!         /                     /                     /
//!       a:5                   a:5                   a:5
//! ```

use crate::error::{Result, TopWordsError};
use crate::frequency::FrequencyEntry;
use std::cmp::Ordering;

/// Compare two entries by rank; `Greater` means `a` ranks above `b`
#[inline]
pub fn rank_cmp(a: &FrequencyEntry, b: &FrequencyEntry) -> Ordering {
    a.count
        .cmp(&b.count)
        .then_with(|| b.first_seen.cmp(&a.first_seen))
}

/// What happened to an offered entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// Added while the heap still had room
    Inserted,
    /// Displaced the weakest entry, which is returned
    Replaced(FrequencyEntry),
    /// Ranked no higher than the weakest entry of a full heap
    Rejected,
}

impl Offer {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Offer::Rejected)
    }
}

/// Bounded min-heap of frequency entries
#[derive(Debug, Clone)]
pub struct TopNSelector {
    heap: Vec<FrequencyEntry>,
    capacity: usize,
}

impl TopNSelector {
    /// Create a selector keeping at most `capacity` entries
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TopWordsError::invalid("selector capacity must be at least 1"));
        }
        Ok(Self {
            heap: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Offer a candidate entry
    pub fn offer(&mut self, entry: FrequencyEntry) -> Offer {
        if self.heap.len() < self.capacity {
            self.heap.push(entry);
            self.sift_up(self.heap.len() - 1);
            return Offer::Inserted;
        }

        if rank_cmp(&entry, &self.heap[0]) == Ordering::Greater {
            let evicted = std::mem::replace(&mut self.heap[0], entry);
            self.sift_down(0);
            Offer::Replaced(evicted)
        } else {
            Offer::Rejected
        }
    }

    /// The weakest retained entry
    pub fn peek_min(&self) -> Option<&FrequencyEntry> {
        self.heap.first()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained entries in raw heap order (not sorted)
    pub fn extract_all(self) -> Vec<FrequencyEntry> {
        self.heap
    }

    /// Retained entries, best first
    pub fn into_ranked(self) -> Vec<FrequencyEntry> {
        let mut entries = self.heap;
        entries.sort_unstable_by(|a, b| rank_cmp(b, a));
        entries
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if rank_cmp(&self.heap[index], &self.heap[parent]) != Ordering::Less {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && rank_cmp(&self.heap[left], &self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && rank_cmp(&self.heap[right], &self.heap[smallest]) == Ordering::Less {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    fn is_min_heap(&self) -> bool {
        (1..self.heap.len())
            .all(|i| rank_cmp(&self.heap[(i - 1) / 2], &self.heap[i]) != Ordering::Greater)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, count: u64, first_seen: u64) -> FrequencyEntry {
        FrequencyEntry::new(word, count, first_seen)
    }

    fn ranked_words(selector: TopNSelector) -> Vec<String> {
        selector.into_ranked().into_iter().map(|e| e.word).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            TopNSelector::new(0),
            Err(TopWordsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_fills_then_keeps_best() {
        let mut selector = TopNSelector::new(4).unwrap();
        let offers = [("a", 5), ("b", 2), ("c", 7), ("d", 3), ("e", 4), ("f", 1)];
        for (i, (word, count)) in offers.iter().enumerate() {
            selector.offer(entry(word, *count, i as u64));
            assert!(selector.is_min_heap());
        }
        assert_eq!(selector.len(), 4);
        assert_eq!(selector.peek_min().unwrap().word, "d");
        assert_eq!(ranked_words(selector), vec!["c", "a", "e", "d"]);
    }

    #[test]
    fn test_offer_outcomes() {
        let mut selector = TopNSelector::new(1).unwrap();
        assert_eq!(selector.offer(entry("a", 2, 0)), Offer::Inserted);
        assert_eq!(selector.offer(entry("b", 1, 1)), Offer::Rejected);
        assert_eq!(
            selector.offer(entry("c", 3, 2)),
            Offer::Replaced(entry("a", 2, 0))
        );
        assert!(!Offer::Rejected.is_accepted());
        assert!(Offer::Inserted.is_accepted());
    }

    #[test]
    fn test_equal_count_later_word_does_not_displace() {
        let mut selector = TopNSelector::new(1).unwrap();
        selector.offer(entry("early", 3, 0));
        assert_eq!(selector.offer(entry("late", 3, 5)), Offer::Rejected);
        assert_eq!(selector.peek_min().unwrap().word, "early");
    }

    #[test]
    fn test_equal_count_earlier_word_wins_regardless_of_offer_order() {
        let mut selector = TopNSelector::new(1).unwrap();
        selector.offer(entry("late", 3, 5));
        assert!(selector.offer(entry("early", 3, 0)).is_accepted());
        assert_eq!(selector.peek_min().unwrap().word, "early");
    }

    #[test]
    fn test_fewer_entries_than_capacity() {
        let mut selector = TopNSelector::new(10).unwrap();
        selector.offer(entry("x", 1, 0));
        selector.offer(entry("y", 2, 1));
        assert_eq!(selector.capacity(), 10);
        assert_eq!(ranked_words(selector), vec!["y", "x"]);
    }

    #[test]
    fn test_extract_all_is_heap_order() {
        let mut selector = TopNSelector::new(3).unwrap();
        selector.offer(entry("a", 9, 0));
        selector.offer(entry("b", 1, 1));
        selector.offer(entry("c", 5, 2));
        let raw = selector.extract_all();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0].word, "b");
    }

    #[test]
    fn test_ranked_ties_by_first_seen() {
        let mut selector = TopNSelector::new(3).unwrap();
        selector.offer(entry("c", 2, 2));
        selector.offer(entry("a", 2, 0));
        selector.offer(entry("b", 2, 1));
        assert_eq!(ranked_words(selector), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_cmp() {
        assert_eq!(rank_cmp(&entry("a", 2, 0), &entry("b", 1, 1)), Ordering::Greater);
        assert_eq!(rank_cmp(&entry("a", 2, 0), &entry("b", 2, 1)), Ordering::Greater);
        assert_eq!(rank_cmp(&entry("a", 2, 3), &entry("b", 2, 1)), Ordering::Less);
    }
}
