//! Top-N Selection
//!
//! Bounded min-heap that keeps the N highest-scoring candidates seen in a
//! stream, in O(M log N) time and O(N) space.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A word with its similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub word: String,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Heap slot. `seq` is the offer order, used to keep ties stable.
#[derive(Debug)]
struct Slot {
    candidate: ScoredCandidate,
    seq: u64,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        // Greatest = weakest: lowest score, then latest offer
        other
            .candidate
            .score
            .total_cmp(&self.candidate.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Keeps the `capacity` best candidates offered to it
#[derive(Debug)]
pub struct TopNSelector {
    capacity: usize,
    heap: BinaryHeap<Slot>,
    offered: u64,
}

impl TopNSelector {
    /// Create a selector that retains at most `capacity` candidates
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::new(),
            offered: 0,
        }
    }

    /// Number of candidates currently retained
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of candidates offered so far
    pub fn offered(&self) -> u64 {
        self.offered
    }

    /// Score a candidate must beat to get in, once the selector is full
    pub fn min_score(&self) -> Option<f64> {
        if self.heap.len() < self.capacity {
            None
        } else {
            self.heap.peek().map(|slot| slot.candidate.score)
        }
    }

    /// Offer a candidate. Once full, it replaces the current minimum only if
    /// its score is strictly greater; equal scores keep the earlier candidate.
    pub fn offer(&mut self, candidate: ScoredCandidate) {
        let seq = self.offered;
        self.offered += 1;

        if self.capacity == 0 {
            return;
        }

        if self.heap.len() < self.capacity {
            self.heap.push(Slot { candidate, seq });
            return;
        }

        if let Some(mut weakest) = self.heap.peek_mut() {
            if candidate.score.total_cmp(&weakest.candidate.score) == Ordering::Greater {
                // Heap sifts down when `weakest` is dropped
                *weakest = Slot { candidate, seq };
            }
        }
    }

    /// Retained candidates, highest score first; ties in offer order
    pub fn into_sorted_vec(self) -> Vec<ScoredCandidate> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|slot| slot.candidate)
            .collect()
    }
}

impl Extend<ScoredCandidate> for TopNSelector {
    fn extend<I: IntoIterator<Item = ScoredCandidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.offer(candidate);
        }
    }
}

/// Select the `n` highest-scoring candidates from `candidates`
pub fn select_top_n<I>(candidates: I, n: usize) -> Vec<ScoredCandidate>
where
    I: IntoIterator<Item = ScoredCandidate>,
{
    let mut selector = TopNSelector::new(n);
    selector.extend(candidates);
    selector.into_sorted_vec()
}
