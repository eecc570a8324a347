//! Mistake detection: identify repeated fingering errors
//!
//! Detects:
//! - Positions missed repeatedly (3+ times) across rounds
//! - The dominant confusion per position (e.g. natural where high was due)
//! - Whether recent rounds improve on earlier ones

use crate::session::state::{Mismatch, Outcome};
use crate::theory::fingering::StringName;
use crate::theory::key_signature::Alteration;
use rustc_hash::FxHashMap;

/// Minimum occurrences before a position counts as a persistent mistake
const MISTAKE_THRESHOLD: u32 = 3;

/// A fingerboard position, string plus zero-based finger index
pub type Position = (StringName, usize);

/// Tracks wrong placements across rounds
#[derive(Clone, Debug)]
pub struct MistakeDetector {
    /// Position -> ((expected, got) -> count)
    pairs: FxHashMap<Position, FxHashMap<(Alteration, Alteration), u32>>,
    /// Total wrong placements recorded
    total_mistakes: u32,
    /// Most recent wrong positions (for trending)
    recent: Vec<Position>,
}

impl MistakeDetector {
    /// Create a new detector
    pub fn new() -> Self {
        MistakeDetector {
            pairs: FxHashMap::default(),
            total_mistakes: 0,
            recent: Vec::with_capacity(50),
        }
    }

    /// Record a single wrong placement
    pub fn record(&mut self, mismatch: &Mismatch) {
        if mismatch.expected == mismatch.got {
            return; // Not a mistake
        }

        let position = (mismatch.string, mismatch.finger);
        self.pairs
            .entry(position)
            .or_default()
            .entry((mismatch.expected, mismatch.got))
            .and_modify(|count| *count += 1)
            .or_insert(1);

        self.total_mistakes += 1;

        // Keep the last 50 for trend comparison
        self.recent.push(position);
        if self.recent.len() > 50 {
            self.recent.remove(0);
        }
    }

    /// Record every wrong placement of a checked round
    pub fn record_outcome(&mut self, outcome: &Outcome) {
        for mismatch in &outcome.mismatches {
            self.record(mismatch);
        }
    }

    /// Positions missed at least the threshold number of times, sorted
    pub fn problematic_positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .pairs
            .iter()
            .filter_map(|(&position, pair_counts)| {
                let misses: u32 = pair_counts.values().sum();
                if misses >= MISTAKE_THRESHOLD {
                    Some(position)
                } else {
                    None
                }
            })
            .collect();
        positions.sort_by_key(|&(string, finger)| (string.index(), finger));
        positions
    }

    /// Most common confusion for a position
    pub fn primary_confusion(&self, position: Position) -> Option<((Alteration, Alteration), u32)> {
        self.pairs.get(&position).and_then(|pair_counts| {
            pair_counts
                .iter()
                .max_by_key(|(_, &count)| count)
                .map(|(&pair, &count)| (pair, count))
        })
    }

    /// Whether the recent window has no more distinct trouble spots than the
    /// window before it
    pub fn is_improving(&self, window_size: usize) -> bool {
        if self.recent.len() < 2 * window_size {
            return true; // Not enough data
        }

        let recent_window = &self.recent[self.recent.len() - window_size..];
        let older_window =
            &self.recent[self.recent.len() - 2 * window_size..self.recent.len() - window_size];

        let distinct = |window: &[Position]| {
            let mut seen: Vec<Position> = Vec::new();
            for &position in window {
                if !seen.contains(&position) {
                    seen.push(position);
                }
            }
            seen.len()
        };

        distinct(recent_window) <= distinct(older_window)
    }

    /// Total wrong placements recorded
    pub fn total_mistakes(&self) -> u32 {
        self.total_mistakes
    }

    /// Summary for the end-of-session report
    pub fn summary(&self) -> MistakeSummary {
        MistakeSummary {
            problematic_positions: self.problematic_positions(),
            is_improving: self.is_improving(10),
        }
    }

    /// Clear history (for starting a fresh drill)
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.pairs.clear();
        self.total_mistakes = 0;
        self.recent.clear();
    }
}

impl Default for MistakeDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of mistake patterns
#[derive(Clone, Debug)]
pub struct MistakeSummary {
    pub problematic_positions: Vec<Position>,
    pub is_improving: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miss(string: StringName, finger: usize) -> Mismatch {
        Mismatch {
            string,
            finger,
            expected: Alteration::Raised,
            got: Alteration::Natural,
        }
    }

    #[test]
    fn test_threshold_flags_persistent_positions() {
        let mut detector = MistakeDetector::new();
        for _ in 0..3 {
            detector.record(&miss(StringName::D, 1));
        }
        detector.record(&miss(StringName::E, 0));

        assert_eq!(detector.problematic_positions(), vec![(StringName::D, 1)]);
        assert_eq!(detector.total_mistakes(), 4);
    }

    #[test]
    fn test_primary_confusion() {
        let mut detector = MistakeDetector::new();
        detector.record(&miss(StringName::A, 0));
        detector.record(&miss(StringName::A, 0));
        detector.record(&Mismatch {
            string: StringName::A,
            finger: 0,
            expected: Alteration::Raised,
            got: Alteration::Lowered,
        });

        let ((expected, got), count) = detector
            .primary_confusion((StringName::A, 0))
            .expect("recorded position");
        assert_eq!(expected, Alteration::Raised);
        assert_eq!(got, Alteration::Natural);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_identical_pair_is_ignored() {
        let mut detector = MistakeDetector::new();
        detector.record(&Mismatch {
            string: StringName::G,
            finger: 2,
            expected: Alteration::Natural,
            got: Alteration::Natural,
        });
        assert_eq!(detector.total_mistakes(), 0);
    }

    #[test]
    fn test_improvement_trend() {
        let mut detector = MistakeDetector::new();
        // Older window touches four distinct positions, recent only one
        for finger in 0..4 {
            detector.record(&miss(StringName::G, finger));
        }
        for _ in 0..4 {
            detector.record(&miss(StringName::E, 0));
        }
        assert!(detector.is_improving(4));

        // Reverse the pattern: recent window spreads over more positions
        let mut worse = MistakeDetector::new();
        for _ in 0..4 {
            worse.record(&miss(StringName::E, 0));
        }
        for finger in 0..4 {
            worse.record(&miss(StringName::G, finger));
        }
        assert!(!worse.is_improving(4));
    }

    #[test]
    fn test_reset() {
        let mut detector = MistakeDetector::new();
        detector.record(&miss(StringName::D, 3));
        detector.reset();
        assert_eq!(detector.total_mistakes(), 0);
        assert!(detector.problematic_positions().is_empty());
    }
}
