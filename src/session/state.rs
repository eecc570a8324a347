//! Round and session state tracking
//!
//! Maintains:
//! - The current round's target key and canonical answer
//! - Strict all-or-nothing answer checking
//! - Cumulative round, streak, and timing metrics

use crate::theory::fingering::{resolve, FingeringMap, StringName};
use crate::theory::key_signature::{pick_random, pick_random_with, Alteration, KeySignature};
use rand::Rng;
use std::time::Instant;

/// One wrong finger placement in a checked answer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub string: StringName,
    /// Zero-based finger index (display adds 1)
    pub finger: usize,
    pub expected: Alteration,
    pub got: Alteration,
}

impl Mismatch {
    /// Position label in the form "G2"
    pub fn position_label(&self) -> String {
        format!("{}{}", self.string.label(), self.finger + 1)
    }
}

/// Result of checking a learner's answer against the round target
#[derive(Clone, Debug)]
pub struct Outcome {
    /// Whether the guessed signature count matched
    pub signature_correct: bool,
    /// Every fingerboard position where the learner's alteration was wrong
    pub mismatches: Vec<Mismatch>,
}

impl Outcome {
    /// Correct only if both the signature and all 16 placements match
    pub fn is_correct(&self) -> bool {
        self.signature_correct && self.mismatches.is_empty()
    }
}

/// One drill round: the target key and its canonical fingering
#[derive(Clone, Copy, Debug)]
pub struct RoundState {
    pub key: KeySignature,
    pub answer: FingeringMap,
}

impl RoundState {
    /// Start a round with a random drill key
    #[allow(dead_code)]
    pub fn start() -> Self {
        Self::for_key(pick_random())
    }

    /// Start a round using the given generator (seeded runs and tests)
    pub fn start_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::for_key(pick_random_with(rng))
    }

    /// Build the round for a specific key
    pub fn for_key(key: KeySignature) -> Self {
        RoundState {
            key,
            answer: resolve(key),
        }
    }

    /// Check a learner's signature guess and fingering, all-or-nothing
    pub fn check(&self, guessed_count: i8, fingering: &FingeringMap) -> Outcome {
        let mut mismatches = Vec::new();

        for (string, finger, expected) in self.answer.positions() {
            let got = fingering.get(string, finger);
            if got != expected {
                mismatches.push(Mismatch {
                    string,
                    finger,
                    expected,
                    got,
                });
            }
        }

        Outcome {
            signature_correct: guessed_count == self.key.count,
            mismatches,
        }
    }
}

/// Cumulative session state, owned by the caller
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Rounds answered this session
    pub rounds_played: u32,
    /// Rounds answered correctly
    pub rounds_correct: u32,
    /// Consecutive correct answers
    pub streak: u32,
    /// Longest streak this session
    pub best_streak: u32,
    /// Session start time
    pub start_time: Option<Instant>,
}

impl SessionState {
    /// Create a fresh session
    pub fn new() -> Self {
        SessionState {
            rounds_played: 0,
            rounds_correct: 0,
            streak: 0,
            best_streak: 0,
            start_time: None,
        }
    }

    /// Start the session timer
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Session duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Session duration in minutes
    #[allow(dead_code)]
    pub fn duration_mins(&self) -> f64 {
        self.duration_secs() / 60.0
    }

    /// Record a checked round
    pub fn record_round(&mut self, outcome: &Outcome) {
        self.rounds_played += 1;
        if outcome.is_correct() {
            self.rounds_correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    /// Fraction of rounds answered correctly (1.0 before any rounds)
    pub fn accuracy(&self) -> f32 {
        if self.rounds_played == 0 {
            1.0
        } else {
            self.rounds_correct as f32 / self.rounds_played as f32
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::key_signature::key_for_count;

    fn round_for(count: i8) -> RoundState {
        RoundState::for_key(key_for_count(count).expect("supported drill key"))
    }

    #[test]
    fn test_correct_answer() {
        let round = round_for(2);
        let outcome = round.check(2, &round.answer);
        assert!(outcome.signature_correct);
        assert!(outcome.mismatches.is_empty());
        assert!(outcome.is_correct());
    }

    #[test]
    fn test_wrong_signature_only() {
        let round = round_for(1);
        let outcome = round.check(-1, &round.answer);
        assert!(!outcome.signature_correct);
        assert!(outcome.mismatches.is_empty());
        assert!(!outcome.is_correct());
    }

    #[test]
    fn test_wrong_fingering_lists_positions() {
        let round = round_for(1);
        // All-natural misses the two raised F positions (D2 and E1)
        let outcome = round.check(1, &FingeringMap::all_natural());
        assert!(outcome.signature_correct);
        assert!(!outcome.is_correct());
        let labels: Vec<String> = outcome
            .mismatches
            .iter()
            .map(Mismatch::position_label)
            .collect();
        assert_eq!(labels, vec!["D2".to_string(), "E1".to_string()]);
        for m in &outcome.mismatches {
            assert_eq!(m.expected, Alteration::Raised);
            assert_eq!(m.got, Alteration::Natural);
        }
    }

    #[test]
    fn test_no_partial_credit() {
        let round = round_for(4);
        let mut almost = round.answer;
        almost.set(StringName::G, 2, Alteration::Natural);
        let outcome = round.check(4, &almost);
        assert!(!outcome.is_correct());
        assert_eq!(outcome.mismatches.len(), 1);
    }

    #[test]
    fn test_session_records_streak() {
        let round = round_for(0);
        let correct = round.check(0, &round.answer);
        let wrong = round.check(3, &round.answer);

        let mut session = SessionState::new();
        session.record_round(&correct);
        session.record_round(&correct);
        session.record_round(&wrong);
        session.record_round(&correct);

        assert_eq!(session.rounds_played, 4);
        assert_eq!(session.rounds_correct, 3);
        assert_eq!(session.streak, 1);
        assert_eq!(session.best_streak, 2);
        assert!((session.accuracy() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_round_start_uses_supported_keys() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let round = RoundState::start_with(&mut rng);
            assert!(key_for_count(round.key.count).is_some());
            assert_eq!(round.answer, resolve(round.key));
        }
    }
}
