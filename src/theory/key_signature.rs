//! Key signature table: signed sharp/flat counts and their altered notes
//!
//! Handles:
//! - Count to altered-letter mapping (sharp and flat progressions)
//! - The curated set of drill keys with display names
//! - Uniform random key selection

use rand::seq::SliceRandom;
use rand::Rng;

/// One of the seven natural note letters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteLetter {
    /// Letter as displayed (e.g. in mismatch listings)
    pub fn label(&self) -> char {
        match self {
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
        }
    }
}

/// How a note is played relative to its natural pitch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alteration {
    /// Half step below natural (flat key signatures)
    Lowered,
    Natural,
    /// Half step above natural (sharp key signatures)
    Raised,
}

impl Alteration {
    /// One-character symbol used on the fingerboard grid
    pub fn symbol(&self) -> char {
        match self {
            Alteration::Lowered => 'b',
            Alteration::Natural => '-',
            Alteration::Raised => '#',
        }
    }

    /// Short English label
    pub fn label(&self) -> &'static str {
        match self {
            Alteration::Lowered => "low",
            Alteration::Natural => "natural",
            Alteration::Raised => "high",
        }
    }
}

/// A key signature, identified by its signed sharp/flat count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySignature {
    /// Positive = sharps, negative = flats, 0 = C major
    pub count: i8,
    /// Fixed display name
    pub name: &'static str,
}

/// Order in which sharps are added to a key signature
const SHARP_ORDER: [NoteLetter; 7] = [
    NoteLetter::F,
    NoteLetter::C,
    NoteLetter::G,
    NoteLetter::D,
    NoteLetter::A,
    NoteLetter::E,
    NoteLetter::B,
];

/// Order in which flats are added to a key signature
const FLAT_ORDER: [NoteLetter; 7] = [
    NoteLetter::B,
    NoteLetter::E,
    NoteLetter::A,
    NoteLetter::D,
    NoteLetter::G,
    NoteLetter::C,
    NoteLetter::F,
];

/// Drill keys: first four sharps and flats plus C major
const SUPPORTED_KEYS: [KeySignature; 9] = [
    KeySignature { count: 0, name: "C major" },
    KeySignature { count: 1, name: "G major" },
    KeySignature { count: 2, name: "D major" },
    KeySignature { count: 3, name: "A major" },
    KeySignature { count: 4, name: "E major" },
    KeySignature { count: -1, name: "F major" },
    KeySignature { count: -2, name: "B-flat major" },
    KeySignature { count: -3, name: "E-flat major" },
    KeySignature { count: -4, name: "A-flat major" },
];

/// The fixed, ordered set of keys the drill draws from
pub fn supported_keys() -> &'static [KeySignature] {
    &SUPPORTED_KEYS
}

/// Altered letters for a signature count
///
/// Counts outside the theoretical -7..=7 range yield an empty list, so
/// unknown signatures behave like C major (all notes natural).
pub fn altered_letters(count: i8) -> Vec<(NoteLetter, Alteration)> {
    if count > 0 && count <= 7 {
        SHARP_ORDER[..count as usize]
            .iter()
            .map(|&letter| (letter, Alteration::Raised))
            .collect()
    } else if count < 0 && count >= -7 {
        FLAT_ORDER[..(-count) as usize]
            .iter()
            .map(|&letter| (letter, Alteration::Lowered))
            .collect()
    } else {
        Vec::new()
    }
}

/// Strict variant: reject counts outside the theoretical range
#[allow(dead_code)]
pub fn try_altered_letters(
    count: i8,
) -> Result<Vec<(NoteLetter, Alteration)>, Box<dyn std::error::Error>> {
    if !(-7..=7).contains(&count) {
        return Err(format!("invalid key signature count: {}", count).into());
    }
    Ok(altered_letters(count))
}

/// How a natural letter is played under a signature count
pub fn alteration_of(letter: NoteLetter, count: i8) -> Alteration {
    altered_letters(count)
        .iter()
        .find(|(altered, _)| *altered == letter)
        .map(|(_, alteration)| *alteration)
        .unwrap_or(Alteration::Natural)
}

/// Pick a drill key uniformly at random
pub fn pick_random() -> KeySignature {
    let mut rng = rand::thread_rng();
    pick_random_with(&mut rng)
}

/// Pick a drill key uniformly using the given generator
pub fn pick_random_with<R: Rng + ?Sized>(rng: &mut R) -> KeySignature {
    // The set is non-empty by construction, so choose cannot fail
    *SUPPORTED_KEYS
        .choose(rng)
        .unwrap_or(&SUPPORTED_KEYS[0])
}

/// Look up a supported key by its count
#[allow(dead_code)]
pub fn key_for_count(count: i8) -> Option<KeySignature> {
    SUPPORTED_KEYS.iter().copied().find(|k| k.count == count)
}
