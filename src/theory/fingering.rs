//! Fingering resolver: canonical finger placements for a key signature
//!
//! Handles:
//! - The fixed first-position note table (string x finger -> natural letter)
//! - Resolving a key signature into a full 4x4 alteration map

use crate::theory::key_signature::{
    alteration_of, try_altered_letters, Alteration, KeySignature, NoteLetter,
};

/// Fingers placed per string in first position
pub const FINGER_COUNT: usize = 4;

/// The four violin strings, low to high
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringName {
    G,
    D,
    A,
    E,
}

impl StringName {
    /// All strings in fingerboard order
    pub const ALL: [StringName; 4] = [StringName::G, StringName::D, StringName::A, StringName::E];

    /// Row index on the fingerboard (G = 0 .. E = 3)
    pub fn index(&self) -> usize {
        match self {
            StringName::G => 0,
            StringName::D => 1,
            StringName::A => 2,
            StringName::E => 3,
        }
    }

    /// Open-string pitch class letter
    pub fn label(&self) -> char {
        match self {
            StringName::G => 'G',
            StringName::D => 'D',
            StringName::A => 'A',
            StringName::E => 'E',
        }
    }
}

/// Natural letter produced by a finger in first position
///
/// Fixed by fingerboard geometry; finger 0 is the 1st placed finger.
pub fn natural_letter(string: StringName, finger: usize) -> NoteLetter {
    debug_assert!(finger < FINGER_COUNT);
    match (string, finger) {
        (StringName::G, 0) => NoteLetter::A,
        (StringName::G, 1) => NoteLetter::B,
        (StringName::G, 2) => NoteLetter::C,
        (StringName::G, _) => NoteLetter::D,
        (StringName::D, 0) => NoteLetter::E,
        (StringName::D, 1) => NoteLetter::F,
        (StringName::D, 2) => NoteLetter::G,
        (StringName::D, _) => NoteLetter::A,
        (StringName::A, 0) => NoteLetter::B,
        (StringName::A, 1) => NoteLetter::C,
        (StringName::A, 2) => NoteLetter::D,
        (StringName::A, _) => NoteLetter::E,
        (StringName::E, 0) => NoteLetter::F,
        (StringName::E, 1) => NoteLetter::G,
        (StringName::E, 2) => NoteLetter::A,
        (StringName::E, _) => NoteLetter::B,
    }
}

/// One alteration per string and finger, 16 cells total
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingeringMap {
    cells: [[Alteration; FINGER_COUNT]; 4],
}

impl FingeringMap {
    /// Map with every finger in its natural place (round starting state)
    pub fn all_natural() -> Self {
        FingeringMap {
            cells: [[Alteration::Natural; FINGER_COUNT]; 4],
        }
    }

    /// Alteration at a fingerboard position
    pub fn get(&self, string: StringName, finger: usize) -> Alteration {
        debug_assert!(finger < FINGER_COUNT);
        self.cells[string.index()][finger]
    }

    /// Set the alteration at a fingerboard position
    pub fn set(&mut self, string: StringName, finger: usize, alteration: Alteration) {
        if finger < FINGER_COUNT {
            self.cells[string.index()][finger] = alteration;
        }
    }

    /// Iterate all 16 positions in fingerboard order
    pub fn positions(&self) -> impl Iterator<Item = (StringName, usize, Alteration)> + '_ {
        StringName::ALL.iter().flat_map(move |&string| {
            (0..FINGER_COUNT).map(move |finger| (string, finger, self.get(string, finger)))
        })
    }
}

impl Default for FingeringMap {
    fn default() -> Self {
        Self::all_natural()
    }
}

/// Canonical fingering for a key signature
///
/// Pure and total: unknown counts fall back to all-natural, matching the
/// key signature table's fallback.
pub fn resolve(signature: KeySignature) -> FingeringMap {
    resolve_count(signature.count)
}

/// Canonical fingering for a raw signature count
pub fn resolve_count(count: i8) -> FingeringMap {
    let mut map = FingeringMap::all_natural();
    for string in StringName::ALL {
        for finger in 0..FINGER_COUNT {
            map.set(string, finger, alteration_of(natural_letter(string, finger), count));
        }
    }
    map
}

/// Strict variant: error on counts outside the theoretical -7..=7 range
#[allow(dead_code)]
pub fn resolve_strict(count: i8) -> Result<FingeringMap, Box<dyn std::error::Error>> {
    try_altered_letters(count)?;
    Ok(resolve_count(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_only_altered(map: &FingeringMap, letters: &[NoteLetter], alteration: Alteration) {
        for (string, finger, got) in map.positions() {
            let letter = natural_letter(string, finger);
            if letters.contains(&letter) {
                assert_eq!(got, alteration, "{}{} ({:?})", string.label(), finger + 1, letter);
            } else {
                assert_eq!(got, Alteration::Natural, "{}{} ({:?})", string.label(), finger + 1, letter);
            }
        }
    }

    #[test]
    fn test_natural_letter_table() {
        let expected = [
            (StringName::G, [NoteLetter::A, NoteLetter::B, NoteLetter::C, NoteLetter::D]),
            (StringName::D, [NoteLetter::E, NoteLetter::F, NoteLetter::G, NoteLetter::A]),
            (StringName::A, [NoteLetter::B, NoteLetter::C, NoteLetter::D, NoteLetter::E]),
            (StringName::E, [NoteLetter::F, NoteLetter::G, NoteLetter::A, NoteLetter::B]),
        ];
        for (string, letters) in expected {
            for (finger, letter) in letters.into_iter().enumerate() {
                assert_eq!(natural_letter(string, finger), letter);
            }
        }
    }

    #[test]
    fn test_resolve_covers_all_sixteen_positions() {
        for count in -4..=4 {
            let map = resolve_count(count);
            assert_eq!(map.positions().count(), 16);
        }
    }

    #[test]
    fn test_c_major_all_natural() {
        assert_eq!(resolve_count(0), FingeringMap::all_natural());
    }

    #[test]
    fn test_g_major_raises_only_f() {
        let map = resolve_count(1);
        assert_only_altered(&map, &[NoteLetter::F], Alteration::Raised);
        // F sits at D-string finger 2 and E-string finger 1
        assert_eq!(map.get(StringName::D, 1), Alteration::Raised);
        assert_eq!(map.get(StringName::E, 0), Alteration::Raised);
    }

    #[test]
    fn test_f_major_lowers_only_b() {
        let map = resolve_count(-1);
        assert_only_altered(&map, &[NoteLetter::B], Alteration::Lowered);
        // B sits at G-string finger 2, A-string finger 1, E-string finger 4
        assert_eq!(map.get(StringName::G, 1), Alteration::Lowered);
        assert_eq!(map.get(StringName::A, 0), Alteration::Lowered);
        assert_eq!(map.get(StringName::E, 3), Alteration::Lowered);
    }

    #[test]
    fn test_e_major_raises_f_c_g_d() {
        let map = resolve_count(4);
        assert_only_altered(
            &map,
            &[NoteLetter::F, NoteLetter::C, NoteLetter::G, NoteLetter::D],
            Alteration::Raised,
        );
        // G string [A B C D] -> [natural natural high high]
        assert_eq!(map.get(StringName::G, 0), Alteration::Natural);
        assert_eq!(map.get(StringName::G, 1), Alteration::Natural);
        assert_eq!(map.get(StringName::G, 2), Alteration::Raised);
        assert_eq!(map.get(StringName::G, 3), Alteration::Raised);
    }

    #[test]
    fn test_a_flat_major_lowers_b_e_a_d() {
        let map = resolve_count(-4);
        assert_only_altered(
            &map,
            &[NoteLetter::B, NoteLetter::E, NoteLetter::A, NoteLetter::D],
            Alteration::Lowered,
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        for count in -4..=4 {
            assert_eq!(resolve_count(count), resolve_count(count));
        }
    }

    #[test]
    fn test_out_of_range_count_resolves_like_c_major() {
        assert_eq!(resolve_count(99), resolve_count(0));
        assert_eq!(resolve_count(-99), resolve_count(0));
    }

    #[test]
    fn test_resolve_strict() {
        assert!(resolve_strict(99).is_err());
        let strict = resolve_strict(2).expect("supported count");
        assert_eq!(strict, resolve_count(2));
    }
}
