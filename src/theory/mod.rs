//! Music Theory Engine: Key signatures and first-position fingerings
//!
//! # Components
//! - `key_signature.rs`: Count-to-altered-letters table and random key pick
//! - `fingering.rs`: Canonical fingering resolution for the four strings

pub mod fingering;
pub mod key_signature;

pub use fingering::{resolve, FingeringMap, StringName, FINGER_COUNT};
pub use key_signature::{Alteration, KeySignature, NoteLetter};

// Strict-mode variants are library surface only; the CLI clamps its input
#[allow(unused_imports)]
pub use fingering::resolve_strict;
#[allow(unused_imports)]
pub use key_signature::try_altered_letters;
