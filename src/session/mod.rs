//! Session Management: Round state, answer checking, and mistake detection
//!
//! # Components
//! - `state.rs`: RoundState / SessionState and strict answer comparison
//! - `mistakes.rs`: Repeated-mistake detection per fingerboard position

pub mod mistakes;
pub mod state;

pub use mistakes::MistakeDetector;
pub use state::{Outcome, RoundState, SessionState};

// Only used internally or via struct fields
#[allow(unused_imports)]
pub use mistakes::MistakeSummary;
#[allow(unused_imports)]
pub use state::Mismatch;
