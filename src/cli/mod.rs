//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Keystroke capture using crossterm
//! - `display.rs`: Fingerboard rendering and session UI

pub mod display;
pub mod input;
