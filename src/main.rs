//! Violin Fingering Trainer - first-position key signature drills
//!
//! Single-session, stateless, self-contained CLI application.
//! Each round picks a random key; the learner sets the signature count and
//! all 16 finger placements, then checks against the theory engine.

mod cli;
mod session;
mod theory;

use clap::Parser;
use cli::display::Display;
use cli::input::{ArrowKey, InputHandler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use session::{MistakeDetector, RoundState, SessionState};
use std::error::Error;
use std::fs;
use theory::{Alteration, FingeringMap, StringName, FINGER_COUNT};

#[derive(Parser, Debug)]
#[command(name = "Violin Fingering Trainer")]
#[command(about = "First-position violin fingering drills across key signatures")]
struct Args {
    /// Number of rounds per session
    #[arg(short, long, default_value = "10")]
    rounds: u32,

    /// Seed for the key sequence (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write a JSON session summary to this path on exit
    #[arg(long)]
    stats_out: Option<String>,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,
}

/// Widest signature count offered by the selector
const MAX_SIGNATURE: i8 = 4;

/// Cycle order for the space key: natural -> high -> low -> natural
fn next_alteration(current: Alteration) -> Alteration {
    match current {
        Alteration::Natural => Alteration::Raised,
        Alteration::Raised => Alteration::Lowered,
        Alteration::Lowered => Alteration::Natural,
    }
}

/// Write the end-of-session summary as JSON
fn write_stats(
    path: &str,
    session: &SessionState,
    mistakes: &MistakeDetector,
) -> Result<(), Box<dyn Error>> {
    let summary = mistakes.summary();
    let trouble_spots: Vec<String> = summary
        .problematic_positions
        .iter()
        .map(|&(string, finger)| format!("{}{}", string.label(), finger + 1))
        .collect();

    let data = json!({
        "version": "0.1.0",
        "rounds_played": session.rounds_played,
        "rounds_correct": session.rounds_correct,
        "best_streak": session.best_streak,
        "accuracy": session.accuracy(),
        "duration_secs": session.duration_secs(),
        "total_mistakes": mistakes.total_mistakes(),
        "trouble_spots": trouble_spots,
        "improving": summary.is_improving,
    });

    fs::write(path, serde_json::to_string_pretty(&data)?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("🎻 Violin Fingering Trainer v0.1.0");
    println!("Rounds: {} | First position, keys up to 4 sharps/flats", args.rounds);

    // Initialize display
    let display = Display::simple()?;
    display.clear()?;

    // Key sequence generator (seedable for reproducible sessions)
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Initialize session
    let mut session = SessionState::new();
    session.start();

    // Initialize tracking
    let mut mistakes = MistakeDetector::new();

    // Initialize input handler
    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    // Event loop
    'session: for round_no in 1..=args.rounds {
        let round = RoundState::start_with(&mut rng);

        let header = if args.debug {
            format!("{} (count {})", round.key.name, round.key.count)
        } else {
            round.key.name.to_string()
        };

        // Learner's working answer, reset each round
        let mut fingering = FingeringMap::all_natural();
        let mut guess: i8 = 0;
        let mut grid_cursor = (0usize, 0usize);

        'round: loop {
            // Display current state
            display.clear()?;
            display.show_round_header(round_no, args.rounds, &header)?;
            display.show_signature_guess(guess)?;
            display.show_fingerboard(&fingering, grid_cursor)?;
            display.show_progress(session.streak, session.rounds_played, session.accuracy())?;
            display.show_help()?;

            // Read input
            let key = match input.read_key()? {
                Some(key) => key,
                None => continue, // Timeout
            };

            // Check for exit
            if InputHandler::is_exit(&key) {
                break 'session;
            }

            // Grid navigation
            if let Some(arrow) = InputHandler::arrow(&key) {
                let (row, finger) = grid_cursor;
                grid_cursor = match arrow {
                    ArrowKey::Up => (row.saturating_sub(1), finger),
                    ArrowKey::Down => ((row + 1).min(StringName::ALL.len() - 1), finger),
                    ArrowKey::Left => (row, finger.saturating_sub(1)),
                    ArrowKey::Right => (row, (finger + 1).min(FINGER_COUNT - 1)),
                };
                continue;
            }

            // Handle enter/submit
            if InputHandler::is_enter(&key) {
                let outcome = round.check(guess, &fingering);
                session.record_round(&outcome);
                mistakes.record_outcome(&outcome);

                // Show result
                display.clear()?;
                display.show_round_header(round_no, args.rounds, &header)?;
                display.show_signature_guess(guess)?;
                display.show_fingerboard(&fingering, grid_cursor)?;
                display.show_progress(session.streak, session.rounds_played, session.accuracy())?;
                display.show_outcome(&outcome)?;
                if !outcome.is_correct() {
                    display.show_solution(&round.answer)?;
                }

                // Any key continues, exit keys end the session
                let key = input.wait_key()?;
                if InputHandler::is_exit(&key) {
                    break 'session;
                }
                break 'round;
            }

            // Signature and placement keys
            if let Some(c) = InputHandler::key_to_char(&key) {
                let (row, finger) = grid_cursor;
                let string = StringName::ALL[row];
                match c {
                    '+' | '=' => guess = (guess + 1).min(MAX_SIGNATURE),
                    '-' | '_' => guess = (guess - 1).max(-MAX_SIGNATURE),
                    'b' => fingering.set(string, finger, Alteration::Lowered),
                    'n' => fingering.set(string, finger, Alteration::Natural),
                    'h' => fingering.set(string, finger, Alteration::Raised),
                    ' ' => {
                        let cycled = next_alteration(fingering.get(string, finger));
                        fingering.set(string, finger, cycled);
                    }
                    _ => {}
                }
            }
        }
    }

    // Cleanup
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;

    // Summary
    println!("\n🎉 Session Complete!");
    println!(
        "📊 Final Stats: {}% accuracy | {}/{} rounds | best streak {} | {:.1}s",
        (session.accuracy() * 100.0) as u32,
        session.rounds_correct,
        session.rounds_played,
        session.best_streak,
        session.duration_secs()
    );

    display.show_mistakes(&mistakes)?;

    if let Some(path) = &args.stats_out {
        write_stats(path, &session, &mistakes)?;
        if args.debug {
            println!("Stats written to {}", path);
        }
    }

    println!("🎻 Keep practicing!");

    Ok(())
}
