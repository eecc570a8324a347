//! Terminal display and UI rendering
//!
//! Features:
//! - Fingerboard grid with color-coded finger placements
//! - Signature selector and round progress line
//! - Outcome banner, solution reveal, and mistake summary

use crate::session::mistakes::MistakeDetector;
use crate::session::state::Outcome;
use crate::theory::fingering::{natural_letter, FingeringMap, StringName, FINGER_COUNT};
use crate::theory::key_signature::Alteration;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

/// Color legend from the fingerboard: blue = low, gold = natural, red = high
fn alteration_color(alteration: Alteration) -> Color {
    match alteration {
        Alteration::Lowered => Color::Blue,
        Alteration::Natural => Color::Yellow,
        Alteration::Raised => Color::Red,
    }
}

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Create display without alternate screen (simpler mode)
    pub fn simple() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display {
            use_alternate_screen: false,
        })
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Render the round header with the target key name
    pub fn show_round_header(
        &self,
        round: u32,
        total_rounds: u32,
        key_name: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Cyan),
            Print(format!("Round {}/{}: ", round, total_rounds)),
            ResetColor,
            Print(key_name),
            Print("\n")
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the learner's current signature guess
    pub fn show_signature_guess(&self, guess: i8) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        let description = match guess {
            0 => "none".to_string(),
            1 => "1 sharp".to_string(),
            -1 => "1 flat".to_string(),
            n if n > 0 => format!("{} sharps", n),
            n => format!("{} flats", -n),
        };

        execute!(
            stdout,
            cursor::MoveTo(0, 3),
            SetForegroundColor(Color::Magenta),
            Print("Signature: "),
            ResetColor,
            Print(format!("{:<12}", description)),
            SetForegroundColor(Color::DarkGrey),
            Print("  (+/- to adjust)\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Draw a 4x4 fingering grid starting at the given terminal row
    fn draw_grid(
        &self,
        map: &FingeringMap,
        grid_cursor: Option<(usize, usize)>,
        start_row: u16,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        for (row, &string) in StringName::ALL.iter().enumerate() {
            execute!(
                stdout,
                cursor::MoveTo(0, start_row + row as u16),
                SetForegroundColor(Color::Cyan),
                Print(format!("{} |", string.label())),
                ResetColor
            )?;

            for finger in 0..FINGER_COUNT {
                let alteration = map.get(string, finger);
                let selected = grid_cursor == Some((row, finger));
                let cell = format!("{}{}", finger + 1, alteration.symbol());

                execute!(
                    stdout,
                    Print(if selected { " [" } else { "  " }),
                    SetForegroundColor(alteration_color(alteration)),
                    Print(cell),
                    ResetColor,
                    Print(if selected { "]" } else { " " })
                )?;
            }
            execute!(stdout, Print("\n"))?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Show the learner's working fingerboard with the selection cursor
    pub fn show_fingerboard(
        &self,
        map: &FingeringMap,
        grid_cursor: (usize, usize),
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.draw_grid(map, Some(grid_cursor), 5)
    }

    /// Display streak and running accuracy
    pub fn show_progress(
        &self,
        streak: u32,
        rounds_played: u32,
        accuracy: f32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 10),
            SetForegroundColor(Color::Magenta),
            Print("Streak: "),
            ResetColor,
            Print(format!("{}", streak)),
            Print("  |  "),
            Print(format!("Rounds: {}", rounds_played)),
            Print("  |  Accuracy: "),
            SetForegroundColor(if accuracy > 0.9 {
                Color::Green
            } else if accuracy > 0.7 {
                Color::Yellow
            } else {
                Color::Red
            }),
            Print(format!("{:.0}%", accuracy * 100.0)),
            ResetColor,
            Print("\n")
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show the checked answer's outcome banner and mismatch detail
    pub fn show_outcome(&self, outcome: &Outcome) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 12),
            SetForegroundColor(Color::Blue),
            Print("─".repeat(50)),
            Print("\n"),
            ResetColor
        )?;

        if outcome.is_correct() {
            execute!(
                stdout,
                cursor::MoveTo(0, 13),
                SetForegroundColor(Color::Green),
                Print("Correct!\n"),
                ResetColor
            )?;
        } else {
            let mut parts = Vec::new();
            if !outcome.signature_correct {
                parts.push("signature is wrong".to_string());
            }
            if !outcome.mismatches.is_empty() {
                let labels: Vec<String> = outcome
                    .mismatches
                    .iter()
                    .map(|m| {
                        let letter = natural_letter(m.string, m.finger);
                        format!("{} ({})", m.position_label(), letter.label())
                    })
                    .collect();
                parts.push(format!("fingers off at {}", labels.join(", ")));
            }

            execute!(
                stdout,
                cursor::MoveTo(0, 13),
                SetForegroundColor(Color::Red),
                Print("Incorrect: "),
                ResetColor,
                Print(parts.join("; ")),
                Print("\n")
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Reveal the canonical fingering after a wrong answer
    pub fn show_solution(&self, answer: &FingeringMap) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 15),
            SetForegroundColor(Color::Cyan),
            Print("Solution:\n"),
            ResetColor
        )?;
        self.draw_grid(answer, None, 16)
    }

    /// Show persistent mistake positions with their dominant confusion
    pub fn show_mistakes(
        &self,
        detector: &MistakeDetector,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let summary = detector.summary();
        if summary.problematic_positions.is_empty() {
            return Ok(());
        }

        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print("Trouble spots: "),
            ResetColor
        )?;

        for &position in &summary.problematic_positions {
            let (string, finger) = position;
            if let Some(((expected, got), count)) = detector.primary_confusion(position) {
                execute!(
                    stdout,
                    Print(format!(
                        "{}{} ({} instead of {}, {}x)  ",
                        string.label(),
                        finger + 1,
                        got.label(),
                        expected.label(),
                        count
                    ))
                )?;
            }
        }
        execute!(stdout, Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    /// Show help text
    pub fn show_help(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 21),
            SetForegroundColor(Color::DarkGrey),
            Print("Arrows: move  |  b/n/h: low/natural/high  |  Space: cycle  |  "),
            Print("+/-: signature  |  Enter: check  |  Esc: quit\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        if self.use_alternate_screen {
            execute!(
                stdout,
                terminal::LeaveAlternateScreen,
                cursor::Show,
            )?;
        }

        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        // Return simple display that doesn't use alternate screen
        Display {
            use_alternate_screen: false,
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
