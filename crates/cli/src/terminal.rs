use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::render::{Line, Tone};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const CRITICAL: Color = Color::Red;
    const HIGH: Color = Color::DarkYellow;
    const MEDIUM: Color = Color::Yellow;
    const NOMINAL: Color = Color::Green;
    const HEADER: Color = Color::Magenta;
    const DIM: Color = Color::DarkGrey;
}

fn color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Header => Some(Colors::HEADER),
        Tone::Critical => Some(Colors::CRITICAL),
        Tone::High => Some(Colors::HIGH),
        Tone::Medium => Some(Colors::MEDIUM),
        Tone::Nominal => Some(Colors::NOMINAL),
        Tone::Dim => Some(Colors::DIM),
    }
}

/// Writes rendered lines to stdout, colored unless disabled.
pub struct Terminal {
    color: bool,
}

impl Terminal {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn print_lines(&self, lines: &[Line]) -> Result<()> {
        let mut stdout = io::stdout().lock();
        for line in lines {
            match color(line.tone).filter(|_| self.color) {
                Some(c) => {
                    let bold = matches!(line.tone, Tone::Header | Tone::Critical);
                    if bold {
                        execute!(stdout, SetAttribute(Attribute::Bold))?;
                    }
                    execute!(
                        stdout,
                        SetForegroundColor(c),
                        Print(&line.text),
                        ResetColor,
                        SetAttribute(Attribute::Reset),
                        Print("\n")
                    )?;
                }
                None => writeln!(stdout, "{}", line.text)?,
            }
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_json(&self, value: &impl serde::Serialize) -> Result<()> {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
        Ok(())
    }
}
