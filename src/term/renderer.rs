//! TerminalRenderer: flushes styled rows to a real terminal.
//!
//! The drawing API is deliberately tiny: views hand over a list of rows of
//! styled spans and the renderer repaints the alternate screen. These boards
//! are small enough that a full redraw per frame costs nothing worth a
//! diffing framebuffer.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

/// Semantic styles; the renderer owns the mapping to terminal attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanStyle {
    #[default]
    Plain,
    /// Blocked tiles, used blocks, spent charges.
    Dim,
    /// The cursor's current target.
    Cursor,
    /// Transient hint highlight.
    Hint,
    Title,
    /// Advisory and terminal-state messages.
    Alert,
    /// Scores, rewards, completed hints.
    Good,
}

/// A run of text drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, SpanStyle::Plain)
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One screen row.
pub type Row = Vec<Span>;

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint the whole screen from the given rows.
    pub fn draw(&mut self, rows: &[Row]) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;

        let mut current = SpanStyle::Plain;
        self.apply_style(current)?;
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                self.stdout.queue(Print("\r\n"))?;
            }
            for span in row {
                if span.style != current {
                    self.apply_style(span.style)?;
                    current = span.style;
                }
                self.stdout.queue(Print(&span.text))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, style: SpanStyle) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        match style {
            SpanStyle::Plain => {}
            SpanStyle::Dim => {
                self.stdout.queue(SetAttribute(Attribute::Dim))?;
            }
            SpanStyle::Cursor => {
                self.stdout.queue(SetAttribute(Attribute::Reverse))?;
            }
            SpanStyle::Hint => {
                self.stdout.queue(SetForegroundColor(Color::Yellow))?;
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            SpanStyle::Title => {
                self.stdout.queue(SetAttribute(Attribute::Bold))?;
            }
            SpanStyle::Alert => {
                self.stdout.queue(SetForegroundColor(Color::Red))?;
            }
            SpanStyle::Good => {
                self.stdout.queue(SetForegroundColor(Color::Green))?;
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
