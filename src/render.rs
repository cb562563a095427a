//! Terminal output for status cards, check rows and the task list.
//!
//! Each `*_line` method formats one row; the print helpers write it to
//! stdout. Errors go to stderr.

use crate::present::{BatteryLevel, StatusLine};
use crate::types::Tone;
use crossterm::style::{Color, Stylize};

const INDENT: &str = "  ";
const SECTION_BULLET: &str = "\u{2022}";
const LABEL_ERROR: &str = "error:";
const GAUGE_WIDTH: usize = 20;

/// Foreground color for a tone.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Failure => Color::Red,
        Tone::Muted => Color::DarkGrey,
        Tone::Unknown => Color::Yellow,
        Tone::Error => Color::DarkRed,
    }
}

fn level_color(level: Option<BatteryLevel>) -> Color {
    match level {
        Some(BatteryLevel::High) => Color::Green,
        Some(BatteryLevel::Medium) => Color::Yellow,
        Some(BatteryLevel::Low) => Color::Red,
        None => Color::DarkGrey,
    }
}

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn section_line(&self, title: &str) -> String {
        if self.color {
            format!(
                "{} {}",
                SECTION_BULLET.with(Color::DarkCyan),
                title.with(Color::Cyan).bold()
            )
        } else {
            format!("{title}:")
        }
    }

    pub fn field_line(&self, key: &str, value: &str) -> String {
        if self.color {
            format!("{INDENT}{} {value}", format!("{key}:").with(Color::DarkGrey))
        } else {
            format!("{INDENT}{key}: {value}")
        }
    }

    /// Key/value row whose value is colored by its tone.
    pub fn status_field_line(&self, key: &str, status: &StatusLine) -> String {
        if self.color {
            format!(
                "{INDENT}{} {}",
                format!("{key}:").with(Color::DarkGrey),
                status.text.as_str().with(tone_color(status.tone))
            )
        } else {
            format!("{INDENT}{key}: {}", status.text)
        }
    }

    pub fn detail_line(&self, text: &str) -> String {
        let indented = text
            .lines()
            .map(|line| format!("{INDENT}{INDENT}{line}"))
            .collect::<Vec<_>>()
            .join("\n");
        if self.color {
            indented.with(Color::DarkGrey).to_string()
        } else {
            indented
        }
    }

    /// `[##########----------]` bar for a fill percentage in `[0, 100]`.
    pub fn gauge_line(&self, fill_percent: f64, level: Option<BatteryLevel>) -> String {
        let filled = ((fill_percent.clamp(0.0, 100.0) / 100.0) * GAUGE_WIDTH as f64).round() as usize;
        let bar = "#".repeat(filled);
        let rest = "-".repeat(GAUGE_WIDTH - filled);
        if self.color {
            format!("{INDENT}[{}{}]", bar.with(level_color(level)), rest.with(Color::DarkGrey))
        } else {
            format!("{INDENT}[{bar}{rest}]")
        }
    }

    pub fn task_line(&self, number: usize, text: &str, done: bool) -> String {
        let mark = if done { "[x]" } else { "[ ]" };
        if self.color && done {
            format!("{INDENT}{number:>2}. {mark} {}", text.with(Color::DarkGrey).crossed_out())
        } else {
            format!("{INDENT}{number:>2}. {mark} {text}")
        }
    }

    pub fn hint_line(&self, text: &str) -> String {
        if self.color {
            format!("{INDENT}{}", text.with(Color::DarkGrey).italic())
        } else {
            format!("{INDENT}{text}")
        }
    }

    pub fn section(&self, title: &str) {
        println!("{}", self.section_line(title));
    }

    pub fn field(&self, key: &str, value: &str) {
        println!("{}", self.field_line(key, value));
    }

    pub fn status_field(&self, key: &str, status: &StatusLine) {
        println!("{}", self.status_field_line(key, status));
    }

    pub fn detail(&self, text: &str) {
        println!("{}", self.detail_line(text));
    }

    pub fn gauge(&self, fill_percent: f64, level: Option<BatteryLevel>) {
        println!("{}", self.gauge_line(fill_percent, level));
    }

    pub fn task(&self, number: usize, text: &str, done: bool) {
        println!("{}", self.task_line(number, text, done));
    }

    pub fn hint(&self, text: &str) {
        println!("{}", self.hint_line(text));
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }
}
