//! Terminal styling for human-readable output.

use crossterm::style::{Color, Stylize};
use std::io::IsTerminal;

/// Colors for the text format
#[derive(Debug, Clone)]
pub struct Theme {
    /// Field labels
    pub label: Color,
    /// The version name, the value people look for first
    pub primary: Color,
    /// Everything else
    pub value: Color,
    /// Whether to emit ANSI styling at all
    pub styled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            label: Color::DarkGrey,
            primary: Color::Cyan,
            value: Color::White,
            styled: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl Theme {
    /// A theme that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            styled: false,
            ..Self::default()
        }
    }

    /// Render `label: value` rows with aligned values. The first row is highlighted.
    pub fn fields(&self, rows: &[(&str, String)]) -> Vec<String> {
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 2;

        rows.iter()
            .enumerate()
            .map(|(i, (label, value))| {
                let label = format!("{:<width$}", format!("{label}:"), width = width);
                if !self.styled {
                    return format!("{label}{value}");
                }
                let color = if i == 0 { self.primary } else { self.value };
                format!("{}{}", label.with(self.label), value.as_str().with(color))
            })
            .collect()
    }
}
