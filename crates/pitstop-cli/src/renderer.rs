//! Terminal rendering for markdown output
//!
//! Rich mode styles inline markdown with termimad, colors headers and the
//! `Success:`/`Warning:`/`Error:` prefixes of operation statuses, and leaves
//! table rows untouched so report columns stay aligned. Plain mode prints the
//! markdown as-is.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("{BLUE}{line}{RESET}");
            } else if line.starts_with('|') {
                println!("{line}");
            } else if let Some((color, label, rest)) = status_prefix(line) {
                println!("{color}{label}{RESET}{rest}");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

/// Splits an operation status line into its color, label and message.
fn status_prefix(line: &str) -> Option<(&'static str, &str, &str)> {
    [("Success:", GREEN), ("Warning:", YELLOW), ("Error:", RED)]
        .into_iter()
        .find(|(label, _)| line.starts_with(label))
        .map(|(label, color)| (color, &line[..label.len()], &line[label.len()..]))
}
