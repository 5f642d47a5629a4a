//! Styled terminal output.
//!
//! Listings go to stdout; exports that stream data to stdout report through
//! [`Output::stderr`] so the data stays clean.

use console::{StyledObject, Term, style};
use std::fmt::Display;

pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    // Broken pipes are not worth failing a command over.
    fn line(&self, text: &str) {
        drop(self.term.write_line(text));
    }

    fn marked(&self, mark: StyledObject<&str>, message: impl Display) {
        self.line(&format!("{} {message}", mark.bold()));
    }

    pub fn success(&self, message: impl Display) {
        self.marked(style("✓").green(), message);
    }

    pub fn error(&self, message: impl Display) {
        self.marked(style("✗").red(), message);
    }

    pub fn warning(&self, message: impl Display) {
        self.marked(style("⚠").yellow(), message);
    }

    pub fn print(&self, message: impl Display) {
        self.line(&message.to_string());
    }

    /// Resource title above a listing.
    pub fn header(&self, title: impl Display) {
        self.line(&style(title).bold().cyan().to_string());
    }

    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    /// `Page 2 of 3 · 24 record(s)` under a listing. An empty view still reads
    /// as page 1 of 1.
    pub fn page_footer(&self, page: usize, pages: usize, total: usize) {
        self.line(&format!(
            "\n{} {} {}",
            style(format!("Page {page} of {}", pages.max(1))).bold(),
            style("·").dim(),
            style(format!("{total} record(s)")).cyan()
        ));
    }
}
