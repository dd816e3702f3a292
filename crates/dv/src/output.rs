//! Colored terminal output utilities.
//!
//! Status lines go to stderr. Listings meant for scripts go to stdout.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    status: Term,
    listing: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            listing: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a status message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.status.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.status.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.status.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.status.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a summary line (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .status
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a listing heading to stdout (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let _ = self
            .listing
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a listing entry to stdout.
    pub(crate) fn item(&self, msg: &str) {
        let _ = self.listing.write_line(msg);
    }

    /// Print a separator line.
    pub(crate) fn separator(&self) {
        let _ = self.status.write_line(&"-".repeat(60));
    }
}
