//! Text output formatting with colors.

use tgcheck_core::{ResolvedStatus, UsernameStatus};
use tgcheck_fetch::ProbeInfo;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Color for a status.
    fn status_color(status: &UsernameStatus) -> &'static str {
        match status {
            UsernameStatus::Available | UsernameStatus::AvailableOnFragment => GREEN,
            UsernameStatus::Taken | UsernameStatus::SoldOnFragment | UsernameStatus::Error => RED,
            UsernameStatus::NotOnFragment | UsernameStatus::NotFound => CYAN,
            UsernameStatus::Unknown | UsernameStatus::Other(_) => YELLOW,
        }
    }

    /// Formats one resolved username.
    ///
    /// ```text
    /// @durov          Taken
    ///   Username is taken
    ///   price: N/A  source: telegram
    /// ```
    pub fn format_status(&self, status: &ResolvedStatus) -> String {
        let mut lines = Vec::new();

        let label = self.paint(Self::status_color(&status.status), status.status.label());
        let mut header = format!("{} {label}", self.paint(BOLD, &format!("{:<15}", status.username)));
        if status.can_claim {
            header.push_str(&format!(" {}", self.paint(GREEN, "(claimable)")));
        }
        lines.push(header);

        if !status.message.is_empty() {
            lines.push(format!("  {}", status.message));
        }
        lines.push(self.paint(
            DIM,
            &format!("  price: {}  source: {}", status.price, status.source),
        ));

        lines.join("\n")
    }

    /// Formats an error line for a username that could not be checked.
    pub fn format_error(&self, input: &str, message: &str) -> String {
        format!(
            "{} {}",
            self.paint(BOLD, &format!("{input:<15}")),
            self.paint(RED, message)
        )
    }

    /// Formats the probes table header.
    pub fn format_probes_header(&self) -> String {
        self.paint(BOLD, &format!("{:<20} {:<20} {:>8}", "PROBE", "KIND", "PRIORITY"))
    }

    /// Formats one probe line.
    pub fn format_probe_line(&self, info: &ProbeInfo) -> String {
        format!(
            "{:<20} {:<20} {:>8}",
            info.id,
            info.kind.display_name(),
            info.priority
        )
    }
}
