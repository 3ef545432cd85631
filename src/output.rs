//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::Item;

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Item {
    fn pretty_print(&self) -> String {
        let header = format!("Item #{} (project {})", self.id(), self.project_id());
        let divider = "─".repeat(header.chars().count().max(30));

        [header, divider, self.render_summary()].join("\n")
    }
}
