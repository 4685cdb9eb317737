//! Output formatting for resolve command results.

use super::execute::ResolveResult;
use crate::output::{Outputable, join_or_dash};

impl Outputable for ResolveResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Resolve: {} ({})",
            join_or_dash(&self.requested),
            self.selection
        ));
        lines.push(String::new());

        if self.tables.is_empty() {
            lines.push("No tables selected.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Tables ({}):", self.tables.len()));
        let width = self.tables.iter().map(|t| t.name.len()).max().unwrap_or_default();
        for (i, table) in self.tables.iter().enumerate() {
            if table.depends_on.is_empty() {
                lines.push(format!("  {:>2}. {}", i + 1, table.name));
            } else {
                lines.push(format!(
                    "  {:>2}. {:<width$}  -> {}",
                    i + 1,
                    table.name,
                    table.depends_on.join(", "),
                    width = width
                ));
            }
        }

        lines.join("\n")
    }
}
