//! Output formatting for generate command results.

use crate::generate::GenerateOutput;
use crate::output::{Outputable, join_or_dash};

impl Outputable for GenerateOutput {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Generated {} schema for {} ({} tables: {})",
            self.backend,
            self.dialect,
            self.tables.len(),
            join_or_dash(&self.tables)
        ));

        for artifact in &self.artifacts {
            lines.push(String::new());
            lines.push(format!("==> {} <==", artifact.path));
            lines.push(artifact.content.trim_end().to_string());
        }

        lines.join("\n")
    }
}
