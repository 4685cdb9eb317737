//! Output formatting for presets command results.

use super::execute::PresetsResult;
use crate::output::{Outputable, join_or_dash};

impl Outputable for PresetsResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Presets ({}):", self.presets.len())];

        let width = self.presets.iter().map(|p| p.id.len()).max().unwrap_or_default();
        for preset in &self.presets {
            lines.push(format!("  {:<width$}  {}", preset.id, preset.description, width = width));
            lines.push(format!("  {:<width$}  tables: {}", "", join_or_dash(preset.tables), width = width));
        }

        lines.join("\n")
    }
}
