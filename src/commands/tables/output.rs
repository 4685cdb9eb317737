//! Output formatting for tables command results.

use super::execute::TablesResult;
use crate::output::{Outputable, join_or_dash};

impl Outputable for TablesResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Tables ({}):", self.tables.len())];

        let width = self.tables.iter().map(|t| t.name.len()).max().unwrap_or_default();
        for table in &self.tables {
            lines.push(format!(
                "  {:<width$}  {} fields  references: {}",
                table.name,
                table.fields,
                join_or_dash(&table.references),
                width = width
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::super::execute::TableEntry;
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn two_tables() -> TablesResult {
        TablesResult {
            tables: vec![
                TableEntry {
                    name: "users".to_string(),
                    display_name: "User".to_string(),
                    fields: 7,
                    references: vec![],
                },
                TableEntry {
                    name: "sessions".to_string(),
                    display_name: "Session".to_string(),
                    fields: 6,
                    references: vec!["users".to_string()],
                },
            ],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: two_tables,
        fixture_type: TablesResult,
        expected: "Tables (2):\n  users     7 fields  references: -\n  sessions  6 fields  references: users",
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: two_tables,
        fixture_type: TablesResult,
        assertions: {
            "tables": serde_json::json!([
                { "name": "users", "display_name": "User", "fields": 7, "references": [] },
                { "name": "sessions", "display_name": "Session", "fields": 6, "references": ["users"] }
            ]),
        },
    }
}
