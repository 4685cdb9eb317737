use std::error::Error;

use serde::Serialize;

use super::TablesCmd;
use crate::commands::{Context, Execute};
use crate::config::load_custom_tables;

/// A catalog table summary
#[derive(Debug, Clone, Serialize)]
pub struct TableEntry {
    pub name: String,
    pub display_name: String,
    pub fields: usize,
    pub references: Vec<String>,
}

/// Result of the tables command execution
#[derive(Debug, Serialize)]
pub struct TablesResult {
    pub tables: Vec<TableEntry>,
}

impl Execute for TablesCmd {
    type Output = TablesResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let catalog = match &self.custom {
            Some(path) => ctx.catalog.with_custom(&load_custom_tables(path)?)?,
            None => ctx.catalog.clone(),
        };

        let tables = catalog
            .tables()
            .map(|t| TableEntry {
                name: t.name.clone(),
                display_name: t.display_name.clone(),
                fields: t.fields.len(),
                references: t.dependencies().into_iter().map(String::from).collect(),
            })
            .collect();

        Ok(TablesResult { tables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Write;

    crate::execute_test_fixture! {
        fixture_name: ctx,
    }

    crate::execute_test! {
        test_name: test_tables_lists_builtin_catalog,
        fixture: ctx,
        cmd: TablesCmd { custom: None },
        assertions: |result| {
            assert_eq!(result.tables.len(), 15);
            assert_eq!(result.tables[0].name, "users");
            let comments = result.tables.iter().find(|t| t.name == "comments").unwrap();
            assert_eq!(comments.references, vec!["posts", "users"]);
        },
    }

    #[rstest]
    fn test_tables_with_duplicate_custom_definition(ctx: Context) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{ "name": "tags", "display_name": "Tag",
                  "fields": [{ "name": "id", "type": "identifier", "is_primary_key": true }] }]"#,
        )
        .unwrap();

        let cmd = TablesCmd {
            custom: Some(file.path().to_path_buf()),
        };
        let err = cmd.execute(&ctx).err().map(|e| e.to_string()).unwrap_or_default();
        assert_eq!(err, "Duplicate table name: tags");
    }
}
