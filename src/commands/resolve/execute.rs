use std::error::Error;

use serde::Serialize;

use super::ResolveCmd;
use crate::commands::{Context, Execute};
use crate::resolve::resolve;
use crate::schema::TableSelection;

/// A table in resolved position
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTable {
    pub name: String,
    pub display_name: String,
    pub depends_on: Vec<String>,
}

/// Result of the resolve command execution
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    /// Preset id or `custom`
    pub selection: String,
    pub requested: Vec<String>,
    pub tables: Vec<ResolvedTable>,
}

impl Execute for ResolveCmd {
    type Output = ResolveResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let custom = self.selection.custom_tables()?;
        let catalog = ctx.catalog.with_custom(&custom)?;

        let selection = self.selection.selection(&ctx.config);
        let requested = selection.table_names()?;
        let resolved = resolve(requested.as_slice(), &catalog)?;

        let tables = resolved
            .iter()
            .map(|t| ResolvedTable {
                name: t.name.clone(),
                display_name: t.display_name.clone(),
                depends_on: t.dependencies().into_iter().map(String::from).collect(),
            })
            .collect();

        Ok(ResolveResult {
            selection: match selection {
                TableSelection::Preset(id) => id,
                TableSelection::Custom(_) => "custom".to_string(),
            },
            requested,
            tables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SelectionArgs;
    use rstest::{fixture, rstest};

    crate::execute_test_fixture! {
        fixture_name: ctx,
    }

    crate::execute_test! {
        test_name: test_resolve_comments,
        fixture: ctx,
        cmd: ResolveCmd {
            selection: SelectionArgs {
                tables: vec!["comments".to_string()],
                ..Default::default()
            },
        },
        assertions: |result| {
            let names: Vec<_> = result.tables.iter().map(|t| t.name.as_str()).collect();
            assert_eq!(names, vec!["users", "posts", "comments"]);
            assert_eq!(result.tables[2].depends_on, vec!["posts", "users"]);
            assert_eq!(result.selection, "custom");
        },
    }

    crate::execute_test! {
        test_name: test_resolve_default_preset,
        fixture: ctx,
        cmd: ResolveCmd { selection: SelectionArgs::default() },
        assertions: |result| {
            assert_eq!(result.selection, "basic");
            assert_eq!(result.requested, vec!["users"]);
            assert_eq!(result.tables.len(), 1);
        },
    }

    crate::execute_test! {
        test_name: test_resolve_self_reference_once,
        fixture: ctx,
        cmd: ResolveCmd {
            selection: SelectionArgs {
                tables: vec!["categories".to_string()],
                ..Default::default()
            },
        },
        assertions: |result| {
            assert_eq!(result.tables.len(), 1);
            assert_eq!(result.tables[0].depends_on, vec!["categories"]);
        },
    }

    crate::execute_error_test! {
        test_name: test_resolve_unknown_preset,
        fixture: ctx,
        cmd: ResolveCmd {
            selection: SelectionArgs {
                preset: Some("crm".to_string()),
                ..Default::default()
            },
        },
        error_contains: "Unknown preset: crm",
    }
}
