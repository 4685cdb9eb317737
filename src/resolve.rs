//! Foreign-key dependency resolution.
//!
//! Computes the transitive closure of the requested tables over their foreign
//! keys and orders it so every referenced table comes before its dependents.

use std::collections::HashMap;

use tracing::debug;

use crate::error::GenError;
use crate::schema::{Catalog, TableDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

struct Resolver<'c> {
    catalog: &'c Catalog,
    state: HashMap<&'c str, Visit>,
    ordered: Vec<&'c TableDefinition>,
}

impl<'c> Resolver<'c> {
    fn visit(
        &mut self,
        name: &str,
        referenced_by: Option<(&str, &str)>,
    ) -> Result<(), GenError> {
        let catalog = self.catalog;
        let table = catalog
            .get(name)
            .ok_or_else(|| GenError::UnknownTableReference {
                name: name.to_string(),
                referenced_by: referenced_by.map(|(t, f)| (t.to_string(), f.to_string())),
            })?;

        // An in-progress table is on the current DFS path: a cycle, not a re-entry.
        if self.state.contains_key(table.name.as_str()) {
            return Ok(());
        }
        self.state.insert(&table.name, Visit::InProgress);

        for (field, fk) in table.foreign_keys() {
            self.visit(&fk.target_table, Some((&table.name, &field.name)))?;
        }

        self.state.insert(&table.name, Visit::Done);
        self.ordered.push(table);
        Ok(())
    }
}

/// Resolve `requested` table names into a dependency-closed, dependency-first
/// sequence.
///
/// Tables appear once, in DFS post-order over the request order and each
/// table's foreign keys in field order. Self references and longer cycles
/// terminate; tables in a cycle are each included exactly once.
///
/// # Errors
///
/// `UnknownTableReference` if a requested or referenced table is missing from
/// `catalog`.
pub fn resolve<'c, S: AsRef<str>>(
    requested: &[S],
    catalog: &'c Catalog,
) -> Result<Vec<&'c TableDefinition>, GenError> {
    let mut resolver = Resolver {
        catalog,
        state: HashMap::new(),
        ordered: Vec::new(),
    };

    for name in requested {
        resolver.visit(name.as_ref(), None)?;
    }

    debug_assert!(resolver.state.values().all(|v| *v == Visit::Done));
    debug!(
        order = ?resolver.ordered.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        "resolved tables"
    );

    Ok(resolver.ordered)
}

/// Table names of a resolved sequence.
pub fn table_names<'a>(tables: &[&'a TableDefinition]) -> Vec<&'a str> {
    tables.iter().map(|t| t.name.as_str()).collect()
}
