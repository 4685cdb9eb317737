//! The table catalog.
//!
//! A `Catalog` is built once and then only read. Custom definitions never
//! mutate an existing catalog: `with_custom` returns a new one.

use indexmap::IndexMap;

use super::definition::TableDefinition;
use super::presets::{ALL_PRESETS, Preset};
use super::tables::all_tables;
use crate::error::GenError;

/// Immutable collection of table definitions and presets.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: IndexMap<String, TableDefinition>,
}

impl Catalog {
    /// Build a catalog from definitions, rejecting invalid tables and
    /// duplicate names.
    pub fn new(tables: impl IntoIterator<Item = TableDefinition>) -> Result<Self, GenError> {
        let mut catalog = Self {
            tables: IndexMap::new(),
        };
        catalog.insert_all(tables)?;
        Ok(catalog)
    }

    /// The catalog of built-in tables.
    pub fn builtin() -> Self {
        let tables = all_tables()
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        Self { tables }
    }

    /// A new catalog holding these tables plus `custom`.
    ///
    /// A custom table whose name collides with an existing one (or with another
    /// custom table) is rejected with `DuplicateTableName`.
    pub fn with_custom(&self, custom: &[TableDefinition]) -> Result<Self, GenError> {
        let mut merged = self.clone();
        merged.insert_all(custom.iter().cloned())?;
        Ok(merged)
    }

    fn insert_all(&mut self, tables: impl IntoIterator<Item = TableDefinition>) -> Result<(), GenError> {
        for table in tables {
            table
                .validate()
                .map_err(|reason| GenError::invalid_table(&table.name, reason))?;
            if self.tables.contains_key(&table.name) {
                return Err(GenError::DuplicateTableName(table.name));
            }
            self.tables.insert(table.name.clone(), table);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Tables in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = &TableDefinition> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn presets(&self) -> &'static [Preset] {
        ALL_PRESETS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::{FieldDefinition, SemanticType};
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn widgets() -> TableDefinition {
        TableDefinition::new("widgets", "Widget")
            .field(FieldDefinition::id())
            .field(FieldDefinition::new("label", SemanticType::String).length(40))
    }

    #[rstest]
    fn test_builtin_contains_core_tables(catalog: Catalog) {
        for name in ["users", "posts", "comments", "categories", "audit_logs"] {
            assert!(catalog.contains(name), "missing {}", name);
        }
        assert_eq!(catalog.len(), 15);
    }

    #[rstest]
    fn test_builtin_preserves_order(catalog: Catalog) {
        let first: Vec<_> = catalog.tables().take(3).map(|t| t.name.as_str()).collect();
        assert_eq!(first, vec!["users", "profiles", "sessions"]);
    }

    #[rstest]
    fn test_with_custom_adds_tables(catalog: Catalog) {
        let merged = catalog.with_custom(&[widgets()]).unwrap();
        assert!(merged.contains("widgets"));
        assert!(!catalog.contains("widgets"));
        assert_eq!(merged.len(), catalog.len() + 1);
    }

    #[rstest]
    fn test_with_custom_rejects_collision(catalog: Catalog) {
        let clash = TableDefinition::new("users", "Member").field(FieldDefinition::id());
        let err = catalog.with_custom(&[clash]).unwrap_err();
        assert_eq!(err, GenError::DuplicateTableName("users".to_string()));
    }

    #[rstest]
    fn test_with_custom_rejects_duplicate_custom_tables(catalog: Catalog) {
        let err = catalog.with_custom(&[widgets(), widgets()]).unwrap_err();
        assert_eq!(err, GenError::DuplicateTableName("widgets".to_string()));
    }

    #[rstest]
    fn test_with_custom_rejects_invalid_table(catalog: Catalog) {
        let keyless = TableDefinition::new("widgets", "Widget")
            .field(FieldDefinition::new("label", SemanticType::String));
        let err = catalog.with_custom(&[keyless]).unwrap_err();
        assert!(matches!(err, GenError::InvalidTable { ref table, .. } if table == "widgets"));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = Catalog::new([widgets(), widgets()]).unwrap_err();
        assert_eq!(err, GenError::DuplicateTableName("widgets".to_string()));
    }

    #[test]
    fn test_catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
