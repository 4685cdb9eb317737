//! Error types for schema resolution and emission.

use thiserror::Error;

use crate::schema::SemanticType;
use crate::typemap::{Backend, Dialect};

/// Errors raised by the catalog, the resolver and the backend emitters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A requested or foreign-key-referenced table is not in the catalog
    #[error("Unknown table reference: {name}{}", referenced_by_suffix(.referenced_by))]
    UnknownTableReference {
        name: String,
        /// `(table, field)` holding the foreign key, when the name came from one
        referenced_by: Option<(String, String)>,
    },

    /// A foreign key targets a table missing from the resolved set
    #[error("Foreign key {table}.{field} targets {target}, which is not in the resolved set")]
    UnresolvableForeignKey {
        table: String,
        field: String,
        target: String,
    },

    /// The backend/dialect pair has no primitive for a semantic type
    #[error("Field type `{semantic_type}` is not supported by {backend} on {dialect}")]
    UnsupportedFieldType {
        semantic_type: SemanticType,
        backend: Backend,
        dialect: Dialect,
    },

    /// Merging definitions produced two tables with the same name
    #[error("Duplicate table name: {0}")]
    DuplicateTableName(String),

    /// No preset with this identifier
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// A table definition breaks a data-model invariant
    #[error("Invalid table {table}: {reason}")]
    InvalidTable { table: String, reason: String },
}

fn referenced_by_suffix(referenced_by: &Option<(String, String)>) -> String {
    match referenced_by {
        Some((table, field)) => format!(" (referenced by {}.{})", table, field),
        None => String::new(),
    }
}

impl GenError {
    pub fn unknown_table(name: impl Into<String>) -> Self {
        GenError::UnknownTableReference {
            name: name.into(),
            referenced_by: None,
        }
    }

    pub fn invalid_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        GenError::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}
