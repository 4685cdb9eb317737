//! Drizzle ORM column builders per dialect.

use super::Dialect;
use crate::schema::SemanticType;

/// Column builder function for `semantic_type`.
pub fn primitive(dialect: Dialect, semantic_type: SemanticType) -> Option<&'static str> {
    use SemanticType as T;

    let name = match (dialect, semantic_type) {
        (Dialect::Postgresql, T::Identifier) => "uuid",
        (Dialect::Postgresql, T::String) => "varchar",
        (Dialect::Postgresql, T::Text) => "text",
        (Dialect::Postgresql, T::Integer) => "integer",
        (Dialect::Postgresql, T::Boolean) => "boolean",
        (Dialect::Postgresql, T::Timestamp) => "timestamp",
        (Dialect::Postgresql, T::Json) => "jsonb",

        (Dialect::Mysql, T::Identifier) => "varchar",
        (Dialect::Mysql, T::String) => "varchar",
        (Dialect::Mysql, T::Text) => "text",
        (Dialect::Mysql, T::Integer) => "int",
        (Dialect::Mysql, T::Boolean) => "boolean",
        (Dialect::Mysql, T::Timestamp) => "timestamp",
        (Dialect::Mysql, T::Json) => "json",

        (Dialect::Sqlite, T::Identifier) => "integer",
        (Dialect::Sqlite, T::String) => "text",
        (Dialect::Sqlite, T::Text) => "text",
        (Dialect::Sqlite, T::Integer) => "integer",
        (Dialect::Sqlite, T::Boolean) => "integer",
        (Dialect::Sqlite, T::Timestamp) => "integer",
        (Dialect::Sqlite, T::Json) => "text",
    };
    Some(name)
}

/// SQLite stores booleans, timestamps and JSON in plain columns and needs a
/// `mode` to map them back.
pub fn column_mode(dialect: Dialect, semantic_type: SemanticType) -> Option<&'static str> {
    match (dialect, semantic_type) {
        (Dialect::Sqlite, SemanticType::Boolean) => Some("boolean"),
        (Dialect::Sqlite, SemanticType::Timestamp) => Some("timestamp"),
        (Dialect::Sqlite, SemanticType::Json) => Some("json"),
        _ => None,
    }
}

/// Length applied when the field declares none.
pub fn implied_length(dialect: Dialect, semantic_type: SemanticType) -> Option<u32> {
    match (dialect, semantic_type) {
        (Dialect::Mysql, SemanticType::Identifier) => Some(36),
        // MySQL requires a length on every varchar.
        (Dialect::Mysql, SemanticType::String) => Some(255),
        _ => None,
    }
}

/// Table constructor, e.g. `pgTable`.
pub fn table_function(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Postgresql => "pgTable",
        Dialect::Mysql => "mysqlTable",
        Dialect::Sqlite => "sqliteTable",
    }
}

/// Module the table constructor and column builders are imported from.
pub fn core_module(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Postgresql => "drizzle-orm/pg-core",
        Dialect::Mysql => "drizzle-orm/mysql-core",
        Dialect::Sqlite => "drizzle-orm/sqlite-core",
    }
}

/// Column type used to annotate self-referencing `references()` callbacks.
pub fn any_column_type(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Postgresql => "AnyPgColumn",
        Dialect::Mysql => "AnyMySqlColumn",
        Dialect::Sqlite => "AnySQLiteColumn",
    }
}

/// `dialect` value expected by `drizzle-kit`'s `defineConfig`.
pub fn kit_dialect(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Postgresql => "postgresql",
        Dialect::Mysql => "mysql",
        Dialect::Sqlite => "sqlite",
    }
}
