//! TypeScript types for Kysely table interfaces per dialect.

use super::Dialect;
use crate::schema::SemanticType;

/// Name of the JSON alias emitted into the types file when a table uses JSON.
pub const JSON_TYPE: &str = "JsonValue";

/// Kysely wrapper for columns the database fills in when an insert omits them.
pub const GENERATED_TYPE: &str = "Generated";

/// TypeScript type for `semantic_type`.
///
/// SQLite drivers hand back integer ids, `0`/`1` booleans and ISO strings for
/// timestamps.
pub fn primitive(dialect: Dialect, semantic_type: SemanticType) -> Option<&'static str> {
    use SemanticType as T;

    let name = match (dialect, semantic_type) {
        (Dialect::Sqlite, T::Identifier) => "number",
        (_, T::Identifier) => "string",
        (_, T::String) | (_, T::Text) => "string",
        (_, T::Integer) => "number",
        (Dialect::Sqlite, T::Boolean) => "number",
        (_, T::Boolean) => "boolean",
        (Dialect::Sqlite, T::Timestamp) => "string",
        (_, T::Timestamp) => "Date",
        (_, T::Json) => JSON_TYPE,
    };
    Some(name)
}

/// Whether `primitive` is built into TypeScript and needs no declaration.
pub fn is_builtin(primitive: &str) -> bool {
    matches!(primitive, "string" | "number" | "boolean" | "Date")
}

/// Kysely dialect class and the driver import it is constructed from.
pub struct DriverSetup {
    pub dialect_class: &'static str,
    pub driver_import: &'static str,
    pub dialect_options: &'static str,
}

pub fn driver_setup(dialect: Dialect) -> DriverSetup {
    match dialect {
        Dialect::Postgresql => DriverSetup {
            dialect_class: "PostgresDialect",
            driver_import: "import { Pool } from 'pg';",
            dialect_options: "pool: new Pool({ connectionString: process.env.DATABASE_URL })",
        },
        Dialect::Mysql => DriverSetup {
            dialect_class: "MysqlDialect",
            driver_import: "import { createPool } from 'mysql2';",
            dialect_options: "pool: createPool(process.env.DATABASE_URL ?? '')",
        },
        Dialect::Sqlite => DriverSetup {
            dialect_class: "SqliteDialect",
            driver_import: "import SQLite from 'better-sqlite3';",
            dialect_options: "database: new SQLite(process.env.DATABASE_URL ?? 'dev.db')",
        },
    }
}
