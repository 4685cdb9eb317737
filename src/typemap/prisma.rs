//! Prisma scalar types and native type attributes per dialect.

use super::Dialect;
use crate::schema::SemanticType;

/// Prisma scalar type for `semantic_type`.
///
/// The SQLite connector has no `Json` scalar.
pub fn primitive(dialect: Dialect, semantic_type: SemanticType) -> Option<&'static str> {
    use SemanticType as T;

    match (dialect, semantic_type) {
        (Dialect::Sqlite, T::Identifier) => Some("Int"),
        (_, T::Identifier) => Some("String"),
        (_, T::String) | (_, T::Text) => Some("String"),
        (_, T::Integer) => Some("Int"),
        (_, T::Boolean) => Some("Boolean"),
        (_, T::Timestamp) => Some("DateTime"),
        (Dialect::Sqlite, T::Json) => None,
        (_, T::Json) => Some("Json"),
    }
}

/// Native database type attribute (`@db.*`), if the column needs one.
pub fn native_type(dialect: Dialect, semantic_type: SemanticType, length: Option<u32>) -> Option<String> {
    use SemanticType as T;

    match (dialect, semantic_type) {
        (Dialect::Sqlite, _) => None,
        (Dialect::Postgresql, T::Identifier) => Some("@db.Uuid".to_string()),
        (Dialect::Mysql, T::Identifier) => Some("@db.Char(36)".to_string()),
        (_, T::String) => length.map(|n| format!("@db.VarChar({})", n)),
        (_, T::Text) => Some("@db.Text".to_string()),
        _ => None,
    }
}

/// `provider` of the `datasource` block.
pub fn provider(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Postgresql => "postgresql",
        Dialect::Mysql => "mysql",
        Dialect::Sqlite => "sqlite",
    }
}
