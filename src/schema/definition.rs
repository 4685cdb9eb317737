//! Core schema definition types.
//!
//! Provides a backend-agnostic type system for describing relational tables.
//! These types feed the resolver and every backend emitter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract field type shared by all backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Primary/foreign key identifier (UUID or integer depending on dialect)
    Identifier,
    /// Bounded text
    String,
    /// Unbounded text
    Text,
    /// Integer number
    Integer,
    /// Boolean flag
    Boolean,
    /// Point in time
    Timestamp,
    /// Structured JSON document
    Json,
}

impl SemanticType {
    pub const ALL: [SemanticType; 7] = [
        SemanticType::Identifier,
        SemanticType::String,
        SemanticType::Text,
        SemanticType::Integer,
        SemanticType::Boolean,
        SemanticType::Timestamp,
        SemanticType::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Identifier => "identifier",
            SemanticType::String => "string",
            SemanticType::Text => "text",
            SemanticType::Integer => "integer",
            SemanticType::Boolean => "boolean",
            SemanticType::Timestamp => "timestamp",
            SemanticType::Json => "json",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value of a field.
///
/// In JSON the string `"now"` is the reserved current-timestamp token; every
/// other string is a literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDefault", into = "RawDefault")]
pub enum DefaultValue {
    /// Current timestamp at insert time
    Now,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawDefault {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<RawDefault> for DefaultValue {
    fn from(raw: RawDefault) -> Self {
        match raw {
            RawDefault::Text(s) if s == "now" => DefaultValue::Now,
            RawDefault::Text(s) => DefaultValue::Text(s),
            RawDefault::Integer(n) => DefaultValue::Integer(n),
            RawDefault::Float(n) => DefaultValue::Float(n),
            RawDefault::Boolean(b) => DefaultValue::Boolean(b),
        }
    }
}

impl From<DefaultValue> for RawDefault {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Now => RawDefault::Text("now".to_string()),
            DefaultValue::Text(s) => RawDefault::Text(s),
            DefaultValue::Integer(n) => RawDefault::Integer(n),
            DefaultValue::Float(n) => RawDefault::Float(n),
            DefaultValue::Boolean(b) => RawDefault::Boolean(b),
        }
    }
}

/// Referential action applied when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnDelete {
    Cascade,
    SetNull,
    Restrict,
}

/// Foreign key from a field to a field of another (or the same) table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub target_table: String,
    #[serde(default = "default_target_field")]
    pub target_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnDelete>,
}

fn default_target_field() -> String {
    "id".to_string()
}

/// Represents one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Column name, unique within the table (e.g., "author_id")
    pub name: String,

    #[serde(rename = "type")]
    pub semantic_type: SemanticType,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub is_primary_key: bool,

    #[serde(default)]
    pub is_auto_increment: bool,

    /// Maximum length, only meaningful for `SemanticType::String`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            required: false,
            unique: false,
            is_primary_key: false,
            is_auto_increment: false,
            length: None,
            default_value: None,
            foreign_key: None,
        }
    }

    /// Identifier primary key named `id`.
    pub fn id() -> Self {
        Self::new("id", SemanticType::Identifier).primary_key()
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn references(mut self, table: &str, on_delete: OnDelete) -> Self {
        self.foreign_key = Some(ForeignKey {
            target_table: table.to_string(),
            target_field: default_target_field(),
            on_delete: Some(on_delete),
        });
        self
    }

    /// Primary keys are non-null whether or not `required` is set.
    pub fn is_effectively_required(&self) -> bool {
        self.required || self.is_primary_key
    }

    /// True if the column may hold NULL.
    pub fn is_nullable(&self) -> bool {
        !self.is_effectively_required()
    }
}

/// Kind of association between two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// Association declared on a table, usually paired with a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub target_table: String,
    /// Property name the association is exposed under (e.g., "author")
    pub field_name: String,
}

/// Represents a complete table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Storage name (e.g., "users", "post_tags")
    pub name: String,

    /// Model-facing name (e.g., "User", "PostTag")
    pub display_name: String,

    pub fields: Vec<FieldDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn relation(mut self, kind: RelationKind, target_table: &str, field_name: &str) -> Self {
        self.relations.push(Relation {
            kind,
            target_table: target_table.to_string(),
            field_name: field_name.to_string(),
        });
        self
    }

    pub fn primary_key(&self) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.is_primary_key)
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields carrying a foreign key, in declaration order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&FieldDefinition, &ForeignKey)> {
        self.fields
            .iter()
            .filter_map(|f| f.foreign_key.as_ref().map(|fk| (f, fk)))
    }

    /// Distinct FK target table names, in first-reference order.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for (_, fk) in self.foreign_keys() {
            if !deps.contains(&fk.target_table.as_str()) {
                deps.push(&fk.target_table);
            }
        }
        deps
    }

    /// Check the per-table invariants: exactly one primary key, unique field
    /// names, and `length` only on string fields.
    pub fn validate(&self) -> Result<(), String> {
        let pk_count = self.fields.iter().filter(|f| f.is_primary_key).count();
        if pk_count != 1 {
            return Err(format!("expected exactly one primary key, found {}", pk_count));
        }

        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(format!("duplicate field name `{}`", field.name));
            }
            if field.is_auto_increment && !field.is_primary_key {
                return Err(format!("field `{}` is auto-increment but not the primary key", field.name));
            }
            if field.length.is_some() && field.semantic_type != SemanticType::String {
                return Err(format!(
                    "field `{}` has a length but is of type {}",
                    field.name, field.semantic_type
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_type_names() {
        assert_eq!(SemanticType::Identifier.as_str(), "identifier");
        assert_eq!(SemanticType::Timestamp.to_string(), "timestamp");
        assert_eq!(SemanticType::ALL.len(), 7);
    }

    #[test]
    fn test_primary_key_is_effectively_required() {
        let field = FieldDefinition::id();
        assert!(!field.required);
        assert!(field.is_effectively_required());
        assert!(!field.is_nullable());
    }

    #[test]
    fn test_optional_field_is_nullable() {
        let field = FieldDefinition::new("bio", SemanticType::Text);
        assert!(field.is_nullable());
    }

    #[test]
    fn test_dependencies_are_distinct_and_ordered() {
        let table = TableDefinition::new("messages", "Message")
            .field(FieldDefinition::id())
            .field(FieldDefinition::new("sender_id", SemanticType::Identifier).references("users", OnDelete::Cascade))
            .field(FieldDefinition::new("thread_id", SemanticType::Identifier).references("threads", OnDelete::Cascade))
            .field(FieldDefinition::new("recipient_id", SemanticType::Identifier).references("users", OnDelete::Cascade));

        assert_eq!(table.dependencies(), vec!["users", "threads"]);
    }

    #[test]
    fn test_validate_rejects_missing_primary_key() {
        let table = TableDefinition::new("notes", "Note")
            .field(FieldDefinition::new("body", SemanticType::Text));
        let err = table.validate().unwrap_err();
        assert!(err.contains("exactly one primary key"));
    }

    #[test]
    fn test_validate_rejects_two_primary_keys() {
        let table = TableDefinition::new("notes", "Note")
            .field(FieldDefinition::id())
            .field(FieldDefinition::new("code", SemanticType::String).primary_key());
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_field() {
        let table = TableDefinition::new("notes", "Note")
            .field(FieldDefinition::id())
            .field(FieldDefinition::new("body", SemanticType::Text))
            .field(FieldDefinition::new("body", SemanticType::Text));
        let err = table.validate().unwrap_err();
        assert!(err.contains("duplicate field name `body`"));
    }

    #[test]
    fn test_validate_rejects_auto_increment_outside_key() {
        let table = TableDefinition::new("tickets", "Ticket")
            .field(FieldDefinition::id())
            .field(FieldDefinition::new("seq", SemanticType::Integer).required().auto_increment());
        let err = table.validate().unwrap_err();
        assert_eq!(err, "field `seq` is auto-increment but not the primary key");
    }

    #[test]
    fn test_validate_rejects_length_on_text() {
        let table = TableDefinition::new("notes", "Note")
            .field(FieldDefinition::id())
            .field(FieldDefinition::new("body", SemanticType::Text).length(10));
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_deserialize_field_from_json() {
        let json = r#"{
            "name": "author_id",
            "type": "identifier",
            "required": true,
            "foreign_key": { "target_table": "users", "on_delete": "set-null" }
        }"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(field.semantic_type, SemanticType::Identifier);
        assert!(field.required);
        let fk = field.foreign_key.unwrap();
        assert_eq!(fk.target_table, "users");
        assert_eq!(fk.target_field, "id");
        assert_eq!(fk.on_delete, Some(OnDelete::SetNull));
    }

    #[test]
    fn test_deserialize_default_values() {
        let cases = [
            (r#""now""#, DefaultValue::Now),
            (r#""pending""#, DefaultValue::Text("pending".to_string())),
            ("0", DefaultValue::Integer(0)),
            ("1.5", DefaultValue::Float(1.5)),
            ("true", DefaultValue::Boolean(true)),
        ];
        for (json, expected) in cases {
            let value: DefaultValue = serde_json::from_str(json).unwrap();
            assert_eq!(value, expected, "parsing {}", json);
        }
    }

    #[test]
    fn test_serialize_now_token() {
        let json = serde_json::to_string(&DefaultValue::Now).unwrap();
        assert_eq!(json, r#""now""#);
    }

    #[test]
    fn test_deserialize_table_with_relations() {
        let json = r#"{
            "name": "widgets",
            "display_name": "Widget",
            "fields": [{ "name": "id", "type": "identifier", "is_primary_key": true }],
            "relations": [{ "kind": "many-to-one", "target_table": "users", "field_name": "owner" }]
        }"#;
        let table: TableDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(table.relations[0].kind, RelationKind::ManyToOne);
        assert!(table.validate().is_ok());
    }
}
