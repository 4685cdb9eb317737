//! Declaration-level intermediate representation shared by all emitters.
//!
//! Each table is lowered once into an ordered list of field declarations, and
//! each field into tokens in canonical order:
//!
//! ```text
//! base type → length → primary key → not null → unique → default → reference
//! ```
//!
//! Emitters only turn tokens into text; they never decide ordering.

use std::collections::BTreeSet;

use heck::{ToLowerCamelCase, ToUpperCamelCase};

use crate::error::GenError;
use crate::schema::{DefaultValue, FieldDefinition, OnDelete, SemanticType, TableDefinition};
use crate::typemap::{KeyGeneration, TypeMap, key_generation};

/// Value a column receives when an insert omits it.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultToken {
    /// Literal value (never the `now` token)
    Literal(DefaultValue),
    /// Current timestamp
    Now,
    /// Database-assigned increasing integer
    AutoIncrement,
    /// Application-generated UUID
    RandomUuid,
}

/// Foreign-key target of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub table: String,
    pub field: String,
    pub on_delete: Option<OnDelete>,
    /// The column references its own table
    pub self_referencing: bool,
}

/// One sub-part of a field declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldToken {
    Base(&'static str),
    Length(u32),
    PrimaryKey,
    NotNull,
    Unique,
    Default(DefaultToken),
    References(Reference),
}

impl FieldToken {
    /// Position of the token in the canonical order.
    pub fn slot(&self) -> u8 {
        match self {
            FieldToken::Base(_) => 0,
            FieldToken::Length(_) => 1,
            FieldToken::PrimaryKey => 2,
            FieldToken::NotNull => 3,
            FieldToken::Unique => 4,
            FieldToken::Default(_) => 5,
            FieldToken::References(_) => 6,
        }
    }
}

/// Sort tokens into canonical order. Stable, so equal slots keep their order.
pub fn canonicalize(tokens: &mut [FieldToken]) {
    tokens.sort_by_key(FieldToken::slot);
}

/// A lowered field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Storage column name
    pub column: String,
    pub semantic_type: SemanticType,
    pub key_generation: KeyGeneration,
    pub nullable: bool,
    pub tokens: Vec<FieldToken>,
}

impl FieldDecl {
    pub fn primitive(&self) -> &'static str {
        self.tokens
            .iter()
            .find_map(|t| match t {
                FieldToken::Base(p) => Some(*p),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn length(&self) -> Option<u32> {
        self.tokens.iter().find_map(|t| match t {
            FieldToken::Length(n) => Some(*n),
            _ => None,
        })
    }

    pub fn default_token(&self) -> Option<&DefaultToken> {
        self.tokens.iter().find_map(|t| match t {
            FieldToken::Default(d) => Some(d),
            _ => None,
        })
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.tokens.iter().find_map(|t| match t {
            FieldToken::References(r) => Some(r),
            _ => None,
        })
    }

    pub fn is_primary_key(&self) -> bool {
        self.tokens.contains(&FieldToken::PrimaryKey)
    }

    /// Values the server fills in itself; inserts must not supply them.
    pub fn is_server_generated(&self) -> bool {
        self.key_generation == KeyGeneration::AutoIncrement
    }

    /// Inserts may omit this field.
    pub fn is_insert_optional(&self) -> bool {
        self.nullable || self.default_token().is_some()
    }

    /// Property name in camelCase, e.g. `authorId` for `author_id`.
    pub fn property_name(&self) -> String {
        self.column.to_lower_camel_case()
    }
}

/// A lowered table.
#[derive(Debug, Clone)]
pub struct TableDecl<'a> {
    pub source: &'a TableDefinition,
    pub fields: Vec<FieldDecl>,
}

impl TableDecl<'_> {
    pub fn name(&self) -> &str {
        &self.source.name
    }

    /// Upper-camel type name from the display name, e.g. `PostTag`.
    pub fn type_name(&self) -> String {
        type_name(&self.source.display_name)
    }

    /// Symbol the table is bound to in generated code, e.g. `postTags`.
    pub fn symbol(&self) -> String {
        table_symbol(&self.source.name)
    }

    pub fn primary_key(&self) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.is_primary_key())
    }
}

pub fn type_name(display_name: &str) -> String {
    display_name.to_upper_camel_case()
}

pub fn table_symbol(table_name: &str) -> String {
    table_name.to_lower_camel_case()
}

/// Lower one field into canonically ordered tokens.
pub fn lower_field(
    table: &TableDefinition,
    field: &FieldDefinition,
    map: TypeMap,
) -> Result<FieldDecl, GenError> {
    if field.is_auto_increment && !field.is_primary_key {
        return Err(GenError::invalid_table(
            &table.name,
            format!("field `{}` is auto-increment but not the primary key", field.name),
        ));
    }
    let key_generation = key_generation(field, map.dialect);
    let mut tokens = vec![FieldToken::Base(map.primitive(field.semantic_type)?)];

    if let Some(reference) = &field.foreign_key {
        tokens.push(FieldToken::References(Reference {
            table: reference.target_table.clone(),
            field: reference.target_field.clone(),
            on_delete: reference.on_delete,
            self_referencing: reference.target_table == table.name,
        }));
    }

    let default = match (key_generation, &field.default_value) {
        (KeyGeneration::AutoIncrement, _) => Some(DefaultToken::AutoIncrement),
        (KeyGeneration::RandomUuid, _) => Some(DefaultToken::RandomUuid),
        (KeyGeneration::Supplied, Some(DefaultValue::Now)) => Some(DefaultToken::Now),
        (KeyGeneration::Supplied, Some(value)) => Some(DefaultToken::Literal(value.clone())),
        (KeyGeneration::Supplied, None) => None,
    };
    if let Some(default) = default {
        tokens.push(FieldToken::Default(default));
    }

    if field.is_primary_key {
        tokens.push(FieldToken::PrimaryKey);
    } else {
        if field.unique {
            tokens.push(FieldToken::Unique);
        }
        if field.required {
            tokens.push(FieldToken::NotNull);
        }
    }

    if field.semantic_type == SemanticType::String {
        if let Some(length) = field.length {
            tokens.push(FieldToken::Length(length));
        }
    }

    canonicalize(&mut tokens);

    Ok(FieldDecl {
        column: field.name.clone(),
        semantic_type: field.semantic_type,
        key_generation,
        nullable: field.is_nullable(),
        tokens,
    })
}

/// Fail with `UnresolvableForeignKey` if any foreign key in `tables` targets a
/// table outside of `tables`.
pub fn check_references(tables: &[&TableDefinition]) -> Result<(), GenError> {
    for table in tables {
        for (field, fk) in table.foreign_keys() {
            if !tables.iter().any(|t| t.name == fk.target_table) {
                return Err(GenError::UnresolvableForeignKey {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    target: fk.target_table.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Lower a resolved table sequence, keeping its order.
pub fn lower_tables<'a>(
    tables: &[&'a TableDefinition],
    map: TypeMap,
) -> Result<Vec<TableDecl<'a>>, GenError> {
    check_references(tables)?;

    tables
        .iter()
        .map(|&table| {
            let fields = table
                .fields
                .iter()
                .map(|field| lower_field(table, field, map))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TableDecl {
                source: table,
                fields,
            })
        })
        .collect()
}

/// Distinct primitives referenced by any field of `tables`.
pub fn used_primitives(tables: &[TableDecl<'_>]) -> BTreeSet<&'static str> {
    tables
        .iter()
        .flat_map(|t| t.fields.iter())
        .map(FieldDecl::primitive)
        .collect()
}

/// A field as it appears in one derived type.
#[derive(Debug, Clone, Copy)]
pub struct Projected<'f> {
    pub field: &'f FieldDecl,
    /// The property may be omitted
    pub optional: bool,
}

/// Row shape as read back: every field, none optional.
pub fn record_projection(fields: &[FieldDecl]) -> Vec<Projected<'_>> {
    fields
        .iter()
        .map(|field| Projected {
            field,
            optional: false,
        })
        .collect()
}

/// Insert shape: server-generated fields dropped, defaulted or nullable
/// fields optional.
pub fn insertable_projection(fields: &[FieldDecl]) -> Vec<Projected<'_>> {
    fields
        .iter()
        .filter(|f| !f.is_server_generated())
        .map(|field| Projected {
            field,
            optional: field.is_insert_optional(),
        })
        .collect()
}

/// Update shape: every field optional.
pub fn updatable_projection(fields: &[FieldDecl]) -> Vec<Projected<'_>> {
    fields
        .iter()
        .map(|field| Projected {
            field,
            optional: true,
        })
        .collect()
}
