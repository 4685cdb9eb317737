//! Backend-agnostic table definitions.
//!
//! This module provides structured definitions for relational tables, allowing
//! every backend emitter to be driven from a single source of truth.
//!
//! # Overview
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `SemanticType` - Abstract field type (identifier, string, text, integer, ...)
//!    - `FieldDefinition` - A single column with constraints, default and foreign key
//!    - `TableDefinition` - An ordered field list plus declared relations
//!
//! 2. **Built-in Tables** (`tables.rs`): the tables presets draw from
//!
//! 3. **Presets** (`presets.rs`): named bundles of table names and `TableSelection`
//!
//! 4. **Catalog** (`catalog.rs`): immutable lookup of tables by name
//!
//! # Type Mapping
//!
//! | Semantic | Drizzle (pg) | Prisma | Kysely |
//! |----------|--------------|--------|--------|
//! | identifier | uuid | String | string |
//! | string | varchar | String | string |
//! | text | text | String | string |
//! | integer | integer | Int | number |
//! | boolean | boolean | Boolean | boolean |
//! | timestamp | timestamp | DateTime | Date |
//! | json | jsonb | Json | JsonValue |

mod catalog;
mod definition;
pub mod presets;
pub mod tables;

pub use catalog::Catalog;
pub use definition::{
    DefaultValue, FieldDefinition, ForeignKey, OnDelete, Relation, RelationKind, SemanticType,
    TableDefinition,
};
pub use presets::{ALL_PRESETS, Preset, TableSelection, find_preset};
