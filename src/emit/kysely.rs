//! Kysely emitter.
//!
//! Kysely has no schema DSL; tables are described by plain TypeScript
//! interfaces. Every table gets a `UserTable` interface, the shape Kysely
//! itself reads, with defaulted and server-generated columns wrapped in
//! `Generated<T>`. Three projections of the same field list follow it:
//!
//! - `User`: the row as read back
//! - `NewUser`: what an insert accepts, server-generated keys left out
//! - `UserUpdate`: what an update accepts, every property optional
//!
//! A `Database` interface ties table names to the table interfaces, and a companion
//! `database.ts` builds the `Kysely` instance for the dialect.

use tracing::debug;

use super::ir::{self, FieldDecl, Projected, TableDecl};
use super::{Artifact, BANNER, Emitter};
use crate::error::GenError;
use crate::schema::TableDefinition;
use crate::typemap::{Backend, Dialect, TypeMap, kysely as map};

pub const TYPES_PATH: &str = "src/db/types.ts";
pub const DATABASE_PATH: &str = "src/db/database.ts";

const JSON_ALIAS: &str =
    "export type JsonValue = string | number | boolean | null | JsonValue[] | { [key: string]: JsonValue };";

/// Emitter for Kysely table interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct KyselyEmitter;

impl Emitter for KyselyEmitter {
    fn backend(&self) -> Backend {
        Backend::Kysely
    }

    fn emit(&self, tables: &[&TableDefinition], dialect: Dialect) -> Result<Vec<Artifact>, GenError> {
        let decls = ir::lower_tables(tables, TypeMap::new(Backend::Kysely, dialect))?;
        Ok(vec![
            Artifact::new(TYPES_PATH, render_types(&decls)),
            Artifact::new(DATABASE_PATH, render_database(dialect)),
        ])
    }
}

/// Columns Kysely should treat as optional on insert even though reads
/// always return them.
pub fn is_generated(field: &FieldDecl) -> bool {
    field.is_server_generated() || field.default_token().is_some()
}

/// Whether any table interface wraps a column in `Generated<T>`.
pub fn uses_generated(decls: &[TableDecl<'_>]) -> bool {
    decls.iter().flat_map(|t| t.fields.iter()).any(is_generated)
}

/// Primitives that are not TypeScript builtins and need a local declaration.
pub fn declared_primitives(decls: &[TableDecl<'_>]) -> Vec<&'static str> {
    ir::used_primitives(decls)
        .into_iter()
        .filter(|p| !map::is_builtin(p))
        .collect()
}

fn render_types(decls: &[TableDecl<'_>]) -> String {
    let mut out = String::new();
    out.push_str(BANNER);
    out.push('\n');

    if uses_generated(decls) {
        out.push('\n');
        out.push_str(&format!("import type {{ {} }} from 'kysely';\n", map::GENERATED_TYPE));
    }

    let declared = declared_primitives(decls);
    debug!(?declared, "kysely type aliases");
    for primitive in declared {
        if primitive == map::JSON_TYPE {
            out.push('\n');
            out.push_str(JSON_ALIAS);
            out.push('\n');
        }
    }

    for table in decls {
        let type_name = table.type_name();
        out.push('\n');
        out.push_str(&render_table_interface(table));
        out.push('\n');
        out.push_str(&render_interface(&type_name, &ir::record_projection(&table.fields)));
        out.push('\n');
        out.push_str(&render_interface(
            &format!("New{}", type_name),
            &ir::insertable_projection(&table.fields),
        ));
        out.push('\n');
        out.push_str(&render_interface(
            &format!("{}Update", type_name),
            &ir::updatable_projection(&table.fields),
        ));
    }

    out.push('\n');
    if decls.is_empty() {
        out.push_str("export interface Database {}\n");
    } else {
        out.push_str("export interface Database {\n");
        for table in decls {
            out.push_str(&format!("  {}: {};\n", table.name(), table_interface_name(table)));
        }
        out.push_str("}\n");
    }

    out
}

fn table_interface_name(table: &TableDecl<'_>) -> String {
    format!("{}Table", table.type_name())
}

fn render_table_interface(table: &TableDecl<'_>) -> String {
    let name = table_interface_name(table);
    if table.fields.is_empty() {
        return format!("export interface {} {{}}\n", name);
    }

    let mut out = format!("export interface {} {{\n", name);
    for field in &table.fields {
        let nullable = if field.nullable { " | null" } else { "" };
        let ty = format!("{}{}", field.primitive(), nullable);
        if is_generated(field) {
            out.push_str(&format!("  {}: {}<{}>;\n", field.column, map::GENERATED_TYPE, ty));
        } else {
            out.push_str(&format!("  {}: {};\n", field.column, ty));
        }
    }
    out.push_str("}\n");
    out
}

fn render_interface(name: &str, fields: &[Projected<'_>]) -> String {
    if fields.is_empty() {
        return format!("export interface {} {{}}\n", name);
    }

    let mut out = format!("export interface {} {{\n", name);
    for projected in fields {
        let field = projected.field;
        let nullable = if field.nullable { " | null" } else { "" };
        let optional = if projected.optional { "?" } else { "" };
        out.push_str(&format!(
            "  {}{}: {}{};\n",
            field.column,
            optional,
            field.primitive(),
            nullable
        ));
    }
    out.push_str("}\n");
    out
}

fn render_database(dialect: Dialect) -> String {
    let setup = map::driver_setup(dialect);
    format!(
        "{banner}\n\
         \n\
         import {{ Kysely, {class} }} from 'kysely';\n\
         {driver}\n\
         import type {{ Database }} from './types';\n\
         \n\
         export const db = new Kysely<Database>({{\n  \
           dialect: new {class}({{\n    \
             {options},\n  \
           }}),\n\
         }});\n",
        banner = BANNER,
        class = setup.dialect_class,
        driver = setup.driver_import,
        options = setup.dialect_options,
    )
}
