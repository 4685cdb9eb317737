//! Drizzle ORM emitter.
//!
//! Generates a `schema.ts` with one `*Table(...)` builder per table followed by
//! a separate `relations()` pass, plus a `drizzle.config.ts` for drizzle-kit:
//!
//! ```ts
//! export const posts = pgTable('posts', {
//!   id: uuid('id').primaryKey().defaultRandom(),
//!   authorId: uuid('author_id').notNull().references(() => users.id, { onDelete: 'cascade' }),
//! });
//!
//! export const postsRelations = relations(posts, ({ one }) => ({
//!   author: one(users, { fields: [posts.authorId], references: [users.id] }),
//! }));
//! ```

use std::collections::{BTreeSet, HashMap};

use heck::ToLowerCamelCase;
use tracing::debug;

use super::ir::{self, DefaultToken, FieldDecl, FieldToken, TableDecl};
use super::{Artifact, BANNER, Emitter, ts_literal, ts_string};
use crate::error::GenError;
use crate::schema::{OnDelete, RelationKind, TableDefinition};
use crate::typemap::{Backend, Dialect, TypeMap, drizzle as map};

pub const SCHEMA_PATH: &str = "src/db/schema.ts";
pub const CONFIG_PATH: &str = "drizzle.config.ts";

/// Emitter for Drizzle ORM schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrizzleEmitter;

impl Emitter for DrizzleEmitter {
    fn backend(&self) -> Backend {
        Backend::Drizzle
    }

    fn emit(&self, tables: &[&TableDefinition], dialect: Dialect) -> Result<Vec<Artifact>, GenError> {
        let decls = ir::lower_tables(tables, TypeMap::new(Backend::Drizzle, dialect))?;
        let relation_blocks: Vec<String> = decls
            .iter()
            .filter_map(|table| relations_block(table, &decls))
            .collect();

        let schema = render_schema(&decls, &relation_blocks, dialect);
        Ok(vec![
            Artifact::new(SCHEMA_PATH, schema),
            Artifact::new(CONFIG_PATH, render_config(dialect)),
        ])
    }
}

/// Symbols each import statement of the schema file names.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Imports {
    /// Table constructor and column builders from the dialect core module
    pub core: BTreeSet<&'static str>,
    /// Type-only imports from the dialect core module
    pub core_types: BTreeSet<&'static str>,
    /// Helpers from `drizzle-orm` itself
    pub orm: BTreeSet<&'static str>,
}

/// Compute the imports before anything is rendered, from what the tables use.
pub fn imports(decls: &[TableDecl<'_>], dialect: Dialect, has_relations: bool) -> Imports {
    let mut imports = Imports::default();
    if decls.is_empty() {
        return imports;
    }

    imports.core = ir::used_primitives(decls);
    imports.core.insert(map::table_function(dialect));

    let fields = || decls.iter().flat_map(|t| t.fields.iter());
    if fields().any(|f| f.reference().is_some_and(|r| r.self_referencing)) {
        imports.core_types.insert(map::any_column_type(dialect));
    }
    if dialect == Dialect::Sqlite && fields().any(|f| f.default_token() == Some(&DefaultToken::Now)) {
        imports.orm.insert("sql");
    }
    if has_relations {
        imports.orm.insert("relations");
    }

    imports
}

fn render_schema(decls: &[TableDecl<'_>], relation_blocks: &[String], dialect: Dialect) -> String {
    let imports = imports(decls, dialect, !relation_blocks.is_empty());
    debug!(?imports, "drizzle imports");

    let mut out = String::new();
    out.push_str(BANNER);
    out.push_str("\n\n");

    if !imports.orm.is_empty() {
        let names: Vec<_> = imports.orm.iter().copied().collect();
        out.push_str(&format!("import {{ {} }} from 'drizzle-orm';\n", names.join(", ")));
    }
    if !imports.core.is_empty() {
        let names: Vec<String> = imports
            .core
            .iter()
            .map(|n| n.to_string())
            .chain(imports.core_types.iter().map(|n| format!("type {}", n)))
            .collect();
        out.push_str(&format!(
            "import {{ {} }} from '{}';\n",
            names.join(", "),
            map::core_module(dialect)
        ));
    }

    if decls.is_empty() {
        out.push_str("export {};\n");
        return out;
    }

    for table in decls {
        out.push('\n');
        out.push_str(&render_table(table, dialect));
    }

    for block in relation_blocks {
        out.push('\n');
        out.push_str(block);
    }

    out
}

fn render_table(table: &TableDecl<'_>, dialect: Dialect) -> String {
    let columns = table
        .fields
        .iter()
        .map(|f| format!("  {}: {},", f.property_name(), render_column(f, dialect)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "export const {} = {}({}, {{\n{}\n}});\n",
        table.symbol(),
        map::table_function(dialect),
        ts_string(table.name()),
        columns
    )
}

/// Render the builder chain of one column, token by token.
pub fn render_column(field: &FieldDecl, dialect: Dialect) -> String {
    let auto_increment_key = field.is_primary_key()
        && field.default_token() == Some(&DefaultToken::AutoIncrement)
        && dialect == Dialect::Sqlite;

    let mut chain = String::new();
    for token in &field.tokens {
        match token {
            FieldToken::Base(builder) => {
                chain.push_str(&format!("{}({}", builder, ts_string(&field.column)));
                let mut options = Vec::new();
                if let Some(length) = field
                    .length()
                    .or_else(|| map::implied_length(dialect, field.semantic_type))
                {
                    options.push(format!("length: {}", length));
                }
                if let Some(mode) = map::column_mode(dialect, field.semantic_type) {
                    options.push(format!("mode: {}", ts_string(mode)));
                }
                if !options.is_empty() {
                    chain.push_str(&format!(", {{ {} }}", options.join(", ")));
                }
                chain.push(')');
            }
            // Rendered inside the base call's options.
            FieldToken::Length(_) => {}
            FieldToken::PrimaryKey if auto_increment_key => {
                chain.push_str(".primaryKey({ autoIncrement: true })");
            }
            FieldToken::PrimaryKey => chain.push_str(".primaryKey()"),
            FieldToken::NotNull => chain.push_str(".notNull()"),
            FieldToken::Unique => chain.push_str(".unique()"),
            FieldToken::Default(default) => chain.push_str(&render_default(default, dialect)),
            FieldToken::References(reference) => {
                let target = format!(
                    "{}.{}",
                    ir::table_symbol(&reference.table),
                    reference.field.to_lower_camel_case()
                );
                let callback = if reference.self_referencing {
                    format!("(): {} => {}", map::any_column_type(dialect), target)
                } else {
                    format!("() => {}", target)
                };
                match reference.on_delete {
                    Some(action) => chain.push_str(&format!(
                        ".references({}, {{ onDelete: {} }})",
                        callback,
                        ts_string(on_delete_action(action))
                    )),
                    None => chain.push_str(&format!(".references({})", callback)),
                }
            }
        }
    }
    chain
}

fn render_default(default: &DefaultToken, dialect: Dialect) -> String {
    match (default, dialect) {
        (DefaultToken::Literal(value), _) => format!(".default({})", ts_literal(value)),
        (DefaultToken::Now, Dialect::Sqlite) => ".default(sql`(unixepoch())`)".to_string(),
        (DefaultToken::Now, _) => ".defaultNow()".to_string(),
        (DefaultToken::AutoIncrement, Dialect::Postgresql) => ".generatedAlwaysAsIdentity()".to_string(),
        (DefaultToken::AutoIncrement, Dialect::Mysql) => ".autoincrement()".to_string(),
        // Folded into `.primaryKey({ autoIncrement: true })`.
        (DefaultToken::AutoIncrement, Dialect::Sqlite) => String::new(),
        (DefaultToken::RandomUuid, Dialect::Postgresql) => ".defaultRandom()".to_string(),
        (DefaultToken::RandomUuid, _) => ".$defaultFn(() => crypto.randomUUID())".to_string(),
    }
}

fn on_delete_action(action: OnDelete) -> &'static str {
    match action {
        OnDelete::Cascade => "cascade",
        OnDelete::SetNull => "set null",
        OnDelete::Restrict => "restrict",
    }
}

/// Relation name shared by both sides of a self reference or of one of
/// several keys between the same pair of tables.
fn relation_name(table: &str, column: &str) -> String {
    format!("{}_{}", table, column)
}

/// Foreign-key columns of `table` that point at `target`, in field order.
fn keys_to<'d>(table: &'d TableDecl<'_>, target: &str) -> Vec<&'d FieldDecl> {
    table
        .fields
        .iter()
        .filter(|f| f.reference().is_some_and(|r| r.table == target))
        .collect()
}

/// Column stem a relation property is named after: `sender_id` -> `sender`.
fn key_stem(column: &str) -> &str {
    column.strip_suffix("_id").unwrap_or(column)
}

/// The key of a many-to-one relation: the one whose stem is the relation's
/// name, else the first key to the target.
fn forward_key<'d>(keys: &[&'d FieldDecl], relation_field: &str) -> Option<&'d FieldDecl> {
    keys.iter()
        .find(|f| key_stem(&f.column) == relation_field)
        .or_else(|| keys.first())
        .copied()
}

/// The key of a one-to-many relation when the source holds several keys to
/// this table: the one whose stem occurs in the relation's name, else the
/// key at the relation's position among this table's relations to `source`.
fn back_key<'d>(keys: &[&'d FieldDecl], relation_field: &str, position: usize) -> Option<&'d FieldDecl> {
    keys.iter()
        .find(|f| relation_field.contains(key_stem(&f.column)))
        .or_else(|| keys.get(position))
        .copied()
}

/// A table in `decls` other than the two ends that references both of them.
fn find_junction<'d, 'a>(decls: &'d [TableDecl<'a>], left: &str, right: &str) -> Option<&'d TableDecl<'a>> {
    decls.iter().find(|t| {
        let deps = t.source.dependencies();
        t.name() != left && t.name() != right && deps.contains(&left) && deps.contains(&right)
    })
}

/// Render the `relations()` declaration for `table`, or `None` if none of
/// its relations can be expressed within the resolved set.
fn relations_block(table: &TableDecl<'_>, decls: &[TableDecl<'_>]) -> Option<String> {
    let symbol = table.symbol();
    let mut entries = Vec::new();
    let mut helpers = BTreeSet::new();
    // One-to-many relations seen so far per source table.
    let mut back_positions: HashMap<String, usize> = HashMap::new();

    for relation in &table.source.relations {
        let property = relation.field_name.to_lower_camel_case();
        let Some(target) = decls.iter().find(|t| t.name() == relation.target_table) else {
            debug!(table = table.name(), relation = %relation.field_name, "relation target not resolved, skipping");
            continue;
        };
        let target_symbol = target.symbol();

        match relation.kind {
            RelationKind::ManyToOne => {
                let keys = keys_to(table, target.name());
                let Some(fk) = forward_key(&keys, &relation.field_name) else {
                    debug!(table = table.name(), relation = %relation.field_name, "no foreign key for relation, skipping");
                    continue;
                };
                let Some(reference) = fk.reference() else {
                    continue;
                };
                let mut options = format!(
                    "fields: [{}.{}], references: [{}.{}]",
                    symbol,
                    fk.property_name(),
                    target_symbol,
                    reference.field.to_lower_camel_case()
                );
                if reference.self_referencing || keys.len() > 1 {
                    options.push_str(&format!(
                        ", relationName: {}",
                        ts_string(&relation_name(table.name(), &fk.column))
                    ));
                }
                helpers.insert("one");
                entries.push(format!("  {}: one({}, {{ {} }}),", property, target_symbol, options));
            }
            RelationKind::OneToMany => {
                let keys: Vec<&FieldDecl> = if target.name() == table.name() {
                    table.fields.iter().filter(|f| f.reference().is_some_and(|r| r.self_referencing)).collect()
                } else {
                    keys_to(target, table.name())
                };
                let position = *back_positions.entry(target.name().to_string()).or_insert(0);
                back_positions.insert(target.name().to_string(), position + 1);

                if target.name() == table.name() || keys.len() > 1 {
                    let Some(fk) = back_key(&keys, &relation.field_name, position) else {
                        debug!(table = table.name(), relation = %relation.field_name, "no foreign key for relation, skipping");
                        continue;
                    };
                    entries.push(format!(
                        "  {}: many({}, {{ relationName: {} }}),",
                        property,
                        target_symbol,
                        ts_string(&relation_name(target.name(), &fk.column))
                    ));
                } else {
                    entries.push(format!("  {}: many({}),", property, target_symbol));
                }
                helpers.insert("many");
            }
            RelationKind::ManyToMany => {
                let Some(junction) = find_junction(decls, table.name(), target.name()) else {
                    debug!(table = table.name(), relation = %relation.field_name, "no junction table resolved, skipping");
                    continue;
                };
                helpers.insert("many");
                entries.push(format!("  {}: many({}),", property, junction.symbol()));
            }
        }
    }

    if entries.is_empty() {
        return None;
    }

    let helpers: Vec<_> = helpers.into_iter().collect();
    Some(format!(
        "export const {}Relations = relations({}, ({{ {} }}) => ({{\n{}\n}}));\n",
        symbol,
        symbol,
        helpers.join(", "),
        entries.join("\n")
    ))
}

fn render_config(dialect: Dialect) -> String {
    format!(
        "import {{ defineConfig }} from 'drizzle-kit';\n\
         \n\
         export default defineConfig({{\n  \
           dialect: {},\n  \
           schema: {},\n  \
           out: './drizzle',\n  \
           dbCredentials: {{\n    \
             url: process.env.DATABASE_URL!,\n  \
           }},\n\
         }});\n",
        ts_string(map::kit_dialect(dialect)),
        ts_string(&format!("./{}", SCHEMA_PATH))
    )
}
