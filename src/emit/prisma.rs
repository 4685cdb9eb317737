//! Prisma schema emitter.
//!
//! Produces a single `schema.prisma` with the `generator`/`datasource` header
//! followed by one `model` block per table. Foreign keys are declared inline
//! with `@relation`, and each referenced model receives the matching back
//! relation field Prisma requires.

use std::collections::{BTreeMap, HashSet};

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use tracing::debug;

use super::ir::{self, DefaultToken, FieldDecl, FieldToken, Reference, TableDecl};
use super::{Artifact, BANNER, Emitter};
use crate::error::GenError;
use crate::schema::{DefaultValue, OnDelete, RelationKind, TableDefinition};
use crate::typemap::{Backend, Dialect, TypeMap, prisma as map};

pub const SCHEMA_PATH: &str = "prisma/schema.prisma";

/// Emitter for the Prisma schema language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismaEmitter;

impl Emitter for PrismaEmitter {
    fn backend(&self) -> Backend {
        Backend::Prisma
    }

    fn emit(&self, tables: &[&TableDefinition], dialect: Dialect) -> Result<Vec<Artifact>, GenError> {
        let decls = ir::lower_tables(tables, TypeMap::new(Backend::Prisma, dialect))?;
        let edges = collect_edges(&decls);
        debug!(models = decls.len(), relations = edges.len(), "rendering prisma schema");

        let mut out = render_header(dialect);
        for table in &decls {
            out.push('\n');
            out.push_str(&render_model(table, &decls, &edges, dialect));
        }

        Ok(vec![Artifact::new(SCHEMA_PATH, out)])
    }
}

/// A foreign key seen from both of its models.
#[derive(Debug)]
struct Edge<'d> {
    source: &'d TableDecl<'d>,
    field: &'d FieldDecl,
    reference: &'d Reference,
    /// Relation name, set when Prisma cannot tell this relation apart from
    /// another one between the same models
    name: Option<String>,
}

fn collect_edges<'d>(decls: &'d [TableDecl<'d>]) -> Vec<Edge<'d>> {
    let mut edges: Vec<Edge<'d>> = decls
        .iter()
        .flat_map(|table| {
            table.fields.iter().filter_map(move |field| {
                field.reference().map(|reference| Edge {
                    source: table,
                    field,
                    reference,
                    name: None,
                })
            })
        })
        .collect();

    // Relations per unordered model pair.
    let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();
    for edge in &edges {
        *pairs.entry(pair_key(edge.source.name(), &edge.reference.table)).or_default() += 1;
    }

    for edge in &mut edges {
        let shared = pairs
            .get(&pair_key(edge.source.name(), &edge.reference.table))
            .copied()
            .unwrap_or_default();
        if shared > 1 || edge.reference.self_referencing {
            edge.name = Some(format!(
                "{}{}",
                edge.source.type_name(),
                forward_field_name(&edge.field.column).to_upper_camel_case()
            ));
        }
    }

    edges
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Name of the relation field declared next to a foreign-key column,
/// e.g. `author` for `author_id`.
fn forward_field_name(column: &str) -> String {
    match column.strip_suffix("_id") {
        Some(stem) if !stem.is_empty() => stem.to_lower_camel_case(),
        _ => format!("{}Rel", column.to_lower_camel_case()),
    }
}

/// Reserve `base` in `used`, suffixing a counter on collision.
fn claim(base: String, used: &mut HashSet<String>) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}{}", base, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn render_header(dialect: Dialect) -> String {
    format!(
        "{}\n\
         \n\
         generator client {{\n  \
           provider = \"prisma-client-js\"\n\
         }}\n\
         \n\
         datasource db {{\n  \
           provider = \"{}\"\n  \
           url      = env(\"DATABASE_URL\")\n\
         }}\n",
        BANNER,
        map::provider(dialect)
    )
}

/// One row of a model block before column alignment.
struct Line {
    name: String,
    ty: String,
    attrs: Vec<String>,
}

fn render_model(table: &TableDecl<'_>, decls: &[TableDecl<'_>], edges: &[Edge<'_>], dialect: Dialect) -> String {
    let mut used: HashSet<String> = table.fields.iter().map(FieldDecl::property_name).collect();
    let mut lines = Vec::new();

    for field in &table.fields {
        lines.push(scalar_line(field, dialect));

        if let Some(edge) = edges
            .iter()
            .find(|e| e.source.name() == table.name() && std::ptr::eq(e.field, field))
        {
            lines.push(forward_relation_line(edge, decls, &mut used));
        }
    }

    for edge in edges.iter().filter(|e| e.reference.table == table.name()) {
        lines.push(back_relation_line(table, edge, edges, &mut used));
    }

    let name_width = lines.iter().map(|l| l.name.len()).max().unwrap_or_default();
    let type_width = lines.iter().map(|l| l.ty.len()).max().unwrap_or_default();

    let mut out = format!("model {} {{\n", table.type_name());
    for line in &lines {
        let row = format!(
            "  {:<nw$} {:<tw$} {}",
            line.name,
            line.ty,
            line.attrs.join(" "),
            nw = name_width,
            tw = type_width
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str(&format!("\n  @@map(\"{}\")\n}}\n", table.name()));
    out
}

fn scalar_line(field: &FieldDecl, dialect: Dialect) -> Line {
    let mut ty = String::new();
    let mut attrs = Vec::new();

    for token in &field.tokens {
        match token {
            FieldToken::Base(primitive) => {
                ty.push_str(primitive);
                if field.nullable {
                    ty.push('?');
                }
                attrs.extend(map::native_type(dialect, field.semantic_type, field.length()));
            }
            // Part of the native type attribute.
            FieldToken::Length(_) => {}
            FieldToken::PrimaryKey => attrs.push("@id".to_string()),
            // Expressed by the absence of `?`.
            FieldToken::NotNull => {}
            FieldToken::Unique => attrs.push("@unique".to_string()),
            FieldToken::Default(default) => attrs.push(format!("@default({})", default_expr(default))),
            // Declared by the relation field that follows.
            FieldToken::References(_) => {}
        }
    }

    let name = field.property_name();
    if name != field.column {
        attrs.push(format!("@map({})", quoted(&field.column)));
    }

    Line { name, ty, attrs }
}

fn forward_relation_line(edge: &Edge<'_>, decls: &[TableDecl<'_>], used: &mut HashSet<String>) -> Line {
    let target_type = decls
        .iter()
        .find(|t| t.name() == edge.reference.table)
        .map(TableDecl::type_name)
        .unwrap_or_else(|| ir::type_name(&edge.reference.table));

    let mut args = Vec::new();
    if let Some(name) = &edge.name {
        args.push(quoted(name));
    }
    args.push(format!("fields: [{}]", edge.field.property_name()));
    args.push(format!("references: [{}]", edge.reference.field.to_lower_camel_case()));
    if let Some(action) = edge.reference.on_delete {
        args.push(format!("onDelete: {}", referential_action(action)));
    }

    let ty = if edge.field.nullable {
        format!("{}?", target_type)
    } else {
        target_type
    };

    Line {
        name: claim(forward_field_name(&edge.field.column), used),
        ty,
        attrs: vec![format!("@relation({})", args.join(", "))],
    }
}

fn back_relation_line(
    table: &TableDecl<'_>,
    edge: &Edge<'_>,
    edges: &[Edge<'_>],
    used: &mut HashSet<String>,
) -> Line {
    let source = edge.source;
    let from_source = edges
        .iter()
        .filter(|e| e.source.name() == source.name() && e.reference.table == table.name())
        .count();
    let one_to_one = edge.field.tokens.contains(&FieldToken::Unique);

    let declared = table
        .source
        .relations
        .iter()
        .find(|r| r.kind == RelationKind::OneToMany && r.target_table == source.name())
        .map(|r| r.field_name.to_lower_camel_case());

    let base = match declared {
        Some(name) if from_source == 1 && !one_to_one => name,
        _ if one_to_one => source.type_name().to_lower_camel_case(),
        _ if from_source > 1 => format!(
            "{}By{}",
            source.symbol(),
            forward_field_name(&edge.field.column).to_upper_camel_case()
        ),
        _ => source.symbol(),
    };

    let ty = if one_to_one {
        format!("{}?", source.type_name())
    } else {
        format!("{}[]", source.type_name())
    };

    Line {
        name: claim(base, used),
        ty,
        attrs: edge
            .name
            .iter()
            .map(|name| format!("@relation({})", quoted(name)))
            .collect(),
    }
}

fn default_expr(default: &DefaultToken) -> String {
    match default {
        DefaultToken::Now => "now()".to_string(),
        DefaultToken::AutoIncrement => "autoincrement()".to_string(),
        DefaultToken::RandomUuid => "uuid()".to_string(),
        DefaultToken::Literal(value) => match value {
            DefaultValue::Text(s) => quoted(s),
            DefaultValue::Integer(n) => n.to_string(),
            DefaultValue::Float(n) => n.to_string(),
            DefaultValue::Boolean(b) => b.to_string(),
            DefaultValue::Now => "now()".to_string(),
        },
    }
}

fn referential_action(action: OnDelete) -> &'static str {
    match action {
        OnDelete::Cascade => "Cascade",
        OnDelete::SetNull => "SetNull",
        OnDelete::Restrict => "Restrict",
    }
}

/// Prisma string literal; its escaping rules match JSON's.
fn quoted(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use crate::schema::{Catalog, FieldDefinition, OnDelete as Action, SemanticType};
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn emit_schema(catalog: &Catalog, names: &[&str], dialect: Dialect) -> String {
        let tables = resolve(names, catalog).unwrap();
        let artifacts = PrismaEmitter.emit(&tables, dialect).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, SCHEMA_PATH);
        artifacts[0].content.clone()
    }

    fn model_block<'s>(schema: &'s str, model: &str) -> &'s str {
        let start = schema.find(&format!("model {} {{", model)).unwrap();
        let end = schema[start..].find("\n}\n").unwrap();
        &schema[start..start + end + 2]
    }

    /// Collapse column padding so assertions don't depend on alignment.
    fn squash(block: &str) -> String {
        block
            .lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[rstest]
    fn test_header_names_provider(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["users"], Dialect::Mysql);
        assert!(schema.contains("generator client {\n  provider = \"prisma-client-js\"\n}"));
        assert!(schema.contains("  provider = \"mysql\"\n  url      = env(\"DATABASE_URL\")"));
    }

    #[rstest]
    fn test_users_model_postgres(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["users"], Dialect::Postgresql);
        let expected = "\
model User {
  id           String   @db.Uuid @id @default(uuid())
  email        String   @db.VarChar(255) @unique
  name         String?  @db.VarChar(100)
  passwordHash String   @db.VarChar(255) @map(\"password_hash\")
  isActive     Boolean  @default(true) @map(\"is_active\")
  createdAt    DateTime @default(now()) @map(\"created_at\")
  updatedAt    DateTime @default(now()) @map(\"updated_at\")

  @@map(\"users\")
}";
        assert_eq!(model_block(&schema, "User"), expected);
    }

    #[rstest]
    fn test_foreign_keys_and_back_relations(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["comments"], Dialect::Postgresql);

        let comment = squash(model_block(&schema, "Comment"));
        assert!(comment.contains("post Post @relation(fields: [postId], references: [id], onDelete: Cascade)"));
        assert!(comment.contains("author User @relation(fields: [authorId], references: [id], onDelete: Cascade)"));

        let user = squash(model_block(&schema, "User"));
        assert!(user.contains("posts Post[]\n"));
        assert!(user.contains("comments Comment[]\n"));

        let post = squash(model_block(&schema, "Post"));
        assert!(post.contains("comments Comment[]\n"));
    }

    #[rstest]
    fn test_relation_field_follows_its_column(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["comments"], Dialect::Postgresql);
        let comment = squash(model_block(&schema, "Comment"));
        let column = comment.find("postId String").unwrap();
        let relation = comment.find("post Post").unwrap();
        let next_column = comment.find("authorId String").unwrap();
        assert!(column < relation && relation < next_column);
    }

    #[rstest]
    fn test_models_follow_resolved_order(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["order_items"], Dialect::Postgresql);
        let order: Vec<usize> = ["User", "Order", "Category", "Product", "OrderItem"]
            .iter()
            .map(|m| schema.find(&format!("model {} {{", m)).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[rstest]
    fn test_declared_relation_names_back_fields(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["order_items"], Dialect::Postgresql);
        assert!(squash(model_block(&schema, "Order")).contains("items OrderItem[]"));
        assert!(squash(model_block(&schema, "Product")).contains("orderItems OrderItem[]"));
        assert!(squash(model_block(&schema, "User")).contains("orders Order[]"));
    }

    #[rstest]
    fn test_self_reference_uses_named_relation(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["categories"], Dialect::Postgresql);
        let category = squash(model_block(&schema, "Category"));
        assert!(category.contains(
            "parent Category? @relation(\"CategoryParent\", fields: [parentId], references: [id], onDelete: SetNull)"
        ));
        assert!(category.contains("children Category[] @relation(\"CategoryParent\")"));
    }

    #[rstest]
    fn test_unique_foreign_key_is_one_to_one(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["profiles"], Dialect::Postgresql);
        let user = squash(model_block(&schema, "User"));
        assert!(user.contains("profile Profile?\n"));
    }

    #[rstest]
    fn test_literal_defaults(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["orders"], Dialect::Postgresql);
        let order = squash(model_block(&schema, "Order"));
        assert!(order.contains("status String @db.VarChar(20) @default(\"pending\")"));
        assert!(order.contains("shippingAddress Json? @map(\"shipping_address\")"));
    }

    #[rstest]
    fn test_sqlite_keys_and_defaults(catalog: Catalog) {
        let schema = emit_schema(&catalog, &["sessions"], Dialect::Sqlite);
        let session = squash(model_block(&schema, "Session"));
        assert!(session.contains("id Int @id @default(autoincrement())"));
        assert!(session.contains("userId Int @map(\"user_id\")"));
        assert!(session.contains("createdAt DateTime @default(now())"));
        assert!(!session.contains("@db."));
    }

    #[rstest]
    fn test_sqlite_json_is_unsupported(catalog: Catalog) {
        let tables = resolve(&["profiles"], &catalog).unwrap();
        let err = PrismaEmitter.emit(&tables, Dialect::Sqlite).unwrap_err();
        assert_eq!(
            err,
            GenError::UnsupportedFieldType {
                semantic_type: SemanticType::Json,
                backend: Backend::Prisma,
                dialect: Dialect::Sqlite,
            }
        );
    }

    #[test]
    fn test_two_keys_to_same_model_are_named() {
        let catalog = Catalog::builtin()
            .with_custom(&[TableDefinition::new("transfers", "Transfer")
                .field(FieldDefinition::id())
                .field(FieldDefinition::new("sender_id", SemanticType::Identifier).required().references("users", Action::Cascade))
                .field(FieldDefinition::new("recipient_id", SemanticType::Identifier).required().references("users", Action::Cascade))])
            .unwrap();
        let schema = emit_schema(&catalog, &["transfers"], Dialect::Postgresql);

        assert!(schema.contains("@relation(\"TransferSender\", fields: [senderId]"));
        assert!(schema.contains("@relation(\"TransferRecipient\", fields: [recipientId]"));

        let user = squash(model_block(&schema, "User"));
        assert!(user.contains("transfersBySender Transfer[] @relation(\"TransferSender\")"));
        assert!(user.contains("transfersByRecipient Transfer[] @relation(\"TransferRecipient\")"));
    }

    #[rstest]
    fn test_output_is_deterministic(catalog: Catalog) {
        let first = emit_schema(&catalog, &["order_items", "memberships"], Dialect::Mysql);
        let second = emit_schema(&catalog, &["order_items", "memberships"], Dialect::Mysql);
        assert_eq!(first, second);
    }

    #[test]
    fn test_forward_field_names() {
        assert_eq!(forward_field_name("author_id"), "author");
        assert_eq!(forward_field_name("organization_id"), "organization");
        assert_eq!(forward_field_name("owner"), "ownerRel");
    }
}
