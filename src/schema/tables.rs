//! Built-in table definitions.
//!
//! Every table a preset can name is defined here. Definitions are plain values
//! assembled once when the catalog is built.

use super::definition::{
    DefaultValue, FieldDefinition as Field, OnDelete, RelationKind, SemanticType as T,
    TableDefinition as Table,
};

fn created_at() -> Field {
    Field::new("created_at", T::Timestamp)
        .required()
        .default_value(DefaultValue::Now)
}

fn updated_at() -> Field {
    Field::new("updated_at", T::Timestamp)
        .required()
        .default_value(DefaultValue::Now)
}

fn owner(name: &str, target: &str, on_delete: OnDelete) -> Field {
    Field::new(name, T::Identifier)
        .required()
        .references(target, on_delete)
}

/// Users: accounts that own most other rows
pub fn users() -> Table {
    Table::new("users", "User")
        .field(Field::id())
        .field(Field::new("email", T::String).length(255).required().unique())
        .field(Field::new("name", T::String).length(100))
        .field(Field::new("password_hash", T::String).length(255).required())
        .field(Field::new("is_active", T::Boolean).required().default_value(DefaultValue::Boolean(true)))
        .field(created_at())
        .field(updated_at())
        .relation(RelationKind::OneToMany, "posts", "posts")
        .relation(RelationKind::OneToMany, "comments", "comments")
        .relation(RelationKind::OneToMany, "sessions", "sessions")
}

/// Profiles: optional one-per-user details
pub fn profiles() -> Table {
    Table::new("profiles", "Profile")
        .field(Field::id())
        .field(owner("user_id", "users", OnDelete::Cascade).unique())
        .field(Field::new("bio", T::Text))
        .field(Field::new("avatar_url", T::String).length(500))
        .field(Field::new("website", T::String).length(255))
        .field(Field::new("preferences", T::Json))
        .field(updated_at())
        .relation(RelationKind::ManyToOne, "users", "user")
}

/// Sessions: login sessions keyed by an opaque token
pub fn sessions() -> Table {
    Table::new("sessions", "Session")
        .field(Field::id())
        .field(owner("user_id", "users", OnDelete::Cascade))
        .field(Field::new("token", T::String).length(255).required().unique())
        .field(Field::new("expires_at", T::Timestamp).required())
        .field(Field::new("user_agent", T::Text))
        .field(created_at())
        .relation(RelationKind::ManyToOne, "users", "user")
}

/// Accounts: external identity providers linked to a user
pub fn accounts() -> Table {
    Table::new("accounts", "Account")
        .field(Field::id())
        .field(owner("user_id", "users", OnDelete::Cascade))
        .field(Field::new("provider", T::String).length(50).required())
        .field(Field::new("provider_account_id", T::String).length(255).required())
        .field(Field::new("access_token", T::Text))
        .field(Field::new("refresh_token", T::Text))
        .field(Field::new("expires_at", T::Timestamp))
        .field(created_at())
        .relation(RelationKind::ManyToOne, "users", "user")
}

/// Posts: authored articles
pub fn posts() -> Table {
    Table::new("posts", "Post")
        .field(Field::id())
        .field(owner("author_id", "users", OnDelete::Cascade))
        .field(Field::new("title", T::String).length(255).required())
        .field(Field::new("slug", T::String).length(255).required().unique())
        .field(Field::new("content", T::Text))
        .field(Field::new("published", T::Boolean).required().default_value(DefaultValue::Boolean(false)))
        .field(Field::new("view_count", T::Integer).required().default_value(DefaultValue::Integer(0)))
        .field(created_at())
        .field(updated_at())
        .relation(RelationKind::ManyToOne, "users", "author")
        .relation(RelationKind::OneToMany, "comments", "comments")
        .relation(RelationKind::ManyToMany, "tags", "tags")
}

/// Comments: replies on posts
pub fn comments() -> Table {
    Table::new("comments", "Comment")
        .field(Field::id())
        .field(owner("post_id", "posts", OnDelete::Cascade))
        .field(owner("author_id", "users", OnDelete::Cascade))
        .field(Field::new("content", T::Text).required())
        .field(created_at())
        .relation(RelationKind::ManyToOne, "posts", "post")
        .relation(RelationKind::ManyToOne, "users", "author")
}

/// Categories: hierarchical taxonomy, `parent_id` points back into this table
pub fn categories() -> Table {
    Table::new("categories", "Category")
        .field(Field::id())
        .field(Field::new("name", T::String).length(100).required())
        .field(Field::new("slug", T::String).length(100).required().unique())
        .field(Field::new("description", T::Text))
        .field(Field::new("parent_id", T::Identifier).references("categories", OnDelete::SetNull))
        .relation(RelationKind::ManyToOne, "categories", "parent")
        .relation(RelationKind::OneToMany, "categories", "children")
}

/// Tags: flat labels attached to posts
pub fn tags() -> Table {
    Table::new("tags", "Tag")
        .field(Field::id())
        .field(Field::new("name", T::String).length(50).required().unique())
        .field(Field::new("slug", T::String).length(50).required().unique())
        .relation(RelationKind::ManyToMany, "posts", "posts")
}

/// Post tags: junction between posts and tags
pub fn post_tags() -> Table {
    Table::new("post_tags", "PostTag")
        .field(Field::id())
        .field(owner("post_id", "posts", OnDelete::Cascade))
        .field(owner("tag_id", "tags", OnDelete::Cascade))
        .relation(RelationKind::ManyToOne, "posts", "post")
        .relation(RelationKind::ManyToOne, "tags", "tag")
}

/// Products: items for sale, prices in minor units
pub fn products() -> Table {
    Table::new("products", "Product")
        .field(Field::id())
        .field(Field::new("category_id", T::Identifier).references("categories", OnDelete::SetNull))
        .field(Field::new("name", T::String).length(255).required())
        .field(Field::new("sku", T::String).length(64).required().unique())
        .field(Field::new("description", T::Text))
        .field(Field::new("price", T::Integer).required())
        .field(Field::new("stock", T::Integer).required().default_value(DefaultValue::Integer(0)))
        .field(Field::new("attributes", T::Json))
        .field(Field::new("is_active", T::Boolean).required().default_value(DefaultValue::Boolean(true)))
        .field(created_at())
        .relation(RelationKind::ManyToOne, "categories", "category")
        .relation(RelationKind::OneToMany, "order_items", "order_items")
}

/// Orders: a user's checkout
pub fn orders() -> Table {
    Table::new("orders", "Order")
        .field(Field::id())
        .field(owner("user_id", "users", OnDelete::Restrict))
        .field(Field::new("status", T::String).length(20).required().default_value(DefaultValue::Text("pending".to_string())))
        .field(Field::new("total", T::Integer).required())
        .field(Field::new("shipping_address", T::Json))
        .field(created_at())
        .field(updated_at())
        .relation(RelationKind::ManyToOne, "users", "user")
        .relation(RelationKind::OneToMany, "order_items", "items")
}

/// Order items: line items of an order
pub fn order_items() -> Table {
    Table::new("order_items", "OrderItem")
        .field(Field::id())
        .field(owner("order_id", "orders", OnDelete::Cascade))
        .field(owner("product_id", "products", OnDelete::Restrict))
        .field(Field::new("quantity", T::Integer).required().default_value(DefaultValue::Integer(1)))
        .field(Field::new("unit_price", T::Integer).required())
        .relation(RelationKind::ManyToOne, "orders", "order")
        .relation(RelationKind::ManyToOne, "products", "product")
}

/// Organizations: tenants in a multi-tenant app
pub fn organizations() -> Table {
    Table::new("organizations", "Organization")
        .field(Field::id())
        .field(Field::new("name", T::String).length(255).required())
        .field(Field::new("slug", T::String).length(100).required().unique())
        .field(Field::new("settings", T::Json))
        .field(created_at())
        .relation(RelationKind::OneToMany, "memberships", "memberships")
}

/// Memberships: users belonging to organizations
pub fn memberships() -> Table {
    Table::new("memberships", "Membership")
        .field(Field::id())
        .field(owner("organization_id", "organizations", OnDelete::Cascade))
        .field(owner("user_id", "users", OnDelete::Cascade))
        .field(Field::new("role", T::String).length(20).required().default_value(DefaultValue::Text("member".to_string())))
        .field(created_at())
        .relation(RelationKind::ManyToOne, "organizations", "organization")
        .relation(RelationKind::ManyToOne, "users", "user")
}

/// Audit logs: append-only event trail with a serial key
pub fn audit_logs() -> Table {
    Table::new("audit_logs", "AuditLog")
        .field(Field::new("id", T::Integer).primary_key().auto_increment())
        .field(Field::new("user_id", T::Identifier).references("users", OnDelete::SetNull))
        .field(Field::new("action", T::String).length(100).required())
        .field(Field::new("payload", T::Json))
        .field(created_at())
        .relation(RelationKind::ManyToOne, "users", "user")
}

/// All built-in tables, in catalog order.
pub fn all_tables() -> Vec<Table> {
    vec![
        users(),
        profiles(),
        sessions(),
        accounts(),
        categories(),
        posts(),
        comments(),
        tags(),
        post_tags(),
        products(),
        orders(),
        order_items(),
        organizations(),
        memberships(),
        audit_logs(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_tables_are_valid() {
        for table in all_tables() {
            assert!(table.validate().is_ok(), "{} should be valid", table.name);
        }
    }

    #[test]
    fn test_table_names_are_unique() {
        let tables = all_tables();
        for (i, table) in tables.iter().enumerate() {
            assert!(
                !tables[..i].iter().any(|t| t.name == table.name),
                "duplicate table {}",
                table.name
            );
        }
    }

    #[test]
    fn test_every_foreign_key_targets_a_builtin_table() {
        let tables = all_tables();
        for table in &tables {
            for (field, fk) in table.foreign_keys() {
                assert!(
                    tables.iter().any(|t| t.name == fk.target_table),
                    "{}.{} targets unknown table {}",
                    table.name,
                    field.name,
                    fk.target_table
                );
            }
        }
    }

    #[test]
    fn test_categories_reference_themselves() {
        assert_eq!(categories().dependencies(), vec!["categories"]);
    }

    #[test]
    fn test_comments_dependencies() {
        assert_eq!(comments().dependencies(), vec!["posts", "users"]);
    }

    #[test]
    fn test_audit_log_key_is_serial() {
        let table = audit_logs();
        let pk = table.primary_key().unwrap();
        assert_eq!(pk.semantic_type, T::Integer);
        assert!(pk.is_auto_increment);
    }
}
