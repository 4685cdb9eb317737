//! Preset bundles of table names.
//!
//! A preset only names tables; the resolver pulls in whatever they reference.

use serde::Serialize;

use crate::error::GenError;

/// A named, ordered group of catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub description: &'static str,
    pub tables: &'static [&'static str],
}

pub const EMPTY: Preset = Preset {
    id: "empty",
    description: "No tables",
    tables: &[],
};

pub const BASIC: Preset = Preset {
    id: "basic",
    description: "Users only",
    tables: &["users"],
};

pub const AUTH: Preset = Preset {
    id: "auth",
    description: "Users with sessions, linked accounts and profiles",
    tables: &["users", "sessions", "accounts", "profiles"],
};

pub const BLOG: Preset = Preset {
    id: "blog",
    description: "Posts, comments, tags and categories",
    tables: &["users", "posts", "comments", "categories", "tags", "post_tags"],
};

pub const ECOMMERCE: Preset = Preset {
    id: "ecommerce",
    description: "Product catalog with orders",
    tables: &["users", "categories", "products", "orders", "order_items"],
};

pub const SAAS: Preset = Preset {
    id: "saas",
    description: "Multi-tenant organizations with memberships and an audit trail",
    tables: &["users", "organizations", "memberships", "audit_logs"],
};

/// All presets, in listing order.
pub const ALL_PRESETS: &[Preset] = &[EMPTY, BASIC, AUTH, BLOG, ECOMMERCE, SAAS];

/// Look up a preset by identifier.
pub fn find_preset(id: &str) -> Result<&'static Preset, GenError> {
    ALL_PRESETS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| GenError::UnknownPreset(id.to_string()))
}

/// Which tables a generation request starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    /// Tables named by a preset
    Preset(String),
    /// Caller-supplied table names, bypassing presets
    Custom(Vec<String>),
}

impl TableSelection {
    /// The ordered table names this selection requests.
    pub fn table_names(&self) -> Result<Vec<String>, GenError> {
        match self {
            TableSelection::Preset(id) => Ok(find_preset(id)?
                .tables
                .iter()
                .map(|t| t.to_string())
                .collect()),
            TableSelection::Custom(names) => Ok(names.clone()),
        }
    }
}
