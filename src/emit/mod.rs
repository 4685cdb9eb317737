//! Backend emitters.
//!
//! Every emitter turns a resolved table sequence into source-text artifacts for
//! one backend. Tables are first lowered into the shared IR (`ir`), so field
//! sub-part ordering is decided in one place; the emitters only render.

pub mod drizzle;
pub mod ir;
pub mod kysely;
pub mod prisma;

pub use drizzle::DrizzleEmitter;
pub use kysely::KyselyEmitter;
pub use prisma::PrismaEmitter;

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::error::GenError;
use crate::schema::{DefaultValue, TableDefinition};
use crate::typemap::{Backend, Dialect};

/// One generated file: a relative path hint and its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub path: String,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Renders a resolved table sequence for one backend.
#[enum_dispatch]
pub trait Emitter {
    fn backend(&self) -> Backend;

    /// Render `tables` (dependency-ordered, dependency-closed) for `dialect`.
    ///
    /// Either every artifact is produced or an error is returned.
    fn emit(&self, tables: &[&TableDefinition], dialect: Dialect) -> Result<Vec<Artifact>, GenError>;
}

/// Emitter selected by a `Backend`.
#[enum_dispatch(Emitter)]
#[derive(Debug, Clone, Copy)]
pub enum BackendEmitter {
    Drizzle(DrizzleEmitter),
    Prisma(PrismaEmitter),
    Kysely(KyselyEmitter),
}

impl From<Backend> for BackendEmitter {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Drizzle => DrizzleEmitter.into(),
            Backend::Prisma => PrismaEmitter.into(),
            Backend::Kysely => KyselyEmitter.into(),
        }
    }
}

/// Banner placed at the top of every generated file. Both TypeScript and
/// Prisma schema read `//` as a line comment.
pub(crate) const BANNER: &str = "// Generated by schemagen. Do not edit by hand.";

/// TypeScript single-quoted string literal.
pub(crate) fn ts_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// TypeScript literal for a non-`now` default value.
pub(crate) fn ts_literal(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Text(s) => ts_string(s),
        DefaultValue::Integer(n) => n.to_string(),
        DefaultValue::Float(n) => n.to_string(),
        DefaultValue::Boolean(b) => b.to_string(),
        // Lowering turns `now` into its own token.
        DefaultValue::Now => "new Date()".to_string(),
    }
}
