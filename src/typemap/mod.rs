//! Backend × dialect type mapping tables.
//!
//! Each backend has its own submodule answering "which primitive does this
//! semantic type become on this dialect". Dialects only change primitives and
//! key generation; the declaration shape belongs to the emitters.

pub mod drizzle;
pub mod kysely;
pub mod prisma;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::schema::{FieldDefinition, SemanticType};

/// Target schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Drizzle ORM table builders
    Drizzle,
    /// Prisma schema language
    Prisma,
    /// Kysely TypeScript table interfaces
    Kysely,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Drizzle => "drizzle",
            Backend::Prisma => "prisma",
            Backend::Kysely => "kysely",
        }
    }

    /// npm packages a project needs at runtime and at development time for
    /// this backend on `dialect`.
    pub fn runtime_packages(&self, dialect: Dialect) -> Packages {
        let driver = match (self, dialect) {
            (Backend::Prisma, _) => None,
            (Backend::Drizzle, Dialect::Postgresql) => Some("postgres"),
            (Backend::Kysely, Dialect::Postgresql) => Some("pg"),
            (_, Dialect::Mysql) => Some("mysql2"),
            (_, Dialect::Sqlite) => Some("better-sqlite3"),
        };

        let (core, dev): (&[&'static str], &[&'static str]) = match self {
            Backend::Drizzle => (&["drizzle-orm"], &["drizzle-kit"]),
            Backend::Prisma => (&["@prisma/client"], &["prisma"]),
            Backend::Kysely => (&["kysely"], &[]),
        };

        let mut dependencies = core.to_vec();
        dependencies.extend(driver);

        let mut dev_dependencies = dev.to_vec();
        match driver {
            Some("pg") => dev_dependencies.push("@types/pg"),
            Some("better-sqlite3") => dev_dependencies.push("@types/better-sqlite3"),
            _ => {}
        }

        Packages {
            dependencies,
            dev_dependencies,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packages the dependency installer should add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Packages {
    pub dependencies: Vec<&'static str>,
    pub dev_dependencies: Vec<&'static str>,
}

/// Target database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    #[serde(alias = "postgres")]
    #[value(alias = "postgres")]
    Postgresql,
    Mysql,
    Sqlite,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Infer the dialect from a connection URL scheme.
    ///
    /// ```
    /// use schemagen::typemap::Dialect;
    ///
    /// assert_eq!(Dialect::from_database_url("postgres://localhost/app"), Some(Dialect::Postgresql));
    /// assert_eq!(Dialect::from_database_url("file:./dev.db"), Some(Dialect::Sqlite));
    /// assert_eq!(Dialect::from_database_url("redis://localhost"), None);
    /// ```
    pub fn from_database_url(url: &str) -> Option<Dialect> {
        let scheme = url.split_once(':').map(|(s, _)| s)?.to_ascii_lowercase();
        match scheme.as_str() {
            "postgres" | "postgresql" => Some(Dialect::Postgresql),
            "mysql" | "mariadb" => Some(Dialect::Mysql),
            "sqlite" | "file" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    /// How `identifier` primary keys get their values on this dialect.
    pub fn identifier_key_generation(&self) -> KeyGeneration {
        match self {
            Dialect::Postgresql | Dialect::Mysql => KeyGeneration::RandomUuid,
            Dialect::Sqlite => KeyGeneration::AutoIncrement,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a key column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGeneration {
    /// The caller supplies the value
    Supplied,
    /// The database assigns an increasing integer
    AutoIncrement,
    /// The application generates a random UUID at insert time
    RandomUuid,
}

/// Key generation strategy for `field` on `dialect`.
pub fn key_generation(field: &FieldDefinition, dialect: Dialect) -> KeyGeneration {
    if field.is_auto_increment {
        return KeyGeneration::AutoIncrement;
    }
    if field.is_primary_key && field.semantic_type == SemanticType::Identifier {
        return dialect.identifier_key_generation();
    }
    KeyGeneration::Supplied
}

/// Primitive lookup for one backend × dialect pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMap {
    pub backend: Backend,
    pub dialect: Dialect,
}

impl TypeMap {
    pub fn new(backend: Backend, dialect: Dialect) -> Self {
        Self { backend, dialect }
    }

    /// Backend primitive name for `semantic_type`.
    ///
    /// # Errors
    ///
    /// `UnsupportedFieldType` when the pair has no mapping for the type.
    pub fn primitive(&self, semantic_type: SemanticType) -> Result<&'static str, GenError> {
        let primitive = match self.backend {
            Backend::Drizzle => drizzle::primitive(self.dialect, semantic_type),
            Backend::Prisma => prisma::primitive(self.dialect, semantic_type),
            Backend::Kysely => kysely::primitive(self.dialect, semantic_type),
        };
        primitive.ok_or(GenError::UnsupportedFieldType {
            semantic_type,
            backend: self.backend,
            dialect: self.dialect,
        })
    }
}
