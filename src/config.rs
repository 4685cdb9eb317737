//! Configuration file handling.
//!
//! This module provides loading and parsing of `.schemagen.json` configuration
//! files and of custom table definition files passed with `--custom`.
//!
//! ```json
//! {
//!   "backend": "drizzle",
//!   "dialect": "postgresql",
//!   "preset": "blog",
//!   "custom_tables": []
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::{TableDefinition, TableSelection};
use crate::typemap::{Backend, Dialect};

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = ".schemagen.json";

/// Preset used when neither the command line nor the config selects tables.
pub const DEFAULT_PRESET: &str = "basic";

/// Errors raised while reading configuration or definition files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration file structure. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Explicit table names; takes precedence over `preset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,

    /// Definitions added to the built-in catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_tables: Vec<TableDefinition>,
}

impl ConfigFile {
    /// Load configuration from `path`, or from `.schemagen.json` in the current
    /// directory when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly given file doesn't exist
    /// - The file cannot be read
    /// - The JSON is invalid or has unknown keys
    ///
    /// A missing file at the default location yields the empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if !config_path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(config_path));
            }
            return Ok(Self::default());
        }

        read_json(&config_path)
    }

    /// Backend from the command line, falling back to the config.
    pub fn backend(&self, flag: Option<Backend>) -> Option<Backend> {
        flag.or(self.backend)
    }

    /// Dialect from the command line, then the config, then the scheme of
    /// `database_url`, then PostgreSQL.
    pub fn dialect(&self, flag: Option<Dialect>, database_url: Option<&str>) -> Dialect {
        flag.or(self.dialect)
            .or_else(|| database_url.and_then(Dialect::from_database_url))
            .unwrap_or_default()
    }

    /// Table selection from the command line, then the config, then the
    /// `basic` preset. Explicit table lists win over presets at each level.
    pub fn selection(&self, preset: Option<&str>, tables: &[String]) -> TableSelection {
        if !tables.is_empty() {
            return TableSelection::Custom(tables.to_vec());
        }
        if let Some(id) = preset {
            return TableSelection::Preset(id.to_string());
        }
        if let Some(tables) = &self.tables {
            return TableSelection::Custom(tables.clone());
        }
        TableSelection::Preset(
            self.preset
                .clone()
                .unwrap_or_else(|| DEFAULT_PRESET.to_string()),
        )
    }
}

/// Read a JSON array of table definitions.
pub fn load_custom_tables(path: &Path) -> Result<Vec<TableDefinition>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{OnDelete, SemanticType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_full_deserialization() {
        let json = r#"
        {
            "backend": "prisma",
            "dialect": "postgres",
            "preset": "blog",
            "tables": ["users", "posts"]
        }
        "#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(config.backend, Some(Backend::Prisma));
        assert_eq!(config.dialect, Some(Dialect::Postgresql));
        assert_eq!(config.preset.as_deref(), Some("blog"));
        assert_eq!(config.tables, Some(vec!["users".to_string(), "posts".to_string()]));
        assert!(config.custom_tables.is_empty());
    }

    #[test]
    fn test_empty_object_is_valid() {
        let config: ConfigFile = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<ConfigFile, _> = serde_json::from_str(r#"{ "database": {} }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_tables_deserialization() {
        let json = r#"
        {
            "custom_tables": [
                {
                    "name": "widgets",
                    "display_name": "Widget",
                    "fields": [
                        { "name": "id", "type": "identifier", "is_primary_key": true },
                        { "name": "owner_id", "type": "identifier", "required": true,
                          "foreign_key": { "target_table": "users", "on_delete": "cascade" } },
                        { "name": "created_at", "type": "timestamp", "default_value": "now" }
                    ]
                }
            ]
        }
        "#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        let widgets = &config.custom_tables[0];
        assert_eq!(widgets.fields.len(), 3);
        let fk = widgets.fields[1].foreign_key.as_ref().unwrap();
        assert_eq!(fk.target_field, "id");
        assert_eq!(fk.on_delete, Some(OnDelete::Cascade));
        assert_eq!(widgets.fields[2].semantic_type, SemanticType::Timestamp);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = ConfigFile::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_temp("{ invalid json }");
        let err = ConfigFile::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Invalid JSON in"));
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_temp(r#"{ "backend": "kysely", "dialect": "sqlite" }"#);
        let config = ConfigFile::load(Some(file.path())).unwrap();
        assert_eq!(config.backend, Some(Backend::Kysely));
        assert_eq!(config.dialect, Some(Dialect::Sqlite));
    }

    #[test]
    fn test_dialect_precedence() {
        let config = ConfigFile {
            dialect: Some(Dialect::Mysql),
            ..Default::default()
        };
        assert_eq!(config.dialect(Some(Dialect::Sqlite), None), Dialect::Sqlite);
        assert_eq!(config.dialect(None, Some("sqlite:dev.db")), Dialect::Mysql);

        let empty = ConfigFile::default();
        assert_eq!(empty.dialect(None, Some("mysql://localhost/app")), Dialect::Mysql);
        assert_eq!(empty.dialect(None, Some("redis://localhost")), Dialect::Postgresql);
        assert_eq!(empty.dialect(None, None), Dialect::Postgresql);
    }

    #[test]
    fn test_selection_precedence() {
        let config = ConfigFile {
            preset: Some("blog".to_string()),
            ..Default::default()
        };
        let tables = vec!["orders".to_string()];

        assert_eq!(
            config.selection(Some("saas"), &tables),
            TableSelection::Custom(tables.clone())
        );
        assert_eq!(
            config.selection(Some("saas"), &[]),
            TableSelection::Preset("saas".to_string())
        );
        assert_eq!(config.selection(None, &[]), TableSelection::Preset("blog".to_string()));
        assert_eq!(
            ConfigFile::default().selection(None, &[]),
            TableSelection::Preset(DEFAULT_PRESET.to_string())
        );
    }

    #[test]
    fn test_config_tables_win_over_config_preset() {
        let config = ConfigFile {
            preset: Some("blog".to_string()),
            tables: Some(vec!["tags".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            config.selection(None, &[]),
            TableSelection::Custom(vec!["tags".to_string()])
        );
    }

    #[test]
    fn test_load_custom_tables() {
        let file = write_temp(
            r#"[{ "name": "notes", "display_name": "Note",
                  "fields": [{ "name": "id", "type": "identifier", "is_primary_key": true }] }]"#,
        );
        let tables = load_custom_tables(file.path()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "notes");
    }

    #[test]
    fn test_load_custom_tables_missing() {
        let err = load_custom_tables(Path::new("/nonexistent/custom.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
