//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` building a serializable result
//! - `output.rs` rendering that result as a table

mod generate;
mod packages;
mod presets;
mod resolve;
mod tables;

pub use generate::GenerateCmd;
pub use packages::PackagesCmd;
pub use presets::PresetsCmd;
pub use resolve::ResolveCmd;
pub use tables::TablesCmd;

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use enum_dispatch::enum_dispatch;

use crate::config::{ConfigError, ConfigFile, load_custom_tables};
use crate::error::GenError;
use crate::output::{OutputFormat, Outputable};
use crate::schema::{Catalog, TableDefinition, TableSelection};

/// Everything a command reads besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    /// Built-in tables plus the config file's `custom_tables`
    pub catalog: Catalog,
    pub config: ConfigFile,
    /// Value of `DATABASE_URL`, used to detect the dialect
    pub database_url: Option<String>,
}

impl Context {
    pub fn new(config: ConfigFile, database_url: Option<String>) -> Result<Self, GenError> {
        let catalog = Catalog::builtin().with_custom(&config.custom_tables)?;
        Ok(Self {
            catalog,
            config,
            database_url,
        })
    }
}

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>>;
}

/// Execute a command and format its result.
#[enum_dispatch]
pub trait CommandRunner {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

/// Table selection flags shared by commands that resolve tables.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SelectionArgs {
    /// Preset to start from (see `schemagen presets`)
    #[arg(short, long, conflicts_with = "tables")]
    pub preset: Option<String>,

    /// Comma-separated table names, bypassing presets
    #[arg(short, long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// JSON file with extra table definitions for this run
    #[arg(long)]
    pub custom: Option<PathBuf>,
}

impl SelectionArgs {
    /// Selection after applying config and defaults.
    pub fn selection(&self, config: &ConfigFile) -> TableSelection {
        config.selection(self.preset.as_deref(), &self.tables)
    }

    /// Definitions read from `--custom`, if given.
    pub fn custom_tables(&self) -> Result<Vec<TableDefinition>, ConfigError> {
        match &self.custom {
            Some(path) => load_custom_tables(path),
            None => Ok(Vec::new()),
        }
    }
}

#[enum_dispatch(CommandRunner)]
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate schema sources for a backend
    Generate(GenerateCmd),

    /// Show the dependency-ordered table set a selection expands to
    Resolve(ResolveCmd),

    /// List the built-in presets
    Presets(PresetsCmd),

    /// List the tables available in the catalog
    Tables(TablesCmd),

    /// List the npm packages a backend needs
    Packages(PackagesCmd),
}
