mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

/// List the tables available in the catalog
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schemagen tables                       # built-in tables plus config custom_tables
  schemagen tables --custom extra.json   # include definitions from a file
")]
pub struct TablesCmd {
    /// JSON file with extra table definitions to list alongside the catalog
    #[arg(long)]
    pub custom: Option<PathBuf>,
}

impl CommandRunner for TablesCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
