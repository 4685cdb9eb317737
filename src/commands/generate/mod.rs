mod cli_tests;
mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute, SelectionArgs};
use crate::output::{OutputFormat, Outputable};
use crate::typemap::{Backend, Dialect};

/// Generate schema sources for a backend
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schemagen generate -b drizzle                       # basic preset on PostgreSQL
  schemagen generate -b prisma -d sqlite -p auth      # auth preset for SQLite
  schemagen generate -b kysely -t comments,tags       # explicit tables plus their dependencies
  schemagen generate -b drizzle --custom tables.json  # add custom table definitions
  schemagen generate -b prisma -o json                # artifacts as JSON
")]
pub struct GenerateCmd {
    /// Target backend (falls back to `backend` in the config file)
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Target database (falls back to the config file, then DATABASE_URL, then postgresql)
    #[arg(short, long, value_enum)]
    pub dialect: Option<Dialect>,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

impl CommandRunner for GenerateCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
