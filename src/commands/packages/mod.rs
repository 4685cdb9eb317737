mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};
use crate::typemap::{Backend, Dialect};

/// List the npm packages a backend needs
///
/// Only the backend and dialect matter; generated content is not inspected.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schemagen packages -b drizzle             # drizzle-orm, postgres driver, drizzle-kit
  schemagen packages -b kysely -d sqlite    # kysely with better-sqlite3
")]
pub struct PackagesCmd {
    /// Target backend (falls back to `backend` in the config file)
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Target database (falls back to the config file, then DATABASE_URL, then postgresql)
    #[arg(short, long, value_enum)]
    pub dialect: Option<Dialect>,
}

impl CommandRunner for PackagesCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
