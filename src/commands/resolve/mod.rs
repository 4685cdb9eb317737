mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute, SelectionArgs};
use crate::output::{OutputFormat, Outputable};

/// Show the dependency-ordered table set a selection expands to
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schemagen resolve                    # basic preset (or the config file's selection)
  schemagen resolve -p ecommerce       # every table the ecommerce preset needs
  schemagen resolve -t order_items     # order_items plus what it references
")]
pub struct ResolveCmd {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

impl CommandRunner for ResolveCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
