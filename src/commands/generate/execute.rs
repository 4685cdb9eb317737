use std::error::Error;

use super::GenerateCmd;
use crate::commands::{Context, Execute};
use crate::generate::{GenerateOutput, GenerateRequest, generate};

impl Execute for GenerateCmd {
    type Output = GenerateOutput;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let backend = ctx.config.backend(self.backend).ok_or(
            "No backend selected: pass --backend or set \"backend\" in the config file",
        )?;

        let request = GenerateRequest {
            backend,
            dialect: ctx.config.dialect(self.dialect, ctx.database_url.as_deref()),
            selection: self.selection.selection(&ctx.config),
            custom_tables: self.selection.custom_tables()?,
        };

        Ok(generate(&request, &ctx.catalog)?)
    }
}
