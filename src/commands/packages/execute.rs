use std::error::Error;

use serde::Serialize;

use super::PackagesCmd;
use crate::commands::{Context, Execute};
use crate::typemap::{Backend, Dialect};

/// Result of the packages command execution
#[derive(Debug, Serialize)]
pub struct PackagesResult {
    pub backend: Backend,
    pub dialect: Dialect,
    pub dependencies: Vec<&'static str>,
    pub dev_dependencies: Vec<&'static str>,
}

impl Execute for PackagesCmd {
    type Output = PackagesResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let backend = ctx.config.backend(self.backend).ok_or(
            "No backend selected: pass --backend or set \"backend\" in the config file",
        )?;
        let dialect = ctx.config.dialect(self.dialect, ctx.database_url.as_deref());
        let packages = backend.runtime_packages(dialect);

        Ok(PackagesResult {
            backend,
            dialect,
            dependencies: packages.dependencies,
            dev_dependencies: packages.dev_dependencies,
        })
    }
}
