use std::error::Error;

use serde::Serialize;

use super::PresetsCmd;
use crate::commands::{Context, Execute};
use crate::schema::Preset;

/// Result of the presets command execution
#[derive(Debug, Serialize)]
pub struct PresetsResult {
    pub presets: Vec<Preset>,
}

impl Execute for PresetsCmd {
    type Output = PresetsResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        Ok(PresetsResult {
            presets: ctx.catalog.presets().to_vec(),
        })
    }
}
