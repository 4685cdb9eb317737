//! schemagen library - schema source generation for TypeScript ORMs
//!
//! Provides the table catalog, dependency resolution, backend emitters and
//! the command and output infrastructure of the `schemagen` CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod output;
pub mod resolve;
pub mod schema;
pub mod typemap;

#[macro_use]
pub mod test_macros;

pub use error::GenError;
pub use generate::{GenerateOutput, GenerateRequest, generate};
