//! Generation entry point: selection → resolved tables → artifacts.

use serde::Serialize;
use tracing::info;

use crate::emit::{Artifact, BackendEmitter, Emitter};
use crate::error::GenError;
use crate::resolve::{resolve, table_names};
use crate::schema::{Catalog, TableDefinition, TableSelection};
use crate::typemap::{Backend, Dialect};

/// Everything one generation call depends on.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub backend: Backend,
    pub dialect: Dialect,
    pub selection: TableSelection,
    /// Definitions merged into the catalog for this call only
    pub custom_tables: Vec<TableDefinition>,
}

/// Artifacts of one generation call plus the table order they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateOutput {
    pub backend: Backend,
    pub dialect: Dialect,
    pub tables: Vec<String>,
    pub artifacts: Vec<Artifact>,
}

/// Resolve the request's selection against `catalog` (plus any custom
/// tables) and render it with the request's backend.
///
/// Fails without producing any artifact if any step fails.
pub fn generate(request: &GenerateRequest, catalog: &Catalog) -> Result<GenerateOutput, GenError> {
    let merged;
    let catalog = if request.custom_tables.is_empty() {
        catalog
    } else {
        merged = catalog.with_custom(&request.custom_tables)?;
        &merged
    };

    let requested = request.selection.table_names()?;
    let tables = resolve(requested.as_slice(), catalog)?;

    info!(
        backend = %request.backend,
        dialect = %request.dialect,
        requested = requested.len(),
        resolved = tables.len(),
        "generating schema"
    );

    let emitter = BackendEmitter::from(request.backend);
    let artifacts = emitter.emit(&tables, request.dialect)?;

    Ok(GenerateOutput {
        backend: request.backend,
        dialect: request.dialect,
        tables: table_names(&tables).into_iter().map(String::from).collect(),
        artifacts,
    })
}
