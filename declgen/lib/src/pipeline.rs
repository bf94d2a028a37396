//! End-to-end generation.
//!
//! Each pipeline goes source → descriptors → rendered text. Writing the text
//! is left to the caller (see [`write_atomic`](crate::output::write_atomic)).

use std::path::Path;

use tracing::{info, instrument};

use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::output::{Provenance, render};
use crate::relational::build_relational_model;
use crate::resource::ResourceDirInfo;
use crate::source::{ConnectionTarget, MetadataProvider, resolve_target};
use crate::tree::describe_tree;

/// Rendered output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub code: String,
    /// Number of declarations emitted.
    pub classes: usize,
}

/// Generates the table declarations for the configured catalog.
///
/// The metadata source is resolved before `connect` is called, so a missing
/// database or connection string fails without touching any provider.
///
/// ## Errors
///
/// Returns `GeneratorError::Config` when no source is configured, and any
/// error of the provider, the builder or the renderer.
#[instrument(skip_all, fields(namespace = %config.sql.namespace))]
pub fn generate_sql<F>(
    config: &GeneratorConfig,
    provenance: &Provenance,
    connect: F,
) -> Result<Generated, GeneratorError>
where
    F: FnOnce(&ConnectionTarget) -> Result<Box<dyn MetadataProvider>, GeneratorError>,
{
    let sql = &config.sql;
    let target = resolve_target(&sql.source)?;
    let provider = connect(&target)?;
    let records = provider.extract_metadata()?;

    let model = build_relational_model(records, &sql.relational_options())?;
    let options = config.render_options(&sql.runtime, provenance);
    let code = render(&sql.namespace, &model.classes, &options)?;

    info!(tables = model.tables.len(), "Generated table declarations");
    Ok(Generated {
        code,
        classes: model.classes.len(),
    })
}

/// Generates the path constants for the resources under `root`.
///
/// ## Errors
///
/// Returns `GeneratorError::Read` when the directory cannot be scanned, and
/// any error of the builder or the renderer.
#[instrument(skip(config, provenance), fields(root = %root.display()))]
pub fn generate_static_map(
    root: &Path,
    config: &GeneratorConfig,
    provenance: &Provenance,
) -> Result<Generated, GeneratorError> {
    let tree = ResourceDirInfo::scan(root)?;
    let classes = describe_tree(&tree)?;

    // Directory classes never reference the runtime crate.
    let options = config.render_options(&config.sql.runtime, provenance);
    let code = render(&config.static_map.namespace, &classes, &options)?;

    info!(classes = classes.len(), "Generated static map");
    Ok(Generated {
        code,
        classes: classes.len(),
    })
}
