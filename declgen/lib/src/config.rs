//! Generator configuration.
//!
//! Settings come from an optional TOML file; every field has a default so an
//! empty file (or no file at all) is a valid configuration. Command-line
//! flags are applied on top by the caller.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::GeneratorError;
use crate::output::{DEFAULT_LICENSE_NOTICE, DEFAULT_RUNTIME, Provenance, RenderOptions};
use crate::relational::{DEFAULT_REGISTRY, RelationalOptions, TypeMap};
use crate::source::SourceConfig;

/// Default output file of the relational pipeline.
pub const DEFAULT_SQL_OUTPUT: &str = "SQLQuery.generated.rs";

/// Default output file of the static resource pipeline.
pub const DEFAULT_STATIC_MAP_OUTPUT: &str = "StaticMap.generated.rs";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// License notice for generated files. An empty string omits it.
    pub license: String,
    pub sql: SqlConfig,
    pub static_map: StaticMapConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            license: DEFAULT_LICENSE_NOTICE.to_string(),
            sql: SqlConfig::default(),
            static_map: StaticMapConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a configuration file.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Read` if the file cannot be read and
    /// `GeneratorError::ConfigFile` if it is not valid TOML for this tool.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path).map_err(|source| GeneratorError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::parse(&content).map_err(|source| GeneratorError::ConfigFile {
            path: path.display().to_string(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Render options for a pipeline that uses the runtime path `runtime`.
    pub fn render_options(&self, runtime: &str, provenance: &Provenance) -> RenderOptions {
        RenderOptions {
            runtime: runtime.to_string(),
            license: Some(self.license.clone()).filter(|l| !l.trim().is_empty()),
            provenance: provenance.clone(),
        }
    }
}

/// Settings of the relational (`sql`) pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    /// Namespace of the generated modules, `::` or `.` separated.
    pub namespace: String,
    pub include_schema: bool,
    /// Name of the registry struct.
    pub registry: String,
    /// Path of the crate providing `Table` and `Field<T>`.
    pub runtime: String,
    pub output: PathBuf,
    pub source: SourceConfig,
    /// Extra or replacement catalog type mappings.
    pub types: BTreeMap<String, String>,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            namespace: "generated::sql_query".to_string(),
            include_schema: true,
            registry: DEFAULT_REGISTRY.to_string(),
            runtime: DEFAULT_RUNTIME.to_string(),
            output: PathBuf::from(DEFAULT_SQL_OUTPUT),
            source: SourceConfig::default(),
            types: BTreeMap::new(),
        }
    }
}

impl SqlConfig {
    /// Builder options: the default type map with `types` layered on top.
    pub fn relational_options(&self) -> RelationalOptions {
        let mut types = TypeMap::with_defaults();
        types.extend(&self.types);

        RelationalOptions {
            include_schema: self.include_schema,
            registry: self.registry.clone(),
            types,
        }
    }
}

/// Settings of the static resource (`static-map`) pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticMapConfig {
    pub namespace: String,
    pub output: PathBuf,
}

impl Default for StaticMapConfig {
    fn default() -> Self {
        Self {
            namespace: "generated::static_map".to_string(),
            output: PathBuf::from(DEFAULT_STATIC_MAP_OUTPUT),
        }
    }
}
