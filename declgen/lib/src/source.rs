//! Metadata sources.
//!
//! The relational pipeline consumes an ordered list of column records. Where
//! those records come from is behind [`MetadataProvider`]; this crate ships a
//! file-backed provider ([`CatalogExport`]) that reads a JSON export of the
//! catalog, so generation never needs a live connection.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::descriptor::PropertyMetadata;
use crate::errors::GeneratorError;

/// Server used when only a database name is given.
pub const DEFAULT_SERVER: &str = "(local)";

/// Something that can list the columns of a catalog.
///
/// Records must come back grouped by table, in catalog order.
pub trait MetadataProvider {
    fn extract_metadata(&self) -> Result<Vec<PropertyMetadata>, GeneratorError>;
}

impl MetadataProvider for Vec<PropertyMetadata> {
    fn extract_metadata(&self) -> Result<Vec<PropertyMetadata>, GeneratorError> {
        Ok(self.clone())
    }
}

/// Where to read metadata from, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub server: String,
    pub database: Option<String>,
    /// Takes precedence over `server`/`database` when set.
    pub connection_string: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            database: None,
            connection_string: None,
            user_id: None,
            password: None,
        }
    }
}

/// SQL login credentials. The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A resolved metadata source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    ConnectionString(String),
    Database {
        server: String,
        database: String,
        /// `None` means integrated authentication.
        credentials: Option<Credentials>,
    },
}

impl ConnectionTarget {
    /// Name of the database this target points at, if it can be told.
    ///
    /// Connection strings are searched for `Database=` or `Initial Catalog=`.
    pub fn database_name(&self) -> Option<&str> {
        match self {
            Self::Database { database, .. } => Some(database.as_str()),
            Self::ConnectionString(cs) => cs.split(';').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                let key = key.trim();
                let matches = key.eq_ignore_ascii_case("database")
                    || key.eq_ignore_ascii_case("initial catalog");
                Some(value.trim()).filter(|v| matches && !v.is_empty())
            }),
        }
    }
}

/// Picks the metadata source: a connection string wins over a database name.
///
/// ## Errors
///
/// Returns `GeneratorError::Config` when neither is given.
pub fn resolve_target(source: &SourceConfig) -> Result<ConnectionTarget, GeneratorError> {
    if let Some(cs) = source.connection_string.as_ref().filter(|cs| !cs.trim().is_empty()) {
        return Ok(ConnectionTarget::ConnectionString(cs.clone()));
    }

    if let Some(database) = source.database.as_ref().filter(|db| !db.trim().is_empty()) {
        let credentials = source.user_id.as_ref().map(|user_id| Credentials {
            user_id: user_id.clone(),
            password: source.password.clone(),
        });

        return Ok(ConnectionTarget::Database {
            server: source.server.clone(),
            database: database.clone(),
            credentials,
        });
    }

    Err(GeneratorError::Config(
        "You must provide either a database (--db) or a connection string (--connection-string)"
            .to_string(),
    ))
}

/// A catalog exported to JSON: an array of column records.
///
/// ```json
/// [{ "schema": "dbo", "table": "Posts", "column": "Id", "type": "int" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogExport {
    path: PathBuf,
}

impl CatalogExport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The export for `target`'s database: `<dir>/<database>.json`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Config` when the target names no database.
    pub fn for_target(dir: &Path, target: &ConnectionTarget) -> Result<Self, GeneratorError> {
        let database = target.database_name().ok_or_else(|| {
            GeneratorError::Config(
                "The connection string does not name a database (Database= or Initial Catalog=)"
                    .to_string(),
            )
        })?;

        Ok(Self::new(dir.join(format!("{database}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataProvider for CatalogExport {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn extract_metadata(&self) -> Result<Vec<PropertyMetadata>, GeneratorError> {
        let content = fs::read_to_string(&self.path).map_err(|source| GeneratorError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        let records: Vec<PropertyMetadata> =
            serde_json::from_str(&content).map_err(|source| GeneratorError::Catalog {
                path: self.path.display().to_string(),
                source,
            })?;

        debug!(records = records.len(), "Read catalog export");
        Ok(records)
    }
}
