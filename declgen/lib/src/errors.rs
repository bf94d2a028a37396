//! Error types for the declaration generator.

use thiserror::Error;

/// Errors that can occur while building or rendering declarations.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required input selector is missing or a setting is unusable.
    #[error("{0}")]
    Config(String),

    /// A catalog type has no entry in the type map.
    #[error(
        "Unsupported native type '{native_type}' for column '{schema}.{table}.{column}': add it to the type map"
    )]
    UnsupportedType {
        /// The catalog type as reported by the metadata source.
        native_type: String,
        /// Schema of the offending column.
        schema: String,
        /// Table of the offending column.
        table: String,
        /// The offending column.
        column: String,
    },

    /// Two generated declarations ended up with the same name.
    ///
    /// Sanitizing can fold distinct source names together (for example table
    /// `a_b` column `c` and table `a` column `b_c` both produce `a_b_c`).
    #[error("Naming collision: '{name}' is declared more than once in {scope}")]
    NamingCollision {
        /// The colliding identifier.
        name: String,
        /// Where the collision happened (the generated set, or a class).
        scope: String,
    },

    /// A name cannot be emitted as a Rust identifier, not even a raw one.
    #[error("'{0}' cannot be used as an identifier")]
    InvalidIdentifier(String),

    /// The assembled code failed to parse.
    #[error("Code generation failed: {0}")]
    CodeGen(String),

    /// Failed to read an input file or directory.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A catalog export is not a valid list of column records.
    #[error("Invalid catalog export '{path}': {source}")]
    Catalog {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file is not valid TOML for this tool.
    #[error("Invalid configuration file '{path}': {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors returned by [`DescribedEnum`](crate::described::DescribedEnum) lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No registered value carries this description.
    #[error("No value is described as '{0}'")]
    DescriptionNotFound(String),
}
