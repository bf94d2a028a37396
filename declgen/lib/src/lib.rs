//! Declaration generator library.
//!
//! This crate turns metadata into typed Rust declarations that client code
//! compiles against. Two sources are supported:
//!
//! - **Table catalogs**: ordered `(schema, table, column, type)` records become
//!   one struct per table, one typed wrapper per column and a registry struct
//!   with an entry point per table
//! - **Directory trees**: static resource folders become one struct per
//!   directory with a path constant per file
//!
//! Builders make every naming and typing decision and produce descriptors;
//! the renderer only turns descriptors into formatted code.
//!
//! ## Modules
//!
//! - [`sanitize`] - Identifier sanitizing and literal quoting
//! - [`descriptor`] - Descriptor model shared by builders and renderer
//! - [`relational`] - Table catalog → descriptors
//! - [`resource`] / [`tree`] - Directory tree → descriptors
//! - [`validation`] - Naming collision checks
//! - [`codegen`] - Descriptor → tokens for each declaration kind
//! - [`output`] - Namespace assembly, formatting, header and file writing
//! - [`source`] - Metadata providers and source selection
//! - [`config`] - TOML configuration
//! - [`pipeline`] - End-to-end generation
//! - [`described`] - Enum value ↔ description lookup
//! - [`errors`] - Error types
//!
//! ## Example Usage
//!
//! ```
//! use declgen::descriptor::PropertyMetadata;
//! use declgen::output::{Provenance, RenderOptions, render};
//! use declgen::relational::{RelationalOptions, build_relational_model};
//!
//! let records = vec![
//!     PropertyMetadata::new("dbo", "Posts", "Id", "int"),
//!     PropertyMetadata::new("dbo", "Posts", "Title", "nvarchar"),
//! ];
//!
//! let model = build_relational_model(records, &RelationalOptions::default()).unwrap();
//! let code = render(
//!     "generated::sql_query",
//!     &model.classes,
//!     &RenderOptions::new(Provenance::now()),
//! )
//! .unwrap();
//!
//! assert!(code.contains("pub struct dbo_Posts {"));
//! assert!(code.contains("pub fn dbo_Posts() -> dbo_Posts"));
//! ```
//!
//! ## Generated Code Structure
//!
//! ```text
//! pub mod generated {
//!     pub mod sql_query {
//!         pub struct SQL;
//!         impl SQL { pub fn dbo_Posts() -> dbo_Posts { dbo_Posts::new() } }
//!
//!         pub struct dbo_Posts { __table: Table, pub Id: dbo_Posts_Id, ... }
//!         pub struct dbo_Posts_Id(pub Field<i32>);
//!     }
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod described;
pub mod descriptor;
pub mod errors;
pub mod output;
pub mod pipeline;
pub mod relational;
pub mod resource;
pub mod sanitize;
pub mod source;
pub mod tree;
pub mod validation;

pub use errors::{GeneratorError, LookupError};
