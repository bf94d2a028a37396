//! Code generation for individual declarations.
//!
//! Each submodule turns one [`ClassKind`] into Rust items. Nothing here
//! decides a name or a type: identifiers, type names and member values all
//! come from the descriptors.
//!
//! ## Submodules
//!
//! - [`ident`] - Turns descriptor strings into identifier, type and value tokens
//! - [`registry`] - Generates the registry struct with one entry point per table
//! - [`table`] - Generates table structs with their column fields and `alias()`
//! - [`field`] - Generates typed column wrappers
//! - [`directory`] - Generates path constant holders for static resources
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Wrapped in the namespace modules
//! - Validated with `syn::parse2`
//! - Formatted with `prettyplease`
//!
//! See [`crate::output`] for the assembly logic.

pub mod directory;
pub mod field;
pub mod ident;
pub mod registry;
pub mod table;

use proc_macro2::TokenStream;

use crate::descriptor::{ClassDescriptor, ClassKind};
use crate::errors::GeneratorError;

pub use directory::generate_directory;
pub use field::generate_field;
pub use registry::generate_registry;
pub use table::generate_table;

/// Generates the items for one class, dispatching on its kind.
///
/// `runtime` is the path of the crate providing `Table` and `Field<T>`.
pub fn generate_class(
    class: &ClassDescriptor,
    runtime: &syn::Path,
) -> Result<TokenStream, GeneratorError> {
    match &class.kind {
        ClassKind::Registry => generate_registry(class),
        ClassKind::Table { schema, name } => generate_table(class, schema, name, runtime),
        ClassKind::Field { value_type } => generate_field(class, value_type, runtime),
        ClassKind::Directory { path } => generate_directory(class, path),
    }
}

/// Parses generated items as a file and pretty-prints them.
#[cfg(test)]
pub(crate) fn format_items(tokens: TokenStream) -> String {
    let file = syn::parse2::<syn::File>(tokens).expect("generated items should parse");
    prettyplease::unparse(&file)
}
