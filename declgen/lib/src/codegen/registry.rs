//! Registry generation.
//!
//! The registry is the one place callers start from: `SQL::dbo_Posts()` hands
//! out a fresh, unaliased instance of the `Posts` table struct.

use proc_macro2::TokenStream;
use quote::quote;

use super::ident::{ident, type_tokens, value_tokens};
use crate::descriptor::ClassDescriptor;
use crate::errors::GeneratorError;

/// Generates the registry struct.
///
/// ## Examples
///
/// For a registry `SQL` listing the table `dbo.Posts`:
/// ```ignore
/// // Generated code:
/// /// Entry points for every table in the catalog.
/// pub struct SQL;
///
/// impl SQL {
///     pub fn dbo_Posts() -> dbo_Posts {
///         dbo_Posts::new()
///     }
/// }
/// ```
pub fn generate_registry(class: &ClassDescriptor) -> Result<TokenStream, GeneratorError> {
    let struct_name = ident(&class.name)?;

    let entries = class
        .members
        .iter()
        .map(|member| {
            let name = ident(&member.name)?;
            let ty = type_tokens(&member.type_name)?;
            let value = value_tokens(&member.value)?;
            Ok(quote! {
                pub fn #name() -> #ty {
                    #value
                }
            })
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    Ok(quote! {
        /// Entry points for every table in the catalog.
        pub struct #struct_name;

        impl #struct_name {
            #(#entries)*
        }
    })
}
