//! Static resource map generation.

use proc_macro2::TokenStream;
use quote::quote;

use super::ident::{ident, type_tokens, value_tokens};
use crate::descriptor::ClassDescriptor;
use crate::errors::GeneratorError;

/// Generates the holder struct for one directory.
///
/// ## Examples
///
/// ```ignore
/// // Generated code for `Root_son1`:
/// /// Resources under `/son1`.
/// pub struct Root_son1;
///
/// impl Root_son1 {
///     pub const script2_js: &'static str = "/son1/script2.js";
///     pub const style_css: &'static str = "/son1/style.css";
/// }
/// ```
pub fn generate_directory(
    class: &ClassDescriptor,
    path: &str,
) -> Result<TokenStream, GeneratorError> {
    let struct_name = ident(&class.name)?;
    let description = format!(" Resources under `{path}`.");
    let constants = constant_items(class)?;

    let body = if constants.is_empty() {
        quote!()
    } else {
        quote! {
            impl #struct_name {
                #(#constants)*
            }
        }
    };

    Ok(quote! {
        #[doc = #description]
        pub struct #struct_name;

        #body
    })
}

/// Associated constants for every member of `class`.
fn constant_items(class: &ClassDescriptor) -> Result<Vec<TokenStream>, GeneratorError> {
    class
        .members
        .iter()
        .map(|member| {
            let name = ident(&member.name)?;
            let ty = type_tokens(&member.type_name)?;
            let value = value_tokens(&member.value)?;
            Ok(quote! { pub const #name: #ty = #value; })
        })
        .collect()
}
