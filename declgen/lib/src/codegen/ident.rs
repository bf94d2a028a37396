//! Token construction from descriptor strings.
//!
//! `format_ident!` panics on keywords and malformed names, so generators go
//! through these helpers instead and get a `GeneratorError` back.

use proc_macro2::{Ident, TokenStream};
use quote::ToTokens;

use crate::errors::GeneratorError;

/// Parses `name` as an identifier, falling back to a raw identifier for keywords.
///
/// ## Examples
///
/// ```
/// use declgen::codegen::ident::ident;
///
/// assert_eq!(ident("Posts").unwrap().to_string(), "Posts");
/// assert_eq!(ident("type").unwrap().to_string(), "r#type");
/// assert!(ident("self").is_err());
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidIdentifier` for names that are not
/// identifiers at all, or keywords that cannot be raw (`self`, `crate`, ...).
pub fn ident(name: &str) -> Result<Ident, GeneratorError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|_| GeneratorError::InvalidIdentifier(name.to_string()))
}

/// Parses a type name such as `i32`, `chrono::NaiveDate` or `Vec<u8>`.
///
/// Bare keyword names (a table called `type`) are emitted as raw identifiers.
pub fn type_tokens(type_name: &str) -> Result<TokenStream, GeneratorError> {
    match syn::parse_str::<syn::Type>(type_name) {
        Ok(ty) => Ok(ty.into_token_stream()),
        Err(_) => ident(type_name)
            .map(ToTokens::into_token_stream)
            .map_err(|_| GeneratorError::CodeGen(format!("'{type_name}' is not a valid type"))),
    }
}

/// Lexes a pre-formatted member value without touching its contents.
pub fn value_tokens(value: &str) -> Result<TokenStream, GeneratorError> {
    value
        .parse::<TokenStream>()
        .map_err(|e| GeneratorError::CodeGen(format!("Invalid member value {value}: {e}")))
}

/// Parses the path of the runtime crate, e.g. `sql_query_runtime` or `crate::query`.
pub fn runtime_path(runtime: &str) -> Result<syn::Path, GeneratorError> {
    syn::parse_str::<syn::Path>(runtime)
        .map_err(|_| GeneratorError::Config(format!("Invalid runtime path '{runtime}'")))
}
