//! Table struct generation.
//!
//! A table struct owns a runtime `Table` handle (schema, name, alias) and one
//! public, typed column field per catalog column. Re-binding under another
//! alias builds a new instance so every column follows the alias.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::ident::{ident, type_tokens, value_tokens};
use crate::descriptor::{ClassDescriptor, TABLE_HANDLE_FIELD};
use crate::errors::GeneratorError;

/// Generates the struct for one table.
///
/// ## Examples
///
/// For `dbo.Posts` with columns `Id` and `Title`:
/// ```ignore
/// // Generated code:
/// /// Table `dbo.Posts`.
/// #[derive(Debug, Clone)]
/// pub struct dbo_Posts {
///     __table: runtime::Table,
///     pub Id: dbo_Posts_Id,
///     pub Title: dbo_Posts_Title,
/// }
///
/// impl dbo_Posts {
///     pub const SCHEMA: &'static str = "dbo";
///     pub const NAME: &'static str = "Posts";
///
///     pub fn new() -> Self { Self::with_alias(None) }
///     pub fn with_alias(alias: Option<String>) -> Self { ... }
///     pub fn alias(&self, alias: impl Into<String>) -> Self { ... }
///     pub fn table(&self) -> &runtime::Table { &self.__table }
/// }
/// ```
pub fn generate_table(
    class: &ClassDescriptor,
    schema: &str,
    name: &str,
    runtime: &syn::Path,
) -> Result<TokenStream, GeneratorError> {
    let struct_name = ident(&class.name)?;
    let handle = format_ident!("{}", TABLE_HANDLE_FIELD);
    let description = format!(" Table `{schema}.{name}`.");

    let mut fields = Vec::with_capacity(class.members.len());
    let mut initializers = Vec::with_capacity(class.members.len());

    for member in &class.members {
        let field = ident(&member.name)?;
        let ty = type_tokens(&member.type_name)?;
        let column = value_tokens(&member.value)?;

        fields.push(quote! { pub #field: #ty, });
        initializers.push(quote! { #field: #ty::new(&table, #column), });
    }

    Ok(quote! {
        #[doc = #description]
        #[derive(Debug, Clone)]
        pub struct #struct_name {
            #handle: #runtime::Table,
            #(#fields)*
        }

        impl #struct_name {
            pub const SCHEMA: &'static str = #schema;
            pub const NAME: &'static str = #name;

            /// Creates an unaliased instance.
            pub fn new() -> Self {
                Self::with_alias(None)
            }

            pub fn with_alias(alias: Option<String>) -> Self {
                let table = #runtime::Table::new(Self::SCHEMA, Self::NAME, alias);
                Self {
                    #(#initializers)*
                    #handle: table,
                }
            }

            /// Re-binds this table under another alias.
            pub fn alias(&self, alias: impl Into<String>) -> Self {
                Self::with_alias(Some(alias.into()))
            }

            pub fn table(&self) -> &#runtime::Table {
                &self.#handle
            }
        }

        impl Default for #struct_name {
            fn default() -> Self {
                Self::new()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::format_items;
    use crate::codegen::ident::runtime_path;
    use crate::descriptor::{ClassKind, MemberDescriptor};

    fn posts() -> ClassDescriptor {
        ClassDescriptor::new(
            "dbo_Posts",
            ClassKind::Table {
                schema: "dbo".to_string(),
                name: "Posts".to_string(),
            },
        )
        .with_members(vec![
            MemberDescriptor::new("Id", "dbo_Posts_Id", "\"Id\""),
            MemberDescriptor::new("Title", "dbo_Posts_Title", "\"Title\""),
        ])
    }

    fn generate(class: &ClassDescriptor) -> String {
        let runtime = runtime_path("sql_query_runtime").unwrap();
        format_items(generate_table(class, "dbo", "Posts", &runtime).unwrap())
    }

    #[test]
    fn struct_has_handle_and_column_fields() {
        let code = generate(&posts());

        assert!(code.contains("pub struct dbo_Posts"));
        assert!(code.contains("__table: sql_query_runtime::Table"));
        assert!(code.contains("pub Id: dbo_Posts_Id"));
        assert!(code.contains("pub Title: dbo_Posts_Title"));
    }

    #[test]
    fn schema_and_name_are_constants() {
        let code = generate(&posts());

        assert!(code.contains("pub const SCHEMA: &'static str = \"dbo\";"));
        assert!(code.contains("pub const NAME: &'static str = \"Posts\";"));
    }

    #[test]
    fn columns_are_initialized_with_their_catalog_name() {
        let code = generate(&posts());

        assert!(code.contains("Id: dbo_Posts_Id::new(&table, \"Id\")"));
        assert!(code.contains("Title: dbo_Posts_Title::new(&table, \"Title\")"));
    }

    #[test]
    fn alias_rebinds_through_with_alias() {
        let code = generate(&posts());

        assert!(code.contains("pub fn alias(&self, alias: impl Into<String>) -> Self"));
        assert!(code.contains("Self::with_alias(Some(alias.into()))"));
        assert!(code.contains("impl Default for dbo_Posts"));
    }

    #[test]
    fn doc_names_the_source_table() {
        assert!(generate(&posts()).contains("Table `dbo.Posts`."));
    }

    #[test]
    fn unusable_column_name_is_an_error() {
        let class = posts().with_members(vec![MemberDescriptor::new(
            "self",
            "dbo_Posts_self",
            "\"self\"",
        )]);
        let runtime = runtime_path("sql_query_runtime").unwrap();

        assert!(matches!(
            generate_table(&class, "dbo", "Posts", &runtime),
            Err(GeneratorError::InvalidIdentifier(_))
        ));
    }
}
