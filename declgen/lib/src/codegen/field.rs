//! Typed column wrappers.
//!
//! Each column gets its own newtype over `Field<T>`, so a query that
//! compares an `i32` column with a `String` one fails to compile in the
//! consumer's crate.

use proc_macro2::TokenStream;
use quote::quote;

use super::ident::{ident, type_tokens};
use crate::descriptor::ClassDescriptor;
use crate::errors::GeneratorError;

/// Generates the wrapper for one column.
///
/// ## Examples
///
/// ```ignore
/// // Generated code for `dbo_Posts_Id` with value type `i32`:
/// #[derive(Debug, Clone)]
/// pub struct dbo_Posts_Id(pub runtime::Field<i32>);
///
/// impl dbo_Posts_Id {
///     pub fn new(table: &runtime::Table, column: &'static str) -> Self {
///         Self(runtime::Field::new(table, column))
///     }
/// }
///
/// impl ::core::ops::Deref for dbo_Posts_Id {
///     type Target = runtime::Field<i32>;
///     fn deref(&self) -> &Self::Target { &self.0 }
/// }
/// ```
pub fn generate_field(
    class: &ClassDescriptor,
    value_type: &str,
    runtime: &syn::Path,
) -> Result<TokenStream, GeneratorError> {
    let struct_name = ident(&class.name)?;
    let value_type = type_tokens(value_type)?;

    Ok(quote! {
        #[derive(Debug, Clone)]
        pub struct #struct_name(pub #runtime::Field<#value_type>);

        impl #struct_name {
            pub fn new(table: &#runtime::Table, column: &'static str) -> Self {
                Self(#runtime::Field::new(table, column))
            }
        }

        impl ::core::ops::Deref for #struct_name {
            type Target = #runtime::Field<#value_type>;

            fn deref(&self) -> &Self::Target {
                &self.0
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

    fn generate(value_type: &str) -> String {
        let class = ClassDescriptor::new(
            "dbo_Posts_Id",
            ClassKind::Field {
                value_type: value_type.to_string(),
            },
        );
        let runtime = runtime_path("sql_query_runtime").unwrap();
        format_items(generate_field(&class, value_type, &runtime).unwrap())
    }

    #[test]
    fn wrapper_is_parametrized_by_the_value_type() {
        let code = generate("i32");

        assert!(code.contains("pub struct dbo_Posts_Id(pub sql_query_runtime::Field<i32>);"));
        assert!(code.contains("type Target = sql_query_runtime::Field<i32>;"));
    }

    #[test]
    fn qualified_value_types_are_kept() {
        let code = generate("chrono::NaiveDateTime");
        assert!(code.contains("sql_query_runtime::Field<chrono::NaiveDateTime>"));
    }

    #[test]
    fn constructor_takes_table_and_column() {
        let code = generate("String");
        assert!(code.contains(
            "pub fn new(table: &sql_query_runtime::Table, column: &'static str) -> Self"
        ));
    }

    #[test]
    fn wrapper_members_are_not_emitted() {
        let class = ClassDescriptor::new(
            "dbo_Posts_Id",
            ClassKind::Field {
                value_type: "i32".to_string(),
            },
        )
        .with_members(vec![MemberDescriptor::new("Max", "i32", "10")]);
        let runtime = runtime_path("sql_query_runtime").unwrap();

        let code = format_items(generate_field(&class, "i32", &runtime).unwrap());

        assert!(!code.contains("pub const"));
        assert!(!code.contains("Max"));
    }
}
