//! Output assembly, formatting and file writing.
//!
//! This module handles the final phase: wrapping generated items in the
//! namespace modules, validating and formatting the result, and prepending
//! the license and provenance header.
//!
//! ## Output Structure
//!
//! ```text
//! // <license notice>
//!
//! /*
//! This file was generated by declgen version 0.1.0
//! At 2024-01-02 03:04:05
//! */
//! #[allow(...)]
//! pub mod generated {
//!     pub mod sql_query {
//!         ...
//!     }
//! }
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: the assembled tokens are parsed with `syn` before formatting
//! - **Reproducibility**: the timestamp comes from [`Provenance`], not the clock
//! - **Atomic writes**: temp file in the target directory + persist

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use proc_macro2::TokenStream;
use quote::quote;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::codegen::generate_class;
use crate::codegen::ident::{ident, runtime_path};
use crate::descriptor::ClassDescriptor;
use crate::errors::GeneratorError;

/// Name written into the provenance header.
pub const GENERATOR_NAME: &str = "declgen";

/// Default path of the crate providing `Table` and `Field<T>`.
pub const DEFAULT_RUNTIME: &str = "sql_query_runtime";

/// License notice prepended when none is configured.
pub const DEFAULT_LICENSE_NOTICE: &str = "\
Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an \"AS IS\" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.";

/// Who generated a file, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub generator: String,
    pub version: String,
    pub generated_at: NaiveDateTime,
}

impl Provenance {
    pub fn new(
        generator: impl Into<String>,
        version: impl Into<String>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            generator: generator.into(),
            version: version.into(),
            generated_at,
        }
    }

    /// This generator, stamped with the local time.
    pub fn now() -> Self {
        Self::new(
            GENERATOR_NAME,
            env!("CARGO_PKG_VERSION"),
            Local::now().naive_local(),
        )
    }

    /// The provenance block comment, trailing newline included.
    pub fn notice(&self) -> String {
        format!(
            "/*\nThis file was generated by {} version {}\nAt {}\n*/\n",
            self.generator,
            self.version,
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Everything the renderer needs besides the descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Path of the runtime crate used by table and field declarations.
    pub runtime: String,
    /// License notice; `None` (or blank) omits it.
    pub license: Option<String>,
    pub provenance: Provenance,
}

impl RenderOptions {
    /// Default runtime and license notice with the given provenance.
    pub fn new(provenance: Provenance) -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            license: Some(DEFAULT_LICENSE_NOTICE.to_string()),
            provenance,
        }
    }
}

/// Generates the items for every class, in order.
pub fn assemble_classes(
    classes: &[ClassDescriptor],
    runtime: &str,
) -> Result<TokenStream, GeneratorError> {
    let runtime = runtime_path(runtime)?;

    let mut tokens = TokenStream::new();
    for class in classes {
        tokens.extend(generate_class(class, &runtime)?);
    }

    Ok(tokens)
}

/// Wraps `items` in one module per namespace segment.
///
/// Segments may be separated by `::` or `.` (`generated::sql_query` and
/// `Generated.SQLQuery` both work). The outermost module carries the lint
/// allowances the generated names need.
///
/// ## Errors
///
/// Returns `GeneratorError::Config` for an empty namespace and
/// `GeneratorError::InvalidIdentifier` for unusable segments.
pub fn assemble_namespace(
    namespace: &str,
    items: TokenStream,
) -> Result<TokenStream, GeneratorError> {
    let segments = namespace
        .split("::")
        .flat_map(|part| part.split('.'))
        .map(str::trim)
        .collect::<Vec<_>>();

    if segments.iter().all(|segment| segment.is_empty()) {
        return Err(GeneratorError::Config(
            "The namespace must not be empty".to_string(),
        ));
    }

    let mut tokens = items;
    for segment in segments.iter().rev() {
        let module = ident(segment)?;
        tokens = quote! {
            pub mod #module {
                #tokens
            }
        };
    }

    Ok(quote! {
        #[allow(non_camel_case_types, non_snake_case, non_upper_case_globals, dead_code)]
        #tokens
    })
}

/// Validates generated code using syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGen` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGen(format!("Generated code is invalid: {e}")))
}

/// The text header: license notice (if any), then the provenance block.
pub fn header(options: &RenderOptions) -> String {
    let mut out = String::new();

    if let Some(license) = options.license.as_deref().filter(|l| !l.trim().is_empty()) {
        for line in license.lines() {
            if line.is_empty() {
                out.push_str("//\n");
            } else {
                out.push_str("// ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    out.push_str(&options.provenance.notice());
    out
}

/// Formats a parsed file with prettyplease and prepends the header.
pub fn format_code(file: &syn::File, options: &RenderOptions) -> String {
    format!("{}{}", header(options), prettyplease::unparse(file))
}

/// Renders descriptors into the source text of one file.
///
/// ## Errors
///
/// Returns an error if a name cannot be emitted, the namespace or runtime
/// path is invalid, or the assembled code does not parse.
#[instrument(skip(classes, options), fields(classes = classes.len()))]
pub fn render(
    namespace: &str,
    classes: &[ClassDescriptor],
    options: &RenderOptions,
) -> Result<String, GeneratorError> {
    let items = assemble_classes(classes, &options.runtime)?;
    let tokens = assemble_namespace(namespace, items)?;
    let file = validate_code(&tokens)?;
    let code = format_code(&file, options);

    debug!(bytes = code.len(), "Rendered declarations");
    Ok(code)
}

/// Writes content to a file atomically using a temp file + persist.
///
/// ## Errors
///
/// Returns `GeneratorError::Write` if the directory cannot be created or the
/// file cannot be written or moved into place.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let write_error = |source| GeneratorError::Write {
        path: path.display().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_error)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp.write_all(content.as_bytes()).map_err(write_error)?;
    temp.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}
