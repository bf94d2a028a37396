//! Identifier sanitation for schema names and path segments.
//!
//! Catalog names and file names routinely contain characters that cannot
//! appear in an identifier (`Order Details`, `jquery-1.4.min.js`). Everything
//! that ends up as a generated name passes through [`sanitize`] first.

/// Maps an arbitrary name to an identifier token.
///
/// Every character that is not an ASCII letter, digit or `_` becomes `_`.
/// A leading digit gets a `_` prefix and an empty name becomes `_`. Case is
/// preserved and the function is idempotent.
///
/// Keywords are left alone; the renderer emits them as raw identifiers.
///
/// ## Examples
///
/// ```
/// use declgen::sanitize::sanitize;
///
/// assert_eq!(sanitize("script1.js"), "script1_js");
/// assert_eq!(sanitize("Order Details"), "Order_Details");
/// assert_eq!(sanitize("2019-report"), "_2019_report");
/// ```
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }

    out
}

/// Formats `text` as a Rust string literal, quotes included.
///
/// Builders use this to pre-format member values; the renderer inserts the
/// result verbatim.
///
/// ## Examples
///
/// ```
/// use declgen::sanitize::quote_literal;
///
/// assert_eq!(quote_literal("/son1/style.css"), "\"/son1/style.css\"");
/// assert_eq!(quote_literal("say \"hi\""), r#""say \"hi\"""#);
/// ```
pub fn quote_literal(text: &str) -> String {
    format!("{text:?}")
}

/// Spells an already sanitized name so it can start a path expression.
///
/// Keywords get the raw prefix (`type` becomes `r#type`); anything else is
/// returned unchanged.
///
/// ## Examples
///
/// ```
/// use declgen::sanitize::path_segment;
///
/// assert_eq!(path_segment("Posts"), "Posts");
/// assert_eq!(path_segment("match"), "r#match");
/// ```
pub fn path_segment(name: &str) -> String {
    if syn::parse_str::<syn::Ident>(name).is_ok() {
        name.to_string()
    } else {
        format!("r#{name}")
    }
}
