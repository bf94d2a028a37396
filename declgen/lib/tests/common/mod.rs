//! Helpers shared by the golden-file tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use declgen::output::Provenance;

/// A fixed provenance so rendered headers are reproducible.
pub fn fixed_provenance() -> Provenance {
    let at = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|date| date.and_hms_opt(3, 4, 5))
        .expect("valid timestamp");
    Provenance::new("declgen", "0.1.0", at)
}

pub fn golden(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Splits rendered text into the header (through the provenance block) and the code.
pub fn split_header(text: &str) -> (&str, &str) {
    let end = text.find("*/\n").expect("provenance block") + "*/\n".len();
    text.split_at(end)
}

/// Re-formats code so comparisons ignore whitespace and comments.
pub fn normalize(code: &str) -> String {
    let file = syn::parse_file(code).expect("code should parse");
    prettyplease::unparse(&file)
}

/// Header must match byte for byte; code must match structurally.
pub fn assert_matches_golden(actual: &str, golden_name: &str) {
    let expected = golden(golden_name);
    let (expected_header, expected_code) = split_header(&expected);
    let (actual_header, actual_code) = split_header(actual);

    assert_eq!(actual_header, expected_header, "header differs from {golden_name}");
    assert_eq!(
        normalize(actual_code),
        normalize(expected_code),
        "code differs from {golden_name}"
    );
}
