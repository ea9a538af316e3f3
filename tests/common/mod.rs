//! Common test utilities for validation tests.
//!
//! Fixtures live under `tests/fixtures/validation`, one JSON resource per
//! named scenario.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("validation")
}

/// Load one fixture by scenario name (without the `.json` extension).
pub fn load_fixture(name: &str) -> Value {
    let path = fixtures_dir().join(format!("{name}.json"));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("fixture {name} is not valid JSON: {e}"))
}
