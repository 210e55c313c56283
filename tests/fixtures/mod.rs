//! Test fixtures for generation scenarios
//!
//! - `defaults/`: minimal vendor defaults, one per document
//! - `options/`: options files exercising overrides, conflicts and failures

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Directory holding the fixture vendor defaults
pub fn defaults_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/defaults")
}

/// Path to a fixture options file
pub fn options_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/options")
        .join(name)
}
