//! Generation summary (generation_summary.json)
//!
//! Records what a generation run consulted and what it produced, for the
//! surrounding system that installs the files and starts the daemon.

mod generation_summary;

pub use generation_summary::{GenerationSummary, SUMMARY_SCHEMA_ID, SUMMARY_SCHEMA_VERSION};
