//! Summary of a single generation run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigSource, SessionManager};
use crate::pipeline::Generation;

/// Schema version for generation_summary.json
pub const SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for generation_summary.json
pub const SUMMARY_SCHEMA_ID: &str = "pwconf/generation_summary@1";

/// Generation summary (generation_summary.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When the summary was created
    pub created_at: DateTime<Utc>,

    /// Whether the options enabled generation
    pub enabled: bool,

    /// Contributing sources: vendor defaults first, then the options file
    pub sources: Vec<ConfigSource>,

    /// Files rendered, relative to the output root
    pub files: Vec<PathBuf>,

    /// Files actually written (absent for in-memory runs)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub written: Vec<PathBuf>,

    /// The 32-bit ALSA plugins are registered
    pub alsa_32bit: bool,

    /// Audio support is enabled
    pub audio_enabled: bool,

    /// Session manager spliced into the main document
    pub session_manager: SessionManager,
}

impl GenerationSummary {
    /// Summarize a generation and the sources it was built from
    pub fn new(generation: &Generation, sources: Vec<ConfigSource>, written: Vec<PathBuf>) -> Self {
        Self {
            schema_version: SUMMARY_SCHEMA_VERSION,
            schema_id: SUMMARY_SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            enabled: generation.enabled,
            sources,
            files: generation
                .files
                .iter()
                .map(|file| file.relative_path.clone())
                .collect(),
            written,
            alsa_32bit: generation.alsa_32bit,
            audio_enabled: generation.audio_enabled,
            session_manager: generation.session_manager.clone(),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable one-line-per-file summary
    pub fn to_human(&self) -> String {
        if !self.enabled {
            return "Generation disabled by options; no files rendered".to_string();
        }

        let mut lines = Vec::new();
        let listed: Vec<&Path> = if self.written.is_empty() {
            self.files.iter().map(PathBuf::as_path).collect()
        } else {
            self.written.iter().map(PathBuf::as_path).collect()
        };
        for path in listed {
            lines.push(format!("  {}", path.display()));
        }

        let verb = if self.written.is_empty() { "Rendered" } else { "Wrote" };
        lines.insert(0, format!("{} {} file(s):", verb, lines.len()));
        lines.push(format!(
            "Session manager: {} {}",
            self.session_manager.executable,
            self.session_manager.arguments.join(" ")
        ));
        lines.push(format!("32-bit ALSA plugins: {}", if self.alsa_32bit { "yes" } else { "no" }));
        lines.join("\n")
    }
}
