//! pwconf - PipeWire configuration generator
//!
//! Renders the five PipeWire daemon documents (client, client-rt, jack,
//! pipewire, pipewire-pulse) from vendor defaults, deployment fixups and
//! user overrides, plus the ALSA plugin registration snippet.

pub mod alsa;
pub mod config;
pub mod document;
pub mod patch;
pub mod pipeline;
pub mod summary;

pub use config::{ConfigSource, GeneratorOptions, SessionManager, VendorDefaults};
pub use document::NamedDocument;
pub use patch::{apply_patches, deployment_patches, PatchContent, PatchError, PatchOp};
pub use pipeline::{generate, render_document, Generation, PipelineError, PipelineResult, RenderedFile};
pub use summary::GenerationSummary;
