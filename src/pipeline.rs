//! Generation pipeline
//!
//! For each of the five documents:
//! - Apply the deployment patches to the vendor defaults
//! - Merge the user overrides on top
//! - Render the result as SPA-JSON
//!
//! Everything is rendered in memory first. Files are only written once every
//! document rendered, so a failure in one document never leaves a partial
//! set of files behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pwconf_tree::{merge, to_spa_json, ConfigTree, FormatError};
use thiserror::Error;
use tracing::{debug, info};

use crate::alsa::{render_alsa_modules, ALSA_MODULES_PATH};
use crate::config::{DefaultsError, GeneratorOptions, OptionsError, SessionManager, VendorDefaults};
use crate::document::NamedDocument;
use crate::patch::{apply_patches, deployment_patches, PatchError};

/// Directory below the output root holding the daemon documents
pub const PIPEWIRE_DIR: &str = "pipewire";

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("options error: {0}")]
    Options(#[from] OptionsError),

    #[error("defaults error: {0}")]
    Defaults(#[from] DefaultsError),

    #[error("patching {document} failed: {source}")]
    Patch {
        document: NamedDocument,
        source: PatchError,
    },

    #[error("rendering {document} failed: {source}")]
    Format {
        document: NamedDocument,
        source: FormatError,
    },

    #[error("writing {path} failed: {source}")]
    Io { path: String, source: io::Error },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Options(_) => 1,
            PipelineError::Defaults(_) => 1,
            PipelineError::Patch { .. } => 2,
            PipelineError::Format { .. } => 2,
            PipelineError::Io { .. } => 3,
            PipelineError::Serialization(_) => 1,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A rendered file, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub contents: String,
    /// The daemon document this file holds (None for the ALSA snippet)
    pub document: Option<NamedDocument>,
}

/// Outcome of a generation run, before anything touches the filesystem
#[derive(Debug, Clone)]
pub struct Generation {
    /// False when the options disable generation; no files are produced
    pub enabled: bool,
    pub files: Vec<RenderedFile>,
    /// 32-bit ALSA plugins requested and available
    pub alsa_32bit: bool,
    pub audio_enabled: bool,
    pub session_manager: SessionManager,
}

/// Render one document: patch the defaults, merge the overrides, serialize.
pub fn render_document(
    document: NamedDocument,
    defaults: &ConfigTree,
    overrides: &ConfigTree,
    session_manager: &SessionManager,
) -> PipelineResult<String> {
    let ops = deployment_patches(document, session_manager);
    let patched =
        apply_patches(defaults, &ops).map_err(|source| PipelineError::Patch { document, source })?;
    debug!(%document, patches = ops.len(), "applied deployment patches");

    let merged = merge(patched, overrides.clone());
    debug!(%document, overrides = overrides.len(), "merged user overrides");

    to_spa_json(&merged).map_err(|source| PipelineError::Format { document, source })
}

/// Render every file the options ask for.
pub fn generate(options: &GeneratorOptions, defaults: &VendorDefaults) -> PipelineResult<Generation> {
    options.validate()?;

    let mut generation = Generation {
        enabled: options.enable,
        files: Vec::new(),
        alsa_32bit: options.alsa_32bit_enabled(),
        audio_enabled: options.audio_enabled(),
        session_manager: options.session_manager.clone(),
    };

    if !options.enable {
        info!("generation disabled by options; nothing to render");
        return Ok(generation);
    }

    let overrides = options.overrides()?;
    let no_overrides = ConfigTree::new();

    for document in NamedDocument::ALL {
        let user = overrides.get(&document).unwrap_or(&no_overrides);
        let contents = render_document(
            document,
            defaults.document(document),
            user,
            &options.session_manager,
        )?;
        debug!(%document, bytes = contents.len(), "rendered document");

        generation.files.push(RenderedFile {
            relative_path: Path::new(PIPEWIRE_DIR).join(document.file_name()),
            contents,
            document: Some(document),
        });
    }

    if options.alsa.enable {
        let lib32 = if generation.alsa_32bit {
            options.platform.lib32_pipewire.as_deref()
        } else {
            None
        };
        generation.files.push(RenderedFile {
            relative_path: PathBuf::from(ALSA_MODULES_PATH),
            contents: render_alsa_modules(&options.platform.pipewire_lib, lib32),
            document: None,
        });
    }

    Ok(generation)
}

impl Generation {
    /// The rendered text of one document
    pub fn document(&self, document: NamedDocument) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.document == Some(document))
            .map(|file| file.contents.as_str())
    }

    /// Write every file below `root`, returning the written paths.
    ///
    /// Each file is written to a temporary sibling first and renamed into
    /// place.
    pub fn write_to(&self, root: &Path) -> PipelineResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());

        for file in &self.files {
            let path = root.join(&file.relative_path);
            write_atomic(&path, &file.contents)?;
            info!(path = %path.display(), "wrote configuration file");
            written.push(path);
        }

        Ok(written)
    }
}

fn write_atomic(path: &Path, contents: &str) -> PipelineResult<()> {
    let io_error = |source: io::Error| PipelineError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    // Write to temp file first
    let temp = temp_path(path);
    let written = fs::write(&temp, contents).and_then(|()| fs::rename(&temp, path));

    if let Err(source) = written {
        // Cleanup failures are ignored; the write error is reported
        let _ = fs::remove_file(&temp);
        return Err(io_error(source));
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    path.with_file_name(temp_name)
}
