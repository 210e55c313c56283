//! Generator options (options.toml)
//!
//! Feature toggles, the session manager spliced into the main document,
//! facts about the host platform, and one user override tree per document
//! under `[config.<document>]`. Every key is optional.

use pwconf_tree::{tree_from_toml, ConfigTree, ConvertError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use super::source::{sha256_hex, ConfigOrigin, ConfigSource};
use crate::document::NamedDocument;

/// Session manager started by the daemon unless configured otherwise.
pub const DEFAULT_SESSION_MANAGER: &str = "/usr/bin/pipewire-media-session";

/// Error types for options handling
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Failed to read options file {path}: {source}")]
    IoError { path: String, source: io::Error },

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid override for {document}: {source}")]
    InvalidOverride {
        document: NamedDocument,
        source: ConvertError,
    },
}

/// A feature that is either on or off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Toggle {
    pub enable: bool,
}

/// Audio support as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioOptions {
    /// Explicit setting; when unset, audio is enabled by any of ALSA, JACK
    /// or PulseAudio support
    pub enable: Option<bool>,
}

/// ALSA client support
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlsaOptions {
    pub enable: bool,

    /// Also register the 32-bit ALSA plugins on 64-bit hosts
    pub support_32bit: bool,
}

/// Session manager launched through the main document's `context.exec`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionManager {
    /// Absolute path of the executable
    pub executable: String,

    /// Arguments, joined with single spaces when rendered
    pub arguments: Vec<String>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self {
            executable: DEFAULT_SESSION_MANAGER.to_string(),
            arguments: Vec::new(),
        }
    }
}

/// Facts about the host the configuration is generated for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Platform {
    /// Host is x86_64 (default: the build target)
    pub x86_64: bool,

    /// Library root of the native PipeWire build (default: "/usr/lib")
    pub pipewire_lib: String,

    /// Library root of the 32-bit PipeWire build, if one is installed
    pub lib32_pipewire: Option<String>,

    /// PulseAudio itself is enabled on the host
    pub pulseaudio_enabled: bool,

    /// The JACK daemon is enabled on the host
    pub jackd_enabled: bool,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            x86_64: cfg!(target_arch = "x86_64"),
            pipewire_lib: "/usr/lib".to_string(),
            lib32_pipewire: None,
            pulseaudio_enabled: false,
            jackd_enabled: false,
        }
    }
}

/// Root of the options file
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Generate configuration at all (default: true)
    pub enable: bool,

    pub audio: AudioOptions,

    pub alsa: AlsaOptions,

    /// JACK emulation
    pub jack: Toggle,

    /// PulseAudio server emulation
    pub pulse: Toggle,

    pub session_manager: SessionManager,

    pub platform: Platform,

    /// User override trees keyed by document name
    pub config: toml::Table,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            enable: true,
            audio: AudioOptions::default(),
            alsa: AlsaOptions::default(),
            jack: Toggle::default(),
            pulse: Toggle::default(),
            session_manager: SessionManager::default(),
            platform: Platform::default(),
            config: toml::Table::new(),
        }
    }
}

impl GeneratorOptions {
    /// Load options from a TOML file, returning them with their provenance
    pub fn from_file(path: &Path) -> Result<(Self, ConfigSource), OptionsError> {
        let bytes = fs::read(path).map_err(|source| OptionsError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let digest = sha256_hex(&bytes);

        let contents = String::from_utf8(bytes)
            .map_err(|e| OptionsError::ValidationError(format!("Invalid UTF-8: {}", e)))?;
        let options = Self::from_str(&contents)?;

        let source = ConfigSource {
            origin: ConfigOrigin::Options,
            document: None,
            path: Some(path.display().to_string()),
            digest,
        };
        Ok((options, source))
    }

    /// Parse options from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, OptionsError> {
        let options: GeneratorOptions = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<(), OptionsError> {
        // Rule: PulseAudio emulation replaces PulseAudio
        if self.pulse.enable && self.platform.pulseaudio_enabled {
            return Err(OptionsError::ValidationError(
                "PipeWire based PulseAudio server emulation replaces PulseAudio; \
                 'pulse.enable' requires 'platform.pulseaudio_enabled = false'"
                    .to_string(),
            ));
        }

        // Rule: JACK emulation does not use the JACK daemon
        if self.jack.enable && self.platform.jackd_enabled {
            return Err(OptionsError::ValidationError(
                "PipeWire based JACK emulation doesn't use the JACK daemon; \
                 'jack.enable' requires 'platform.jackd_enabled = false'"
                    .to_string(),
            ));
        }

        if !Path::new(&self.session_manager.executable).is_absolute() {
            return Err(OptionsError::ValidationError(format!(
                "session_manager.executable must be an absolute path, got '{}'",
                self.session_manager.executable
            )));
        }

        // Rule: overrides are tables keyed by known documents
        for (name, value) in &self.config {
            if NamedDocument::from_name(name).is_none() {
                return Err(OptionsError::ValidationError(format!(
                    "Unknown document '{}' in [config]; expected one of: {}",
                    name,
                    NamedDocument::ALL.map(NamedDocument::name).join(", ")
                )));
            }
            if !value.is_table() {
                return Err(OptionsError::ValidationError(format!(
                    "[config.{}] must be a table",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Audio support, derived from the individual protocols unless set
    pub fn audio_enabled(&self) -> bool {
        self.audio
            .enable
            .unwrap_or(self.alsa.enable || self.jack.enable || self.pulse.enable)
    }

    /// Whether the 32-bit ALSA plugins get registered
    pub fn alsa_32bit_enabled(&self) -> bool {
        self.alsa.support_32bit && self.platform.x86_64 && self.platform.lib32_pipewire.is_some()
    }

    /// User override trees, converted from the `[config.<document>]` tables.
    ///
    /// Documents without a table are absent from the map.
    pub fn overrides(&self) -> Result<BTreeMap<NamedDocument, ConfigTree>, OptionsError> {
        let mut overrides = BTreeMap::new();
        for (name, value) in &self.config {
            let document = NamedDocument::from_name(name).ok_or_else(|| {
                OptionsError::ValidationError(format!("Unknown document '{}' in [config]", name))
            })?;
            let table = value.as_table().ok_or_else(|| {
                OptionsError::ValidationError(format!("[config.{}] must be a table", name))
            })?;
            let tree = tree_from_toml(table)
                .map_err(|source| OptionsError::InvalidOverride { document, source })?;
            overrides.insert(document, tree);
        }
        Ok(overrides)
    }
}
