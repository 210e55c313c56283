//! Provenance of the inputs consulted by a generation run.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::document::NamedDocument;

/// Origin of a configuration source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    /// Vendor defaults compiled into the binary
    Builtin,
    /// Vendor defaults read from a directory
    Defaults,
    /// The options file
    Options,
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// Document this source provides (None for the options file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<NamedDocument>,

    /// File path (None for builtin)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw bytes
    pub digest: String,
}

/// Hex-encoded SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
