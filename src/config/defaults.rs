//! Vendor defaults
//!
//! One JSON document per [`NamedDocument`], either the copies compiled into
//! the binary or `<name>.conf.json` files from a directory.

use pwconf_tree::{tree_from_json, ConfigTree, ConvertError};
use std::fs;
use std::io;
use std::path::Path;

use super::source::{sha256_hex, ConfigOrigin, ConfigSource};
use crate::document::NamedDocument;

const BUILTIN: [(NamedDocument, &str); 5] = [
    (NamedDocument::Client, include_str!("../../share/pipewire/client.conf.json")),
    (NamedDocument::ClientRt, include_str!("../../share/pipewire/client-rt.conf.json")),
    (NamedDocument::Jack, include_str!("../../share/pipewire/jack.conf.json")),
    (NamedDocument::Pipewire, include_str!("../../share/pipewire/pipewire.conf.json")),
    (NamedDocument::PipewirePulse, include_str!("../../share/pipewire/pipewire-pulse.conf.json")),
];

/// Error types for loading vendor defaults
#[derive(Debug, thiserror::Error)]
pub enum DefaultsError {
    #[error("Failed to read defaults for {document} from {path}: {source}")]
    IoError {
        document: NamedDocument,
        path: String,
        source: io::Error,
    },

    #[error("Failed to parse defaults for {document}: {source}")]
    ParseError {
        document: NamedDocument,
        source: serde_json::Error,
    },

    #[error("Invalid defaults for {document}: {source}")]
    InvalidDocument {
        document: NamedDocument,
        source: ConvertError,
    },
}

/// The five vendor-default trees with their provenance.
#[derive(Debug, Clone)]
pub struct VendorDefaults {
    /// Indexed by [`NamedDocument::index`]
    documents: Vec<ConfigTree>,
    sources: Vec<ConfigSource>,
}

impl VendorDefaults {
    /// Defaults compiled into the binary
    pub fn builtin() -> Result<Self, DefaultsError> {
        let mut documents = Vec::with_capacity(BUILTIN.len());
        let mut sources = Vec::with_capacity(BUILTIN.len());

        for (document, text) in BUILTIN {
            documents.push(parse_document(document, text.as_bytes())?);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Builtin,
                document: Some(document),
                path: None,
                digest: sha256_hex(text.as_bytes()),
            });
        }

        Ok(Self { documents, sources })
    }

    /// Defaults read from `<dir>/<name>.conf.json`; all five must exist
    pub fn from_dir(dir: &Path) -> Result<Self, DefaultsError> {
        let mut documents = Vec::with_capacity(NamedDocument::ALL.len());
        let mut sources = Vec::with_capacity(NamedDocument::ALL.len());

        for document in NamedDocument::ALL {
            let path = dir.join(document.defaults_file_name());
            let bytes = fs::read(&path).map_err(|source| DefaultsError::IoError {
                document,
                path: path.display().to_string(),
                source,
            })?;

            documents.push(parse_document(document, &bytes)?);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Defaults,
                document: Some(document),
                path: Some(path.display().to_string()),
                digest: sha256_hex(&bytes),
            });
        }

        Ok(Self { documents, sources })
    }

    /// The default tree of one document
    pub fn document(&self, document: NamedDocument) -> &ConfigTree {
        &self.documents[document.index()]
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }
}

fn parse_document(document: NamedDocument, bytes: &[u8]) -> Result<ConfigTree, DefaultsError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|source| DefaultsError::ParseError { document, source })?;
    tree_from_json(&value).map_err(|source| DefaultsError::InvalidDocument { document, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwconf_tree::KeyPath;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_defaults() {
        let defaults = VendorDefaults::builtin().unwrap();
        assert_eq!(defaults.sources().len(), 5);

        for document in NamedDocument::ALL {
            let tree = defaults.document(document);
            let native = KeyPath::new(["context.modules", "libpipewire-module-protocol-native"]);
            assert!(tree.get_path(&native).is_some(), "{} lacks protocol-native", document);
        }

        assert!(defaults.document(NamedDocument::Pipewire).contains_key("context.exec"));
    }

    #[test]
    fn test_builtin_keeps_declaration_order() {
        let defaults = VendorDefaults::builtin().unwrap();
        let keys: Vec<_> = defaults.document(NamedDocument::Jack).keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["context.properties", "context.spa-libs", "context.modules", "jack.properties"]
        );
    }

    #[test]
    fn test_from_dir() {
        let dir = TempDir::new().unwrap();
        for document in NamedDocument::ALL {
            let body = format!("{{\"context.properties\": {{\"doc\": \"{}\"}}}}", document);
            fs::write(dir.path().join(document.defaults_file_name()), body).unwrap();
        }

        let defaults = VendorDefaults::from_dir(dir.path()).unwrap();
        let props = defaults.document(NamedDocument::ClientRt).get("context.properties").unwrap();
        assert_eq!(props.as_tree().unwrap().get("doc").and_then(|v| v.as_str()), Some("client-rt"));
        assert!(defaults.sources().iter().all(|s| s.origin == ConfigOrigin::Defaults));
    }

    #[test]
    fn test_from_dir_missing_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("client.conf.json"), "{}").unwrap();

        let err = VendorDefaults::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DefaultsError::IoError { document: NamedDocument::ClientRt, .. }));
    }

    #[test]
    fn test_from_dir_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        for document in NamedDocument::ALL {
            fs::write(dir.path().join(document.defaults_file_name()), "[]").unwrap();
        }

        let err = VendorDefaults::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DefaultsError::InvalidDocument { document: NamedDocument::Client, .. }));
    }
}
