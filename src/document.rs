//! The five configuration documents the daemon reads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the independently generated configuration files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum NamedDocument {
    Client,
    ClientRt,
    Jack,
    Pipewire,
    PipewirePulse,
}

impl NamedDocument {
    /// All documents, in generation order.
    pub const ALL: [NamedDocument; 5] = [
        NamedDocument::Client,
        NamedDocument::ClientRt,
        NamedDocument::Jack,
        NamedDocument::Pipewire,
        NamedDocument::PipewirePulse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::ClientRt => "client-rt",
            Self::Jack => "jack",
            Self::Pipewire => "pipewire",
            Self::PipewirePulse => "pipewire-pulse",
        }
    }

    /// Position in [`NamedDocument::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// File name of the rendered document.
    pub fn file_name(self) -> String {
        format!("{}.conf", self.name())
    }

    /// File name of the vendor-default document in a defaults directory.
    pub fn defaults_file_name(self) -> String {
        format!("{}.conf.json", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|doc| doc.name() == name)
    }
}

impl fmt::Display for NamedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NamedDocument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown document: {}", s))
    }
}
