//! Generator configuration
//!
//! Two inputs feed a generation run:
//! 1. Vendor defaults, one JSON document per [`NamedDocument`](crate::NamedDocument)
//! 2. The options file (TOML): feature toggles, the session manager, host
//!    platform facts, and a user override tree per document

mod defaults;
mod options;
mod source;

pub use defaults::{DefaultsError, VendorDefaults};
pub use options::{
    AlsaOptions, AudioOptions, GeneratorOptions, OptionsError, Platform, SessionManager, Toggle,
    DEFAULT_SESSION_MANAGER,
};
pub use source::{sha256_hex, ConfigOrigin, ConfigSource};
