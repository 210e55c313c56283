//! PipeWire configuration trees.
//!
//! Ordered key/value trees with per-entry render priorities, the deep merge
//! used to layer user overrides on vendor defaults, and the renderer for the
//! daemon's SPA-JSON block syntax.

pub mod convert;
pub mod error;
pub mod merge;
pub mod path;
pub mod serialize;
pub mod value;

pub use convert::{tree_from_json, tree_from_toml};
pub use error::{ConvertError, FormatError};
pub use merge::{merge, merge_layers};
pub use path::KeyPath;
pub use serialize::to_spa_json;
pub use value::{ConfigTree, ConfigValue, Entry, Scalar, DEFAULT_PRIORITY};

/// Reserved key marking an object as a prioritized entry in input documents.
pub const PRIORITY_KEY: &str = "_priority";

/// Reserved key holding an entry's content in input documents.
pub const CONTENT_KEY: &str = "_content";
