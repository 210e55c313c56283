//! Section patcher
//!
//! Structural fixups applied to vendor defaults before user overrides are
//! merged in. Patches never mutate their input: [`apply_patches`] returns a
//! new tree.

mod policy;

pub use policy::{deployment_patches, PROTOCOL_NATIVE_MODULE, PROTOCOL_NATIVE_PRIORITY};

use pwconf_tree::{ConfigTree, ConfigValue, Entry, KeyPath, Scalar};

/// What a priority patch does with the content of its node.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchContent {
    /// Keep whatever the node holds; only its priority changes
    KeepExisting,
    /// Replace the node's content
    Replace(ConfigValue),
}

/// A single structural edit.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Pin the node at `path` to `priority`, creating it when missing
    ForcePriority {
        path: KeyPath,
        priority: i64,
        content: PatchContent,
    },
    /// Delete the node at `path`; a missing node is left alone
    RemoveSection { path: KeyPath },
    /// Add or overwrite the node at `path`
    InjectSection { path: KeyPath, value: ConfigValue },
}

impl PatchOp {
    pub fn force_priority(path: KeyPath, priority: i64, content: PatchContent) -> Self {
        Self::ForcePriority {
            path,
            priority,
            content,
        }
    }

    pub fn remove_section(path: KeyPath) -> Self {
        Self::RemoveSection { path }
    }

    pub fn inject_section(path: KeyPath, value: impl Into<ConfigValue>) -> Self {
        Self::InjectSection {
            path,
            value: value.into(),
        }
    }

    pub fn path(&self) -> &KeyPath {
        match self {
            Self::ForcePriority { path, .. }
            | Self::RemoveSection { path }
            | Self::InjectSection { path, .. } => path,
        }
    }
}

/// Error types for patch application
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("patch path is empty")]
    EmptyPath,

    #[error("cannot patch {path}: {at} is a {found}, not a section")]
    NotATree {
        path: KeyPath,
        at: KeyPath,
        found: &'static str,
    },
}

/// Apply `ops` in order to a copy of `defaults`.
pub fn apply_patches(defaults: &ConfigTree, ops: &[PatchOp]) -> Result<ConfigTree, PatchError> {
    let mut tree = defaults.clone();
    for op in ops {
        apply(&mut tree, op)?;
    }
    Ok(tree)
}

fn apply(tree: &mut ConfigTree, op: &PatchOp) -> Result<(), PatchError> {
    let path = op.path();
    let (last, _) = path.segments().split_last().ok_or(PatchError::EmptyPath)?;

    match op {
        PatchOp::ForcePriority {
            priority, content, ..
        } => {
            let Some(parent) = parent_section(tree, path, 0, true)? else {
                return Ok(());
            };
            // A pinned node always has content; a null one becomes an empty section.
            let content = match (content, parent.get(last).map(ConfigValue::content)) {
                (PatchContent::Replace(value), _) => value.clone(),
                (PatchContent::KeepExisting, Some(ConfigValue::Scalar(Scalar::Null)) | None) => {
                    ConfigTree::new().into()
                }
                (PatchContent::KeepExisting, Some(existing)) => existing.clone(),
            };
            parent.insert(last.clone(), Entry::new(*priority, content));
        }
        PatchOp::RemoveSection { .. } => {
            if let Some(parent) = parent_section(tree, path, 0, false)? {
                parent.remove(last);
            }
        }
        PatchOp::InjectSection { value, .. } => {
            let Some(parent) = parent_section(tree, path, 0, true)? else {
                return Ok(());
            };
            parent.insert(last.clone(), value.clone());
        }
    }
    Ok(())
}

/// Walk to the section holding the last segment of `path`.
///
/// Missing sections are created when `create` is set, otherwise the walk
/// yields `None`. A non-section on the way is an error.
fn parent_section<'a>(
    tree: &'a mut ConfigTree,
    path: &KeyPath,
    depth: usize,
    create: bool,
) -> Result<Option<&'a mut ConfigTree>, PatchError> {
    let segments = path.segments();
    if depth + 1 >= segments.len() {
        return Ok(Some(tree));
    }

    let key = &segments[depth];
    if !tree.contains_key(key) {
        if !create {
            return Ok(None);
        }
        tree.insert(key.clone(), ConfigTree::new());
    }

    let Some(child) = tree.get_mut(key) else {
        return Ok(None);
    };
    let found = child.kind();
    match child.as_tree_mut() {
        Some(section) => parent_section(section, path, depth + 1, create),
        None => Err(PatchError::NotATree {
            path: path.clone(),
            at: path.prefix(depth + 1),
            found,
        }),
    }
}
