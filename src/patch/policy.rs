//! Fixups applied to the vendor defaults of every deployment.

use pwconf_tree::{ConfigTree, KeyPath};

use super::{PatchContent, PatchOp};
use crate::config::SessionManager;
use crate::document::NamedDocument;

/// The native protocol module every other module depends on.
pub const PROTOCOL_NATIVE_MODULE: &str = "libpipewire-module-protocol-native";

/// Priority pinning the native protocol module ahead of all others.
pub const PROTOCOL_NATIVE_PRIORITY: i64 = -100;

const MODULES_KEY: &str = "context.modules";
const EXEC_KEY: &str = "context.exec";

/// Patches for one document.
///
/// Every document loads the native protocol first. The main daemon
/// document additionally has its `context.exec` replaced, so the configured
/// session manager is started instead of the vendor's.
pub fn deployment_patches(document: NamedDocument, session_manager: &SessionManager) -> Vec<PatchOp> {
    let mut ops = vec![PatchOp::force_priority(
        KeyPath::new([MODULES_KEY, PROTOCOL_NATIVE_MODULE]),
        PROTOCOL_NATIVE_PRIORITY,
        PatchContent::KeepExisting,
    )];

    if document == NamedDocument::Pipewire {
        ops.push(PatchOp::remove_section(KeyPath::new([EXEC_KEY])));
        ops.push(PatchOp::inject_section(KeyPath::new([EXEC_KEY]), exec_section(session_manager)));
    }

    ops
}

/// `{<executable> = {args = "<arguments>"}}`; `args` is written even when empty.
fn exec_section(session_manager: &SessionManager) -> ConfigTree {
    let invocation = ConfigTree::new().with("args", session_manager.arguments.join(" "));
    ConfigTree::new().with(session_manager.executable.clone(), invocation)
}
