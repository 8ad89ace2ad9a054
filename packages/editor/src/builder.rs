//! # Tree Builder
//!
//! Materializes a [`SerializedDocument`] into the live tree of an editor
//! state. The build always starts by clearing the root, so building twice
//! replaces the tree instead of merging into it.
//!
//! The builder works on whatever state it is handed and never commits
//! anything itself. Run it through [`Editor::initialize`](crate::Editor::initialize)
//! (or inside [`Editor::update`](crate::Editor::update)) so that a failed build
//! is discarded along with the pending state.

use tracing::{debug, instrument, warn};

use crate::node::{NodeKey, NodeKind};
use crate::serialized::{SerializedDocument, SerializedNode};
use crate::{EditorError, EditorState};

/// Replace the tree in `state` with the contents of `document`
#[instrument(skip_all, fields(children = document.root.children.len()))]
pub fn build(document: &SerializedDocument, state: &mut EditorState) -> Result<(), EditorError> {
    state.clear(NodeKey::ROOT)?;

    for child in &document.root.children {
        let key = create_node(child, state).map_err(|e| {
            warn!(error = %e, "Rejecting document");
            e
        })?;

        let kind = state.node(key)?.kind();
        if !kind.is_element() {
            let e = EditorError::InvalidStructure(format!(
                "{} nodes cannot be children of the root",
                kind
            ));
            warn!(error = %e, "Rejecting document");
            return Err(e);
        }
        state.append(NodeKey::ROOT, key).map_err(|e| {
            let e = EditorError::from(e);
            warn!(error = %e, "Rejecting document");
            e
        })?;
    }

    debug!(nodes = state.len(), "Tree built");
    Ok(())
}

/// Recursively create the live counterpart of `node`, returning its key.
///
/// The returned node is detached; the caller appends it.
pub fn create_node(node: &SerializedNode, state: &mut EditorState) -> Result<NodeKey, EditorError> {
    let kind: NodeKind = node.node_type.parse()?;

    match kind {
        NodeKind::Paragraph => {
            let paragraph = state.create_paragraph();
            for child in node.children() {
                let key = create_node(child, state)?;
                state.append(paragraph, key)?;
            }
            debug!(key = %paragraph, children = node.children().len(), "Created paragraph");
            Ok(paragraph)
        }

        NodeKind::Text => {
            let text = state.create_text(node.text.clone().unwrap_or_default());
            debug!(key = %text, "Created text");
            Ok(text)
        }

        NodeKind::Root => Err(EditorError::InvalidStructure(
            "a root node cannot be nested inside the document".to_string(),
        )),
    }
}
