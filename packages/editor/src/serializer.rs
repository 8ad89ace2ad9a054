//! Live tree → canonical serialized document.
//!
//! The inverse of the [builder](crate::builder): exporting a freshly built
//! state yields a document equal to the one it was built from, minus any
//! fields the node model does not carry.

use crate::node::{NodeData, NodeKey};
use crate::serialized::{SerializedDocument, SerializedNode};
use crate::{EditorError, EditorState};

/// Snapshot the whole tree as a serialized document
pub fn export_document(state: &EditorState) -> Result<SerializedDocument, EditorError> {
    let children = export_children(state, state.root().children())?;
    Ok(SerializedDocument::new(children))
}

/// Snapshot the whole tree as a canonical JSON string
pub fn export_json(state: &EditorState) -> Result<String, EditorError> {
    export_document(state)?.to_json()
}

/// Serialize the subtree rooted at `key`
pub fn export_node(state: &EditorState, key: NodeKey) -> Result<SerializedNode, EditorError> {
    let node = state.node(key)?;

    match &node.data {
        NodeData::Paragraph { children } => {
            Ok(SerializedNode::paragraph(export_children(state, children)?))
        }
        NodeData::Text { text } => Ok(SerializedNode::text(text.as_str())),
        NodeData::Root { .. } => Err(EditorError::InvalidStructure(format!(
            "root node found below the document root at {}",
            key
        ))),
    }
}

fn export_children(
    state: &EditorState,
    children: &[NodeKey],
) -> Result<Vec<SerializedNode>, EditorError> {
    children.iter().map(|child| export_node(state, *child)).collect()
}
