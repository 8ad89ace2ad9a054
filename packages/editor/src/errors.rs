//! Error types for the editor

use thiserror::Error;

use crate::node::NodeKey;

#[derive(Error, Debug)]
pub enum EditorError {
    /// The input string is not JSON or lacks the `root` shape
    #[error("Malformed document: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// A child key points at a node missing from the arena
    #[error("Dangling node reference: {0}")]
    DanglingNode(NodeKey),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
