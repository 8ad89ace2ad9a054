//! # Tree Mutations
//!
//! User-driven edit operations on the live tree.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents one editing gesture
//! 2. **Validated**: All mutations check structural rules before touching the tree
//! 3. **Minimal**: Only what the paragraph/text model can express
//!
//! ## Mutation Semantics
//!
//! ### InsertParagraph / InsertText
//! - Creates a fresh node and attaches it at `index` (clamped to the child count)
//! - Text may only live inside a paragraph
//! - Paragraphs nest at most `MAX_NESTING_DEPTH` levels deep
//!
//! ### UpdateText
//! - Atomic replacement (not character diff)
//!
//! ### MoveNode
//! - Atomic relocation of a node to a new parent
//! - Fails if it would create a cycle
//!
//! ### RemoveNode / ClearRoot
//! - Removes nodes and all descendants; the root itself stays

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{NodeKey, NodeKind};
use crate::state::MAX_NESTING_DEPTH;
use crate::EditorState;

/// Semantic edit operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert an empty paragraph under the root or another paragraph
    InsertParagraph { parent: NodeKey, index: usize },

    /// Insert a text leaf into a paragraph
    InsertText {
        parent: NodeKey,
        index: usize,
        text: String,
    },

    /// Replace the content of a text node
    UpdateText { node: NodeKey, content: String },

    /// Move a node to a new parent at index
    MoveNode {
        node: NodeKey,
        new_parent: NodeKey,
        index: usize,
    },

    /// Remove a node and its subtree
    RemoveNode { node: NodeKey },

    /// Remove every child of the root
    ClearRoot,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeKey),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Node {0} is not text")]
    NotText(NodeKey),

    #[error("Node {0} cannot have children")]
    NotAnElement(NodeKey),

    #[error("The root node cannot be removed")]
    CannotRemoveRoot,

    #[error("Paragraphs cannot nest deeper than {0} levels")]
    NestingTooDeep(usize),
}

impl Mutation {
    /// Apply mutation to the tree with validation.
    ///
    /// Returns the key of the node created by insert mutations.
    pub fn apply(&self, state: &mut EditorState) -> Result<Option<NodeKey>, MutationError> {
        self.validate(state)?;

        match self {
            Mutation::InsertParagraph { parent, index } => {
                let key = state.create_paragraph();
                state.insert(*parent, *index, key)?;
                Ok(Some(key))
            }

            Mutation::InsertText {
                parent,
                index,
                text,
            } => {
                let key = state.create_text(text.as_str());
                state.insert(*parent, *index, key)?;
                Ok(Some(key))
            }

            Mutation::UpdateText { node, content } => {
                state.set_text(*node, content.as_str())?;
                Ok(None)
            }

            Mutation::MoveNode {
                node,
                new_parent,
                index,
            } => {
                state.detach(*node)?;
                state.insert(*new_parent, *index, *node)?;
                Ok(None)
            }

            Mutation::RemoveNode { node } => {
                state.remove(*node)?;
                Ok(None)
            }

            Mutation::ClearRoot => {
                state.clear(NodeKey::ROOT)?;
                Ok(None)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, state: &EditorState) -> Result<(), MutationError> {
        match self {
            Mutation::InsertParagraph { parent, .. } => {
                let parent_node = state
                    .get(*parent)
                    .ok_or(MutationError::ParentNotFound(*parent))?;
                if !parent_node.kind().is_element() {
                    return Err(MutationError::NotAnElement(*parent));
                }
                if state.paragraph_depth(*parent) >= MAX_NESTING_DEPTH {
                    return Err(MutationError::NestingTooDeep(MAX_NESTING_DEPTH));
                }
                Ok(())
            }

            Mutation::InsertText { parent, .. } => {
                let parent_node = state
                    .get(*parent)
                    .ok_or(MutationError::ParentNotFound(*parent))?;
                match parent_node.kind() {
                    NodeKind::Paragraph => Ok(()),
                    NodeKind::Root => Err(MutationError::InvalidStructure(
                        "text must be inserted into a paragraph".to_string(),
                    )),
                    NodeKind::Text => Err(MutationError::NotAnElement(*parent)),
                }
            }

            Mutation::UpdateText { node, .. } => {
                let target = state.get(*node).ok_or(MutationError::NodeNotFound(*node))?;
                match target.kind() {
                    NodeKind::Text => Ok(()),
                    _ => Err(MutationError::NotText(*node)),
                }
            }

            Mutation::MoveNode {
                node, new_parent, ..
            } => {
                let target = state.get(*node).ok_or(MutationError::NodeNotFound(*node))?;
                let parent = state
                    .get(*new_parent)
                    .ok_or(MutationError::ParentNotFound(*new_parent))?;

                if node.is_root() {
                    return Err(MutationError::InvalidStructure(
                        "the root cannot be moved".to_string(),
                    ));
                }
                if node == new_parent || state.is_ancestor(*node, *new_parent) {
                    return Err(MutationError::CycleDetected);
                }
                if !parent.kind().is_element() {
                    return Err(MutationError::NotAnElement(*new_parent));
                }
                if parent.kind() == NodeKind::Root && !target.kind().is_element() {
                    return Err(MutationError::InvalidStructure(
                        "only element nodes can be children of the root".to_string(),
                    ));
                }
                state.check_nesting(*new_parent, *node)
            }

            Mutation::RemoveNode { node } => {
                if node.is_root() {
                    return Err(MutationError::CannotRemoveRoot);
                }
                state.get(*node).ok_or(MutationError::NodeNotFound(*node))?;
                Ok(())
            }

            Mutation::ClearRoot => Ok(()),
        }
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertParagraph { .. } => "insert_paragraph",
            Mutation::InsertText { .. } => "insert_text",
            Mutation::UpdateText { .. } => "update_text",
            Mutation::MoveNode { .. } => "move_node",
            Mutation::RemoveNode { .. } => "remove_node",
            Mutation::ClearRoot => "clear_root",
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Editor version after the commit
    pub version: u64,

    /// Node created by the mutation, if any
    pub created: Option<NodeKey>,
}
