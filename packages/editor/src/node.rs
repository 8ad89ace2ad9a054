//! # Live Nodes
//!
//! The in-memory node tree owned by an [`EditorState`](crate::EditorState).
//!
//! Nodes live in an arena keyed by [`NodeKey`] and reference their children
//! and parent by key. The set of variants is closed: adding a variant means
//! extending [`NodeKind`] and [`NodeData`], and every exhaustive match in the
//! workspace points at the places that need a new arm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Opaque handle to a node inside one editor state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub u32);

impl NodeKey {
    /// Key of the document root. Never reallocated.
    pub const ROOT: NodeKey = NodeKey(0);

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Node variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Paragraph,
    Text,
}

impl NodeKind {
    /// The `type` tag used in serialized documents
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text => "text",
        }
    }

    /// Element nodes can own children
    pub fn is_element(self) -> bool {
        match self {
            NodeKind::Root | NodeKind::Paragraph => true,
            NodeKind::Text => false,
        }
    }
}

impl FromStr for NodeKind {
    type Err = EditorError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "root" => Ok(NodeKind::Root),
            "paragraph" => Ok(NodeKind::Paragraph),
            "text" => Ok(NodeKind::Text),
            other => Err(EditorError::UnknownNodeType(other.to_string())),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant payload of a live node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Root { children: Vec<NodeKey> },
    Paragraph { children: Vec<NodeKey> },
    Text { text: String },
}

/// A node stored in the editor state arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveNode {
    pub key: NodeKey,

    /// Owning parent, `None` for the root and for detached nodes
    pub parent: Option<NodeKey>,

    pub data: NodeData,
}

impl LiveNode {
    pub(crate) fn new(key: NodeKey, data: NodeData) -> Self {
        Self {
            key,
            parent: None,
            data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Root { .. } => NodeKind::Root,
            NodeData::Paragraph { .. } => NodeKind::Paragraph,
            NodeData::Text { .. } => NodeKind::Text,
        }
    }

    /// Child keys in order. Empty for leaves.
    pub fn children(&self) -> &[NodeKey] {
        match &self.data {
            NodeData::Root { children } | NodeData::Paragraph { children } => children,
            NodeData::Text { .. } => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeKey>> {
        match &mut self.data {
            NodeData::Root { children } | NodeData::Paragraph { children } => Some(children),
            NodeData::Text { .. } => None,
        }
    }

    /// Text payload, for text leaves only
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some() || self.key.is_root()
    }
}
