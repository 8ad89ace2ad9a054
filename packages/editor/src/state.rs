//! # Editor State
//!
//! The live node tree of one editing context.
//!
//! An `EditorState` is an arena of [`LiveNode`]s rooted at [`NodeKey::ROOT`].
//! The root owns the whole tree: every attached node is reachable from it,
//! and removing a node releases its descendants from the arena.
//!
//! ## Lifecycle
//!
//! ```text
//! new → build (clear + append) → update … update
//!  ↓          ↓                       ↓
//! root     populated tree        committed snapshots
//! ```
//!
//! States are plain values. The [`Editor`](crate::Editor) clones the
//! committed state into a pending one for each update scope and swaps it in
//! on success, so a failed scope never leaves a half-applied tree behind.

use std::collections::HashMap;

use crate::mutations::MutationError;
use crate::node::{LiveNode, NodeData, NodeKey, NodeKind};
use crate::EditorError;

/// Deepest paragraph nesting a tree may reach.
///
/// Each paragraph level costs two levels of JSON nesting, so a tree at this
/// depth still serializes well inside `serde_json`'s recursion limit and its
/// JSON can be read back.
pub const MAX_NESTING_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    nodes: HashMap<NodeKey, LiveNode>,
    next_key: u32,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Create a state holding only an empty root
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeKey::ROOT,
            LiveNode::new(NodeKey::ROOT, NodeData::Root { children: Vec::new() }),
        );

        Self { nodes, next_key: 1 }
    }

    pub fn root(&self) -> &LiveNode {
        &self.nodes[&NodeKey::ROOT]
    }

    pub fn get(&self, key: NodeKey) -> Option<&LiveNode> {
        self.nodes.get(&key)
    }

    /// Resolve a key that the tree itself references
    pub fn node(&self, key: NodeKey) -> Result<&LiveNode, EditorError> {
        self.nodes.get(&key).ok_or(EditorError::DanglingNode(key))
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Number of nodes in the arena, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children
    pub fn is_empty(&self) -> bool {
        self.root().children().is_empty()
    }

    /// Iterate a node's children in order
    pub fn children(
        &self,
        key: NodeKey,
    ) -> Result<impl Iterator<Item = Result<&LiveNode, EditorError>> + '_, EditorError> {
        let node = self.node(key)?;
        Ok(node.children().iter().map(move |child| self.node(*child)))
    }

    /// Concatenated text of every text leaf, paragraphs separated by blank lines
    pub fn text_content(&self) -> Result<String, EditorError> {
        let mut collector = crate::visitor::TextCollector::default();
        crate::visitor::walk_node(&mut collector, self, NodeKey::ROOT)?;
        Ok(collector.finish())
    }

    // ── Node-variant constructors ──────────────────────────────────────────

    /// Create a detached, empty paragraph
    pub fn create_paragraph(&mut self) -> NodeKey {
        self.allocate(NodeData::Paragraph { children: Vec::new() })
    }

    /// Create a detached text leaf
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeKey {
        self.allocate(NodeData::Text { text: text.into() })
    }

    fn allocate(&mut self, data: NodeData) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        self.nodes.insert(key, LiveNode::new(key, data));
        key
    }

    // ── Structural edits ───────────────────────────────────────────────────

    /// Append a detached node as the last child of `parent`
    pub fn append(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), MutationError> {
        self.insert(parent, usize::MAX, child)
    }

    /// Attach a detached node under `parent` at `index` (clamped)
    pub fn insert(
        &mut self,
        parent: NodeKey,
        index: usize,
        child: NodeKey,
    ) -> Result<(), MutationError> {
        self.validate_insert(parent, child)?;

        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(MutationError::ParentNotFound(parent))?;
        let children = parent_node
            .children_mut()
            .ok_or(MutationError::NotAnElement(parent))?;
        let index = index.min(children.len());
        children.insert(index, child);

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Check that `child` may be attached under `parent`
    pub fn validate_insert(&self, parent: NodeKey, child: NodeKey) -> Result<(), MutationError> {
        let parent_node = self
            .nodes
            .get(&parent)
            .ok_or(MutationError::ParentNotFound(parent))?;
        let child_node = self
            .nodes
            .get(&child)
            .ok_or(MutationError::NodeNotFound(child))?;

        if child.is_root() {
            return Err(MutationError::InvalidStructure(
                "the root cannot be attached to a parent".to_string(),
            ));
        }
        if !parent_node.kind().is_element() {
            return Err(MutationError::NotAnElement(parent));
        }
        if parent_node.kind() == NodeKind::Root && !child_node.kind().is_element() {
            return Err(MutationError::InvalidStructure(format!(
                "only element nodes can be children of the root, got {}",
                child_node.kind()
            )));
        }
        if let Some(current) = child_node.parent {
            return Err(MutationError::InvalidStructure(format!(
                "node {} is already attached to {}",
                child, current
            )));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(MutationError::CycleDetected);
        }
        self.check_nesting(parent, child)
    }

    /// Check that hanging the subtree of `child` under `parent` stays within
    /// [`MAX_NESTING_DEPTH`]
    pub fn check_nesting(&self, parent: NodeKey, child: NodeKey) -> Result<(), MutationError> {
        if self.paragraph_depth(parent) + self.paragraph_height(child) > MAX_NESTING_DEPTH {
            return Err(MutationError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        Ok(())
    }

    /// Paragraphs on the parent chain of `key`, `key` included
    pub fn paragraph_depth(&self, key: NodeKey) -> usize {
        let mut depth = 0;
        let mut current = self.nodes.get(&key);
        while let Some(node) = current {
            if node.kind() == NodeKind::Paragraph {
                depth += 1;
            }
            current = node.parent.and_then(|parent| self.nodes.get(&parent));
        }
        depth
    }

    /// Longest run of nested paragraphs inside `key`, `key` included
    pub fn paragraph_height(&self, key: NodeKey) -> usize {
        let mut height = 0;
        let mut stack = vec![(key, 0)];
        while let Some((next, above)) = stack.pop() {
            let Some(node) = self.nodes.get(&next) else {
                continue;
            };
            let level = match node.kind() {
                NodeKind::Paragraph => above + 1,
                _ => above,
            };
            height = height.max(level);
            stack.extend(node.children().iter().map(|child| (*child, level)));
        }
        height
    }

    /// Unlink a node from its parent, keeping it (and its subtree) in the arena
    pub fn detach(&mut self, key: NodeKey) -> Result<(), MutationError> {
        let parent = self
            .nodes
            .get(&key)
            .ok_or(MutationError::NodeNotFound(key))?
            .parent;

        if let Some(parent) = parent {
            if let Some(children) = self.nodes.get_mut(&parent).and_then(|p| p.children_mut()) {
                children.retain(|c| *c != key);
            }
        }
        if let Some(node) = self.nodes.get_mut(&key) {
            node.parent = None;
        }
        Ok(())
    }

    /// Remove a node and release all of its descendants
    pub fn remove(&mut self, key: NodeKey) -> Result<(), MutationError> {
        if key.is_root() {
            return Err(MutationError::CannotRemoveRoot);
        }
        self.detach(key)?;
        self.release(key);
        Ok(())
    }

    /// Release every child of `key`, leaving an empty container
    pub fn clear(&mut self, key: NodeKey) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get_mut(&key)
            .ok_or(MutationError::NodeNotFound(key))?;
        let children = match node.children_mut() {
            Some(children) => std::mem::take(children),
            None => return Err(MutationError::NotAnElement(key)),
        };

        for child in children {
            self.release(child);
        }
        Ok(())
    }

    /// Replace the payload of a text leaf
    pub fn set_text(&mut self, key: NodeKey, content: impl Into<String>) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get_mut(&key)
            .ok_or(MutationError::NodeNotFound(key))?;

        match &mut node.data {
            NodeData::Text { text } => {
                *text = content.into();
                Ok(())
            }
            _ => Err(MutationError::NotText(key)),
        }
    }

    /// True when `ancestor` lies on the parent chain of `key`
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = self.nodes.get(&key).and_then(|n| n.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(&parent).and_then(|n| n.parent);
        }
        false
    }

    /// Drop every node that is not reachable from the root.
    ///
    /// Returns how many nodes were released.
    pub fn prune_detached(&mut self) -> usize {
        let before = self.nodes.len();
        let mut reachable = std::collections::HashSet::new();
        let mut stack = vec![NodeKey::ROOT];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get(&next) {
                reachable.insert(next);
                stack.extend_from_slice(node.children());
            }
        }
        self.nodes.retain(|key, _| reachable.contains(key));
        before - self.nodes.len()
    }

    /// True when both states hold the same nodes, whatever keys they would
    /// allocate next
    pub(crate) fn same_tree(&self, other: &EditorState) -> bool {
        self.nodes == other.nodes
    }

    /// Drop a node and its subtree from the arena
    fn release(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend_from_slice(node.children());
            }
        }
    }
}
