use crate::node::{LiveNode, NodeData, NodeKey};
use crate::{EditorError, EditorState};

/// Visitor pattern for traversing a live node tree
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
/// Every visit returns a `Result` so a dangling child key stops the walk.
pub trait Visitor: Sized {
    fn visit_root(&mut self, state: &EditorState, root: &LiveNode) -> Result<(), EditorError> {
        walk_children(self, state, root)
    }

    fn visit_paragraph(
        &mut self,
        state: &EditorState,
        paragraph: &LiveNode,
    ) -> Result<(), EditorError> {
        walk_children(self, state, paragraph)
    }

    fn visit_text(&mut self, _node: &LiveNode, _text: &str) -> Result<(), EditorError> {
        // Leaf node, no children to walk
        Ok(())
    }
}

/// Dispatch on the variant of the node stored under `key`
pub fn walk_node<V: Visitor>(
    visitor: &mut V,
    state: &EditorState,
    key: NodeKey,
) -> Result<(), EditorError> {
    let node = state.node(key)?;
    match &node.data {
        NodeData::Root { .. } => visitor.visit_root(state, node),
        NodeData::Paragraph { .. } => visitor.visit_paragraph(state, node),
        NodeData::Text { text } => visitor.visit_text(node, text),
    }
}

pub fn walk_children<V: Visitor>(
    visitor: &mut V,
    state: &EditorState,
    node: &LiveNode,
) -> Result<(), EditorError> {
    for child in node.children() {
        walk_node(visitor, state, *child)?;
    }
    Ok(())
}

/// Collects plain text; sibling block nodes are separated by a blank line
#[derive(Debug, Default)]
pub struct TextCollector {
    buffer: String,
}

impl TextCollector {
    pub fn finish(self) -> String {
        self.buffer
    }

    fn collect_block(&mut self, state: &EditorState, node: &LiveNode) -> Result<(), EditorError> {
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            walk_node(self, state, *child)?;

            let is_block = state.node(*child)?.kind().is_element();
            if is_block && i + 1 < children.len() {
                self.buffer.push_str("\n\n");
            }
        }
        Ok(())
    }
}

impl Visitor for TextCollector {
    fn visit_root(&mut self, state: &EditorState, root: &LiveNode) -> Result<(), EditorError> {
        self.collect_block(state, root)
    }

    fn visit_paragraph(
        &mut self,
        state: &EditorState,
        paragraph: &LiveNode,
    ) -> Result<(), EditorError> {
        self.collect_block(state, paragraph)
    }

    fn visit_text(&mut self, _node: &LiveNode, text: &str) -> Result<(), EditorError> {
        self.buffer.push_str(text);
        Ok(())
    }
}
