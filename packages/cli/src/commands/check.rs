use crate::commands::read_document;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lexis_bridge::RichTextEditor;
use lexis_editor::{walk_children, walk_node, EditorError, EditorState, LiveNode, NodeKey, Visitor};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Serialized document to validate
    pub document: PathBuf,
}

/// Node counts of an attached tree, root excluded
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeCounts {
    pub paragraphs: usize,
    pub texts: usize,
    pub depth: usize,
}

#[derive(Default)]
struct NodeCounter {
    counts: NodeCounts,
    depth: usize,
}

impl Visitor for NodeCounter {
    fn visit_paragraph(
        &mut self,
        state: &EditorState,
        paragraph: &LiveNode,
    ) -> Result<(), EditorError> {
        self.counts.paragraphs += 1;
        self.depth += 1;
        self.counts.depth = self.counts.depth.max(self.depth);
        walk_children(self, state, paragraph)?;
        self.depth -= 1;
        Ok(())
    }

    fn visit_text(&mut self, _node: &LiveNode, _text: &str) -> Result<(), EditorError> {
        self.counts.texts += 1;
        self.counts.depth = self.counts.depth.max(self.depth + 1);
        Ok(())
    }
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let counts = count_nodes(&args, cwd)?;

    println!("{} {}", "✓".green(), args.document.display());
    println!("  paragraphs: {}", counts.paragraphs);
    println!("  text nodes: {}", counts.texts);
    println!("  depth:      {}", counts.depth);
    Ok(())
}

/// Parse and build the document, then count what got attached
pub fn count_nodes(args: &CheckArgs, cwd: &str) -> Result<NodeCounts> {
    let config = Config::load(cwd)?.to_host_config();
    let value = read_document(cwd, &args.document)?;
    let host = RichTextEditor::new(Some(&value), config)?;

    let mut counter = NodeCounter::default();
    host.read(|state| walk_node(&mut counter, state, NodeKey::ROOT))?;
    Ok(counter.counts)
}
