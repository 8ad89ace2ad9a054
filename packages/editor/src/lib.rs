//! # Lexis Editor
//!
//! Live document tree and editing context for Lexis.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ serialized: JSON string → SerializedDocument│
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editing context                     │
//! │  - builder: materialize the live tree       │
//! │  - update scopes (pending → commit)         │
//! │  - mutations with validation                │
//! │  - update listeners on every commit         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ serializer: live tree → canonical JSON      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The live tree is the source of truth**: JSON and HTML are derived views
//! 2. **Closed node set**: `paragraph` and `text` below a single `root`
//! 3. **Atomic scopes**: an update either commits whole or leaves no trace
//! 4. **Fail fast**: unknown node types and broken trees surface as errors
//!
//! ## Usage
//!
//! ```rust
//! use lexis_editor::{Editor, EditorConfig, Mutation, NodeKey, SerializedDocument};
//!
//! let document = SerializedDocument::parse(Some(
//!     r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"Hi"}]}]}}"#,
//! ))?;
//!
//! let mut editor = Editor::new(EditorConfig::default());
//! editor.initialize(&document)?;
//!
//! editor.on_update(|update| {
//!     println!("{}", lexis_editor::export_json(update.state)?);
//!     Ok(())
//! });
//!
//! editor.apply(Mutation::InsertParagraph { parent: NodeKey::ROOT, index: 1 })?;
//! # Ok::<(), lexis_editor::EditorError>(())
//! ```

pub mod builder;
mod config;
mod editor;
mod errors;
mod listener;
mod mutations;
mod node;
mod serialized;
mod serializer;
mod state;
pub mod visitor;

pub use builder::{build, create_node};
pub use config::{EditorConfig, DEFAULT_NAMESPACE};
pub use editor::{Editor, EditorStatus, ErrorHandler};
pub use errors::EditorError;
pub use listener::{CommittedUpdate, ListenerId, UpdateListener};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use node::{LiveNode, NodeData, NodeKey, NodeKind};
pub use serialized::{SerializedDocument, SerializedNode, SerializedRoot, EMPTY_DOCUMENT};
pub use serializer::{export_document, export_json, export_node};
pub use state::{EditorState, MAX_NESTING_DEPTH};
pub use visitor::{walk_children, walk_node, TextCollector, Visitor};
