//! # Lexis Bridge
//!
//! Connects a serialized document to a live editor and projects every change
//! back out as JSON and HTML.
//!
//! ## Usage
//!
//! ```rust
//! use lexis_bridge::{HostConfig, Mutation, NodeKey, RichTextEditor};
//!
//! let mut host = RichTextEditor::mount(None, HostConfig::default(), |json, html| {
//!     println!("json: {json}");
//!     println!("html: {html}");
//! })?;
//!
//! host.apply(Mutation::InsertParagraph { parent: NodeKey::ROOT, index: 0 })?;
//! # Ok::<(), lexis_bridge::EditorError>(())
//! ```

mod host;
mod projector;

pub use host::{HostConfig, HostErrorHandler, RichTextEditor};
pub use projector::{project, ChangeProjector, Projection};

// Re-export editor types hosts need for convenience
pub use lexis_compiler_html::CompileOptions;
pub use lexis_editor::{
    EditorConfig, EditorError, EditorState, ListenerId, Mutation, MutationResult, NodeKey,
    SerializedDocument, EMPTY_DOCUMENT,
};
