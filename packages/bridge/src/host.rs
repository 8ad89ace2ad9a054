//! # Rich-Text Editor Host
//!
//! The host-facing entry point: takes the serialized value a page would
//! pass in, mounts an editor on it and reports every change as a
//! `(json, html)` pair.
//!
//! ```text
//! value ──parse──▶ SerializedDocument ──build──▶ Editor (Ready)
//!                                                  │ edits
//!                                                  ▼
//!                                        ChangeProjector ──▶ on_change(json, html)
//! ```

use lexis_compiler_html::CompileOptions;
use lexis_editor::{
    CommittedUpdate, Editor, EditorConfig, EditorError, EditorState, ListenerId, Mutation,
    MutationResult, SerializedDocument,
};
use std::rc::Rc;
use tracing::{info, instrument};

use crate::projector::{project, ChangeProjector, Projection};

/// Error channel shared between a host config and the editors it mounts
pub type HostErrorHandler = Rc<dyn Fn(&EditorError)>;

/// Everything a host configures when mounting an editor
#[derive(Clone, Default)]
pub struct HostConfig {
    pub editor: EditorConfig,
    pub html: CompileOptions,
    /// Installed before the initial build, so mount errors reach it too
    pub on_error: Option<HostErrorHandler>,
}

impl HostConfig {
    pub fn with_error_handler(mut self, handler: impl Fn(&EditorError) + 'static) -> Self {
        self.on_error = Some(Rc::new(handler));
        self
    }
}

impl std::fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostConfig")
            .field("editor", &self.editor)
            .field("html", &self.html)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct RichTextEditor {
    editor: Editor,
    html: CompileOptions,
}

impl RichTextEditor {
    /// Parse `value` and build the initial tree.
    ///
    /// `None` or an empty value mounts the empty document. Malformed JSON is
    /// rejected before any tree exists; an unsupported node type fails the
    /// build. Both reach `config.on_error` as well as the caller.
    #[instrument(skip_all, fields(namespace = %config.editor.namespace))]
    pub fn new(value: Option<&str>, config: HostConfig) -> Result<Self, EditorError> {
        let document = match SerializedDocument::parse(value) {
            Ok(document) => document,
            Err(e) => {
                if let Some(handler) = &config.on_error {
                    handler(&e);
                }
                return Err(e);
            }
        };

        let mut editor = Editor::new(config.editor);
        if let Some(handler) = config.on_error {
            editor.set_error_handler(move |e| handler(e));
        }
        editor.initialize(&document)?;

        info!(
            paragraphs = editor.state().root().children().len(),
            "Editor mounted"
        );
        Ok(Self {
            editor,
            html: config.html,
        })
    }

    /// Mount and subscribe `on_change` in one step
    pub fn mount<F>(value: Option<&str>, config: HostConfig, on_change: F) -> Result<Self, EditorError>
    where
        F: FnMut(&str, &str) + 'static,
    {
        let mut host = Self::new(value, config)?;
        host.on_change(on_change);
        Ok(host)
    }

    /// Subscribe a sink to every committed change
    pub fn on_change<F>(&mut self, sink: F) -> ListenerId
    where
        F: FnMut(&str, &str) + 'static,
    {
        let projector = ChangeProjector::new(self.html.clone(), sink);
        self.editor.register_update_listener(projector)
    }

    /// Subscribe a raw update listener
    pub fn on_update<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&CommittedUpdate<'_>) -> Result<(), EditorError> + 'static,
    {
        self.editor.on_update(f)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.editor.unregister_update_listener(id)
    }

    /// Route every editor error to `handler` as well as to the caller
    pub fn set_error_handler(&mut self, handler: impl Fn(&EditorError) + 'static) {
        self.editor.set_error_handler(handler);
    }

    /// Replace the whole tree with a new value
    #[instrument(skip_all)]
    pub fn reload(&mut self, value: Option<&str>) -> Result<(), EditorError> {
        let document = SerializedDocument::parse(value)?;
        self.editor.initialize(&document)
    }

    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        self.editor.apply(mutation)
    }

    pub fn update<T>(
        &mut self,
        f: impl FnOnce(&mut EditorState) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        self.editor.update(f)
    }

    pub fn read<T>(&self, f: impl FnOnce(&EditorState) -> T) -> T {
        self.editor.read(f)
    }

    /// Project the committed state on demand
    pub fn projection(&self) -> Result<Projection, EditorError> {
        self.editor.read(|state| project(state, &self.html))
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn html_options(&self) -> &CompileOptions {
        &self.html
    }
}
