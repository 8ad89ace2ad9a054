//! # Change Projector
//!
//! Re-derives the JSON and HTML views of the tree after every committed
//! update and hands both to a sink.
//!
//! Both strings are computed from the same committed snapshot before the sink
//! sees either of them, so a failure in one serialization means nothing is
//! delivered for that update.

use lexis_compiler_html::{compile_to_html, CompileError, CompileOptions};
use lexis_editor::{export_json, CommittedUpdate, EditorError, EditorState, UpdateListener};
use tracing::{debug, instrument};

/// JSON and HTML snapshot of one tree state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub json: String,
    pub html: String,
}

/// Derive both views of `state`
#[instrument(skip_all, fields(nodes = state.len()))]
pub fn project(state: &EditorState, options: &CompileOptions) -> Result<Projection, EditorError> {
    let json = export_json(state)?;
    let html = compile_to_html(state, options).map_err(into_editor_error)?;

    debug!(json_bytes = json.len(), html_bytes = html.len(), "Projected tree");
    Ok(Projection { json, html })
}

fn into_editor_error(error: CompileError) -> EditorError {
    match error {
        CompileError::Tree(inner) => inner,
    }
}

/// Update listener delivering `(json, html)` to a sink
pub struct ChangeProjector {
    options: CompileOptions,
    sink: Box<dyn FnMut(&str, &str)>,
    delivered: u64,
}

impl std::fmt::Debug for ChangeProjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeProjector")
            .field("options", &self.options)
            .field("delivered", &self.delivered)
            .finish_non_exhaustive()
    }
}

impl ChangeProjector {
    pub fn new<F>(options: CompileOptions, sink: F) -> Self
    where
        F: FnMut(&str, &str) + 'static,
    {
        Self {
            options,
            sink: Box::new(sink),
            delivered: 0,
        }
    }

    /// Number of projections handed to the sink so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl UpdateListener for ChangeProjector {
    fn on_update(&mut self, update: &CommittedUpdate<'_>) -> Result<(), EditorError> {
        let projection = project(update.state, &self.options)?;

        debug!(
            namespace = update.namespace(),
            version = update.version,
            "Delivering projection"
        );
        (self.sink)(&projection.json, &projection.html);
        self.delivered += 1;
        Ok(())
    }
}
