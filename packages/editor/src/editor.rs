//! # Editing Context
//!
//! Owns one live tree and mediates every read and write to it.
//!
//! ```text
//! Uninitialized ──initialize/update──▶ Ready ──update──▶ Ready …
//!                                        │
//!                                        └─▶ listeners(committed state)
//! ```
//!
//! Writes run in an update scope: the committed state is cloned into a
//! pending state, the closure edits the pending copy, and only a successful
//! closure is committed. A failed scope leaves the committed state, the
//! version and the listeners untouched. Exclusivity comes from the borrow
//! checker: `update` takes `&mut self`, `read` takes `&self`.

use tracing::{debug, instrument, warn};

use crate::builder::build;
use crate::listener::{CommittedUpdate, ListenerId, UpdateListener};
use crate::mutations::{Mutation, MutationResult};
use crate::serialized::SerializedDocument;
use crate::{EditorConfig, EditorError, EditorState};

/// Host callback observing every error raised by the editor
pub type ErrorHandler = Box<dyn Fn(&EditorError)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    /// No update has committed yet
    Uninitialized,
    Ready,
}

pub struct Editor {
    config: EditorConfig,

    /// Last committed state
    state: EditorState,

    status: EditorStatus,

    /// Increments on each commit that changed the tree
    version: u64,

    listeners: Vec<(ListenerId, Box<dyn UpdateListener>)>,
    next_listener_id: u64,

    error_handler: Option<ErrorHandler>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            state: EditorState::new(),
            status: EditorStatus::Uninitialized,
            version: 0,
            listeners: Vec::new(),
            next_listener_id: 0,
            error_handler: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The last committed state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Run `f` against a read-only view of the committed state
    pub fn read<T>(&self, f: impl FnOnce(&EditorState) -> T) -> T {
        f(&self.state)
    }

    /// Run `f` in an update scope and commit its edits on success.
    ///
    /// Errors from `f` or from a listener are reported to the error handler
    /// and returned. Listener errors happen after the commit, so the new
    /// state stays in place.
    ///
    /// Nodes created by `f` but left unattached are released at the end of
    /// the scope; their keys are not valid in later scopes.
    pub fn update<T>(
        &mut self,
        f: impl FnOnce(&mut EditorState) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        let mut pending = self.state.clone();

        let value = match f(&mut pending) {
            Ok(value) => value,
            Err(e) => {
                warn!(namespace = %self.config.namespace, error = %e, "Update discarded");
                self.report(&e);
                return Err(e);
            }
        };

        self.commit(pending)?;
        Ok(value)
    }

    /// Materialize `document` as the whole tree, replacing any previous one
    #[instrument(skip_all, fields(namespace = %self.config.namespace))]
    pub fn initialize(&mut self, document: &SerializedDocument) -> Result<(), EditorError> {
        self.update(|state| build(document, state))
    }

    /// Apply a mutation in its own update scope
    #[instrument(skip_all, fields(mutation = mutation.name()))]
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let created = self.update(|state| mutation.apply(state).map_err(EditorError::from))?;

        Ok(MutationResult {
            version: self.version,
            created,
        })
    }

    /// Register a listener invoked after every committed change
    pub fn register_update_listener(&mut self, listener: impl UpdateListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Closure form of [`register_update_listener`](Self::register_update_listener)
    pub fn on_update<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&CommittedUpdate<'_>) -> Result<(), EditorError> + 'static,
    {
        self.register_update_listener(f)
    }

    pub fn unregister_update_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Install the host's error channel
    pub fn set_error_handler(&mut self, handler: impl Fn(&EditorError) + 'static) {
        self.error_handler = Some(Box::new(handler));
    }

    fn commit(&mut self, mut pending: EditorState) -> Result<(), EditorError> {
        self.status = EditorStatus::Ready;

        let released = pending.prune_detached();
        if released > 0 {
            debug!(namespace = %self.config.namespace, released, "Released unattached nodes");
        }
        if pending.same_tree(&self.state) {
            debug!(namespace = %self.config.namespace, "Update committed without changes");
            return Ok(());
        }

        self.state = pending;
        self.version += 1;
        debug!(
            namespace = %self.config.namespace,
            version = self.version,
            nodes = self.state.len(),
            "Update committed"
        );

        let update = CommittedUpdate {
            state: &self.state,
            config: &self.config,
            version: self.version,
        };
        for (_, listener) in self.listeners.iter_mut() {
            if let Err(e) = listener.on_update(&update) {
                warn!(namespace = %update.config.namespace, error = %e, "Update listener failed");
                if let Some(handler) = &self.error_handler {
                    handler(&e);
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn report(&self, error: &EditorError) {
        if let Some(handler) = &self.error_handler {
            handler(error);
        }
    }
}
