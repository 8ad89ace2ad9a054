use crate::{EditorConfig, EditorError, EditorState};

/// View of a just-committed update handed to listeners
///
/// Borrows the committed state read-only; listeners observe, they never
/// mutate.
#[derive(Debug, Clone, Copy)]
pub struct CommittedUpdate<'a> {
    /// The committed tree
    pub state: &'a EditorState,

    /// Configuration of the owning editor
    pub config: &'a EditorConfig,

    /// Editor version after the commit
    pub version: u64,
}

impl CommittedUpdate<'_> {
    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }
}

/// Trait for mutation-notification sinks
///
/// Called once per committed update that changed the tree. An error aborts
/// notification of the remaining listeners and is returned from the update
/// that triggered it.
pub trait UpdateListener {
    fn on_update(&mut self, update: &CommittedUpdate<'_>) -> Result<(), EditorError>;
}

impl<F> UpdateListener for F
where
    F: FnMut(&CommittedUpdate<'_>) -> Result<(), EditorError>,
{
    fn on_update(&mut self, update: &CommittedUpdate<'_>) -> Result<(), EditorError> {
        self(update)
    }
}

/// Handle returned on registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
