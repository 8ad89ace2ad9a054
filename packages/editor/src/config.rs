use serde::{Deserialize, Serialize};

pub const DEFAULT_NAMESPACE: &str = "lexis";

/// Editor construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Identifies the editor instance in logs and update notifications
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl EditorConfig {
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}
