use lexis_bridge::{CompileOptions, EditorConfig, HostConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "lexis.config.json";

/// Lexis configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace the editor is created under
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// HTML projection options
    #[serde(default)]
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlConfig {
    #[serde(default)]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,

    #[serde(default = "default_true")]
    pub preserve_whitespace: bool,

    #[serde(default)]
    pub full_document: bool,

    #[serde(default = "default_title")]
    pub title: String,
}

fn default_namespace() -> String {
    lexis_editor::DEFAULT_NAMESPACE.to_string()
}

fn default_indent() -> String {
    "  ".to_string()
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Lexis Document".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn to_host_config(&self) -> HostConfig {
        HostConfig {
            editor: EditorConfig::with_namespace(self.namespace.clone()),
            html: CompileOptions {
                pretty: self.html.pretty,
                indent: self.html.indent.clone(),
                preserve_whitespace: self.html.preserve_whitespace,
                full_document: self.html.full_document,
                title: self.html.title.clone(),
            },
            on_error: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            html: HtmlConfig::default(),
        }
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: default_indent(),
            preserve_whitespace: true,
            full_document: false,
            title: default_title(),
        }
    }
}
