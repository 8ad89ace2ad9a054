//! # Serialized Documents
//!
//! The external JSON shape of a document:
//!
//! ```json
//! {"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"Hi"}]}]}}
//! ```
//!
//! Nodes keep their `type` tag as a plain string so that an unsupported tag
//! survives parsing and is reported by the tree builder with its value.
//! Fields other than `type`, `children` and `text` are accepted and dropped.

use serde::{Deserialize, Deserializer, Serialize};

use crate::EditorError;

/// The document used when the host supplies no value
pub const EMPTY_DOCUMENT: SerializedDocument = SerializedDocument {
    root: SerializedRoot {
        children: Vec::new(),
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedDocument {
    pub root: SerializedRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SerializedRoot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<SerializedNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNode {
    /// Variant discriminant (`"paragraph"`, `"text"`)
    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SerializedNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SerializedNode {
    pub fn paragraph(children: Vec<SerializedNode>) -> Self {
        Self {
            node_type: "paragraph".to_string(),
            children: Some(children),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: "text".to_string(),
            children: None,
            text: Some(text.into()),
        }
    }

    /// Children of a container; absent means none
    pub fn children(&self) -> &[SerializedNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

impl Default for SerializedDocument {
    fn default() -> Self {
        EMPTY_DOCUMENT
    }
}

impl SerializedDocument {
    pub fn new(children: Vec<SerializedNode>) -> Self {
        Self {
            root: SerializedRoot { children },
        }
    }

    /// Parse a host-supplied value.
    ///
    /// `None`, empty and whitespace-only input select [`EMPTY_DOCUMENT`].
    pub fn parse(value: Option<&str>) -> Result<Self, EditorError> {
        match value {
            Some(json) if !json.trim().is_empty() => Self::from_json(json),
            _ => Ok(EMPTY_DOCUMENT),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(EditorError::MalformedDocument)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        serde_json::to_string(self).map_err(|e| EditorError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        serde_json::to_string_pretty(self).map_err(|e| EditorError::Serialization(e.to_string()))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SerializedNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SerializedNode>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_value_is_empty_document() {
        assert_eq!(SerializedDocument::parse(None).unwrap(), EMPTY_DOCUMENT);
        assert_eq!(SerializedDocument::parse(Some("")).unwrap(), EMPTY_DOCUMENT);
        assert_eq!(SerializedDocument::parse(Some("  \n")).unwrap(), EMPTY_DOCUMENT);
    }

    #[test]
    fn test_empty_document_json() {
        assert_eq!(EMPTY_DOCUMENT.to_json().unwrap(), r#"{"root":{"children":[]}}"#);
    }

    #[test]
    fn test_missing_or_null_root_children_default_to_empty() {
        let doc = SerializedDocument::from_json(r#"{"root":{}}"#).unwrap();
        assert!(doc.root.children.is_empty());

        let doc = SerializedDocument::from_json(r#"{"root":{"children":null}}"#).unwrap();
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_missing_root_is_malformed() {
        let err = SerializedDocument::from_json(r#"{"children":[]}"#).unwrap_err();
        assert!(matches!(err, EditorError::MalformedDocument(_)));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = SerializedDocument::parse(Some("{not json")).unwrap_err();
        assert!(matches!(err, EditorError::MalformedDocument(_)));
    }

    #[test]
    fn test_unknown_tags_and_extra_fields_parse() {
        let doc = SerializedDocument::from_json(
            r#"{"root":{"children":[{"type":"heading","tag":"h1","format":0,"children":[]}]}}"#,
        )
        .unwrap();
        assert_eq!(doc.root.children[0].node_type, "heading");
        assert!(doc.root.children[0].children().is_empty());
    }

    #[test]
    fn test_canonical_field_order() {
        let doc = SerializedDocument::new(vec![SerializedNode::paragraph(vec![
            SerializedNode::text("Hi"),
        ])]);
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"Hi"}]}]}}"#
        );
    }
}
