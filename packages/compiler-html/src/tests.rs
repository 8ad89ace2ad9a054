use crate::{compile_to_html, CompileError, CompileOptions};
use lexis_editor::{build, EditorError, EditorState, NodeKey, SerializedDocument};

fn state_from(json: &str) -> EditorState {
    let document = SerializedDocument::from_json(json).expect("Failed to parse");
    let mut state = EditorState::new();
    build(&document, &mut state).expect("Failed to build");
    state
}

#[test]
fn test_compile_empty_document() {
    let state = EditorState::new();
    let html = compile_to_html(&state, &CompileOptions::default()).expect("Failed to compile");
    assert_eq!(html, "");
}

#[test]
fn test_compile_paragraph_with_text() {
    let state = state_from(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"Hello"},{"type":"text","text":" world"}]}]}}"#,
    );
    let html = compile_to_html(&state, &CompileOptions::default()).expect("Failed to compile");

    assert_eq!(
        html,
        "<p><span style=\"white-space: pre-wrap;\">Hello</span><span style=\"white-space: pre-wrap;\"> world</span></p>"
    );
}

#[test]
fn test_compile_empty_paragraph_keeps_line_break() {
    let state = state_from(r#"{"root":{"children":[{"type":"paragraph","children":[]}]}}"#);
    let html = compile_to_html(&state, &CompileOptions::default()).expect("Failed to compile");
    assert_eq!(html, "<p><br></p>");
}

#[test]
fn test_compile_escapes_text() {
    let state = state_from(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"<script>alert('x') & \"y\"</script>"}]}]}}"#,
    );
    let options = CompileOptions {
        preserve_whitespace: false,
        ..CompileOptions::default()
    };
    let html = compile_to_html(&state, &options).expect("Failed to compile");

    assert_eq!(
        html,
        "<p>&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;</p>"
    );
}

#[test]
fn test_compile_pretty_blocks() {
    let state = state_from(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"a"}]},{"type":"paragraph","children":[]}]}}"#,
    );
    let options = CompileOptions {
        preserve_whitespace: false,
        ..CompileOptions::pretty()
    };
    let html = compile_to_html(&state, &options).expect("Failed to compile");

    assert_eq!(html, "<p>a</p>\n<p><br></p>\n");
}

#[test]
fn test_compile_pretty_nested_paragraphs() {
    let state = state_from(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"intro"},{"type":"paragraph","children":[{"type":"text","text":"inner"}]}]}]}}"#,
    );
    let options = CompileOptions {
        preserve_whitespace: false,
        ..CompileOptions::pretty()
    };
    let html = compile_to_html(&state, &options).expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert_eq!(html, "<p>\n  intro\n  <p>inner</p>\n</p>\n");
}

#[test]
fn test_compile_full_document() {
    let state = state_from(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"Body"}]}]}}"#,
    );
    let options = CompileOptions {
        full_document: true,
        title: "Notes & Drafts".to_string(),
        ..CompileOptions::pretty()
    };
    let html = compile_to_html(&state, &options).expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
    assert!(html.contains("<title>Notes &amp; Drafts</title>"));
    assert!(html.contains("    <p><span style=\"white-space: pre-wrap;\">Body</span></p>\n"));
    assert!(html.ends_with("</body>\n</html>\n"));
}

#[test]
fn test_compile_is_deterministic() {
    let state = state_from(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"same"}]}]}}"#,
    );
    let first = compile_to_html(&state, &CompileOptions::default()).unwrap();
    let second = compile_to_html(&state, &CompileOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tree_errors_convert() {
    let err: CompileError = EditorError::DanglingNode(NodeKey(3)).into();
    assert_eq!(err.to_string(), "Broken tree: Dangling node reference: #3");
}
