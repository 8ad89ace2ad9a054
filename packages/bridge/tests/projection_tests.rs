//! End-to-end tests: value in, `(json, html)` pairs out

use lexis_bridge::{
    project, CompileOptions, EditorError, HostConfig, Mutation, NodeKey, Projection,
    RichTextEditor, SerializedDocument,
};
use lexis_editor::{build, EditorState, MutationError, MAX_NESTING_DEPTH};
use std::cell::RefCell;
use std::rc::Rc;

type Pairs = Rc<RefCell<Vec<(String, String)>>>;

fn recording_host(value: Option<&str>) -> anyhow::Result<(RichTextEditor, Pairs)> {
    let pairs: Pairs = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&pairs);
    let host = RichTextEditor::mount(value, HostConfig::default(), move |json, html| {
        log.borrow_mut().push((json.to_string(), html.to_string()));
    })?;
    Ok((host, pairs))
}

/// Rebuild the delivered JSON from scratch and derive HTML independently
fn reproject(json: &str, options: &CompileOptions) -> Projection {
    let document = SerializedDocument::from_json(json).expect("delivered JSON parses");
    let mut state = EditorState::new();
    build(&document, &mut state).expect("delivered JSON builds");
    project(&state, options).expect("projection succeeds")
}

#[test]
fn test_default_document_scenario() -> anyhow::Result<()> {
    for value in [None, Some("")] {
        let (host, pairs) = recording_host(value)?;

        assert!(host.read(|state| state.is_empty()));
        assert!(pairs.borrow().is_empty(), "mounting does not project");

        let projection = host.projection()?;
        assert_eq!(projection.json, r#"{"root":{"children":[]}}"#);
        assert_eq!(projection.html, "");
    }
    Ok(())
}

#[test]
fn test_pairs_describe_the_same_snapshot() -> anyhow::Result<()> {
    let (mut host, pairs) = recording_host(Some(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"Draft"}]}]}}"#,
    ))?;

    let first = host.read(|state| state.root().children()[0]);
    let text = host
        .apply(Mutation::InsertText {
            parent: first,
            index: 1,
            text: " & more".to_string(),
        })?
        .created
        .expect("new text key");
    let second = host
        .apply(Mutation::InsertParagraph {
            parent: NodeKey::ROOT,
            index: 1,
        })?
        .created
        .expect("new paragraph key");
    host.apply(Mutation::MoveNode {
        node: text,
        new_parent: second,
        index: 0,
    })?;
    host.apply(Mutation::UpdateText {
        node: text,
        content: "<moved>".to_string(),
    })?;
    host.apply(Mutation::RemoveNode { node: first })?;

    let pairs = pairs.borrow();
    assert_eq!(pairs.len(), 5);
    for (json, html) in pairs.iter() {
        let rebuilt = reproject(json, host.html_options());
        assert_eq!(&rebuilt.json, json);
        assert_eq!(&rebuilt.html, html);
    }

    let (json, html) = pairs.last().unwrap();
    assert_eq!(
        json,
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"<moved>"}]}]}}"#
    );
    assert_eq!(
        html,
        "<p><span style=\"white-space: pre-wrap;\">&lt;moved&gt;</span></p>"
    );
    Ok(())
}

#[test]
fn test_unknown_type_fails_mount() {
    let result = RichTextEditor::new(
        Some(r#"{"root":{"children":[{"type":"unknown"}]}}"#),
        HostConfig::default(),
    );

    match result {
        Err(EditorError::UnknownNodeType(tag)) => assert_eq!(tag, "unknown"),
        other => panic!("expected unknown node type, got {:?}", other),
    }
}

#[test]
fn test_malformed_value_fails_before_build() {
    for value in ["{", r#"{"document":{}}"#, "[]"] {
        let err = RichTextEditor::new(Some(value), HostConfig::default()).unwrap_err();
        assert!(
            matches!(err, EditorError::MalformedDocument(_)),
            "{} should be malformed",
            value
        );
    }
}

#[test]
fn test_reload_replaces_tree_and_projects() -> anyhow::Result<()> {
    let (mut host, pairs) = recording_host(Some(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"one"}]},{"type":"paragraph"}]}}"#,
    ))?;

    host.reload(Some(r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"two"}]}]}}"#))?;

    let fresh = RichTextEditor::new(
        Some(r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"two"}]}]}}"#),
        HostConfig::default(),
    )?;
    assert_eq!(host.projection()?, fresh.projection()?);

    let pairs = pairs.borrow();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, fresh.projection()?.json);
    Ok(())
}

#[test]
fn test_failed_reload_keeps_tree_and_reports() -> anyhow::Result<()> {
    let (mut host, pairs) = recording_host(Some(
        r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"keep"}]}]}}"#,
    ))?;
    let errors = Rc::new(RefCell::new(Vec::new()));
    let channel = Rc::clone(&errors);
    host.set_error_handler(move |e| channel.borrow_mut().push(e.to_string()));

    let before = host.projection()?;
    let err = host
        .reload(Some(r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"table"}]}]}}"#))
        .unwrap_err();

    assert!(matches!(err, EditorError::UnknownNodeType(_)));
    assert_eq!(host.projection()?, before);
    assert!(pairs.borrow().is_empty());
    assert_eq!(*errors.borrow(), vec!["Unknown node type: table".to_string()]);
    Ok(())
}

#[test]
fn test_pretty_options_flow_to_sink() -> anyhow::Result<()> {
    let config = HostConfig {
        html: CompileOptions {
            preserve_whitespace: false,
            ..CompileOptions::pretty()
        },
        ..HostConfig::default()
    };
    let pairs: Pairs = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&pairs);
    let mut host = RichTextEditor::mount(None, config, move |json, html| {
        log.borrow_mut().push((json.to_string(), html.to_string()));
    })?;

    let paragraph = host
        .apply(Mutation::InsertParagraph {
            parent: NodeKey::ROOT,
            index: 0,
        })?
        .created
        .expect("new paragraph key");
    host.apply(Mutation::InsertText {
        parent: paragraph,
        index: 0,
        text: "pretty".to_string(),
    })?;

    assert_eq!(pairs.borrow().last().unwrap().1, "<p>pretty</p>\n");
    Ok(())
}

#[test]
fn test_unsubscribed_sink_stops_receiving() -> anyhow::Result<()> {
    let mut host = RichTextEditor::new(None, HostConfig::default())?;
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let id = host.on_change(move |_, _| *counter.borrow_mut() += 1);

    host.apply(Mutation::InsertParagraph {
        parent: NodeKey::ROOT,
        index: 0,
    })?;
    assert!(host.unsubscribe(id));
    host.apply(Mutation::ClearRoot)?;

    assert_eq!(*count.borrow(), 1);
    Ok(())
}

#[test]
fn test_delivered_json_matches_serde_value() -> anyhow::Result<()> {
    let input = r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"a"},{"type":"text"}]}]}}"#;
    let host = RichTextEditor::new(Some(input), HostConfig::default())?;

    let delivered: serde_json::Value = serde_json::from_str(&host.projection()?.json)?;
    let expected = serde_json::json!({
        "root": {
            "children": [
                {
                    "type": "paragraph",
                    "children": [
                        { "type": "text", "text": "a" },
                        { "type": "text", "text": "" }
                    ]
                }
            ]
        }
    });
    assert_eq!(delivered, expected);
    Ok(())
}

#[test]
fn test_deep_nesting_stays_readable() -> anyhow::Result<()> {
    let (mut host, pairs) = recording_host(None)?;

    let mut parent = NodeKey::ROOT;
    let mut rejected = None;
    for _ in 0..70 {
        match host.apply(Mutation::InsertParagraph { parent, index: 0 }) {
            Ok(result) => parent = result.created.expect("new paragraph key"),
            Err(e) => {
                rejected = Some(e);
                break;
            }
        }
    }

    assert!(matches!(
        rejected,
        Some(EditorError::Mutation(MutationError::NestingTooDeep(MAX_NESTING_DEPTH)))
    ));
    assert_eq!(pairs.borrow().len(), MAX_NESTING_DEPTH);

    let json = host.projection()?.json;
    let document = SerializedDocument::parse(Some(&json))?;
    let rebuilt = RichTextEditor::new(Some(&json), HostConfig::default())?;
    assert_eq!(rebuilt.projection()?.json, json);
    assert_eq!(document.to_json()?, json);
    Ok(())
}

#[test]
fn test_mount_errors_reach_configured_handler() {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let channel = Rc::clone(&errors);
    let config = HostConfig::default()
        .with_error_handler(move |e| channel.borrow_mut().push(e.to_string()));

    let result = RichTextEditor::new(
        Some(r#"{"root":{"children":[{"type":"quote"}]}}"#),
        config,
    );

    assert!(matches!(result, Err(EditorError::UnknownNodeType(_))));

    let config = HostConfig::default().with_error_handler({
        let channel = Rc::clone(&errors);
        move |e| channel.borrow_mut().push(e.to_string())
    });
    assert!(RichTextEditor::new(Some("{"), config).is_err());

    let errors = errors.borrow();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "Unknown node type: quote");
    assert!(errors[1].starts_with("Malformed document"));
}
