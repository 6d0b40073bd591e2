//! Tests for longer command sequences
//!
//! This tests:
//! - Move + rename + delete chains
//! - Undo/redo sequences
//! - Batched edits
//! - Tree integrity after operations

use pagesmith_editor::{
    palette, Command, Editor, EditorConfig, EditorError, ElementKind, ElementPatch, IdStrategy,
    MutationError, ROOT_ID,
};
use pagesmith_model::{DocumentSnapshot, Element, SequentialIds};

fn editor_with_columns() -> Editor {
    let mut editor = Editor::with_id_source(Box::new(SequentialIds::from_seed("seq")));
    let left = Element::container(
        "left",
        ElementKind::Container,
        vec![Element::new("a", ElementKind::Text), Element::new("b", ElementKind::Text)],
    )
    .unwrap();
    let right = Element::new("right", ElementKind::Container);
    let row = Element::container("row", ElementKind::TwoColumn, vec![left, right]).unwrap();

    editor
        .load_document(DocumentSnapshot::new(vec![row]).unwrap())
        .unwrap();
    editor
}

fn move_to(id: &str, parent: &str, index: Option<usize>) -> Command {
    Command::MoveElement {
        id: id.to_string(),
        new_parent_id: parent.to_string(),
        index,
    }
}

fn child_ids(editor: &Editor, id: &str) -> Vec<String> {
    editor
        .state()
        .tree()
        .find(id)
        .and_then(Element::children)
        .map(|children| children.iter().map(|c| c.id().to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn test_move_then_delete_sequence() {
    let mut editor = editor_with_columns();

    editor.dispatch(move_to("b", "right", None)).unwrap();
    assert_eq!(child_ids(&editor, "left"), vec!["a"]);
    assert_eq!(child_ids(&editor, "right"), vec!["b"]);

    editor.dispatch(Command::delete("right")).unwrap();
    assert!(!editor.state().tree().contains("b"));

    // undo delete restores the subtree
    assert!(editor.undo());
    assert_eq!(child_ids(&editor, "right"), vec!["b"]);

    // undo move puts b back in place
    assert!(editor.undo());
    assert_eq!(child_ids(&editor, "left"), vec!["a", "b"]);
    assert!(child_ids(&editor, "right").is_empty());
}

#[test]
fn test_move_within_parent_reorders() {
    let mut editor = editor_with_columns();

    editor.dispatch(move_to("b", "left", Some(0))).unwrap();
    assert_eq!(child_ids(&editor, "left"), vec!["b", "a"]);

    // index past the end appends
    editor.dispatch(move_to("b", "left", Some(99))).unwrap();
    assert_eq!(child_ids(&editor, "left"), vec!["a", "b"]);
}

#[test]
fn test_move_into_own_subtree_is_rejected() {
    let mut editor = editor_with_columns();
    let before = editor.state().clone();

    let err = editor.dispatch(move_to("row", "left", None)).unwrap_err();
    assert!(matches!(err, EditorError::Mutation(MutationError::CycleDetected)));

    let err = editor.dispatch(move_to("row", "row", None)).unwrap_err();
    assert!(matches!(err, EditorError::Mutation(MutationError::CycleDetected)));

    let err = editor.dispatch(move_to("a", "b", None)).unwrap_err();
    assert!(matches!(err, EditorError::Mutation(MutationError::NotAContainer(_))));

    assert_eq!(editor.state(), &before);
    assert!(!editor.can_undo());
}

#[test]
fn test_rename_and_restyle_then_undo_all() {
    let mut editor = editor_with_columns();
    let original = editor.state().tree().clone();

    editor
        .dispatch(Command::update("row", ElementPatch::new().name("Features")))
        .unwrap();
    editor
        .dispatch(Command::update("left", ElementPatch::new().style("gap", "12px")))
        .unwrap();
    assert_eq!(editor.state().tree().find("row").unwrap().name, "Features");

    while editor.undo() {}

    assert_eq!(editor.state().tree(), &original);
    assert_eq!(editor.history().redo_levels(), 2);
}

#[test]
fn test_redo_cleared_by_new_edit() {
    let mut editor = editor_with_columns();

    editor.dispatch(Command::delete("a")).unwrap();
    editor.undo();
    assert!(editor.can_redo());

    editor.dispatch(Command::delete("b")).unwrap();
    assert!(!editor.can_redo());
    assert!(editor.state().tree().contains("a"));
}

#[test]
fn test_undo_clears_dangling_selection() {
    let mut editor = editor_with_columns();

    let created = editor
        .dispatch(Command::add("right", palette::template(ElementKind::Button).unwrap()))
        .unwrap()
        .created_id
        .unwrap();
    editor.dispatch(Command::select(created.as_str())).unwrap();

    editor.undo();

    assert!(!editor.state().tree().contains(&created));
    assert_eq!(editor.state().view().selected_id(), None);
}

#[test]
fn test_batched_layout_build() {
    let mut editor = editor_with_columns();

    editor.begin_batch("Build hero");
    let hero = editor
        .dispatch(Command::add(ROOT_ID, palette::template(ElementKind::Container).unwrap()))
        .unwrap()
        .created_id
        .unwrap();
    editor
        .dispatch(Command::add(hero.as_str(), palette::template(ElementKind::Heading).unwrap()))
        .unwrap();
    editor
        .dispatch(Command::add(hero.as_str(), palette::template(ElementKind::Button).unwrap()))
        .unwrap();
    editor.end_batch();

    assert_eq!(child_ids(&editor, hero.as_str()).len(), 2);
    assert_eq!(editor.history().undo_levels(), 1);

    editor.undo();
    assert!(!editor.state().tree().contains(&hero));
    assert_eq!(editor.state().tree().elements().len(), 1);
}

#[test]
fn test_insert_at_index() {
    let mut editor = editor_with_columns();

    let created = editor
        .dispatch(Command::InsertElement {
            container_id: "left".to_string(),
            index: 1,
            element: palette::template(ElementKind::Image).unwrap(),
        })
        .unwrap()
        .created_id
        .unwrap();

    assert_eq!(child_ids(&editor, "left"), vec!["a".to_string(), created, "b".to_string()]);
}

#[test]
fn test_history_limit_from_config() {
    let config = EditorConfig {
        history_limit: 2,
        id_strategy: IdStrategy::Sequential,
        ..EditorConfig::default()
    };
    let mut editor = Editor::with_config(&config, "limits");

    for _ in 0..5 {
        editor
            .dispatch(Command::add(ROOT_ID, palette::template(ElementKind::Text).unwrap()))
            .unwrap();
    }

    assert_eq!(editor.history().undo_levels(), 2);
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(editor.state().tree().elements().len(), 3);
}
