use system::euclid::default::Point2D;
use system::{DrawingLog, Stroke, Tool};

fn stroke(id: &str, author_id: &str) -> Stroke {
    Stroke {
        id: id.into(),
        points: vec![Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0)],
        color: "#336699".into(),
        width: 3.0,
        tool: Tool::Pen,
        author_id: author_id.into(),
        timestamp: 1_700_000_000_000,
    }
}

fn ids(strokes: &[Stroke]) -> Vec<&str> {
    strokes.iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn undo_then_redo_is_an_inverse() {
    let mut log = DrawingLog::new();
    for id in &["s1", "s2", "s3", "s4"] {
        log.append(stroke(id, "a"));
    }

    for _ in 0..4 {
        assert!(log.undo().is_some());
    }
    assert!(log.strokes().is_empty());
    assert_eq!(ids(log.redo_buffer()), vec!["s4", "s3", "s2", "s1"]);

    for _ in 0..4 {
        assert!(log.redo().is_some());
    }
    assert_eq!(ids(log.strokes()), vec!["s1", "s2", "s3", "s4"]);
    assert!(log.redo_buffer().is_empty());
}

#[test]
fn append_after_undo_invalidates_redo() {
    let mut log = DrawingLog::new();
    log.append(stroke("s1", "a"));
    log.append(stroke("s2", "a"));
    log.undo();
    assert_eq!(ids(log.redo_buffer()), vec!["s2"]);

    log.append(stroke("s3", "a"));
    assert!(log.redo_buffer().is_empty());
    assert!(log.redo().is_none());
    assert_eq!(ids(log.strokes()), vec!["s1", "s3"]);
}

#[test]
fn undo_ignores_authorship() {
    let mut log = DrawingLog::new();
    log.append(stroke("s1", "alice"));
    log.append(stroke("s2", "bob"));

    let undone = log.undo().map(|s| s.id.clone());
    assert_eq!(undone.as_deref(), Some("s2"));
    assert_eq!(ids(log.strokes()), vec!["s1"]);
}

#[test]
fn exhausted_stacks_are_no_ops() {
    let mut log = DrawingLog::new();
    log.append(stroke("s1", "a"));
    log.undo();
    assert!(log.undo().is_none());
    assert_eq!(ids(log.redo_buffer()), vec!["s1"]);

    log.redo();
    assert!(log.redo().is_none());
    assert_eq!(ids(log.strokes()), vec!["s1"]);
}
