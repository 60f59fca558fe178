use editor_core::enums::Direction;
use editor_state::config::Config;
use editor_state::key::KeyEvent;
use editor_state::session::{Outcome, Session};
use std::io::Write;

fn type_bytes(session: &mut Session, text: &[u8]) {
    for &byte in text {
        let key = match byte {
            b'\n' => KeyEvent::Enter,
            byte => KeyEvent::Byte(byte),
        };

        assert_eq!(session.dispatch(key), Outcome::Continue);
    }
}

#[test]
fn insert_into_mapped_file_then_undo_redo() {
    let mut file = tempfile::NamedTempFile::new().unwrap();

    file.write_all(b"ab\ncd").unwrap();

    let mut session = Session::open(file.path(), Config::default()).unwrap();

    session.dispatch(KeyEvent::Arrow(Direction::Right));
    session.dispatch(KeyEvent::End);
    type_bytes(&mut session, b"X");

    assert_eq!(session.text(), "abX\ncd");
    assert_eq!(session.table().pieces().len(), 3);

    session.dispatch(KeyEvent::Undo);
    assert_eq!(session.text(), "ab\ncd");
    assert_eq!(session.table().added_len(), 0);

    session.dispatch(KeyEvent::Redo);
    assert_eq!(session.text(), "abX\ncd");
    assert_eq!(session.table().added_len(), 1);
}

#[test]
fn opening_a_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = Session::open(dir.path().join("nope.txt"), Config::default());

    assert!(matches!(
        result,
        Err(editor_state::errors::SessionError::Open { .. })
    ));
}

#[test]
fn opening_an_empty_file_shows_welcome() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let session = Session::open(file.path(), Config::default()).unwrap();

    assert!(session.table().is_empty());
    assert!(session.frame().welcome.is_some());
}

#[test]
fn redo_is_dropped_by_a_new_edit() {
    let mut session = Session::from_bytes(Vec::new(), Config::default());

    type_bytes(&mut session, b"abc");
    session.dispatch(KeyEvent::Undo);
    session.dispatch(KeyEvent::Undo);
    assert_eq!(session.text(), "a");

    type_bytes(&mut session, b"z");
    assert!(!session.history().can_redo());

    session.dispatch(KeyEvent::Redo);
    assert_eq!(session.text(), "az");
}

#[test]
fn typing_lines_and_deleting_them_again() {
    let mut session = Session::from_bytes(Vec::new(), Config::default());

    type_bytes(&mut session, b"one\ntwo\n\tthree");

    assert_eq!(session.rows().len(), 3);
    assert_eq!(session.rows().get(2).map(|row| row.tab_count), Some(1));
    assert_eq!((session.cursor().row, session.cursor().column), (2, 6));

    for _ in 0..4 {
        session.dispatch(KeyEvent::Backspace);
    }

    assert_eq!(session.text(), "one\ntwo\n\tt");

    while session.history().can_undo() {
        session.dispatch(KeyEvent::Undo);
    }

    assert_eq!(session.text(), "");
    assert_eq!(session.rows().len(), 1);
    assert_eq!((session.cursor().row, session.cursor().column), (0, 0));
}

#[test]
fn cursor_stays_in_bounds_under_random_walk() {
    let mut session = Session::from_bytes(b"a\n\tbcdef\n\nxy".as_slice(), Config::default());
    let keys = [
        KeyEvent::Arrow(Direction::Down),
        KeyEvent::Arrow(Direction::Right),
        KeyEvent::Arrow(Direction::Right),
        KeyEvent::End,
        KeyEvent::Arrow(Direction::Down),
        KeyEvent::Arrow(Direction::Left),
        KeyEvent::Delete,
        KeyEvent::Arrow(Direction::Down),
        KeyEvent::Backspace,
        KeyEvent::PageDown,
        KeyEvent::Undo,
        KeyEvent::Arrow(Direction::Up),
        KeyEvent::Home,
        KeyEvent::PageUp,
        KeyEvent::Redo,
    ];

    for key in keys.iter().cycle().take(keys.len() * 4) {
        session.dispatch(*key);

        let cursor = session.cursor();
        let rows = session.rows();

        assert!(cursor.row < rows.len());
        assert!(cursor.column <= rows.row_len(cursor.row));
        assert!(cursor.offset(rows).unwrap() <= session.table().len());
    }
}

#[test]
fn navigate_mode_keys_do_not_edit_through_dispatch() {
    let mut session = Session::from_bytes(b"ab".as_slice(), Config::default());

    session.dispatch(KeyEvent::Save);
    session.dispatch(KeyEvent::ModeToggle);
    session.dispatch(KeyEvent::ModeToggle);

    assert_eq!(session.text(), "ab");
    assert_eq!(session.history().undo_depth(), 0);
}
