//! End-to-end find and replace through an editing session backed by a file.

use std::fs;
use tempfile::TempDir;

use linefind::EditSession;
use linefind_buffer::{LineBuffer, Position, TextBuffer};
use linefind_text_search::{FindResult, SearchDirection, SearchFlags};

fn session_for(dir: &TempDir, name: &str, content: &str) -> EditSession {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    EditSession::new(TextBuffer::from_file(&path).unwrap())
}

#[test]
fn find_next_walks_crlf_document_without_wrapping() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(
        &dir,
        "notes.txt",
        "Test one\r\nno match\r\nTEST two test\r\n",
    );

    let flags = SearchFlags::new(false, true);
    let mut hits = vec![session.start_find("test", flags, SearchDirection::Forward)];
    loop {
        let result = session.find_next();
        if !result.is_found() {
            break;
        }
        hits.push(result);
    }

    // The match at 0:0 is the start position, so it is skipped
    assert_eq!(
        hits,
        vec![
            FindResult::Found(Position::new(2, 0)),
            FindResult::Found(Position::new(2, 9)),
        ]
    );
    assert_eq!(session.status(), Some("Line 2 Col 9"));
}

#[test]
fn backward_search_from_end_of_document() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&dir, "code.rs", "let cat = 1;\nlet category = cat + cat;\n");

    let last_row = session.buffer().line_count() - 1;
    session.set_cursor(Position::new(last_row, 0));

    let flags = SearchFlags::new(true, true);
    assert_eq!(
        session.start_find("cat", flags, SearchDirection::Backward),
        FindResult::Found(Position::new(1, 21))
    );
    assert_eq!(
        session.find_next(),
        FindResult::Found(Position::new(1, 15))
    );
    assert_eq!(session.find_next(), FindResult::Found(Position::new(0, 4)));
    assert_eq!(session.find_next(), FindResult::NotFound);

    // "previous" of a backward search walks forward again
    assert_eq!(
        session.find_previous(),
        FindResult::Found(Position::new(1, 15))
    );
}

#[test]
fn replace_all_and_save_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.txt");
    fs::write(&path, "a a a\r\nA\r\n").unwrap();

    let mut session = EditSession::new(TextBuffer::from_file(&path).unwrap());
    session.set_cursor(Position::new(1, 1));

    let count = session.replace_all("a", "b", SearchFlags::default());
    assert_eq!(count, 4);
    session.buffer_mut().save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "b b b\r\nb\r\n");

    // Same offset (8) in a text of the same length
    assert_eq!(session.cursor(), Position::new(1, 1));

    // Running it again changes nothing
    assert_eq!(session.replace_all("a", "b", SearchFlags::default()), 0);
    assert_eq!(session.buffer().text(), "b b b\r\nb\r\n");
}

#[test]
fn empty_query_never_matches() {
    let dir = TempDir::new().unwrap();
    let mut session = session_for(&dir, "empty.txt", "abc\ndef\n");

    assert_eq!(
        session.start_find("", SearchFlags::default(), SearchDirection::Forward),
        FindResult::NotFound
    );
    assert_eq!(session.find_previous(), FindResult::NotFound);
    assert_eq!(session.replace_all("", "x", SearchFlags::default()), 0);
    assert_eq!(session.buffer().text(), "abc\ndef\n");
}
