use editlog::{BufferState, EventType, JsonlSink, LogSink, MemorySink, read_jsonl};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_jsonl_sink_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("activity.jsonl");

    let sink = JsonlSink::open(&path).unwrap();

    assert!(path.exists());
    assert_eq!(sink.path(), path.as_path());
    assert_eq!(sink.written(), 0);
}

#[test]
fn test_jsonl_sink_writes_one_line_per_entry() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.jsonl");
    let mut sink = JsonlSink::open(&path).unwrap();
    let mut buffer = BufferState::new(1, "dev", Some("a.txt".to_string()));

    buffer.on_activated(true, 0, &mut sink);
    buffer.on_modified(3, &mut sink);
    assert_eq!(sink.written(), 3);
    drop(sink);

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.ends_with('\n'));

    let entries = read_jsonl(&path).unwrap();
    assert_eq!(entries.as_slice(), buffer.resolved_entries());
}

#[test]
fn test_jsonl_sink_appends_across_opens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.jsonl");
    let mut buffer = BufferState::new(1, "dev", Some("a.txt".to_string()));

    {
        let mut sink = JsonlSink::open(&path).unwrap();
        buffer.on_post_save(&mut sink);
    }
    {
        let mut sink = JsonlSink::open(&path).unwrap();
        buffer.on_close(&mut sink);
    }

    let types: Vec<_> = read_jsonl(&path)
        .unwrap()
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(types, vec![EventType::Saved, EventType::Closed]);
}

#[test]
fn test_second_jsonl_sink_fails_while_locked() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.jsonl");
    let _first = JsonlSink::open(&path).unwrap();

    let err = JsonlSink::open(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    let msg = err.to_string();
    assert!(
        msg.contains("another writer holds the lock"),
        "error should mention the lock: {msg}"
    );
    assert!(
        msg.contains("activity.jsonl"),
        "error should mention the file path: {msg}"
    );
}

#[test]
fn test_lock_released_on_drop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.jsonl");
    {
        let _sink = JsonlSink::open(&path).unwrap();
    }
    JsonlSink::open(&path).unwrap();
}

#[test]
fn test_read_jsonl_skips_blank_and_partial_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.jsonl");
    {
        let mut sink = JsonlSink::open(&path).unwrap();
        let mut buffer = BufferState::new(1, "dev", Some("a.txt".to_string()));
        buffer.on_post_save(&mut sink);
    }
    let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
    write!(file, "\n{{\"device_id\":\"dev\",\"filena").unwrap();
    drop(file);

    let entries = read_jsonl(&path).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, EventType::Saved);
}

#[test]
fn test_read_jsonl_rejects_corrupt_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.jsonl");
    fs::write(&path, "not json\n").unwrap();

    let err = read_jsonl(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn test_memory_sink_take() {
    let mut sink = MemorySink::new();
    let mut buffer = BufferState::new(1, "dev", Some("a.txt".to_string()));
    buffer.on_post_save(&mut sink);

    let taken = sink.take();
    assert_eq!(taken.len(), 1);
    assert!(sink.is_empty());
}

#[test]
fn test_boxed_and_borrowed_sinks() {
    let mut inner = MemorySink::new();
    let mut buffer = BufferState::new(1, "dev", Some("a.txt".to_string()));
    {
        let mut borrowed: &mut MemorySink = &mut inner;
        buffer.on_post_save(&mut borrowed);
    }
    assert_eq!(inner.len(), 1);

    let mut boxed: Box<dyn LogSink> = Box::new(MemorySink::new());
    buffer.on_close(&mut boxed);
    buffer.on_close(boxed.as_mut());
    assert_eq!(buffer.resolved_entries().len(), 3);
}
