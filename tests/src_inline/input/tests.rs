use super::*;
use crate::input::corpus::{read_gold_triples, read_parallel};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("transeval_input_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_read_lines_plain_and_crlf() {
    let dir = make_temp_dir();
    let path = dir.join("lines.txt");
    std::fs::write(&path, "one\r\ntwo\nthree").unwrap();
    assert_eq!(read_lines(&path).unwrap(), vec!["one", "two", "three"]);
}

#[test]
fn test_read_lines_gz() {
    let dir = make_temp_dir();
    let path = dir.join("lines.txt.gz");
    let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    enc.write_all(b"hola\nmundo\n").unwrap();
    enc.finish().unwrap();
    assert_eq!(read_lines(&path).unwrap(), vec!["hola", "mundo"]);
}

#[test]
fn test_missing_file_is_missing_input() {
    let dir = make_temp_dir();
    let err = read_lines(&dir.join("nope.txt")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_read_gold_triples() {
    let dir = make_temp_dir();
    let path = dir.join("gold.txt");
    std::fs::write(&path, "s1\nr1\nc1\ns2\nr2\nc2\n\n").unwrap();
    let triples = read_gold_triples(&path).unwrap();
    assert_eq!(triples.len(), 2);
    assert_eq!(triples[1].source, "s2");
    assert_eq!(triples[1].reference, "r2");
    assert_eq!(triples[1].correct, "c2");
}

#[test]
fn test_read_gold_triples_incomplete() {
    let dir = make_temp_dir();
    let path = dir.join("gold.txt");
    std::fs::write(&path, "s1\nr1\nc1\ns2\n").unwrap();
    assert!(matches!(read_gold_triples(&path), Err(InputError::Parse(_))));
}

#[test]
fn test_read_parallel_stops_at_shorter() {
    let dir = make_temp_dir();
    let sl = dir.join("sl.txt");
    let rt = dir.join("rt.txt");
    std::fs::write(&sl, "a\nb\nc\n").unwrap();
    std::fs::write(&rt, "x\ny\n").unwrap();
    let pairs = read_parallel(&sl, &rt).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[1].source, "b");
    assert_eq!(pairs[1].reference, "y");
}
