//! Aggregation over real zip archives

use std::io::{Cursor, Write};

use dsf_core::{
    aggregate, validate, BatchOptions, DuplicatePolicy, EntrySource, Error, ParseFailurePolicy,
    WarningCode, ZipEntrySource,
};
use pretty_assertions::assert_eq;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, SimpleFileOptions::default()).unwrap();
            } else {
                zip.start_file(*name, SimpleFileOptions::default()).unwrap();
                zip.write_all(content).unwrap();
            }
        }
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn lists_entries_in_central_directory_order() {
    let bytes = archive(&[("z/", b""), ("z/b.txt", b"1"), ("a.txt", b"2")]);
    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();

    assert_eq!(source.len(), 3);
    let names: Vec<_> = source.list().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["z/", "z/b.txt", "a.txt"]);
    assert_eq!(source.read(2).unwrap(), b"2");
}

#[test]
fn nested_entries_are_named_by_file_stem() {
    let bytes = archive(&[
        ("shapes/", b""),
        ("shapes/MGW.txt", b"1 2\n3 4\n"),
        ("shapes/ProT.txt", b"5 6\n7 8\n"),
        ("shapes/HelT.TXT", b"9 9\n9 9\n"),
        ("shapes/notes.csv", b"1,2\n"),
    ]);
    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let outcome = aggregate(&mut source, &BatchOptions::default()).unwrap();

    let names: Vec<_> = outcome.tables.names().collect();
    assert_eq!(names, vec!["MGW", "ProT"]);
    assert_eq!(outcome.considered, 2);
    assert_eq!(validate(&outcome.tables).unwrap(), 2);
}

#[test]
fn one_bad_entry_does_not_sink_the_batch() {
    let bytes = archive(&[
        ("a.txt", b"1 2\n3 4\n"),
        ("latin1.txt", &[0x31, 0x20, 0xE9, 0x0A]),
        ("empty.txt", b"\n\n"),
        ("b.txt", b"5 6\n7 8\n"),
    ]);
    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let outcome = aggregate(&mut source, &BatchOptions::default()).unwrap();

    assert_eq!(outcome.tables.len(), 2);
    let failed: Vec<_> = outcome.failures.iter().map(|f| f.entry.as_str()).collect();
    assert_eq!(failed, vec!["latin1.txt", "empty.txt"]);
    assert!(outcome
        .warnings
        .iter()
        .all(|w| w.code == WarningCode::EntrySkipped));
}

/// Stored (uncompressed) archive so entry bytes can be altered in place
fn stored_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn entry_failing_its_checksum_is_skipped() {
    let mut bytes = stored_archive(&[
        ("a.txt", b"1 2\n3 4\n"),
        ("b.txt", b"5 6\n7 8\n"),
        ("c.txt", b"1 1\n2 2\n"),
    ]);
    let at = bytes.windows(3).position(|w| w == b"7 8").unwrap();
    bytes[at] = b'9';

    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let outcome = aggregate(&mut source, &BatchOptions::default()).unwrap();
    let names: Vec<_> = outcome.tables.names().collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].entry, "b.txt");
    assert!(outcome.failures[0].reason.starts_with("Entry 'b.txt' could not be read"));
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].code, WarningCode::EntrySkipped);

    let strict = BatchOptions {
        parse_failure: ParseFailurePolicy::Abort,
        ..BatchOptions::default()
    };
    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let err = aggregate(&mut source, &strict).unwrap_err();
    assert!(matches!(err, Error::EntryRead { entry, .. } if entry == "b.txt"));
}

#[test]
fn row_count_disagreement_is_reported_per_table() {
    let bytes = archive(&[("a.txt", b"1\n2\n"), ("b.txt", b"1\n2\n3\n")]);
    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let outcome = aggregate(&mut source, &BatchOptions::default()).unwrap();

    let err = validate(&outcome.tables).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Not all files have the same number of rows: a=2, b=3"
    );
}

#[test]
fn duplicate_stems_follow_the_policy() {
    let bytes = archive(&[("x/Roll.txt", b"1\n"), ("y/Roll.txt", b"9\n")]);

    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let outcome = aggregate(&mut source, &BatchOptions::default()).unwrap();
    assert_eq!(outcome.tables.len(), 1);
    assert_eq!(outcome.tables.get("Roll").unwrap().mean(0), Some(9.0));
    assert_eq!(outcome.warnings[0].code, WarningCode::DuplicateTableName);

    let strict = BatchOptions {
        duplicates: DuplicatePolicy::Reject,
        ..BatchOptions::default()
    };
    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let err = aggregate(&mut source, &strict).unwrap_err();
    assert!(matches!(err, Error::DuplicateTableName { name } if name == "Roll"));
}

#[test]
fn archive_of_only_directories_is_an_empty_batch() {
    let bytes = archive(&[("a/", b""), ("a/b/", b"")]);
    let mut source = ZipEntrySource::from_bytes(&bytes).unwrap();
    let err = aggregate(&mut source, &BatchOptions::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyBatch { .. }));
}

#[test]
fn garbage_bytes_are_not_an_archive() {
    let err = ZipEntrySource::from_bytes(b"PK not really").err().unwrap();
    assert!(matches!(err, Error::Archive(_)));
}
