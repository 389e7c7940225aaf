use std::fs;

use escritura_backend::merge::merge_directory;
use escritura_backend::types::{RawItem, RunSummary};

#[test]
fn test_first_seen_wins_across_files() {
    let dir = tempfile::tempdir().unwrap();

    // files are processed in sorted path order: a.xml before b.xml
    fs::write(
        dir.path().join("a.xml"),
        r#"<bible><b n="Juan"><c n="1"><v n="1">texto del archivo A</v></c></b></bible>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("b.xml"),
        r#"<bible><b n="Juan">
            <c n="1"><v n="1">texto distinto del archivo B</v></c>
            <c n="2"><v n="1">solo el archivo B tiene este capítulo</v></c>
        </b></bible>"#,
    )
    .unwrap();

    let mut summary = RunSummary::default();
    let books = merge_directory(dir.path(), &mut summary).unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.files_skipped, 0);

    let juan = &books[0];
    assert_eq!(juan.chapters.len(), 2);
    assert_eq!(
        juan.chapters[0].items[0],
        RawItem::Verse {
            number: 1,
            lines: vec!["texto del archivo A".to_string()],
        }
    );
    assert_eq!(juan.chapters[1].number, 2);
}

#[test]
fn test_unrecognized_and_malformed_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();

    fs::write(
        dir.path().join("juan.xml"),
        r#"<bible><b n="Juan"><c n="1"><v n="1">texto</v></c></b></bible>"#,
    )
    .unwrap();
    fs::write(dir.path().join("notas.md"), "no es un formato conocido").unwrap();
    fs::write(
        dir.path().join("roto.xml"),
        r#"<bible><b n="Juan"><c n="uno"><v n="1">x</v></c></b></bible>"#,
    )
    .unwrap();

    let mut summary = RunSummary::default();
    let books = merge_directory(dir.path(), &mut summary).unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(summary.files_scanned, 3);
    assert_eq!(summary.files_skipped, 2);
}

#[test]
fn test_mixed_formats_merge_by_display_name() {
    let dir = tempfile::tempdir().unwrap();

    // same book arriving as USFM and as imp under its mapped name
    fs::write(dir.path().join("a.usfm"), "\\id GEN\n\\c 1\n\\v 1 desde usfm\n").unwrap();
    fs::write(dir.path().join("b.imp"), "GEN 2:1 desde imp\n").unwrap();

    let mut summary = RunSummary::default();
    let books = merge_directory(dir.path(), &mut summary).unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].name, "Génesis");
    let numbers: Vec<u32> = books[0].chapters.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut summary = RunSummary::default();
    let books = merge_directory(dir.path(), &mut summary).unwrap();
    assert!(books.is_empty());
    assert_eq!(summary.files_scanned, 0);
}
