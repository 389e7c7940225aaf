//! Directory merging: load every recognized file in a directory and
//! reconcile overlapping book data across files.
//!
//! Books are accumulated by display name, before identity resolution.
//! The union is non-destructive: on a chapter-number collision the
//! earliest-processed file's content is retained ("first-seen wins"),
//! so the deterministic file ordering below is load-bearing.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::formats;
use crate::logger;
use crate::types::{ConvertError, RawBook, Result, RunSummary};

/// Parses every regular file directly under `dir` and merges the books
/// they produce. Files with an unrecognized format or malformed content
/// are skipped with a warning; they never abort the batch.
pub fn merge_directory(dir: &Path, summary: &mut RunSummary) -> Result<Vec<RawBook>> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();

    let mut merged: IndexMap<String, RawBook> = IndexMap::new();

    for path in paths {
        summary.files_scanned += 1;

        let content = read_to_string(&path)?;

        let Some(kind) = formats::detect(&path, &content) else {
            logger::warn(&format!("skipping {}: unrecognized format", path.display()));
            summary.files_skipped += 1;
            continue;
        };

        match formats::parser_for(kind).parse(&content) {
            Ok(books) => {
                logger::info(&format!(
                    "parsed {} as {}: {} book(s)",
                    path.display(),
                    kind.as_str(),
                    books.len()
                ));
                merge_books(&mut merged, books);
            }
            Err(e) => {
                logger::warn(&format!("skipping {}: {}", path.display(), e));
                summary.files_skipped += 1;
            }
        }
    }

    Ok(merged.into_values().collect())
}

/// Chapters already present (matched by number) are kept as-is; new
/// chapter numbers are appended.
fn merge_books(merged: &mut IndexMap<String, RawBook>, books: Vec<RawBook>) {
    for book in books {
        match merged.get_mut(&book.name) {
            Some(existing) => {
                for chapter in book.chapters {
                    if !existing.chapters.iter().any(|c| c.number == chapter.number) {
                        existing.chapters.push(chapter);
                    }
                }
            }
            None => {
                merged.insert(book.name.clone(), book);
            }
        }
    }
}

pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ConvertError::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawChapter, RawItem};

    fn book(name: &str, chapters: &[(u32, &str)]) -> RawBook {
        RawBook {
            name: name.to_string(),
            chapters: chapters
                .iter()
                .map(|&(number, text)| RawChapter {
                    number,
                    items: vec![RawItem::Verse {
                        number: 1,
                        lines: vec![text.to_string()],
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn test_first_seen_chapter_wins() {
        let mut merged = IndexMap::new();
        merge_books(&mut merged, vec![book("Juan", &[(1, "del archivo A")])]);
        merge_books(
            &mut merged,
            vec![book("Juan", &[(1, "del archivo B"), (2, "solo en B")])],
        );

        let juan = &merged["Juan"];
        assert_eq!(juan.chapters.len(), 2);
        assert_eq!(
            juan.chapters[0].items[0],
            RawItem::Verse {
                number: 1,
                lines: vec!["del archivo A".to_string()],
            }
        );
        assert_eq!(juan.chapters[1].number, 2);
    }

    #[test]
    fn test_distinct_books_accumulate() {
        let mut merged = IndexMap::new();
        merge_books(&mut merged, vec![book("Juan", &[(1, "a")])]);
        merge_books(&mut merged, vec![book("Mateo", &[(1, "b")])]);
        assert_eq!(merged.len(), 2);
    }
}
