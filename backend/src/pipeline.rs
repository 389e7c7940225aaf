//! Run orchestration: input loading, per-book conversion, and emission
//! of the canonical output layout:
//!
//! ```text
//! <output_root>/
//!   manifest.json
//!   books/
//!     <book_id>.json
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::convert;
use crate::formats;
use crate::logger;
use crate::merge;
use crate::types::{CanonicalBook, ConvertError, RawBook, Result, RunSummary};

/// Converts `input` (one recognized file, or a directory holding any
/// mixture of recognized files) into the canonical layout under
/// `output_root`.
///
/// Directory mode tolerates unrecognized and malformed files; in
/// single-file mode the same conditions abort the run. A book whose
/// name does not resolve is skipped with a warning in both modes.
pub fn run_conversion(input: &Path, output_root: &Path) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    let raw_books = if input.is_dir() {
        merge::merge_directory(input, &mut summary)?
    } else {
        summary.files_scanned = 1;
        load_single_file(input)?
    };

    let mut books: BTreeMap<String, CanonicalBook> = BTreeMap::new();
    for raw in &raw_books {
        match convert::convert_book(raw) {
            Ok((book_id, book)) => {
                // a later book resolving to an id already recorded
                // replaces the earlier one
                books.insert(book_id, book);
            }
            Err(e) => {
                logger::warn(&format!("skipping book '{}': {}", raw.name, e));
                summary.books_skipped += 1;
            }
        }
    }

    write_output(output_root, &books)?;
    summary.books_written = books.len();

    logger::info(&format!("conversion finished: {}", summary));
    Ok(summary)
}

fn load_single_file(path: &Path) -> Result<Vec<RawBook>> {
    let content = merge::read_to_string(path)?;

    let kind = formats::detect(path, &content).ok_or_else(|| ConvertError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    formats::parser_for(kind)
        .parse(&content)
        .map_err(|e| ConvertError::MalformedSource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn write_output(output_root: &Path, books: &BTreeMap<String, CanonicalBook>) -> Result<()> {
    let books_dir = output_root.join("books");
    fs::create_dir_all(&books_dir).map_err(|e| ConvertError::io(&books_dir, e))?;

    for (book_id, book) in books {
        let path = books_dir.join(format!("{}.json", book_id));
        let json = serde_json::to_string_pretty(book)?;
        fs::write(&path, json).map_err(|e| ConvertError::io(&path, e))?;
    }

    let manifest = convert::build_manifest(books);
    let manifest_path = output_root.join("manifest.json");
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&manifest_path, json).map_err(|e| ConvertError::io(&manifest_path, e))?;

    Ok(())
}
