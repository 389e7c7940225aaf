use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the conversion pipeline.
///
/// Failures local to one file or one book are contained by the callers
/// (warn and skip in directory mode); only infrastructure failures abort
/// a whole run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported source format: {path:?}")]
    UnsupportedFormat { path: PathBuf },

    #[error("no canonical book matches name: {name}")]
    UnrecognizedBookName { name: String },

    #[error("malformed source {path:?}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Heading markers found in the source items.
///
/// Two semantically different source markers (chapter heading vs. section
/// heading) collapse to the same output level. This is the reference
/// behavior and output compatibility depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Heading1,
    Heading2,
    Section1,
    Section2,
    Label,
}

impl HeadingKind {
    pub fn from_type_str(s: &str) -> Option<Self> {
        match s {
            "heading1" => Some(HeadingKind::Heading1),
            "heading2" => Some(HeadingKind::Heading2),
            "section1" => Some(HeadingKind::Section1),
            "section2" => Some(HeadingKind::Section2),
            "label" => Some(HeadingKind::Label),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            HeadingKind::Heading1 | HeadingKind::Section1 | HeadingKind::Label => 1,
            HeadingKind::Heading2 | HeadingKind::Section2 => 2,
        }
    }
}

/// One item inside a chapter, as produced by a format parser.
///
/// `lines` carries the source's one-or-more text lines for the item;
/// joining them into a single string happens in the content converter.
/// An empty verse from the source is preserved, not dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RawItem {
    Verse { number: u32, lines: Vec<String> },
    Heading { kind: HeadingKind, lines: Vec<String> },
}

/// A chapter as found in a source file. Numbers are source-defined and
/// not assumed contiguous or sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChapter {
    pub number: u32,
    pub items: Vec<RawItem>,
}

/// A book as found in a source file, before identity resolution.
/// `name` is the free-text display name from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBook {
    pub name: String,
    pub chapters: Vec<RawChapter>,
}

/// The three display-name variants of a canonical book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookName {
    pub normal: String,
    pub long: String,
    pub abbrev: String,
}

/// One node of canonical chapter content: a bare verse string, or a
/// heading object serialized as `{"Heading": {"type": "heading", ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Verse(String),
    Heading {
        #[serde(rename = "Heading")]
        heading: HeadingNode,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub contents: String,
    pub level: u8,
}

impl ContentNode {
    pub fn heading(contents: String, level: u8) -> Self {
        ContentNode::Heading {
            heading: HeadingNode {
                node_type: "heading".to_string(),
                contents,
                level,
            },
        }
    }
}

/// A fully converted book, ready for emission as `books/<book_id>.json`.
///
/// Each converted chapter item is a one-element list inside its chapter
/// list; downstream readers index `contents[chapter][item][0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalBook {
    pub book: String,
    pub name: BookName,
    pub contents: Vec<Vec<Vec<ContentNode>>>,
}

/// The top-level index persisted as `manifest.json`.
///
/// `chapter_headings` and `sections` are reserved for a later stage and
/// always serialize as empty objects. `book_names` keys are exactly the
/// ids resolved in this run, never a superset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub book_names: BTreeMap<String, BookName>,
    pub chapter_headings: BTreeMap<String, serde_json::Value>,
    pub sections: BTreeMap<String, serde_json::Value>,
}

/// Counters surfaced at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of input files considered
    pub files_scanned: usize,
    /// Files skipped for unknown format or malformed content
    pub files_skipped: usize,
    /// Books written to the output directory
    pub books_written: usize,
    /// Books skipped because their name did not resolve
    pub books_skipped: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} books written, {} books skipped, {} files scanned, {} files skipped",
            self.books_written, self.books_skipped, self.files_scanned, self.files_skipped
        )
    }
}
