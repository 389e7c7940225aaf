//! Parser for the prior internal JSON schema.
//!
//! The source structure already matches the intermediate shape, so this
//! is a direct structural deserialization:
//!
//! ```json
//! {"books": [{"name": "Génesis",
//!             "chapters": [{"number": 1,
//!                           "items": [{"type": "verse", "number": 1,
//!                                      "lines": ["En el principio..."]}]}]}]}
//! ```

use anyhow::Result;
use serde::Deserialize;

use crate::formats::BookParser;
use crate::logger;
use crate::types::{HeadingKind, RawBook, RawChapter, RawItem};

#[derive(Debug, Deserialize)]
struct SourceDocument {
    #[serde(default)]
    books: Vec<SourceBook>,
}

#[derive(Debug, Deserialize)]
struct SourceBook {
    name: String,
    #[serde(default)]
    chapters: Vec<SourceChapter>,
}

#[derive(Debug, Deserialize)]
struct SourceChapter {
    number: Option<u32>,
    #[serde(default)]
    items: Vec<SourceItem>,
}

#[derive(Debug, Deserialize)]
struct SourceItem {
    #[serde(rename = "type")]
    kind: String,
    number: Option<u32>,
    #[serde(default)]
    lines: Vec<String>,
}

pub struct InternalJsonParser;

impl BookParser for InternalJsonParser {
    fn parse(&self, content: &str) -> Result<Vec<RawBook>> {
        let doc: SourceDocument = serde_json::from_str(content)?;
        Ok(doc.books.into_iter().map(convert_source_book).collect())
    }
}

fn convert_source_book(book: SourceBook) -> RawBook {
    let chapters = book
        .chapters
        .into_iter()
        .enumerate()
        .map(|(i, chapter)| RawChapter {
            // sources without explicit numbers are read positionally
            number: chapter.number.unwrap_or(i as u32 + 1),
            items: chapter
                .items
                .into_iter()
                .enumerate()
                .map(|(j, item)| convert_source_item(j, item))
                .collect(),
        })
        .collect();

    RawBook {
        name: book.name,
        chapters,
    }
}

fn convert_source_item(index: usize, item: SourceItem) -> RawItem {
    let number = item.number.unwrap_or(index as u32 + 1);

    if item.kind == "verse" {
        return RawItem::Verse {
            number,
            lines: item.lines,
        };
    }

    match HeadingKind::from_type_str(&item.kind) {
        Some(kind) => RawItem::Heading {
            kind,
            lines: item.lines,
        },
        None => {
            // keep the text rather than lose it
            logger::warn(&format!(
                "unknown item type '{}', keeping its text as a verse",
                item.kind
            ));
            RawItem::Verse {
                number,
                lines: item.lines,
            }
        }
    }
}
