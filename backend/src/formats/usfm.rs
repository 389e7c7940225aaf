//! Line-oriented USFM parser.
//!
//! Only the identification, chapter and verse markers are interpreted;
//! every other marker (footnotes, formatting, headings) is dropped
//! silently.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;

use crate::book_map;
use crate::formats::BookParser;
use crate::types::{RawBook, RawChapter, RawItem};

lazy_static! {
    // \id GEN Génesis
    static ref RE_BOOK_ID: Regex = Regex::new(r"^\\id\s+(\S+)").unwrap();
    // \c 12
    static ref RE_CHAPTER: Regex = Regex::new(r"^\\c\s+(\d+)").unwrap();
    // \v 3 Y dijo Dios...
    static ref RE_VERSE: Regex = Regex::new(r"^\\v\s+(\d+)\s*(.*)$").unwrap();
}

pub struct UsfmParser;

impl BookParser for UsfmParser {
    fn parse(&self, content: &str) -> Result<Vec<RawBook>> {
        let mut books = Vec::new();
        let mut current_book: Option<RawBook> = None;
        let mut current_chapter: Option<RawChapter> = None;

        for line in content.lines() {
            let line = line.trim();

            if let Some(caps) = RE_BOOK_ID.captures(line) {
                flush_chapter(&mut current_book, &mut current_chapter);
                if let Some(book) = current_book.take() {
                    books.push(book);
                }
                // unmapped codes keep the raw code as the name; the
                // identity resolver deals with it later
                let name = book_map::code_to_name(&caps[1])
                    .unwrap_or(&caps[1])
                    .to_string();
                current_book = Some(RawBook {
                    name,
                    chapters: Vec::new(),
                });
            } else if let Some(caps) = RE_CHAPTER.captures(line) {
                if current_book.is_some() {
                    flush_chapter(&mut current_book, &mut current_chapter);
                    current_chapter = Some(RawChapter {
                        number: caps[1].parse()?,
                        items: Vec::new(),
                    });
                }
            } else if let Some(caps) = RE_VERSE.captures(line) {
                // verses outside any chapter are ignored
                if let Some(chapter) = current_chapter.as_mut() {
                    chapter.items.push(RawItem::Verse {
                        number: caps[1].parse()?,
                        lines: vec![caps[2].to_string()],
                    });
                }
            }
        }

        flush_chapter(&mut current_book, &mut current_chapter);
        if let Some(book) = current_book.take() {
            books.push(book);
        }

        Ok(books)
    }
}

fn flush_chapter(book: &mut Option<RawBook>, chapter: &mut Option<RawChapter>) {
    if let Some(ch) = chapter.take() {
        if let Some(b) = book.as_mut() {
            b.chapters.push(ch);
        }
    }
}
