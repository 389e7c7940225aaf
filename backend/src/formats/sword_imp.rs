//! SWORD "imp" line-oriented parser.
//!
//! Each line carries `<code> <chapter>:<verse> <text>`; anything else is
//! skipped. Chapters may arrive out of order, so they are collected into
//! keyed accumulators and flattened once the file is done. Output
//! chapter order equals first-encounter order, not numeric order.

use anyhow::Result;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::book_map;
use crate::formats::BookParser;
use crate::types::{RawBook, RawChapter, RawItem};

lazy_static! {
    // Gen 1:1 En el principio...
    static ref RE_IMP_LINE: Regex = Regex::new(r"^(\S+)\s+(\d+):(\d+)\s+(.*)$").unwrap();
}

pub struct SwordImpParser;

impl BookParser for SwordImpParser {
    fn parse(&self, content: &str) -> Result<Vec<RawBook>> {
        let mut books: IndexMap<String, IndexMap<u32, RawChapter>> = IndexMap::new();

        for line in content.lines() {
            let Some(caps) = RE_IMP_LINE.captures(line.trim()) else {
                continue;
            };
            let code = &caps[1];
            let chapter: u32 = caps[2].parse()?;
            let verse: u32 = caps[3].parse()?;
            let text = caps[4].trim().to_string();

            let name = book_map::code_to_name(code).unwrap_or(code).to_string();
            let chapters = books.entry(name).or_default();
            chapters
                .entry(chapter)
                .or_insert_with(|| RawChapter {
                    number: chapter,
                    items: Vec::new(),
                })
                .items
                .push(RawItem::Verse {
                    number: verse,
                    lines: vec![text],
                });
        }

        Ok(books
            .into_iter()
            .map(|(name, chapters)| RawBook {
                name,
                chapters: chapters.into_values().collect(),
            })
            .collect())
    }
}
