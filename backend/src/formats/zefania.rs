//! Zefania/BibleML XML parser:
//! `<XMLBIBLE><BIBLEBOOK bname="Juan"><CHAPTER cnumber="1"><VERS vnumber="1">text</VERS>...`.

use anyhow::Result;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::formats::simple_xml::numeric_attribute;
use crate::formats::{BookParser, get_attribute};
use crate::types::{RawBook, RawChapter, RawItem};

pub struct ZefaniaParser;

impl BookParser for ZefaniaParser {
    fn parse(&self, content: &str) -> Result<Vec<RawBook>> {
        let mut reader = Reader::from_reader(content.as_bytes());
        reader.config_mut().trim_text(true);

        let mut books = Vec::new();
        let mut current_book: Option<RawBook> = None;
        let mut current_chapter: Option<RawChapter> = None;
        let mut current_verse: Option<(u32, String)> = None;

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"BIBLEBOOK" => {
                        flush_chapter(&mut current_book, &mut current_chapter);
                        if let Some(book) = current_book.take() {
                            books.push(book);
                        }
                        let name = get_attribute(e, b"bname").ok_or_else(|| {
                            anyhow::anyhow!("<BIBLEBOOK> element without 'bname' attribute")
                        })?;
                        current_book = Some(RawBook {
                            name,
                            chapters: Vec::new(),
                        });
                    }
                    b"CHAPTER" => {
                        if current_book.is_some() {
                            flush_chapter(&mut current_book, &mut current_chapter);
                            current_chapter = Some(RawChapter {
                                number: numeric_attribute(e, b"cnumber", "<CHAPTER>")?,
                                items: Vec::new(),
                            });
                        }
                    }
                    b"VERS" => {
                        if current_chapter.is_some() {
                            let number = numeric_attribute(e, b"vnumber", "<VERS>")?;
                            current_verse = Some((number, String::new()));
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some((_, text)) = current_verse.as_mut() {
                        if !text.is_empty() {
                            text.push(' ');
                        }
                        text.push_str(&e.unescape()?);
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"VERS" {
                        if let Some((number, text)) = current_verse.take() {
                            if let Some(chapter) = current_chapter.as_mut() {
                                chapter.items.push(RawItem::Verse {
                                    number,
                                    lines: vec![text.trim().to_string()],
                                });
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "Zefania parse error at position {}: {}",
                        reader.buffer_position(),
                        e
                    ));
                }
                _ => {}
            }
            buf.clear();
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
