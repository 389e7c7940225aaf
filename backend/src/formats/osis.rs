//! OSIS XML parser.
//!
//! Walks `div[type=book]` elements; the book's `osisID` attribute is its
//! display name. Chapter and verse numbers are the trailing numeric
//! segment of their dotted `osisID` ("Gen.1.3" → verse 3). Verse text is
//! the concatenation of the text nodes under the verse element, trimmed.

use anyhow::Result;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::formats::{BookParser, get_attribute};
use crate::types::{RawBook, RawChapter, RawItem};

pub struct OsisParser;

impl BookParser for OsisParser {
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
                    b"div" => {
                        if get_attribute(e, b"type").as_deref() == Some("book") {
                            flush_chapter(&mut current_book, &mut current_chapter);
                            if let Some(book) = current_book.take() {
                                books.push(book);
                            }
                            let name = get_attribute(e, b"osisID").unwrap_or_default();
                            current_book = Some(RawBook {
                                name,
                                chapters: Vec::new(),
                            });
                        }
                    }
                    b"chapter" => {
                        if current_book.is_some() {
                            flush_chapter(&mut current_book, &mut current_chapter);
                            // chapters without a numeric osisID segment
                            // (introductions and the like) are skipped
                            if let Some(number) =
                                get_attribute(e, b"osisID").as_deref().and_then(trailing_number)
                            {
                                current_chapter = Some(RawChapter {
                                    number,
                                    items: Vec::new(),
                                });
                            }
                        }
                    }
                    b"verse" => {
                        if current_chapter.is_some() {
                            if let Some(number) =
                                get_attribute(e, b"osisID").as_deref().and_then(trailing_number)
                            {
                                current_verse = Some((number, String::new()));
                            }
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
                    if e.local_name().as_ref() == b"verse" {
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
                        "OSIS parse error at position {}: {}",
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

/// "Gen.1.3" → 3, "Gen.1" → 1, "Gen" → None.
fn trailing_number(osis_id: &str) -> Option<u32> {
    osis_id.rsplit('.').next().and_then(|s| s.parse().ok())
}

fn flush_chapter(book: &mut Option<RawBook>, chapter: &mut Option<RawChapter>) {
    if let Some(ch) = chapter.take() {
        if let Some(b) = book.as_mut() {
            b.chapters.push(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_number() {
        assert_eq!(trailing_number("Gen.1.3"), Some(3));
        assert_eq!(trailing_number("Gen.12"), Some(12));
        assert_eq!(trailing_number("Gen"), None);
    }

    #[test]
    fn test_parse_book_chapter_verse() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <osis xmlns="http://www.bibletechnologies.net/2003/OSIS/namespace">
              <osisText osisIDWork="RVR">
                <div type="book" osisID="Gen">
                  <chapter osisID="Gen.1">
                    <verse osisID="Gen.1.1">En el principio creó Dios los cielos y la tierra.</verse>
                    <verse osisID="Gen.1.2">Y la tierra estaba desordenada y vacía.</verse>
                  </chapter>
                  <chapter osisID="Gen.2">
                    <verse osisID="Gen.2.1">Fueron, pues, acabados los cielos y la tierra.</verse>
                  </chapter>
                </div>
              </osisText>
            </osis>"#;

        let books = OsisParser.parse(xml).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Gen");
        assert_eq!(books[0].chapters.len(), 2);
        assert_eq!(books[0].chapters[1].number, 2);
        assert_eq!(
            books[0].chapters[0].items[0],
            RawItem::Verse {
                number: 1,
                lines: vec!["En el principio creó Dios los cielos y la tierra.".to_string()],
            }
        );
    }

    #[test]
    fn test_verse_text_concatenates_nested_markup() {
        let xml = r#"<osis><osisText>
            <div type="book" osisID="Jhn">
              <chapter osisID="Jhn.1">
                <verse osisID="Jhn.1.1">En el principio <w lemma="logos">era el Verbo</w> y el Verbo era con Dios.</verse>
              </chapter>
            </div>
        </osisText></osis>"#;

        let books = OsisParser.parse(xml).unwrap();
        let RawItem::Verse { lines, .. } = &books[0].chapters[0].items[0] else {
            panic!("expected a verse");
        };
        assert_eq!(
            lines[0],
            "En el principio era el Verbo y el Verbo era con Dios."
        );
    }

    #[test]
    fn test_non_book_divs_are_ignored() {
        let xml = r#"<osis><osisText>
            <div type="bookGroup">
              <div type="book" osisID="Exod">
                <chapter osisID="Exod.1">
                  <verse osisID="Exod.1.1">Estos son los nombres.</verse>
                </chapter>
              </div>
            </div>
        </osisText></osis>"#;

        let books = OsisParser.parse(xml).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Exod");
    }

    #[test]
    fn test_empty_document() {
        let books = OsisParser.parse("<osis><osisText/></osis>").unwrap();
        assert!(books.is_empty());
    }
}
