//! Parser for the minimal "simple" XML dialect:
//! `<bible><b n="Juan"><c n="1"><v n="1">text</v></c></b></bible>`.

use anyhow::Result;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::formats::{BookParser, get_attribute};
use crate::types::{RawBook, RawChapter, RawItem};

pub struct SimpleXmlParser;

impl BookParser for SimpleXmlParser {
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
                    b"b" => {
                        flush_chapter(&mut current_book, &mut current_chapter);
                        if let Some(book) = current_book.take() {
                            books.push(book);
                        }
                        let name = get_attribute(e, b"n")
                            .ok_or_else(|| anyhow::anyhow!("<b> element without 'n' attribute"))?;
                        current_book = Some(RawBook {
                            name,
                            chapters: Vec::new(),
                        });
                    }
                    b"c" => {
                        if current_book.is_some() {
                            flush_chapter(&mut current_book, &mut current_chapter);
                            current_chapter = Some(RawChapter {
                                number: numeric_attribute(e, b"n", "<c>")?,
                                items: Vec::new(),
                            });
                        }
                    }
                    b"v" => {
                        if current_chapter.is_some() {
                            let number = numeric_attribute(e, b"n", "<v>")?;
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
                    if e.local_name().as_ref() == b"v" {
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
                        "XML parse error at position {}: {}",
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

pub(super) fn numeric_attribute(
    e: &quick_xml::events::BytesStart,
    attr: &[u8],
    element: &str,
) -> Result<u32> {
    get_attribute(e, attr)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "{} element without numeric '{}' attribute",
                element,
                String::from_utf8_lossy(attr)
            )
        })
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
    fn test_parse_single_verse() {
        let xml = r#"<bible>
            <b n="Juan">
              <c n="1">
                <v n="1">En el principio era el Verbo.</v>
              </c>
            </b>
        </bible>"#;

        let books = SimpleXmlParser.parse(xml).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Juan");
        assert_eq!(books[0].chapters[0].number, 1);
        assert_eq!(
            books[0].chapters[0].items[0],
            RawItem::Verse {
                number: 1,
                lines: vec!["En el principio era el Verbo.".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_multiple_books_and_chapters() {
        let xml = r#"<bible>
            <b n="Mateo">
              <c n="1"><v n="1">Libro de la genealogía.</v></c>
              <c n="2"><v n="1">Cuando Jesús nació.</v></c>
            </b>
            <b n="Marcos">
              <c n="1"><v n="1">Principio del evangelio.</v></c>
            </b>
        </bible>"#;

        let books = SimpleXmlParser.parse(xml).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].chapters.len(), 2);
        assert_eq!(books[1].name, "Marcos");
    }

    #[test]
    fn test_missing_numeric_attribute_is_an_error() {
        let xml = r#"<bible><b n="Juan"><c><v n="1">x</v></c></b></bible>"#;
        assert!(SimpleXmlParser.parse(xml).is_err());
    }

    #[test]
    fn test_empty_document() {
        assert!(SimpleXmlParser.parse("<bible></bible>").unwrap().is_empty());
    }
}
