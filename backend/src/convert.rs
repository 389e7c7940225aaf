//! Conversion from the intermediate schema to the canonical content
//! schema, plus manifest construction.

use std::collections::BTreeMap;

use crate::resolver;
use crate::types::{
    BookName, CanonicalBook, ContentNode, Manifest, RawBook, RawChapter, RawItem, Result,
};

/// Converts one chapter item. The result is a one-element list; the
/// chapter contents are a list of such lists (reference output shape).
///
/// Heading levels collapse to two: `heading1`/`section1`/`label` → 1,
/// `heading2`/`section2` → 2.
pub fn convert_item(item: &RawItem) -> Vec<ContentNode> {
    match item {
        RawItem::Verse { lines, .. } => vec![ContentNode::Verse(lines.join(" "))],
        RawItem::Heading { kind, lines } => {
            vec![ContentNode::heading(lines.join(" "), kind.level())]
        }
    }
}

pub fn convert_chapter(chapter: &RawChapter) -> Vec<Vec<ContentNode>> {
    chapter.items.iter().map(convert_item).collect()
}

/// Resolves the book's identity and builds its canonical structure.
pub fn convert_book(raw: &RawBook) -> Result<(String, CanonicalBook)> {
    let (book_id, entry) = resolver::resolve(&raw.name)?;

    let book = CanonicalBook {
        book: book_id.to_string(),
        name: BookName::from(entry),
        contents: raw.chapters.iter().map(convert_chapter).collect(),
    };

    Ok((book_id.to_string(), book))
}

/// `book_names` keys are exactly the ids converted in this run; the
/// other two mappings are reserved for a later stage and stay empty.
pub fn build_manifest(books: &BTreeMap<String, CanonicalBook>) -> Manifest {
    Manifest {
        book_names: books
            .iter()
            .map(|(id, book)| (id.clone(), book.name.clone()))
            .collect(),
        chapter_headings: BTreeMap::new(),
        sections: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeadingKind;

    #[test]
    fn test_verse_lines_join_with_single_spaces() {
        let item = RawItem::Verse {
            number: 1,
            lines: vec!["En el principio".to_string(), "creó Dios".to_string()],
        };
        assert_eq!(
            convert_item(&item),
            vec![ContentNode::Verse("En el principio creó Dios".to_string())]
        );
    }

    #[test]
    fn test_empty_verse_is_preserved() {
        let item = RawItem::Verse {
            number: 1,
            lines: vec![String::new()],
        };
        assert_eq!(convert_item(&item), vec![ContentNode::Verse(String::new())]);
    }

    #[test]
    fn test_heading_levels() {
        let levels: Vec<u8> = [
            HeadingKind::Heading1,
            HeadingKind::Heading2,
            HeadingKind::Section1,
            HeadingKind::Section2,
            HeadingKind::Label,
        ]
        .iter()
        .map(|k| k.level())
        .collect();
        assert_eq!(levels, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_section2_converts_to_level_2_node() {
        let item = RawItem::Heading {
            kind: HeadingKind::Section2,
            lines: vec!["Subtítulo".to_string()],
        };
        let nodes = convert_item(&item);
        let ContentNode::Heading { heading } = &nodes[0] else {
            panic!("expected a heading node");
        };
        assert_eq!(heading.level, 2);
        assert_eq!(heading.node_type, "heading");
        assert_eq!(heading.contents, "Subtítulo");
    }

    #[test]
    fn test_convert_book_resolves_identity() {
        let raw = RawBook {
            name: "Juan".to_string(),
            chapters: vec![RawChapter {
                number: 1,
                items: vec![RawItem::Verse {
                    number: 1,
                    lines: vec!["En el principio era el Verbo.".to_string()],
                }],
            }],
        };

        let (id, book) = convert_book(&raw).unwrap();
        assert_eq!(id, "jhn");
        assert_eq!(book.book, "jhn");
        assert_eq!(book.name.long, "Juan");
        assert_eq!(
            book.contents[0][0],
            vec![ContentNode::Verse(
                "En el principio era el Verbo.".to_string()
            )]
        );
    }

    #[test]
    fn test_unrecognized_book_name_fails() {
        let raw = RawBook {
            name: "Zzyx".to_string(),
            chapters: vec![],
        };
        assert!(convert_book(&raw).is_err());
    }
}
