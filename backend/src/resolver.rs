use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::book_map::{BookEntry, BOOK_MAP};
use crate::logger;
use crate::types::ConvertError;

/// Canonicalizes a name for matching: lowercase, NFD-decompose and drop
/// the combining marks, then drop all whitespace.
///
/// "Génesis" → "genesis", "1 Corintios" → "1corintios". Idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .filter(|c| !c.is_whitespace())
        .collect()
}

lazy_static! {
    // "1corintios", "2reyes": a book-sequence digit glued to a partial name.
    static ref RE_NUMBERED_BOOK: Regex = Regex::new(r"^([1-3])(.+)$").unwrap();
}

/// Resolves a free-text book name to its canonical id and table entry.
///
/// Matching runs through four strict-priority tiers, returning at the
/// first hit:
///
/// 1. exact long-name match, case-insensitive, diacritics intact;
/// 2. equality after [`normalize`] folding;
/// 3. numeric-prefix match: a leading digit 1-3 plus a partial name,
///    matched against ids with the same digit;
/// 4. normalized-substring fallback, first table entry in declaration
///    order wins.
pub fn resolve(name: &str) -> Result<(&'static str, &'static BookEntry), ConvertError> {
    let map: &'static IndexMap<&'static str, BookEntry> = &BOOK_MAP;
    let lower = name.trim().to_lowercase();

    for (id, entry) in map.iter() {
        if entry.long.to_lowercase() == lower {
            return Ok((*id, entry));
        }
    }

    let folded = normalize(name);

    for (id, entry) in map.iter() {
        if normalize(entry.long) == folded {
            return Ok((*id, entry));
        }
    }

    if let Some(caps) = RE_NUMBERED_BOOK.captures(&folded) {
        let digit = &caps[1];
        let rest = &caps[2];
        for (id, entry) in map.iter() {
            if !id.starts_with(digit) {
                continue;
            }
            if let Some(stripped) = normalize(entry.long).strip_prefix(digit) {
                if stripped.starts_with(rest) {
                    return Ok((*id, entry));
                }
            }
        }
    }

    // The fallback tier is inherently ambiguous; an empty folded name
    // would be a substring of everything, so it never reaches here.
    if !folded.is_empty() {
        let mut hits = map
            .iter()
            .filter(|(_, entry)| normalize(entry.long).contains(&folded));

        if let Some((id, entry)) = hits.next() {
            let also: Vec<&str> = hits.map(|(id, _)| *id).collect();
            if !also.is_empty() {
                logger::warn(&format!(
                    "ambiguous book name '{}': resolved to '{}', also matches {:?}",
                    name, id, also
                ));
            }
            return Ok((*id, entry));
        }
    }

    Err(ConvertError::UnrecognizedBookName {
        name: name.to_string(),
    })
}
