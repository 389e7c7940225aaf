use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::resolver::normalize;
use crate::types::BookName;

/// Display-name variants for one canonical book. Static data, loaded once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub normal: &'static str,
    pub long: &'static str,
    pub abbrev: &'static str,
}

impl From<&BookEntry> for BookName {
    fn from(entry: &BookEntry) -> Self {
        BookName {
            normal: entry.normal.to_string(),
            long: entry.long.to_string(),
            abbrev: entry.abbrev.to_string(),
        }
    }
}

// Canonical ids are lowercase USFM book codes. Declaration order matters:
// the resolver's substring fallback returns the first entry in this order.
#[rustfmt::skip]
const BOOK_TABLE: &[(&str, &str, &str, &str)] = &[
    ("1ch", "1 Crónicas",       "1 Crónicas",       "1 Crón"),
    ("1co", "1 Corintios",      "1 Corintios",      "1 Cori"),
    ("1jn", "1 Juan",           "1 Juan",           "1 Juan"),
    ("1ki", "1 Reyes",          "1 Reyes",          "1 Reye"),
    ("1pe", "1 Pedro",          "1 Pedro",          "1 Pedr"),
    ("1sa", "1 Samuel",         "1 Samuel",         "1 Samu"),
    ("1th", "1 Tesalonicenses", "1 Tesalonicenses", "1 Tesa"),
    ("1ti", "1 Timoteo",        "1 Timoteo",        "1 Timo"),
    ("2ch", "2 Crónicas",       "2 Crónicas",       "2 Crón"),
    ("2co", "2 Corintios",      "2 Corintios",      "2 Cori"),
    ("2jn", "2 Juan",           "2 Juan",           "2 Juan"),
    ("2ki", "2 Reyes",          "2 Reyes",          "2 Reye"),
    ("2pe", "2 Pedro",          "2 Pedro",          "2 Pedr"),
    ("2sa", "2 Samuel",         "2 Samuel",         "2 Samu"),
    ("2th", "2 Tesalonicenses", "2 Tesalonicenses", "2 Tesa"),
    ("2ti", "2 Timoteo",        "2 Timoteo",        "2 Timo"),
    ("3jn", "3 Juan",           "3 Juan",           "3 Juan"),
    ("act", "Hechos",           "Hechos",           "Hechos"),
    ("amo", "Amós",             "Amós",             "Amós"),
    ("col", "Colosenses",       "Colosenses",       "Colose"),
    ("dan", "Daniel",           "Daniel",           "Daniel"),
    ("deu", "Deuteronomio",     "Deuteronomio",     "Deuter"),
    ("ecc", "Eclesiastés",      "Eclesiastés",      "Eclesi"),
    ("eph", "Efesios",          "Efesios",          "Efesio"),
    ("est", "Ester",            "Ester",            "Ester"),
    ("exo", "Éxodo",            "Éxodo",            "Éxodo"),
    ("ezk", "Ezequiel",         "Ezequiel",         "Ezequi"),
    ("ezr", "Esdras",           "Esdras",           "Esdras"),
    ("gal", "Gálatas",          "Gálatas",          "Gálata"),
    ("gen", "Génesis",          "Génesis",          "Génesi"),
    ("hab", "Habacuc",          "Habacuc",          "Habacu"),
    ("hag", "Hageo",            "Hageo",            "Hageo"),
    ("heb", "Hebreos",          "Hebreos",          "Hebreo"),
    ("hos", "Oseas",            "Oseas",            "Oseas"),
    ("isa", "Isaías",           "Isaías",           "Isaías"),
    ("jas", "Santiago",         "Santiago",         "Santia"),
    ("jdg", "Jueces",           "Jueces",           "Jueces"),
    ("jer", "Jeremías",         "Jeremías",         "Jeremí"),
    ("jhn", "Juan",             "Juan",             "Juan"),
    ("job", "Job",              "Job",              "Job"),
    ("jol", "Joel",             "Joel",             "Joel"),
    ("jon", "Jonás",            "Jonás",            "Jonás"),
    ("jos", "Josué",            "Josué",            "Josué"),
    ("jud", "Judas",            "Judas",            "Judas"),
    ("lam", "Lamentaciones",    "Lamentaciones",    "Lament"),
    ("lev", "Levítico",         "Levítico",         "Levíti"),
    ("luk", "Lucas",            "Lucas",            "Lucas"),
    ("mal", "Malaquías",        "Malaquías",        "Malaqu"),
    ("mat", "Mateo",            "Mateo",            "Mateo"),
    ("mic", "Miqueas",          "Miqueas",          "Miquea"),
    ("mrk", "Marcos",           "Marcos",           "Marcos"),
    ("nam", "Nahum",            "Nahum",            "Nahum"),
    ("neh", "Nehemías",         "Nehemías",         "Nehemí"),
    ("num", "Números",          "Números",          "Número"),
    ("oba", "Abdías",           "Abdías",           "Abdías"),
    ("phm", "Filemón",          "Filemón",          "Filemó"),
    ("php", "Filipenses",       "Filipenses",       "Filipe"),
    ("pro", "Proverbios",       "Proverbios",       "Prover"),
    ("psa", "Salmos",           "Salmos",           "Salmos"),
    ("rev", "Apocalipsis",      "Apocalipsis",      "Apocal"),
    ("rom", "Romanos",          "Romanos",          "Romano"),
    ("rut", "Rut",              "Rut",              "Rut"),
    ("sng", "Cantares",         "Cantares",         "Cantar"),
    ("tit", "Tito",             "Tito",             "Tito"),
    ("zec", "Zacarías",         "Zacarías",         "Zacarí"),
    ("zep", "Sofonías",         "Sofonías",         "Sofoní"),
];

lazy_static! {
    /// The canonical book table: id → display-name variants.
    pub static ref BOOK_MAP: IndexMap<&'static str, BookEntry> = {
        let map: IndexMap<&'static str, BookEntry> = BOOK_TABLE
            .iter()
            .map(|&(id, normal, long, abbrev)| {
                (id, BookEntry { normal, long, abbrev })
            })
            .collect();

        // Table invariant: no two long names collapse to the same
        // normalized form, otherwise resolution would be ambiguous.
        let mut seen = std::collections::HashSet::new();
        for (id, entry) in &map {
            assert!(
                seen.insert(normalize(entry.long)),
                "duplicate normalized long name for book id '{}'",
                id
            );
        }

        map
    };
}

/// Maps a USFM/imp book code (e.g. "GEN", "1CO") to its display name.
/// Canonical ids double as lowercase USFM codes.
pub fn code_to_name(code: &str) -> Option<&'static str> {
    BOOK_MAP.get(code.to_lowercase().as_str()).map(|e| e.long)
}
