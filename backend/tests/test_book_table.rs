use std::collections::HashSet;

use escritura_backend::book_map::BOOK_MAP;
use escritura_backend::resolver::normalize;

#[test]
fn test_normalized_long_names_are_unique() {
    let mut seen = HashSet::new();
    for (id, entry) in BOOK_MAP.iter() {
        assert!(
            seen.insert(normalize(entry.long)),
            "normalized long name of '{}' collides with another entry",
            id
        );
    }
    assert_eq!(seen.len(), 66);
}

#[test]
fn test_ids_are_normalized_forms() {
    for (id, _) in BOOK_MAP.iter() {
        assert_eq!(normalize(id), *id, "id '{}' is not in normalized form", id);
    }
}

#[test]
fn test_every_long_name_resolves_to_its_own_id() {
    for (id, entry) in BOOK_MAP.iter() {
        let (resolved, _) = escritura_backend::resolver::resolve(entry.long).unwrap();
        assert_eq!(resolved, *id, "'{}' resolved to '{}'", entry.long, resolved);
    }
}
