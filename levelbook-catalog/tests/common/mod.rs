//! Shared fixtures for catalog tests.

#![allow(dead_code)]

use levelbook_catalog::Catalog;
use levelbook_storage::{KvLevelStore, MemoryStore};
use levelbook_types::{Category, FixedClock, IdClock, Level, LevelFields, LevelId, Rating};
use std::rc::Rc;

pub type TestCatalog = Catalog<KvLevelStore<Rc<MemoryStore>>>;

/// Opens an empty catalog over shared memory, with ids starting at `start`.
pub fn empty_catalog(start: u64) -> (TestCatalog, Rc<MemoryStore>) {
    let kv = Rc::new(MemoryStore::new());
    let catalog = Catalog::open_with_ids(
        KvLevelStore::new(Rc::clone(&kv)),
        IdClock::new(FixedClock::new(start)),
    )
    .unwrap();
    (catalog, kv)
}

pub fn level(id: u64, name: &str, creator: &str, category: Category, difficulty: &str) -> Level {
    Level {
        id: LevelId::new(id),
        name: name.into(),
        creator: creator.into(),
        category,
        difficulty: difficulty.into(),
        star_rating: None,
        rating: Rating::None,
        tags: Vec::new(),
    }
}

pub fn bloodbath_fields() -> LevelFields {
    LevelFields::new("Bloodbath", "Riot", Category::Demon, "extreme")
}

/// One level per (category, difficulty) combination.
pub fn every_combination() -> Vec<Level> {
    let mut levels = Vec::new();
    let mut id = 1;
    for (category, codes) in [
        (Category::Demon, &["extreme", "insane", "hard", "medium", "easy"][..]),
        (Category::Rated, &["insane", "harder", "hard", "normal", "easy", "auto"][..]),
        (Category::Unrated, &["insane", "harder", "hard", "normal", "easy", "auto"][..]),
    ] {
        for code in codes {
            levels.push(level(id, &format!("{category}-{code}"), "c", category, code));
            id += 1;
        }
    }
    levels
}

pub fn ids(levels: &[&Level]) -> Vec<u64> {
    levels.iter().map(|l| l.id.get()).collect()
}
