//! The catalog engine: owns the entry collection and the query state.

use crate::card::Buckets;
use crate::query::{view, Query, QueryPatch};
use crate::{CatalogError, CatalogResult};
use levelbook_share::ShareToken;
use levelbook_storage::LevelStore;
use levelbook_types::{Category, IdClock, Level, LevelFields, LevelId, Rating};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Outcome of the most recent write to the persistence collaborator.
///
/// A failed write does not undo the in-memory change; the catalog stays
/// authoritative and the next successful write catches storage up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersistStatus {
    /// Nothing has been written yet this session.
    #[default]
    Idle,
    Saved,
    Failed(String),
}

/// Single-writer owner of the level collection.
pub struct Catalog<S: LevelStore> {
    store: S,
    levels: Vec<Level>,
    query: Query,
    ids: IdClock,
    persist_status: PersistStatus,
}

impl<S: LevelStore> Catalog<S> {
    /// Loads the catalog from `store`, issuing new ids from the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the stored collection cannot be read.
    pub fn open(store: S) -> CatalogResult<Self> {
        Self::open_with_ids(store, IdClock::system())
    }

    /// Loads the catalog from `store` with an explicit id clock.
    pub fn open_with_ids(store: S, mut ids: IdClock) -> CatalogResult<Self> {
        let levels = store.load()?;
        for level in &levels {
            ids.observe(level.id);
        }
        if let Some(dup) = first_duplicate_id(&levels) {
            warn!("stored levels contain duplicate id {dup}");
        }
        debug!("catalog opened with {} levels", levels.len());
        Ok(Self {
            store,
            levels,
            query: Query::default(),
            ids,
            persist_status: PersistStatus::Idle,
        })
    }

    /// All levels, in store order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    #[must_use]
    pub fn get(&self, id: LevelId) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn persist_status(&self) -> &PersistStatus {
        &self.persist_status
    }

    /// Creates a level with a fresh id and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when a required field is blank or
    /// the difficulty does not belong to the category.
    pub fn create(&mut self, fields: LevelFields) -> CatalogResult<Level> {
        let draft = build_level(LevelId::new(0), fields)?;
        let level = Level {
            id: self.ids.next_id(),
            ..draft
        };
        info!("created level {} ({})", level.id, level.name);
        self.levels.push(level.clone());
        self.persist();
        Ok(level)
    }

    /// Replaces every mutable field of an existing level, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, or
    /// [`CatalogError::Validation`] for invalid input.
    pub fn update(&mut self, id: LevelId, fields: LevelFields) -> CatalogResult<Level> {
        let index = self
            .levels
            .iter()
            .position(|l| l.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let level = build_level(id, fields)?;
        info!("updated level {} ({})", level.id, level.name);
        self.levels[index] = level.clone();
        self.persist();
        Ok(level)
    }

    /// Removes the level with `id`. Returns whether anything was removed;
    /// an absent id is a no-op.
    pub fn delete(&mut self, id: LevelId) -> bool {
        let before = self.levels.len();
        self.levels.retain(|l| l.id != id);
        if self.levels.len() == before {
            debug!("delete of absent level {id} ignored");
            return false;
        }
        info!("deleted level {id}");
        self.persist();
        true
    }

    /// Merges `patch` into the query state.
    pub fn set_query(&mut self, patch: QueryPatch) {
        self.query.apply(patch);
    }

    /// Resets search, filter and sort to their defaults.
    pub fn clear_query(&mut self) {
        self.query = Query::default();
    }

    /// Partitions the levels by category and applies the query to each bucket.
    #[must_use]
    pub fn render_buckets(&self) -> Buckets<'_> {
        let mut buckets = Buckets::default();
        for category in Category::ALL {
            let partition = self.levels.iter().filter(|l| l.category == category);
            *buckets.get_mut(category) = view(partition, &self.query);
        }
        buckets
    }

    /// Replaces the whole collection, as on a confirmed import.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if `levels` repeats an id; the
    /// catalog is left unchanged.
    pub fn replace_all(&mut self, levels: Vec<Level>) -> CatalogResult<usize> {
        if let Some(dup) = first_duplicate_id(&levels) {
            return Err(CatalogError::Validation(format!(
                "duplicate level id {dup}"
            )));
        }
        for level in &levels {
            self.ids.observe(level.id);
        }
        let count = levels.len();
        self.levels = levels;
        info!("replaced catalog with {count} levels");
        self.persist();
        Ok(count)
    }

    /// Encodes the whole collection as a share token.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] when the catalog is empty.
    pub fn share_token(&self) -> CatalogResult<ShareToken> {
        Ok(levelbook_share::encode(&self.levels)?)
    }

    fn persist(&mut self) {
        self.persist_status = match self.store.save(&self.levels) {
            Ok(()) => {
                debug!("persisted {} levels", self.levels.len());
                PersistStatus::Saved
            }
            Err(e) => {
                warn!("failed to persist levels: {e}");
                PersistStatus::Failed(e.to_string())
            }
        };
    }
}

impl<S: LevelStore> std::fmt::Debug for Catalog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("levels", &self.levels.len())
            .field("query", &self.query)
            .field("ids", &self.ids)
            .field("persist_status", &self.persist_status)
            .finish()
    }
}

/// Validates and normalizes form input into a level with the given id.
fn build_level(id: LevelId, fields: LevelFields) -> CatalogResult<Level> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(CatalogError::Validation("name is required".to_string()));
    }
    let creator = fields.creator.trim();
    if creator.is_empty() {
        return Err(CatalogError::Validation("creator is required".to_string()));
    }

    let category = fields.category;
    let difficulty = fields.difficulty.trim().to_string();
    let star_rating = match category {
        Category::Rated => fields
            .star_rating
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        Category::Demon | Category::Unrated => None,
    };
    levelbook_taxonomy::validate(category, &difficulty, star_rating.as_deref())?;

    let rating = match category {
        Category::Unrated => Rating::None,
        Category::Rated | Category::Demon => fields.rating.unwrap_or_default(),
    };

    Ok(Level {
        id,
        name: name.to_string(),
        creator: creator.to_string(),
        category,
        difficulty,
        star_rating,
        rating,
        tags: fields.tag_list(),
    })
}

fn first_duplicate_id(levels: &[Level]) -> Option<LevelId> {
    let mut seen = HashSet::with_capacity(levels.len());
    levels.iter().map(|l| l.id).find(|id| !seen.insert(*id))
}
