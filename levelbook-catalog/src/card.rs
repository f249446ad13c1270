//! Render-ready views of the catalog.

use levelbook_types::{Category, Level, LevelId};
use serde::Serialize;

/// Text shown for a bucket with no levels.
pub const EMPTY_STATE: &str = "No levels found";

/// Everything a UI needs to draw one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCard {
    pub id: LevelId,
    pub name: String,
    pub creator: String,
    pub icon: &'static str,
    pub label: String,
    /// Rating badge text, absent for `unrated` levels and `none` ratings.
    pub rating: Option<&'static str>,
    pub tags: Vec<String>,
}

impl LevelCard {
    #[must_use]
    pub fn from_level(level: &Level) -> Self {
        Self {
            id: level.id,
            name: level.name.clone(),
            creator: level.creator.clone(),
            icon: levelbook_taxonomy::icon(level),
            label: levelbook_taxonomy::label(level),
            rating: level.rating_badge(),
            tags: level.tags.clone(),
        }
    }
}

/// Per-category filtered and sorted views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets<'a> {
    pub unrated: Vec<&'a Level>,
    pub rated: Vec<&'a Level>,
    pub demon: Vec<&'a Level>,
}

impl<'a> Buckets<'a> {
    /// Returns the view for one category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[&'a Level] {
        match category {
            Category::Unrated => &self.unrated,
            Category::Rated => &self.rated,
            Category::Demon => &self.demon,
        }
    }

    pub(crate) fn get_mut(&mut self, category: Category) -> &mut Vec<&'a Level> {
        match category {
            Category::Unrated => &mut self.unrated,
            Category::Rated => &mut self.rated,
            Category::Demon => &mut self.demon,
        }
    }

    /// Iterates the buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a Level])> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Render cards for one category.
    #[must_use]
    pub fn cards(&self, category: Category) -> Vec<LevelCard> {
        self.get(category)
            .iter()
            .map(|level| LevelCard::from_level(level))
            .collect()
    }

    /// Total levels across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unrated.len() + self.rated.len() + self.demon.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
