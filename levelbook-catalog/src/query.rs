//! Query state and the pure filter/sort engine.
//!
//! [`view`] computes the presentation order of a set of levels from a
//! [`Query`] snapshot. It never mutates or reorders the entries it is given;
//! the result is a fresh list of references.

use crate::CatalogError;
use levelbook_taxonomy::{DemonDifficulty, StarDifficulty};
use levelbook_types::{Category, Level};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Difficulty filter selected in the query.
///
/// The UI codes name demon difficulties separately (`insane-demon`,
/// `extreme`) from the star difficulties (`insane`), so each code maps to
/// exactly one variant here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DifficultyFilter {
    #[default]
    All,
    /// Only `unrated` levels.
    Unrated,
    /// Only `demon` levels of this difficulty.
    Demon(DemonDifficulty),
    /// `rated` and `unrated` levels with this difficulty code.
    Star(StarDifficulty),
}

impl DifficultyFilter {
    /// Every filter, in the order a UI lists them.
    #[must_use]
    pub fn options() -> Vec<DifficultyFilter> {
        let mut all = vec![Self::All, Self::Unrated];
        all.extend(DemonDifficulty::ALL.into_iter().map(Self::Demon));
        all.extend(StarDifficulty::ALL.into_iter().map(Self::Star));
        all
    }

    /// Returns the UI code for this filter.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unrated => "unrated",
            Self::Demon(DemonDifficulty::Extreme) => "extreme",
            Self::Demon(DemonDifficulty::Insane) => "insane-demon",
            Self::Demon(DemonDifficulty::Hard) => "hard-demon",
            Self::Demon(DemonDifficulty::Medium) => "medium-demon",
            Self::Demon(DemonDifficulty::Easy) => "easy-demon",
            Self::Star(d) => d.code(),
        }
    }

    /// Human-readable name, as shown on a filter chip.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unrated => "Unrated",
            Self::Demon(d) => d.label(),
            Self::Star(d) => d.name(),
        }
    }

    /// True when `level` passes this filter.
    #[must_use]
    pub fn matches(&self, level: &Level) -> bool {
        match self {
            Self::All => true,
            Self::Unrated => level.category == Category::Unrated,
            Self::Demon(d) => level.category == Category::Demon && level.difficulty == d.code(),
            Self::Star(d) => {
                matches!(level.category, Category::Rated | Category::Unrated)
                    && level.difficulty == d.code()
            }
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DifficultyFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        match code {
            "all" => return Ok(Self::All),
            "unrated" => return Ok(Self::Unrated),
            "extreme" => return Ok(Self::Demon(DemonDifficulty::Extreme)),
            _ => {}
        }
        if let Some(base) = code.strip_suffix("-demon") {
            if base != "extreme" {
                if let Ok(d) = base.parse() {
                    return Ok(Self::Demon(d));
                }
            }
        } else if let Ok(d) = code.parse() {
            return Ok(Self::Star(d));
        }
        Err(CatalogError::InvalidQuery(format!(
            "unknown difficulty filter `{code}`"
        )))
    }
}

/// Presentation order of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Most recently created first.
    #[default]
    Recent,
    /// By name, A to Z.
    Name,
    /// By creator, A to Z.
    Creator,
    /// Store order, unchanged.
    Insertion,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Recent,
        SortKey::Name,
        SortKey::Creator,
        SortKey::Insertion,
    ];

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Name => "name",
            Self::Creator => "creator",
            Self::Insertion => "insertion",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Recent => "Recent",
            Self::Name => "Name (A-Z)",
            Self::Creator => "Creator (A-Z)",
            Self::Insertion => "Insertion",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or_else(|| CatalogError::InvalidQuery(format!("unknown sort key `{code}`")))
    }
}

/// Current search, filter and sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Matched case-insensitively against name, creator and tags.
    pub search_text: String,
    pub difficulty: DifficultyFilter,
    pub sort: SortKey,
}

impl Query {
    /// Merges the fields set in `patch`.
    pub fn apply(&mut self, patch: QueryPatch) {
        if let Some(text) = patch.search_text {
            self.search_text = text;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }

    /// True when nothing narrows or reorders the default view.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Describes the active (non-default) parts of the query.
    #[must_use]
    pub fn chips(&self) -> Vec<String> {
        let mut chips = Vec::new();
        if !self.search_text.is_empty() {
            chips.push(format!("Search: \"{}\"", self.search_text));
        }
        if self.difficulty != DifficultyFilter::All {
            chips.push(format!("Difficulty: {}", self.difficulty.display_name()));
        }
        if self.sort != SortKey::Recent {
            chips.push(format!("Sort: {}", self.sort.display_name()));
        }
        chips
    }
}

/// A partial query update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
    pub search_text: Option<String>,
    pub difficulty: Option<DifficultyFilter>,
    pub sort: Option<SortKey>,
}

impl QueryPatch {
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn difficulty(mut self, filter: DifficultyFilter) -> Self {
        self.difficulty = Some(filter);
        self
    }

    #[must_use]
    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }
}

/// Filters and orders `entries` according to `query`.
///
/// Text filtering runs before the difficulty filter; sorting is stable, so
/// entries with equal keys keep their input order.
pub fn view<'a, I>(entries: I, query: &Query) -> Vec<&'a Level>
where
    I: IntoIterator<Item = &'a Level>,
{
    let needle = query.search_text.to_lowercase();
    let mut levels: Vec<&Level> = entries
        .into_iter()
        .filter(|level| matches_text(level, &needle))
        .filter(|level| query.difficulty.matches(level))
        .collect();
    sort_levels(&mut levels, query.sort);
    levels
}

/// True when the lowercase `needle` occurs in the level's searchable text.
#[must_use]
pub fn matches_text(level: &Level, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let mut haystack = String::with_capacity(level.name.len() + level.creator.len() + 1);
    haystack.push_str(&level.name);
    haystack.push(' ');
    haystack.push_str(&level.creator);
    for tag in &level.tags {
        haystack.push(' ');
        haystack.push_str(tag);
    }
    haystack.to_lowercase().contains(needle)
}

/// Stable in-place sort of a list of level references.
pub fn sort_levels(levels: &mut [&Level], key: SortKey) {
    match key {
        SortKey::Recent => levels.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::Name => levels.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::Creator => levels.sort_by(|a, b| locale_cmp(&a.creator, &b.creator)),
        SortKey::Insertion => {}
    }
}

/// Human-oriented string ordering.
///
/// Compares accent- and case-folded text first, so `"apple" < "Banana"` and
/// `"éclair"` sorts with the e's; the raw text decides what remains. Equal
/// strings compare equal.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold(a).cmp(fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
