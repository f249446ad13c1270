//! Level entries and the form input used to build them.
//!
//! The JSON shape of [`Level`] is the persisted and shared format. It accepts
//! older records where `starRating` is an empty string and `rating` or `tags`
//! are missing.

use crate::{Error, LevelId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level partition of the catalog. Every level belongs to exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Unrated,
    Rated,
    Demon,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Unrated, Category::Rated, Category::Demon];

    /// Returns the wire code for this category.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unrated => "unrated",
            Self::Rated => "rated",
            Self::Demon => "demon",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "unrated" => Ok(Self::Unrated),
            "rated" => Ok(Self::Rated),
            "demon" => Ok(Self::Demon),
            other => Err(Error::UnknownCategory(other.to_string())),
        }
    }
}

/// Secondary badge awarded to a level. Only meaningful outside `unrated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    #[default]
    None,
    Feature,
    Epic,
    Legendary,
    Mythic,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::None,
        Rating::Feature,
        Rating::Epic,
        Rating::Legendary,
        Rating::Mythic,
    ];

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Feature => "feature",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
        }
    }

    /// Returns the badge text, or `None` for [`Rating::None`].
    #[must_use]
    pub const fn badge(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Feature => Some("Feature"),
            Self::Epic => Some("Epic"),
            Self::Legendary => Some("Legendary"),
            Self::Mythic => Some("Mythic"),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "feature" => Ok(Self::Feature),
            "epic" => Ok(Self::Epic),
            "legendary" => Ok(Self::Legendary),
            "mythic" => Ok(Self::Mythic),
            other => Err(Error::UnknownRating(other.to_string())),
        }
    }
}

/// A catalogued level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// Creation time in milliseconds; primary key and recency order.
    pub id: LevelId,
    pub name: String,
    pub creator: String,
    pub category: Category,
    /// Category-scoped difficulty code, stored verbatim.
    #[serde(default)]
    pub difficulty: String,
    /// Star sub-tier, `rated` only. An empty string is read as `None` and
    /// never written.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "is_none_or_empty"
    )]
    pub star_rating: Option<String>,
    #[serde(default, deserialize_with = "rating_or_none")]
    pub rating: Rating,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Level {
    /// Returns the rating badge text when the level's category shows one.
    #[must_use]
    pub fn rating_badge(&self) -> Option<&'static str> {
        if self.category == Category::Unrated {
            return None;
        }
        self.rating.badge()
    }
}

fn is_none_or_empty(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn rating_or_none<'de, D>(deserializer: D) -> Result<Rating, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(Rating::None),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Splits comma-separated tag input into trimmed, non-empty tags.
///
/// Duplicates and input order are kept.
#[must_use]
pub fn normalize_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Form input for creating or updating a level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFields {
    pub name: String,
    pub creator: String,
    pub category: Category,
    pub difficulty: String,
    #[serde(default)]
    pub star_rating: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    /// Comma-separated tags, as typed.
    #[serde(default)]
    pub tags: String,
}

impl LevelFields {
    /// Creates form input with the required fields set.
    pub fn new(
        name: impl Into<String>,
        creator: impl Into<String>,
        category: Category,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            creator: creator.into(),
            category,
            difficulty: difficulty.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_star_rating(mut self, stars: impl Into<String>) -> Self {
        self.star_rating = Some(stars.into());
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, csv: impl Into<String>) -> Self {
        self.tags = csv.into();
        self
    }

    /// Prefills form input from an existing level, for editing.
    #[must_use]
    pub fn from_level(level: &Level) -> Self {
        Self {
            name: level.name.clone(),
            creator: level.creator.clone(),
            category: level.category,
            difficulty: level.difficulty.clone(),
            star_rating: level.star_rating.clone(),
            rating: Some(level.rating),
            tags: level.tags.join(", "),
        }
    }

    /// Returns the normalized tag list.
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        normalize_tags(&self.tags)
    }
}
