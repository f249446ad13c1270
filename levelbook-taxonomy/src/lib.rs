//! Difficulty taxonomy for levelbook.
//!
//! The taxonomy is fixed, externally defined data:
//! - [`DemonDifficulty`]: the `demon` vocabulary, no star tiers
//! - [`StarDifficulty`]: the `rated`/`unrated` vocabulary with star tiers
//! - label and icon resolution for a stored [`Level`]
//! - the option tables a form needs to offer valid choices
//!
//! Resolution never fails on stored data: unrecognized codes fall back to a
//! per-category default icon and to the raw code as the label. Validation of
//! new input is a separate step ([`validate`]).

mod difficulty;

pub use difficulty::{DemonDifficulty, StarDifficulty};

use levelbook_types::{Category, Level};
use serde::Serialize;

/// Icon shown for every `unrated` level.
pub const UNRATED_ICON: &str = "Unrated.webp";

/// Label shown for every `unrated` level.
pub const UNRATED_LABEL: &str = "Unrated";

/// Result type for taxonomy checks.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

/// Rejections raised when input does not fit the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("difficulty `{difficulty}` is not valid for category `{category}`")]
    DifficultyNotInCategory {
        category: Category,
        difficulty: String,
    },

    #[error("star rating `{stars}` is not valid for difficulty `{difficulty}`")]
    InvalidStarRating { difficulty: String, stars: String },
}

/// A difficulty code interpreted against its category's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Demon(DemonDifficulty),
    Star(StarDifficulty),
}

impl Difficulty {
    /// Interprets `code` in the vocabulary selected by `category`.
    ///
    /// `unrated` uses the star vocabulary, even though its display ignores it.
    #[must_use]
    pub fn resolve(category: Category, code: &str) -> Option<Self> {
        match category {
            Category::Demon => code.parse().ok().map(Self::Demon),
            Category::Rated | Category::Unrated => code.parse().ok().map(Self::Star),
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Demon(d) => d.code(),
            Self::Star(d) => d.code(),
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Demon(d) => d.label(),
            Self::Star(d) => d.label(),
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Demon(d) => d.icon(),
            Self::Star(d) => d.icon(),
        }
    }
}

/// Resolves the display label of a level.
///
/// A `rated` level with a star rating shows that value with a star glyph
/// (`"7★"`) instead of the generic range label.
#[must_use]
pub fn label(level: &Level) -> String {
    label_for(level.category, &level.difficulty, level.star_rating.as_deref())
}

/// Resolves a display label from raw classification codes.
#[must_use]
pub fn label_for(category: Category, difficulty: &str, star_rating: Option<&str>) -> String {
    if category == Category::Unrated {
        return UNRATED_LABEL.to_string();
    }
    if category == Category::Rated {
        if let Some(stars) = star_rating.filter(|s| !s.is_empty()) {
            return format!("{stars}★");
        }
    }
    match Difficulty::resolve(category, difficulty) {
        Some(d) => d.label().to_string(),
        None => difficulty.to_string(),
    }
}

/// Resolves the icon asset key of a level.
#[must_use]
pub fn icon(level: &Level) -> &'static str {
    icon_for(level.category, &level.difficulty)
}

/// Resolves an icon asset key, falling back to the category default.
#[must_use]
pub fn icon_for(category: Category, difficulty: &str) -> &'static str {
    match category {
        Category::Unrated => UNRATED_ICON,
        Category::Demon => difficulty
            .parse::<DemonDifficulty>()
            .unwrap_or(DemonDifficulty::FALLBACK)
            .icon(),
        Category::Rated => difficulty
            .parse::<StarDifficulty>()
            .unwrap_or(StarDifficulty::FALLBACK)
            .icon(),
    }
}

/// Checks that new input fits the taxonomy.
///
/// `unrated` ignores difficulty and stars. `demon` ignores stars. For `rated`
/// a star rating, when given, must be one of the difficulty's star values.
pub fn validate(
    category: Category,
    difficulty: &str,
    star_rating: Option<&str>,
) -> TaxonomyResult<()> {
    if category == Category::Unrated {
        return Ok(());
    }
    let resolved = Difficulty::resolve(category, difficulty).ok_or_else(|| {
        TaxonomyError::DifficultyNotInCategory {
            category,
            difficulty: difficulty.to_string(),
        }
    })?;

    if let (Difficulty::Star(d), Some(stars)) = (resolved, star_rating) {
        let valid = stars
            .parse::<u8>()
            .map(|s| d.stars().contains(&s))
            .unwrap_or(false);
        if !valid {
            return Err(TaxonomyError::InvalidStarRating {
                difficulty: difficulty.to_string(),
                stars: stars.to_string(),
            });
        }
    }
    Ok(())
}

/// A selectable difficulty in a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// Returns the difficulty choices for a category, hardest first.
#[must_use]
pub fn difficulty_options(category: Category) -> Vec<DifficultyOption> {
    match category {
        Category::Demon => DemonDifficulty::ALL
            .iter()
            .map(|d| DifficultyOption {
                code: d.code(),
                label: d.label(),
            })
            .collect(),
        Category::Rated | Category::Unrated => StarDifficulty::ALL
            .iter()
            .map(|d| DifficultyOption {
                code: d.code(),
                label: d.label(),
            })
            .collect(),
    }
}

/// Returns the star values to offer, if the form should show a star choice.
///
/// Only `rated` levels whose difficulty spans several star values get one.
#[must_use]
pub fn star_options(category: Category, difficulty: &str) -> Option<&'static [u8]> {
    if category != Category::Rated {
        return None;
    }
    difficulty
        .parse::<StarDifficulty>()
        .ok()
        .filter(StarDifficulty::has_star_choice)
        .map(|d| d.stars())
}

/// True when the form should offer a rating badge for the category.
#[must_use]
pub fn shows_rating(category: Category) -> bool {
    matches!(category, Category::Rated | Category::Demon)
}
