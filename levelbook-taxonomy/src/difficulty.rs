use crate::TaxonomyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty vocabulary of the `demon` category. Demons have no star tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemonDifficulty {
    Extreme,
    Insane,
    Hard,
    Medium,
    Easy,
}

impl DemonDifficulty {
    /// All demon difficulties, hardest first.
    pub const ALL: [DemonDifficulty; 5] = [
        DemonDifficulty::Extreme,
        DemonDifficulty::Insane,
        DemonDifficulty::Hard,
        DemonDifficulty::Medium,
        DemonDifficulty::Easy,
    ];

    /// Fallback used for icons when a stored code is not recognized.
    pub const FALLBACK: DemonDifficulty = DemonDifficulty::Easy;

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Extreme => "extreme",
            Self::Insane => "insane",
            Self::Hard => "hard",
            Self::Medium => "medium",
            Self::Easy => "easy",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Extreme => "Extreme Demon",
            Self::Insane => "Insane Demon",
            Self::Hard => "Hard Demon",
            Self::Medium => "Medium Demon",
            Self::Easy => "Easy Demon",
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Extreme => "ExtremeDemon.webp",
            Self::Insane => "InsaneDemon (2).webp",
            Self::Hard => "HardDemon (2).webp",
            Self::Medium => "MediumDemon (1).webp",
            Self::Easy => "EasyDemon.webp",
        }
    }
}

impl fmt::Display for DemonDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DemonDifficulty {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.code() == s)
            .ok_or_else(|| TaxonomyError::UnknownDifficulty(s.to_string()))
    }
}

/// Difficulty vocabulary shared by the `rated` and `unrated` categories.
///
/// Each difficulty spans a fixed set of star values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarDifficulty {
    Insane,
    Harder,
    Hard,
    Normal,
    Easy,
    Auto,
}

impl StarDifficulty {
    /// All star difficulties, hardest first.
    pub const ALL: [StarDifficulty; 6] = [
        StarDifficulty::Insane,
        StarDifficulty::Harder,
        StarDifficulty::Hard,
        StarDifficulty::Normal,
        StarDifficulty::Easy,
        StarDifficulty::Auto,
    ];

    /// Fallback used for icons when a stored code is not recognized.
    pub const FALLBACK: StarDifficulty = StarDifficulty::Normal;

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Insane => "insane",
            Self::Harder => "harder",
            Self::Hard => "hard",
            Self::Normal => "normal",
            Self::Easy => "easy",
            Self::Auto => "auto",
        }
    }

    /// Generic label with the star range, e.g. `"Insane (8*-9*)"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Insane => "Insane (8*-9*)",
            Self::Harder => "Harder (6*-7*)",
            Self::Hard => "Hard (4*-5*)",
            Self::Normal => "Normal (3*)",
            Self::Easy => "Easy (2*)",
            Self::Auto => "Auto (1*)",
        }
    }

    /// Short name without the star range, e.g. `"Insane"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Insane => "Insane",
            Self::Harder => "Harder",
            Self::Hard => "Hard",
            Self::Normal => "Normal",
            Self::Easy => "Easy",
            Self::Auto => "Auto",
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Insane => "Insane.webp",
            Self::Harder => "Harder.webp",
            Self::Hard => "Hard.webp",
            Self::Normal => "Normal.webp",
            Self::Easy => "Easy.webp",
            Self::Auto => "Auto.webp",
        }
    }

    /// Star values this difficulty spans.
    #[must_use]
    pub const fn stars(&self) -> &'static [u8] {
        match self {
            Self::Insane => &[8, 9],
            Self::Harder => &[6, 7],
            Self::Hard => &[4, 5],
            Self::Normal => &[3],
            Self::Easy => &[2],
            Self::Auto => &[1],
        }
    }

    /// True when the difficulty spans more than one star value.
    #[must_use]
    pub const fn has_star_choice(&self) -> bool {
        self.stars().len() > 1
    }
}

impl fmt::Display for StarDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StarDifficulty {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.code() == s)
            .ok_or_else(|| TaxonomyError::UnknownDifficulty(s.to_string()))
    }
}
