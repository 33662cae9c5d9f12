//! Category Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IdError;

/// Catalog category
///
/// Each category is published as its own document (`<prefix>/<id>.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruit,
    Vegs,
    Sndfm,
    Prtn,
    Salad,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Fruit,
        Category::Vegs,
        Category::Sndfm,
        Category::Prtn,
        Category::Salad,
    ];

    /// Category selected when a view is first opened
    pub const DEFAULT: Category = Category::Salad;

    /// Document id
    pub fn id(self) -> &'static str {
        match self {
            Category::Fruit => "fruit",
            Category::Vegs => "vegs",
            Category::Sndfm => "sndfm",
            Category::Prtn => "prtn",
            Category::Salad => "salad",
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Category::Fruit => "Fruit",
            Category::Vegs => "Vegetables",
            Category::Sndfm => "Seeds & Nuts",
            Category::Prtn => "Protein",
            Category::Salad => "Salad",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| IdError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(
            "bakery".parse::<Category>(),
            Err(IdError::UnknownCategory("bakery".to_string()))
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Category::Sndfm.to_string(), "Seeds & Nuts");
        assert_eq!(Category::Vegs.to_string(), "Vegetables");
    }
}
