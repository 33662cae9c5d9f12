//! Supermarket Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IdError;

/// Known supermarkets
///
/// Catalog documents mark a supermarket level only by its keys, so this set
/// is closed: any key outside it is treated as another grouping level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Supermarket {
    #[serde(rename = "as")]
    Asda,
    #[serde(rename = "al")]
    Aldi,
    #[serde(rename = "ms")]
    Morrisons,
    #[serde(rename = "oc")]
    Ocado,
    #[serde(rename = "tc")]
    Tesco,
}

impl Supermarket {
    /// All supermarkets, in display order
    pub const ALL: [Supermarket; 5] = [
        Supermarket::Asda,
        Supermarket::Aldi,
        Supermarket::Morrisons,
        Supermarket::Ocado,
        Supermarket::Tesco,
    ];

    /// Document key for this supermarket
    pub fn id(self) -> &'static str {
        match self {
            Supermarket::Asda => "as",
            Supermarket::Aldi => "al",
            Supermarket::Morrisons => "ms",
            Supermarket::Ocado => "oc",
            Supermarket::Tesco => "tc",
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Supermarket::Asda => "Asda",
            Supermarket::Aldi => "Aldi",
            Supermarket::Morrisons => "Morrisons",
            Supermarket::Ocado => "Ocado",
            Supermarket::Tesco => "Tesco",
        }
    }

    /// Look up a supermarket by document key (exact match)
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Whether `id` is one of the known supermarket keys
    pub fn is_known(id: &str) -> bool {
        Self::from_id(id).is_some()
    }
}

/// Resolve a supermarket key to its display name.
///
/// Unknown keys resolve to themselves.
pub fn supermarket_display_name(id: &str) -> &str {
    match Supermarket::from_id(id) {
        Some(s) => s.name(),
        None => id,
    }
}

impl fmt::Display for Supermarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Supermarket {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| IdError::UnknownSupermarket(s.to_string()))
    }
}
