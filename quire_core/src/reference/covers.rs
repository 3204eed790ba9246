//! Cover types and their tiered unit prices
//!
//! The order form lets the user pick a cover type and then one of its
//! price tiers as the cover unit price. The calculator itself only sees
//! the resulting price; the type name is checked against [`CoverType::ALL`]
//! and carried through for display.

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};

/// Cover binding styles offered on the order form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverType {
    /// Bound hardcover (مجلد)
    Bound,
    /// Pull-out sleeve (سحاب)
    Sleeve,
    /// Cardboard (كرتونية)
    Cardboard,
    /// Art cover (فني)
    Art,
}

impl CoverType {
    /// All cover types for UI selection
    pub const ALL: [CoverType; 4] = [
        CoverType::Bound,
        CoverType::Sleeve,
        CoverType::Cardboard,
        CoverType::Art,
    ];

    /// Name as shown on the (Arabic) order form
    pub fn local_name(&self) -> &'static str {
        match self {
            CoverType::Bound => "مجلد",
            CoverType::Sleeve => "سحاب",
            CoverType::Cardboard => "كرتونية",
            CoverType::Art => "فني",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CoverType::Bound => "Bound",
            CoverType::Sleeve => "Sleeve",
            CoverType::Cardboard => "Cardboard",
            CoverType::Art => "Art",
        }
    }

    /// Unit price tiers, cheapest first
    pub fn price_tiers(&self) -> [f64; 3] {
        match self {
            CoverType::Bound => [0.5, 1.0, 1.5],
            CoverType::Sleeve => [0.75, 1.25, 1.5],
            CoverType::Cardboard => [1.0, 1.5, 2.0],
            CoverType::Art => [1.25, 1.5, 2.5],
        }
    }

    /// Parse from the English key, display name, or the form's local name
    pub fn from_str_flexible(s: &str) -> CostResult<Self> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| {
                c.local_name() == trimmed || c.display_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| CostError::invalid_input("cover_type", s, "Unknown cover type"))
    }
}

impl std::fmt::Display for CoverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
