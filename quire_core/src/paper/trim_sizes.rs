//! Finished (trimmed) book sizes
//!
//! Each reference sheet family has a standard trim size (multiplier 1.0)
//! and sizes one or two folding steps above or below it. Paper, printing
//! and plate costs scale with the multiplier; folding and shipping do not.
//!
//! | Family   | ×0.25          | ×0.5      | ×1.0    | ×2.0      | ×4.0    |
//! |----------|----------------|-----------|---------|-----------|---------|
//! | 70 x 100 | 8 x 12, 6 x 8  | 12 x 17   | 17 x 24 | 35 x 25   | 50 x 35 |
//! | 57 x 82  | 7 x 10         | 10 x 14   | 14 x 20 | 20 x 28   | 40 x 28 |
//! | 60 x 90  | 7.5 x 11       | 11.5 x 15 | 15 x 22 | 30 x 22.5 | 45 x 30 |

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};

/// Multiplier applied when a trim size is absent or not in the table
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Reference sheet family a trim size is cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrimFamily {
    /// 0.70 x 1.00 m sheets
    #[serde(rename = "70x100")]
    F70x100,
    /// 0.57 x 0.82 m sheets
    #[serde(rename = "57x82")]
    F57x82,
    /// 0.60 x 0.90 m sheets
    #[serde(rename = "60x90")]
    F60x90,
}

impl TrimFamily {
    /// All families for UI selection
    pub const ALL: [TrimFamily; 3] = [TrimFamily::F70x100, TrimFamily::F57x82, TrimFamily::F60x90];

    /// The reference sheet this family is cut from
    pub fn reference_sheet(&self) -> &'static str {
        match self {
            TrimFamily::F70x100 => "0.70 x 1.00",
            TrimFamily::F57x82 => "0.57 x 0.82",
            TrimFamily::F60x90 => "0.60 x 0.90",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TrimFamily::F70x100 => "70 x 100",
            TrimFamily::F57x82 => "57 x 82",
            TrimFamily::F60x90 => "60 x 90",
        }
    }
}

impl std::fmt::Display for TrimFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A named finished size and its cost multiplier relative to the family's
/// standard size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimSize {
    /// Name as submitted by the order form (e.g., "17 x 24", in cm)
    pub name: String,
    /// Family the size belongs to
    pub family: TrimFamily,
    /// Multiplier on paper, printing and plate costs
    pub multiplier: f64,
}

impl TrimSize {
    pub fn new(name: impl Into<String>, family: TrimFamily, multiplier: f64) -> Self {
        TrimSize {
            name: name.into(),
            family,
            multiplier,
        }
    }

    /// True for the family's standard size
    pub fn is_identity(&self) -> bool {
        self.multiplier == DEFAULT_MULTIPLIER
    }
}

/// Built-in trim sizes: (name, family, multiplier)
pub const BUILTIN_TRIM_SIZES: [(&str, TrimFamily, f64); 16] = [
    // 70x100 family
    ("17 x 24", TrimFamily::F70x100, 1.0),
    ("35 x 25", TrimFamily::F70x100, 2.0),
    ("50 x 35", TrimFamily::F70x100, 4.0),
    ("12 x 17", TrimFamily::F70x100, 0.5),
    ("8 x 12", TrimFamily::F70x100, 0.25),
    ("6 x 8", TrimFamily::F70x100, 0.25),
    // 57x82 family
    ("14 x 20", TrimFamily::F57x82, 1.0),
    ("20 x 28", TrimFamily::F57x82, 2.0),
    ("40 x 28", TrimFamily::F57x82, 4.0),
    ("10 x 14", TrimFamily::F57x82, 0.5),
    ("7 x 10", TrimFamily::F57x82, 0.25),
    // 60x90 family
    ("15 x 22", TrimFamily::F60x90, 1.0),
    ("30 x 22.5", TrimFamily::F60x90, 2.0),
    ("45 x 30", TrimFamily::F60x90, 4.0),
    ("11.5 x 15", TrimFamily::F60x90, 0.5),
    ("7.5 x 11", TrimFamily::F60x90, 0.25),
];

static BUILTIN_TABLE: Lazy<TrimSizeTable> = Lazy::new(|| TrimSizeTable {
    sizes: BUILTIN_TRIM_SIZES
        .iter()
        .map(|(name, family, multiplier)| TrimSize::new(*name, *family, *multiplier))
        .collect(),
});

/// Lookup table from trim size name to cost multiplier.
///
/// Insertion order is kept for display; lookups are by exact name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TrimSize>", into = "Vec<TrimSize>")]
pub struct TrimSizeTable {
    sizes: Vec<TrimSize>,
}

impl TrimSizeTable {
    /// Build a table, rejecting duplicate names and unusable multipliers.
    pub fn new(sizes: Vec<TrimSize>) -> CostResult<Self> {
        let mut seen = BTreeSet::new();
        for size in &sizes {
            if !size.multiplier.is_finite() || size.multiplier <= 0.0 {
                return Err(CostError::config(format!(
                    "Trim size '{}' has invalid multiplier {}",
                    size.name, size.multiplier
                )));
            }
            if !seen.insert(size.name.as_str()) {
                return Err(CostError::config(format!("Duplicate trim size '{}'", size.name)));
            }
        }
        Ok(TrimSizeTable { sizes })
    }

    /// The built-in table shared by all trim-aware profiles
    pub fn builtin() -> &'static TrimSizeTable {
        &BUILTIN_TABLE
    }

    /// Find a trim size by exact name
    pub fn get(&self, name: &str) -> Option<&TrimSize> {
        self.sizes.iter().find(|s| s.name == name)
    }

    /// Multiplier for an optional trim size name; absent or unknown → 1.0
    pub fn multiplier_for(&self, name: Option<&str>) -> f64 {
        name.and_then(|n| self.get(n))
            .map(|s| s.multiplier)
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    /// All sizes in table order
    pub fn sizes(&self) -> &[TrimSize] {
        &self.sizes
    }

    /// Sizes belonging to one family
    pub fn family(&self, family: TrimFamily) -> impl Iterator<Item = &TrimSize> {
        self.sizes.iter().filter(move |s| s.family == family)
    }

    /// The standard (×1.0) size of a family, if the table has one
    pub fn identity_for(&self, family: TrimFamily) -> Option<&TrimSize> {
        self.family(family).find(|s| s.is_identity())
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl TryFrom<Vec<TrimSize>> for TrimSizeTable {
    type Error = CostError;

    fn try_from(sizes: Vec<TrimSize>) -> CostResult<Self> {
        Self::new(sizes)
    }
}

impl From<TrimSizeTable> for Vec<TrimSize> {
    fn from(table: TrimSizeTable) -> Self {
        table.sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = TrimSizeTable::builtin();
        assert_eq!(table.len(), 16);
        assert_eq!(table.multiplier_for(Some("17 x 24")), 1.0);
        assert_eq!(table.multiplier_for(Some("35 x 25")), 2.0);
        assert_eq!(table.multiplier_for(Some("50 x 35")), 4.0);
        assert_eq!(table.multiplier_for(Some("11.5 x 15")), 0.5);
        assert_eq!(table.multiplier_for(Some("6 x 8")), 0.25);
    }

    #[test]
    fn test_unknown_or_absent_defaults_to_identity() {
        let table = TrimSizeTable::builtin();
        assert_eq!(table.multiplier_for(None), 1.0);
        assert_eq!(table.multiplier_for(Some("99 x 99")), 1.0);
        // Lookups are exact; no normalization of spacing
        assert_eq!(table.multiplier_for(Some("17x24")), 1.0);
        assert_eq!(table.multiplier_for(Some("35x25")), 1.0);
    }

    #[test]
    fn test_each_family_has_one_identity() {
        let table = TrimSizeTable::builtin();
        for family in TrimFamily::ALL {
            let identities: Vec<_> = table.family(family).filter(|s| s.is_identity()).collect();
            assert_eq!(identities.len(), 1, "family {family}");
        }
        assert_eq!(table.identity_for(TrimFamily::F57x82).unwrap().name, "14 x 20");
    }

    #[test]
    fn test_family_reference_sheets_are_standard() {
        for family in TrimFamily::ALL {
            assert!(crate::paper::STANDARD_SHEETS.contains(&family.reference_sheet()));
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = TrimSizeTable::new(vec![
            TrimSize::new("A5", TrimFamily::F70x100, 1.0),
            TrimSize::new("A5", TrimFamily::F57x82, 2.0),
        ]);
        assert!(matches!(result, Err(CostError::ConfigError { .. })));
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        assert!(TrimSizeTable::new(vec![TrimSize::new("A5", TrimFamily::F70x100, 0.0)]).is_err());
        assert!(TrimSizeTable::new(vec![TrimSize::new("A5", TrimFamily::F70x100, f64::NAN)]).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let table = TrimSizeTable::builtin();
        let json = serde_json::to_string(table).unwrap();
        assert!(json.contains("\"family\":\"70x100\""));
        let roundtrip: TrimSizeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(&roundtrip, table);
    }

    #[test]
    fn test_deserialize_rejects_invalid_tables() {
        let duplicate = r#"[
            {"name": "17 x 24", "family": "70x100", "multiplier": 1.0},
            {"name": "17 x 24", "family": "70x100", "multiplier": 2.0}
        ]"#;
        let err = serde_json::from_str::<TrimSizeTable>(duplicate).unwrap_err();
        assert!(err.to_string().contains("Duplicate trim size '17 x 24'"));

        let zero = r#"[{"name": "17 x 24", "family": "70x100", "multiplier": 0.0}]"#;
        assert!(serde_json::from_str::<TrimSizeTable>(zero).is_err());
    }
}
