//! # Reference Data
//!
//! Static lookup tables a front end needs to build its selection widgets:
//! reference sheets, trim sizes, cover types with price tiers, display
//! currencies and shipping regions.
//!
//! None of these tables change at runtime. The catalog is assembled once
//! and handed out by reference.
//!
//! ## Example
//!
//! ```rust
//! use quire_core::reference::ReferenceCatalog;
//!
//! let catalog = ReferenceCatalog::get();
//! assert_eq!(catalog.paper_sizes.len(), 3);
//! let json = serde_json::to_string(catalog).unwrap();
//! assert!(json.contains("\"0.70 x 1.00\""));
//! ```

pub mod covers;
pub mod currency;
pub mod shipping;

pub use covers::CoverType;
pub use currency::{Currency, CURRENCIES};
pub use shipping::{ShippingRegion, SHIPPING_REGIONS};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::paper::{TrimSize, TrimSizeTable, STANDARD_SHEETS};

/// A cover type as presented to a front end
#[derive(Debug, Clone, Serialize)]
pub struct CoverOption {
    pub cover_type: CoverType,
    pub name: &'static str,
    pub local_name: &'static str,
    pub price_tiers: [f64; 3],
}

/// Every static table bundled for serialization
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceCatalog {
    /// Reference press sheets ("L x W" in meters)
    pub paper_sizes: Vec<&'static str>,
    /// Finished sizes with their multipliers
    pub trim_sizes: Vec<TrimSize>,
    pub cover_types: Vec<CoverOption>,
    pub currencies: Vec<Currency>,
    pub shipping_regions: Vec<ShippingRegion>,
}

static CATALOG: Lazy<ReferenceCatalog> = Lazy::new(ReferenceCatalog::build);

impl ReferenceCatalog {
    /// The process-wide catalog
    pub fn get() -> &'static ReferenceCatalog {
        &CATALOG
    }

    fn build() -> ReferenceCatalog {
        ReferenceCatalog {
            paper_sizes: STANDARD_SHEETS.to_vec(),
            trim_sizes: TrimSizeTable::builtin().sizes().to_vec(),
            cover_types: CoverType::ALL
                .iter()
                .map(|c| CoverOption {
                    cover_type: *c,
                    name: c.display_name(),
                    local_name: c.local_name(),
                    price_tiers: c.price_tiers(),
                })
                .collect(),
            currencies: CURRENCIES.to_vec(),
            shipping_regions: SHIPPING_REGIONS.to_vec(),
        }
    }
}
