//! Regional shipping costs per kilogram

use serde::Serialize;

use crate::errors::{CostError, CostResult};

/// A shipping destination region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShippingRegion {
    /// Region key as submitted by the order form
    pub key: &'static str,
    /// Localized (Arabic) region name
    pub local_name: &'static str,
    /// Shipping cost per kilogram
    pub cost_per_kg: f64,
}

/// Supported regions, nearest first
pub const SHIPPING_REGIONS: [ShippingRegion; 9] = [
    ShippingRegion { key: "Local", local_name: "محلي", cost_per_kg: 0.1 },
    ShippingRegion { key: "Middle East", local_name: "الشرق الأوسط", cost_per_kg: 0.5 },
    ShippingRegion { key: "North Africa", local_name: "شمال أفريقيا", cost_per_kg: 0.6 },
    ShippingRegion { key: "Europe", local_name: "أوروبا", cost_per_kg: 1.0 },
    ShippingRegion { key: "Asia", local_name: "آسيا", cost_per_kg: 1.2 },
    ShippingRegion { key: "North America", local_name: "أمريكا الشمالية", cost_per_kg: 1.5 },
    ShippingRegion { key: "South America", local_name: "أمريكا الجنوبية", cost_per_kg: 1.8 },
    ShippingRegion { key: "Africa", local_name: "أفريقيا", cost_per_kg: 1.3 },
    ShippingRegion { key: "Oceania", local_name: "أوقيانوسيا", cost_per_kg: 2.0 },
];

impl ShippingRegion {
    /// Look up a region by key (case-insensitive, '-'/'_' read as spaces)
    pub fn by_key(key: &str) -> CostResult<&'static ShippingRegion> {
        let wanted = key.trim().replace(['-', '_'], " ");
        SHIPPING_REGIONS
            .iter()
            .find(|r| r.key.eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CostError::invalid_input("shipping_region", key, "Unknown shipping region"))
    }
}

impl std::fmt::Display for ShippingRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}
