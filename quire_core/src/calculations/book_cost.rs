//! # Book Production Cost
//!
//! Estimates the per-copy price of a printed book from its production
//! parameters: page count, press sheet, paper grammage and price, print
//! run, colors, cover and margin.
//!
//! ## Formula
//!
//! ```text
//! booklets        = ceil(pages / 16)
//! sheet_weight    = length * width * 500 * gsm
//! paper           = booklets * (run + waste) * sheet_weight * (price_per_ton / 1000)
//! printing        = booklets * colors * printing_cost_per_10k
//! folding         = (booklets * run / 1000) * folding_cost_per_1k
//! plates          = booklets * colors * plate_cost_unit
//! shipping        = (run / 1000) * sheet_weight * booklets * shipping_cost_per_kg
//! [trim-aware]      paper, printing, plates *= trim multiplier
//! unit_no_cover   = (paper + printing + folding + plates + shipping) / run
//! unit_with_cover = unit_no_cover + cover_price * cover_units
//! final_price     = unit_with_cover * (1 + margin / 100)
//! ```
//!
//! Folding and shipping are never scaled by the trim multiplier.
//!
//! ## Example
//!
//! ```rust
//! use quire_core::calculations::book_cost::{calculate, BookJobInput};
//! use quire_core::pricing::PricingProfile;
//!
//! let input = BookJobInput {
//!     page_count: 160,
//!     reference_paper_size: "0.70 x 1.00".to_string(),
//!     final_trim_size: None,
//!     paper_weight_per_area: 80.0,
//!     print_run: 1000,
//!     color_count: 4,
//!     cover_unit_price: 1.0,
//!     profit_margin_percent: 20.0,
//!     paper_price_per_ton: 900.0,
//!     waste_units: 50,
//!     cover_unit_count: 1,
//!     cover_type: None,
//! };
//!
//! let result = calculate(&input, &PricingProfile::simple()).unwrap();
//! assert_eq!(result.booklets, 10);
//! assert_eq!(result.printing_cost, 400.0);
//! println!("Final price: {:.2}", result.final_price);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};
use crate::paper::SheetSize;
use crate::pricing::{PricingProfile, PricingVariant};
use crate::reference::CoverType;
use crate::units::{round_to_cents, Gsm};

/// Pages printed on one folded booklet (signature)
pub const PAGES_PER_BOOKLET: u32 = 16;

/// Production parameters for one book job.
///
/// ## JSON Example
///
/// ```json
/// {
///   "page_count": 160,
///   "reference_paper_size": "0.70 x 1.00",
///   "final_trim_size": "17 x 24",
///   "paper_weight_per_area": 80.0,
///   "print_run": 1000,
///   "color_count": 4,
///   "cover_unit_price": 1.0,
///   "profit_margin_percent": 20.0,
///   "paper_price_per_ton": 900.0,
///   "waste_units": 50,
///   "cover_unit_count": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookJobInput {
    /// Number of printed pages
    pub page_count: u32,

    /// Press sheet as "<length> x <width>" in meters (e.g., "0.70 x 1.00")
    pub reference_paper_size: String,

    /// Finished size name (e.g., "17 x 24"); only used by trim-aware profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_trim_size: Option<String>,

    /// Paper grammage in grams per square meter
    pub paper_weight_per_area: f64,

    /// Number of finished copies
    pub print_run: u32,

    /// Number of printing colors
    pub color_count: u32,

    /// Price of one cover unit
    pub cover_unit_price: f64,

    /// Margin added on top of cost, in percent
    pub profit_margin_percent: f64,

    /// Paper price per metric ton
    pub paper_price_per_ton: f64,

    /// Extra sheets allowed for spoilage
    pub waste_units: u32,

    /// Cover units billed per copy (the order form's "moujalad" count).
    /// Treated as a plain multiplier on the cover unit price.
    pub cover_unit_count: u32,

    /// Cover type chosen on the order form; checked against the known
    /// cover types, then carried through for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_type: Option<String>,
}

impl BookJobInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CostResult<()> {
        if self.page_count == 0 {
            return Err(CostError::invalid_input(
                "page_count",
                self.page_count.to_string(),
                "Page count must be positive",
            ));
        }
        self.sheet_size()?;
        if !self.paper_weight_per_area.is_finite() || self.paper_weight_per_area <= 0.0 {
            return Err(CostError::invalid_input(
                "paper_weight_per_area",
                self.paper_weight_per_area.to_string(),
                "Paper weight must be a positive number (g/m²)",
            ));
        }
        if self.print_run == 0 {
            return Err(CostError::invalid_input(
                "print_run",
                self.print_run.to_string(),
                "Print run must be positive",
            ));
        }
        if self.color_count == 0 {
            return Err(CostError::invalid_input(
                "color_count",
                self.color_count.to_string(),
                "Color count must be positive",
            ));
        }
        if !self.cover_unit_price.is_finite() || self.cover_unit_price < 0.0 {
            return Err(CostError::invalid_input(
                "cover_unit_price",
                self.cover_unit_price.to_string(),
                "Cover price cannot be negative",
            ));
        }
        if !self.profit_margin_percent.is_finite() || self.profit_margin_percent < -100.0 {
            return Err(CostError::invalid_input(
                "profit_margin_percent",
                self.profit_margin_percent.to_string(),
                "Profit margin must be a number no lower than -100%",
            ));
        }
        if !self.paper_price_per_ton.is_finite() || self.paper_price_per_ton <= 0.0 {
            return Err(CostError::invalid_input(
                "paper_price_per_ton",
                self.paper_price_per_ton.to_string(),
                "Paper price must be positive",
            ));
        }
        if let Some(cover) = &self.cover_type {
            CoverType::from_str_flexible(cover)?;
        }
        Ok(())
    }

    /// Parsed reference sheet
    pub fn sheet_size(&self) -> CostResult<SheetSize> {
        SheetSize::parse_field("reference_paper_size", &self.reference_paper_size)
    }

    /// Number of 16-page booklets, rounded up
    pub fn booklets(&self) -> u32 {
        self.page_count.div_ceil(PAGES_PER_BOOKLET)
    }
}

/// Unrounded cost figures, for callers that keep computing with them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub booklets: u32,
    pub sheet_weight_per_booklet: f64,
    /// Multiplier applied to paper, printing and plates (1.0 when none)
    pub size_multiplier: f64,
    pub paper_cost: f64,
    pub printing_cost: f64,
    pub folding_cost: f64,
    pub plate_cost: f64,
    pub shipping_cost: f64,
    pub unit_cost_no_cover: f64,
    pub unit_cost_with_cover: f64,
    pub final_price: f64,
}

impl CostBreakdown {
    /// Sum of the five itemized components for the whole run
    pub fn production_cost(&self) -> f64 {
        self.paper_cost + self.printing_cost + self.folding_cost + self.plate_cost + self.shipping_cost
    }
}

/// Results from a book cost estimate.
///
/// Monetary and weight figures are rounded to 2 decimals for display; the
/// unrounded values are available through [`BookJobResult::breakdown`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "page_count": 160,
///   "reference_paper_size": "0.70 x 1.00",
///   "sheet_length_m": 0.7,
///   "sheet_width_m": 1.0,
///   "print_run": 1000,
///   "booklets": 10,
///   "sheet_weight_per_booklet": 28000.0,
///   "paper_cost": 264600000.0,
///   "printing_cost": 400.0,
///   "folding_cost": 20.0,
///   "plate_cost": 400.0,
///   "shipping_cost": 28000.0,
///   "unit_cost_no_cover": 264628.82,
///   "unit_cost_with_cover": 264629.82,
///   "final_price": 317555.78,
///   "profile": "simple",
///   "variant": "simple"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookJobResult {
    // === Echoed inputs ===
    pub page_count: u32,
    pub reference_paper_size: String,
    pub sheet_length_m: f64,
    pub sheet_width_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_trim_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_type: Option<String>,
    pub print_run: u32,
    pub color_count: u32,
    pub cover_unit_price: f64,
    pub cover_unit_count: u32,
    pub profit_margin_percent: f64,

    // === Derived ===
    /// Number of 16-page booklets
    pub booklets: u32,
    /// Paper weight of one booklet unit (grams)
    pub sheet_weight_per_booklet: f64,
    /// Trim multiplier applied; `None` when the profile has no trim step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_multiplier: Option<f64>,

    // === Itemized costs (whole run) ===
    pub paper_cost: f64,
    pub printing_cost: f64,
    pub folding_cost: f64,
    pub plate_cost: f64,
    pub shipping_cost: f64,

    // === Per copy ===
    pub unit_cost_no_cover: f64,
    pub unit_cost_with_cover: f64,
    pub final_price: f64,

    /// Pricing profile the estimate was computed with
    pub profile: String,
    pub variant: PricingVariant,

    /// Unrounded figures; the derived totals are computed from these
    breakdown: CostBreakdown,
}

impl BookJobResult {
    /// Unrounded figures behind this result
    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    /// Price of the whole run at the final unit price, rounded for display
    pub fn total_job_price(&self) -> f64 {
        round_to_cents(self.breakdown.final_price * f64::from(self.print_run))
    }

    /// Production cost of the whole run before cover and margin
    pub fn production_cost(&self) -> f64 {
        round_to_cents(self.breakdown.production_cost())
    }
}

/// Estimate the cost of one book job.
///
/// This is a pure function of the input and the profile.
///
/// # Returns
///
/// * `Ok(BookJobResult)` - Itemized costs and final price
/// * `Err(CostError)` - Structured error naming the offending field
///
/// # Example
///
/// ```rust
/// use quire_core::calculations::book_cost::{calculate, BookJobInput};
/// use quire_core::pricing::PricingProfile;
///
/// let input = BookJobInput {
///     page_count: 100,
///     reference_paper_size: "0.57 x 0.82".to_string(),
///     final_trim_size: Some("10 x 14".to_string()),
///     paper_weight_per_area: 70.0,
///     print_run: 2000,
///     color_count: 2,
///     cover_unit_price: 0.5,
///     profit_margin_percent: 15.0,
///     paper_price_per_ton: 850.0,
///     waste_units: 100,
///     cover_unit_count: 2,
///     cover_type: None,
/// };
///
/// let result = calculate(&input, &PricingProfile::trim_aware()).expect("valid input");
/// assert_eq!(result.booklets, 7);
/// assert_eq!(result.size_multiplier, Some(0.5));
/// ```
pub fn calculate(input: &BookJobInput, profile: &PricingProfile) -> CostResult<BookJobResult> {
    input.validate()?;
    let sheet = input.sheet_size()?;
    if !sheet.is_standard() {
        tracing::debug!(sheet = %sheet, "Reference sheet is not a standard press sheet");
    }

    let booklets = input.booklets();
    let b = f64::from(booklets);
    let run = f64::from(input.print_run);
    let colors = f64::from(input.color_count);
    let sheets_run = (u64::from(input.print_run) + u64::from(input.waste_units)) as f64;

    // Paper weight per booklet unit (grams)
    let sheet_weight = sheet.booklet_unit_weight(Gsm(input.paper_weight_per_area)).value();

    // === Itemized costs ===
    // Ton price is divided by 1000 before the multiply; the order form's figures depend on it
    let mut paper_cost = b * sheets_run * sheet_weight * (input.paper_price_per_ton / 1000.0);
    let mut printing_cost = b * colors * profile.printing_cost_per_10k;
    let folding_cost = (b * run / 1000.0) * profile.folding_cost_per_1k;
    let mut plate_cost = b * colors * profile.plate_cost_unit;
    let shipping_cost = (run / 1000.0) * sheet_weight * b * profile.shipping_cost_per_kg;

    // Trim step scales material costs only; folding and shipping stay as-is
    let size_multiplier = profile.trim_sizes.as_ref().map(|table| {
        let trim = input.final_trim_size.as_deref();
        if let Some(name) = trim {
            if table.get(name).is_none() {
                tracing::debug!(trim_size = name, "Unknown trim size, using multiplier 1.0");
            }
        }
        table.multiplier_for(trim)
    });
    if let Some(m) = size_multiplier {
        paper_cost *= m;
        printing_cost *= m;
        plate_cost *= m;
    }

    // === Per copy ===
    let unit_cost_no_cover =
        (paper_cost + printing_cost + folding_cost + plate_cost + shipping_cost) / run;
    let unit_cost_with_cover =
        unit_cost_no_cover + input.cover_unit_price * f64::from(input.cover_unit_count);
    let final_price = unit_cost_with_cover * (1.0 + input.profit_margin_percent / 100.0);

    let breakdown = CostBreakdown {
        booklets,
        sheet_weight_per_booklet: sheet_weight,
        size_multiplier: size_multiplier.unwrap_or(1.0),
        paper_cost,
        printing_cost,
        folding_cost,
        plate_cost,
        shipping_cost,
        unit_cost_no_cover,
        unit_cost_with_cover,
        final_price,
    };

    tracing::debug!(
        profile = %profile.name,
        pages = input.page_count,
        print_run = input.print_run,
        booklets,
        final_price,
        "Calculated book cost"
    );

    Ok(BookJobResult {
        page_count: input.page_count,
        reference_paper_size: input.reference_paper_size.clone(),
        sheet_length_m: sheet.length_m.value(),
        sheet_width_m: sheet.width_m.value(),
        final_trim_size: input.final_trim_size.clone(),
        cover_type: input.cover_type.clone(),
        print_run: input.print_run,
        color_count: input.color_count,
        cover_unit_price: round_to_cents(input.cover_unit_price),
        cover_unit_count: input.cover_unit_count,
        profit_margin_percent: input.profit_margin_percent,
        booklets,
        sheet_weight_per_booklet: round_to_cents(sheet_weight),
        size_multiplier,
        paper_cost: round_to_cents(paper_cost),
        printing_cost: round_to_cents(printing_cost),
        folding_cost: round_to_cents(folding_cost),
        plate_cost: round_to_cents(plate_cost),
        shipping_cost: round_to_cents(shipping_cost),
        unit_cost_no_cover: round_to_cents(unit_cost_no_cover),
        unit_cost_with_cover: round_to_cents(unit_cost_with_cover),
        final_price: round_to_cents(final_price),
        profile: profile.name.clone(),
        variant: profile.variant(),
        breakdown,
    })
}
