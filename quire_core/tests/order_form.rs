use quire_core::calculations::{calculate, calculate_batch, BatchPolicy, PAGES_PER_BOOKLET};
use quire_core::errors::CostError;
use quire_core::form::{batch_key, decode_batch, decode_single, FormFields};
use quire_core::pricing::{PricingProfile, PricingVariant};
use quire_core::reference::ShippingRegion;

fn order(pages: &str, trim: &str) -> Vec<(&'static str, String)> {
    vec![
        ("num_pages", pages.to_string()),
        ("paper_size", "0.70 x 1.00".to_string()),
        ("final_book_size", trim.to_string()),
        ("paper_weight_per_m2", "80".to_string()),
        ("num_books", "1000".to_string()),
        ("num_colors", "4".to_string()),
        ("cover_price", "1.0".to_string()),
        ("profit_margin", "20".to_string()),
        ("paper_price_per_ton", "900".to_string()),
        ("waste", "50".to_string()),
        ("num_moujalad", "1".to_string()),
    ]
}

fn batch(books: &[(&str, &str)]) -> FormFields {
    let mut fields = FormFields::new();
    for (pages, trim) in books {
        for (key, value) in order(pages, trim) {
            fields.push(batch_key(key), value);
        }
    }
    fields
}

#[test]
fn test_batch_matches_single_estimates() {
    let profile = PricingProfile::trim_aware();
    let books = [("160", "17 x 24"), ("160", "35 x 25"), ("100", "8 x 12"), ("16", "")];

    let inputs = decode_batch(&batch(&books), BatchPolicy::FailFast).unwrap();
    let results = calculate_batch(&inputs, &profile, BatchPolicy::FailFast).unwrap();
    assert_eq!(results.len(), books.len());

    for (i, (pages, trim)) in books.iter().enumerate() {
        let single = decode_single(&FormFields::from_pairs(order(pages, trim))).unwrap();
        assert_eq!(single, inputs[i]);
        assert_eq!(calculate(&single, &profile).unwrap(), results[i]);
    }

    assert_eq!(results[1].final_price, 635_714.76);
    assert_eq!(results[3].final_trim_size, None);
    assert_eq!(results[3].size_multiplier, Some(1.0));
}

#[test]
fn test_invalid_book_never_yields_partial_results() {
    let fields = batch(&[("160", "17 x 24"), ("32", "17 x 24"), ("48", "17 x 24")]);
    let mut inputs = decode_batch(&fields, BatchPolicy::FailFast).unwrap();
    inputs[2].reference_paper_size = "0.70 by 1.00".to_string();

    let failure = calculate_batch(&inputs, &PricingProfile::default(), BatchPolicy::CollectAll).unwrap_err();
    assert_eq!(failure.indices(), vec![2]);
    assert_eq!(failure.errors[0].error.field(), Some("reference_paper_size"));
}

#[test]
fn test_booklets_round_up_across_page_counts() {
    let profile = PricingProfile::simple();
    for pages in [1u32, 15, 16, 17, 31, 32, 33, 160, 161] {
        let input = decode_single(&FormFields::from_pairs(order(&pages.to_string(), ""))).unwrap();
        let result = calculate(&input, &profile).unwrap();
        assert_eq!(result.booklets, pages.div_ceil(PAGES_PER_BOOKLET), "pages = {pages}");
    }
}

#[test]
fn test_price_grows_with_margin() {
    let profile = PricingProfile::trim_aware();
    let mut last = f64::MIN;
    for margin in ["-50", "0", "10", "20", "35", "100"] {
        let mut pairs = order("160", "17 x 24");
        pairs[7] = ("profit_margin", margin.to_string());
        let input = decode_single(&FormFields::from_pairs(pairs)).unwrap();
        let price = calculate(&input, &profile).unwrap().final_price;
        assert!(price > last, "margin {margin}: {price} <= {last}");
        last = price;
    }
}

#[test]
fn test_custom_profile_with_region() {
    let toml = r#"
name = "house-rates"
printing_cost_per_10k = 8.0
folding_cost_per_1k = 2.5
plate_cost_unit = 12.0
shipping_cost_per_kg = 0.5
use_builtin_trim_sizes = true
"#;
    let profile = PricingProfile::from_toml_str(toml).unwrap();
    assert_eq!(profile.variant(), PricingVariant::TrimAware);

    let regional = profile.with_shipping_region(ShippingRegion::by_key("Europe").unwrap());
    assert_eq!(regional.shipping_cost_per_kg, 1.0);
    assert_eq!(regional.printing_cost_per_10k, profile.printing_cost_per_10k);

    let input = decode_single(&FormFields::from_pairs(order("160", "17 x 24"))).unwrap();
    let base = calculate(&input, &profile).unwrap();
    let shipped = calculate(&input, &regional).unwrap();

    assert_eq!(shipped.shipping_cost, base.shipping_cost * 2.0);
    assert_eq!(shipped.paper_cost, base.paper_cost);
    assert!(shipped.final_price > base.final_price);
    assert_eq!(shipped.profile, "house-rates@Europe");
}

#[test]
fn test_unknown_builtin_profile() {
    assert_eq!(
        PricingProfile::builtin("deluxe").unwrap_err(),
        CostError::profile_not_found("deluxe")
    );
}
