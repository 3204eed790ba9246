//! # Quire CLI
//!
//! Command-line front end for the cost engine. Estimates one book from
//! flags or a batch of books from a file, and lists the reference tables.

mod cli;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quire_core::calculations::{calculate, calculate_batch, BatchFailure, BatchPolicy, BookJobInput, BookJobResult};
use quire_core::errors::CostError;
use quire_core::pricing::PricingProfile;
use quire_core::reference::{Currency, ReferenceCatalog, ShippingRegion};

use cli::{Cli, Commands, ReferenceTable};

fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quire_core=debug,quire=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    if let Err(err) = run(&cli) {
        report_error(&err, cli.json);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Reference { table } => print_reference(*table, cli.json),
        Commands::Estimate(args) => {
            let profile = resolve_profile(cli)?;
            let currency = display_currency(cli)?;

            let input = BookJobInput::from(args.clone());
            let result = calculate(&input, &profile)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result, currency);
            }
            Ok(())
        }
        Commands::Batch { input, collect_all } => {
            let profile = resolve_profile(cli)?;
            let currency = display_currency(cli)?;

            let books = read_batch_file(input)?;
            let policy = if *collect_all { BatchPolicy::CollectAll } else { BatchPolicy::FailFast };
            tracing::info!(count = books.len(), ?policy, "Estimating batch");

            let results = calculate_batch(&books, &profile, policy)?;
            if cli.json {
                let body = serde_json::json!({ "count": results.len(), "results": results });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                for (i, result) in results.iter().enumerate() {
                    println!("Book #{}", i + 1);
                    print_result(result, currency);
                    println!();
                }
            }
            Ok(())
        }
    }
}

/// Built-in or file profile, optionally re-rated for a shipping region
fn resolve_profile(cli: &Cli) -> Result<PricingProfile> {
    let profile = match &cli.profile_file {
        Some(path) => PricingProfile::load(path)?,
        None => PricingProfile::builtin(&cli.profile)?,
    };
    profile.validate()?;
    tracing::debug!(profile = %profile.name, variant = %profile.variant(), "Using pricing profile");

    match cli.region.as_deref() {
        Some(key) => Ok(profile.with_shipping_region(ShippingRegion::by_key(key)?)),
        None => Ok(profile),
    }
}

fn display_currency(cli: &Cli) -> Result<Option<&'static Currency>> {
    Ok(cli.currency.as_deref().map(Currency::by_code).transpose()?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchFile {
    List(Vec<BookJobInput>),
    Table { books: Vec<BookJobInput> },
}

fn read_batch_file(path: &Path) -> Result<Vec<BookJobInput>> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    parse_batch(&contents, path.extension().and_then(|e| e.to_str()))
        .with_context(|| format!("Cannot parse {}", path.display()))
}

fn parse_batch(contents: &str, extension: Option<&str>) -> Result<Vec<BookJobInput>> {
    let file: BatchFile = match extension {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => toml::from_str(contents).map_err(CostError::from)?,
        Some(ext) if ext.eq_ignore_ascii_case("json") => serde_json::from_str(contents).map_err(CostError::from)?,
        _ => bail!("Batch file must have a .json or .toml extension"),
    };
    Ok(match file {
        BatchFile::List(books) | BatchFile::Table { books } => books,
    })
}

fn print_result(result: &BookJobResult, currency: Option<&Currency>) {
    println!("═══════════════════════════════════════");
    println!("  BOOK ESTIMATE ({})", result.profile);
    println!("═══════════════════════════════════════");
    println!();
    println!("Job:");
    println!("  Pages:      {} ({} booklets)", result.page_count, result.booklets);
    println!(
        "  Sheet:      {} ({:.2} m x {:.2} m)",
        result.reference_paper_size, result.sheet_length_m, result.sheet_width_m
    );
    if let Some(trim) = &result.final_trim_size {
        match result.size_multiplier {
            Some(m) => println!("  Trim size:  {} (x{})", trim, m),
            None => println!("  Trim size:  {}", trim),
        }
    }
    if let Some(cover) = &result.cover_type {
        println!("  Cover:      {}", cover);
    }
    println!("  Print run:  {} copies, {} color(s)", result.print_run, result.color_count);
    println!();
    println!("Costs (whole run):");
    println!("  Paper:      {:.2}", result.paper_cost);
    println!("  Printing:   {:.2}", result.printing_cost);
    println!("  Plates:     {:.2}", result.plate_cost);
    println!("  Folding:    {:.2}", result.folding_cost);
    println!("  Shipping:   {:.2}", result.shipping_cost);
    println!();
    println!("Per copy:");
    println!("  Without cover: {:.2}", result.unit_cost_no_cover);
    println!("  With cover:    {:.2}", result.unit_cost_with_cover);
    println!("═══════════════════════════════════════");
    println!("  PRICE: {:.2} per copy, {:.2} total", result.final_price, result.total_job_price());
    if let Some(currency) = currency {
        println!(
            "         {} per copy, {} total",
            currency.format(currency.convert_from_usd(result.final_price)),
            currency.format(currency.convert_from_usd(result.total_job_price()))
        );
    }
    println!("═══════════════════════════════════════");
}

fn print_reference(table: Option<ReferenceTable>, json: bool) -> Result<()> {
    let catalog = ReferenceCatalog::get();
    let wants = |t: ReferenceTable| table.is_none() || table == Some(t);

    if json {
        let value = match table {
            None => serde_json::to_value(catalog)?,
            Some(ReferenceTable::Paper) => serde_json::to_value(&catalog.paper_sizes)?,
            Some(ReferenceTable::Trim) => serde_json::to_value(&catalog.trim_sizes)?,
            Some(ReferenceTable::Covers) => serde_json::to_value(&catalog.cover_types)?,
            Some(ReferenceTable::Currencies) => serde_json::to_value(&catalog.currencies)?,
            Some(ReferenceTable::Regions) => serde_json::to_value(&catalog.shipping_regions)?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if wants(ReferenceTable::Paper) {
        println!("Paper sizes (m):");
        for size in &catalog.paper_sizes {
            println!("  {}", size);
        }
        println!();
    }
    if wants(ReferenceTable::Trim) {
        println!("Trim sizes (cm):");
        for size in &catalog.trim_sizes {
            println!("  {:<10} {:<9} x{}", size.name, size.family.display_name(), size.multiplier);
        }
        println!();
    }
    if wants(ReferenceTable::Covers) {
        println!("Cover types:");
        for cover in &catalog.cover_types {
            let [low, mid, high] = cover.price_tiers;
            println!("  {:<10} {:<8} {:.2} / {:.2} / {:.2}", cover.name, cover.local_name, low, mid, high);
        }
        println!();
    }
    if wants(ReferenceTable::Currencies) {
        println!("Currencies (per USD):");
        for currency in &catalog.currencies {
            println!("  {} {:<4} {:>8.2}  {}", currency.code, currency.symbol, currency.rate, currency.name);
        }
        println!();
    }
    if wants(ReferenceTable::Regions) {
        println!("Shipping regions (per kg):");
        for region in &catalog.shipping_regions {
            println!("  {:<14} {:>5.2}  {}", region.key, region.cost_per_kg, region.local_name);
        }
    }
    Ok(())
}

fn report_error(err: &anyhow::Error, json: bool) {
    let cost = err.chain().find_map(|e| e.downcast_ref::<CostError>());
    let batch = err.chain().find_map(|e| e.downcast_ref::<BatchFailure>());

    if json {
        let body = match (batch, cost) {
            (Some(failure), _) => serde_json::json!({ "errors": failure.errors }),
            (None, Some(error)) => serde_json::json!({ "error": error }),
            (None, None) => serde_json::json!({ "error": { "message": format!("{:#}", err) } }),
        };
        println!("{}", body);
        return;
    }

    match batch {
        Some(failure) => {
            for item in &failure.errors {
                eprintln!("Error: {}", item);
            }
        }
        None => eprintln!("Error: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_BATCH: &str = r#"[
        {"page_count": 160, "reference_paper_size": "0.70 x 1.00", "final_trim_size": "17 x 24",
         "paper_weight_per_area": 80.0, "print_run": 1000, "color_count": 4, "cover_unit_price": 1.0,
         "profit_margin_percent": 20.0, "paper_price_per_ton": 900.0, "waste_units": 50, "cover_unit_count": 1},
        {"page_count": 48, "reference_paper_size": "0.57 x 0.82",
         "paper_weight_per_area": 70.0, "print_run": 500, "color_count": 1, "cover_unit_price": 0.5,
         "profit_margin_percent": 10.0, "paper_price_per_ton": 850.0, "waste_units": 0, "cover_unit_count": 2}
    ]"#;

    const TOML_BATCH: &str = r#"
[[books]]
page_count = 160
reference_paper_size = "0.70 x 1.00"
final_trim_size = "35 x 25"
paper_weight_per_area = 80.0
print_run = 1000
color_count = 4
cover_unit_price = 1.0
profit_margin_percent = 20.0
paper_price_per_ton = 900.0
waste_units = 50
cover_unit_count = 1
"#;

    #[test]
    fn test_parse_json_batch() {
        let books = parse_batch(JSON_BATCH, Some("json")).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[1].cover_unit_count, 2);
        assert_eq!(books[1].final_trim_size, None);
    }

    #[test]
    fn test_parse_toml_batch() {
        let books = parse_batch(TOML_BATCH, Some("TOML")).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].final_trim_size.as_deref(), Some("35 x 25"));

        let results = calculate_batch(&books, &PricingProfile::trim_aware(), BatchPolicy::FailFast).unwrap();
        assert_eq!(results[0].final_price, 635_714.76);
    }

    #[test]
    fn test_parse_batch_rejects_unknown_extension() {
        assert!(parse_batch(JSON_BATCH, Some("csv")).is_err());
        assert!(parse_batch(JSON_BATCH, None).is_err());
    }

    #[test]
    fn test_resolve_profile_with_region() {
        let cli = Cli::try_parse_from(["quire", "--profile", "simple", "--region", "north-africa", "reference"]).unwrap();
        let profile = resolve_profile(&cli).unwrap();
        assert_eq!(profile.shipping_cost_per_kg, 0.6);
        assert_eq!(profile.printing_cost_per_10k, 10.0);
    }

    #[test]
    fn test_resolve_profile_unknown() {
        let cli = Cli::try_parse_from(["quire", "--profile", "deluxe", "reference"]).unwrap();
        let err = resolve_profile(&cli).unwrap_err();
        assert!(matches!(err.downcast_ref::<CostError>(), Some(CostError::ProfileNotFound { .. })));
    }
}
