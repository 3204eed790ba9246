use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use quire_core::calculations::BookJobInput;

#[derive(Parser, Debug)]
#[command(name = "quire", version, about = "Book printing cost estimator")]
pub struct Cli {
    /// Built-in pricing profile (simple, trim-aware)
    #[arg(long, default_value = "trim-aware", global = true, env = "QUIRE_PROFILE")]
    pub profile: String,

    /// Load the pricing profile from a TOML file instead
    #[arg(long, global = true, env = "QUIRE_PROFILE_FILE")]
    pub profile_file: Option<PathBuf>,

    /// Ship at a region's per-kg rate (e.g., "Europe", "middle-east")
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Also show prices converted into this currency
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the price of one book job
    Estimate(EstimateArgs),

    /// Estimate every book listed in a JSON or TOML file
    Batch {
        /// JSON array of books, or TOML with [[books]] tables
        #[arg(short, long)]
        input: PathBuf,

        /// Report every rejected book instead of stopping at the first
        #[arg(long)]
        collect_all: bool,
    },

    /// List reference tables
    Reference {
        /// Table to show (all when omitted)
        #[arg(value_enum)]
        table: Option<ReferenceTable>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Number of printed pages
    #[arg(long)]
    pub pages: u32,

    /// Press sheet "<length> x <width>" in meters
    #[arg(long, default_value = "0.70 x 1.00")]
    pub paper_size: String,

    /// Paper grammage (g/m²)
    #[arg(long)]
    pub gsm: f64,

    /// Print run
    #[arg(long)]
    pub copies: u32,

    /// Number of printing colors
    #[arg(long, default_value = "1")]
    pub colors: u32,

    /// Price of one cover unit
    #[arg(long, default_value = "0")]
    pub cover_price: f64,

    /// Profit margin in percent
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub margin: f64,

    /// Paper price per metric ton
    #[arg(long)]
    pub paper_price: f64,

    /// Spoilage allowance in sheets
    #[arg(long, default_value = "0")]
    pub waste: u32,

    /// Cover units billed per copy
    #[arg(long, default_value = "1")]
    pub cover_units: u32,

    /// Finished size name (e.g., "17 x 24")
    #[arg(long)]
    pub trim_size: Option<String>,

    /// Cover type, shown with the result
    #[arg(long)]
    pub cover_type: Option<String>,
}

impl From<EstimateArgs> for BookJobInput {
    fn from(args: EstimateArgs) -> Self {
        BookJobInput {
            page_count: args.pages,
            reference_paper_size: args.paper_size,
            final_trim_size: args.trim_size,
            paper_weight_per_area: args.gsm,
            print_run: args.copies,
            color_count: args.colors,
            cover_unit_price: args.cover_price,
            profit_margin_percent: args.margin,
            paper_price_per_ton: args.paper_price,
            waste_units: args.waste,
            cover_unit_count: args.cover_units,
            cover_type: args.cover_type,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReferenceTable {
    Paper,
    Trim,
    Covers,
    Currencies,
    Regions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_estimate() {
        let cli = Cli::try_parse_from([
            "quire", "estimate", "--pages", "160", "--paper-size", "0.70 x 1.00", "--gsm", "80",
            "--copies", "1000", "--colors", "4", "--cover-price", "1", "--margin", "20",
            "--paper-price", "900", "--waste", "50", "--trim-size", "17 x 24",
        ])
        .unwrap();

        let Commands::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        let input = BookJobInput::from(args);
        assert_eq!(input.page_count, 160);
        assert_eq!(input.color_count, 4);
        assert_eq!(input.cover_unit_count, 1);
        assert_eq!(input.final_trim_size.as_deref(), Some("17 x 24"));
        assert_eq!(cli.profile, "trim-aware");
    }

    #[test]
    fn test_negative_margin_accepted() {
        let cli = Cli::try_parse_from([
            "quire", "estimate", "--pages", "16", "--gsm", "80", "--copies", "100",
            "--paper-price", "900", "--margin", "-10",
        ])
        .unwrap();
        let Commands::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.margin, -10.0);
    }

    #[test]
    fn test_parse_batch_and_globals() {
        let cli = Cli::try_parse_from([
            "quire", "batch", "--input", "books.toml", "--collect-all", "--profile", "simple", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.profile, "simple");
        match cli.command {
            Commands::Batch { input, collect_all } => {
                assert_eq!(input, PathBuf::from("books.toml"));
                assert!(collect_all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_reference_table() {
        let cli = Cli::try_parse_from(["quire", "reference", "currencies"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Reference { table: Some(ReferenceTable::Currencies) }
        ));
    }
}
