//! # Basket Pricing Driver
//!
//! Loads the catalog, fills one basket and prints its price breakdown.
//!
//! ## Usage
//! ```bash
//! # Price a basket using ./checkout.toml (or the default data paths)
//! cargo run -p checkout-datasource --bin price-basket -- PEN PEN PEN VOUCHER
//!
//! # Specify a config file
//! cargo run -p checkout-datasource --bin price-basket -- --config ./checkout.toml PEN MUG
//!
//! # Print the breakdown as JSON
//! cargo run -p checkout-datasource --bin price-basket -- --json PEN VOUCHER VOUCHER
//! ```
//!
//! Logging follows `RUST_LOG` (default `info,checkout=debug`).

use std::env;
use std::path::PathBuf;

use checkout_core::CheckoutService;
use checkout_datasource::{DatasourceConfig, InMemoryDatasource};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config_path: Option<PathBuf>,
    as_json: bool,
    help: bool,
    codes: Vec<String>,
}

/// Parses the arguments following the program name.
fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--json" | "-j" => options.as_json = true,
            "--help" | "-h" => options.help = true,
            code => options.codes.push(code.to_string()),
        }
    }

    Ok(options)
}

fn print_help() {
    println!("Checkout Basket Pricing");
    println!();
    println!("Usage: price-basket [OPTIONS] <PRODUCT_CODE>...");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  TOML config file (default: ./checkout.toml)");
    println!("  -j, --json           Print the breakdown as JSON");
    println!("  -h, --help           Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.help {
        print_help();
        return Ok(());
    }

    init_tracing();

    let config = DatasourceConfig::load(options.config_path.as_deref())?;
    let service = CheckoutService::new(InMemoryDatasource::load(&config)?);

    let basket_id = service.create_basket()?;
    for code in &options.codes {
        service.add_product_to_basket(&basket_id, code)?;
    }

    let breakdown = service.get_basket_breakdown(&basket_id)?;

    if options.as_json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("Basket {} (created {})", breakdown.basket_id, breakdown.created_at.to_rfc3339());
    println!("================================================");
    for line in &breakdown.lines {
        println!(
            "{:<10} x{:<4} {:>10} (promo units: {}, saved: {})",
            line.code.as_str(),
            line.amount,
            line.total.to_string(),
            line.claimed,
            line.unit_price.multiply_quantity(line.amount) - line.total,
        );
    }
    println!("------------------------------------------------");
    println!("Savings: {:>10}", breakdown.savings().to_string());
    println!("Total:   {:>10}", breakdown.total_major_units().to_string());

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
