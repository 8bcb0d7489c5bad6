//! Operator tool: clean a raw catalog export, probe the remote mirror.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use phonemart_infra::catalog::clean::clean_csv;
use phonemart_infra::config::{DEFAULT_PRICES_TABLE, DEFAULT_PRODUCTS_TABLE};
use phonemart_infra::{Config, PostgresMirror};

/// Rows fetched per candidate table while probing.
const PROBE_SAMPLE: i64 = 5;

/// Exit code when no candidate table is readable.
const EXIT_NO_TABLE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "phonemart-admin", about = "Catalog maintenance commands")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalise headers and numeric columns of a raw CSV export.
    Clean {
        #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        #[arg(value_name = "OUTPUT", value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,
    },
    /// Find the first readable catalog table behind DATABASE_URL.
    Probe {
        /// Also ask a running API for its product count when no table is readable.
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    phonemart_observability::init();

    match Cli::parse().command {
        Command::Clean { input, output } => clean(input, output),
        Command::Probe { api_url } => probe(api_url).await,
    }
}

fn clean(input: PathBuf, output: PathBuf) -> Result<ExitCode> {
    let reader = File::open(&input).with_context(|| format!("failed to open {}", input.display()))?;
    let writer = File::create(&output).with_context(|| format!("failed to create {}", output.display()))?;

    let report = clean_csv(BufReader::new(reader), BufWriter::new(writer))
        .with_context(|| format!("failed to clean {}", input.display()))?;

    if report.duplicate_headers {
        eprintln!("warning: duplicate column names after normalisation");
    }
    println!("columns: {}", report.headers.join(", "));
    println!("rows written: {}", report.rows);
    if report.resized_rows > 0 {
        println!(
            "rows resized to header width: {} ({} lost cells)",
            report.resized_rows, report.truncated_rows
        );
    }
    if !report.numeric_columns.is_empty() {
        println!("numeric columns cleaned: {}", report.numeric_columns.join(", "));
    }
    println!("wrote {}", output.display());
    Ok(ExitCode::SUCCESS)
}

async fn probe(api_url: Option<String>) -> Result<ExitCode> {
    let config = Config::from_env().context("invalid configuration")?;
    let Some(mirror_config) = config.mirror else {
        eprintln!("DATABASE_URL is not set; nothing to probe");
        return api_fallback(api_url).await;
    };

    let base = PostgresMirror::connect_lazy(&mirror_config).context("failed to configure pool")?;

    for table in candidate_tables(&mirror_config.prices_table, &mirror_config.products_table) {
        let mirror = match base.with_table(&table) {
            Ok(mirror) => mirror,
            Err(e) => {
                eprintln!("{table}: skipped ({e})");
                continue;
            }
        };
        match mirror.sample(PROBE_SAMPLE).await {
            Ok(rows) => {
                println!("table {table} is accessible ({} sample rows)", rows.len());
                match rows.first() {
                    Some(row) => {
                        let columns: Vec<&str> = row.fields().keys().map(String::as_str).collect();
                        println!("columns: {}", columns.join(", "));
                    }
                    None => println!("table is empty"),
                }
                return Ok(ExitCode::SUCCESS);
            }
            Err(e) => eprintln!("{table}: {e}"),
        }
    }

    eprintln!("no candidate table is accessible");
    api_fallback(api_url).await
}

/// Report what a running API serves; the probe still counts as failed.
async fn api_fallback(api_url: Option<String>) -> Result<ExitCode> {
    if let Some(api_url) = api_url {
        let url = format!("{}/produits", api_url.trim_end_matches('/'));
        match reqwest::get(&url).await {
            Ok(res) if res.status().is_success() => {
                let products: Vec<serde_json::Value> =
                    res.json().await.with_context(|| format!("invalid JSON from {url}"))?;
                println!("{url} serves {} products", products.len());
            }
            Ok(res) => eprintln!("{url}: HTTP {}", res.status()),
            Err(e) => eprintln!("{url}: {e}"),
        }
    }
    Ok(ExitCode::from(EXIT_NO_TABLE))
}

/// Configured price table first, then the known export names, then the
/// products table; duplicates removed in order.
fn candidate_tables(prices_table: &str, products_table: &str) -> Vec<String> {
    let mut tables: Vec<String> = Vec::new();
    for table in [
        prices_table,
        DEFAULT_PRICES_TABLE,
        "tab_cleaned",
        "tab_cleaned_csv",
        products_table,
        DEFAULT_PRODUCTS_TABLE,
    ] {
        if !tables.iter().any(|t| t == table) {
            tables.push(table.to_string());
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_are_deduplicated_in_order() {
        assert_eq!(
            candidate_tables("prix_telephones", "produits"),
            vec!["prix_telephones", "tab_cleaned", "tab_cleaned_csv", "produits"]
        );
        assert_eq!(
            candidate_tables("prices", "catalog"),
            vec!["prices", "prix_telephones", "tab_cleaned", "tab_cleaned_csv", "catalog", "produits"]
        );
    }

    #[test]
    fn cli_parses_both_commands() {
        let cli = Cli::try_parse_from(["phonemart-admin", "clean", "in.csv", "out.csv"]).unwrap();
        assert!(matches!(cli.command, Command::Clean { .. }));

        let cli = Cli::try_parse_from(["phonemart-admin", "probe", "--api-url", "http://localhost:3001"])
            .unwrap();
        assert!(matches!(cli.command, Command::Probe { api_url: Some(_) }));
    }
}
