//! cashcurve-cli: dividend income forecast for a single ticker.
//!
//! Fetches price, dividend, and history data from Polygon, then prints the
//! projected income, momentum, and risk snapshot.
//!
//! Usage:
//!   cargo run -p cashcurve-cli -- AAPL
//!   cargo run -p cashcurve-cli -- O --amount 5000 --term 10 --drip
//!   cargo run -p cashcurve-cli -- KO --growth 7.5 --days 730
//!
//! Requires POLYGON_API_KEY in the environment or a .env file.

use anyhow::Context;
use forecast_core::{EngineConfig, ForecastInput, TickerReport};
use forecast_orchestrator::ForecastOrchestrator;
use polygon_client::PolygonClient;
use std::sync::Arc;

const USAGE: &str =
    "usage: cashcurve-cli TICKER [--amount N] [--term YEARS] [--drip] [--growth PCT] [--days N]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(symbol) = args.first().filter(|a| !a.starts_with("--")) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let symbol = symbol.to_uppercase();

    let mut input = ForecastInput {
        amount_invested: 1000.0,
        term_years: 1,
        drip: false,
        growth_rate_override_percent: None,
    };
    let mut history_days: u32 = 365;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--drip" => input.drip = true,
            "--amount" => {
                i += 1;
                input.amount_invested = parse_flag(&args, i, "--amount")?;
            }
            "--term" => {
                i += 1;
                let term: f64 = parse_flag(&args, i, "--term")?;
                anyhow::ensure!(
                    term >= 0.0 && term.fract() == 0.0,
                    "--term must be a whole number of years"
                );
                input.term_years = term as u32;
            }
            "--growth" => {
                i += 1;
                input.growth_rate_override_percent = Some(parse_flag(&args, i, "--growth")?);
            }
            "--days" => {
                i += 1;
                let days: f64 = parse_flag(&args, i, "--days")?;
                anyhow::ensure!(days >= 1.0 && days.fract() == 0.0, "--days must be a positive integer");
                history_days = days as u32;
            }
            other => anyhow::bail!("unknown argument {other}\n{USAGE}"),
        }
        i += 1;
    }

    // The engines trust pre-validated non-negative inputs; this is the
    // boundary that rejects the rest.
    anyhow::ensure!(input.amount_invested >= 0.0, "--amount cannot be negative");

    let api_key = std::env::var("POLYGON_API_KEY").context("POLYGON_API_KEY must be set")?;
    let orchestrator = ForecastOrchestrator::new(Arc::new(PolygonClient::new(api_key)));

    let report = orchestrator
        .analyze_ticker(&symbol, &input, history_days)
        .await?;

    print_report(&report, &input);
    Ok(())
}

fn parse_flag(args: &[String], i: usize, name: &str) -> anyhow::Result<f64> {
    args.get(i)
        .with_context(|| format!("{name} needs a value"))?
        .parse()
        .with_context(|| format!("{name} needs a numeric value"))
}

fn print_report(report: &TickerReport, input: &ForecastInput) {
    println!(
        "{} ({})",
        report.name.as_deref().unwrap_or(&report.symbol),
        report.symbol
    );
    if let Some(sector) = &report.sector {
        println!("Sector: {sector}");
    }
    println!();

    match (&report.forecast, &report.forecast_error) {
        (Some(f), _) => {
            println!("Price: ${:.2}", f.current_price);
            println!("Dividend Yield: {:.2}%", f.normalized_dividend_yield * 100.0);
            if f.yield_was_capped {
                println!(
                    "  (yield capped at {:.0}% for realistic return projections)",
                    EngineConfig::default().yield_cap * 100.0
                );
            }
            println!();
            println!(
                "Income from ${:.2} over {} year(s){}:",
                input.amount_invested,
                input.term_years,
                if input.drip { " with DRIP" } else { "" }
            );
            println!("  Daily Income:   ${:.2}", f.daily_income);
            println!("  Weekly Income:  ${:.2}", f.weekly_income);
            println!("  Monthly Income: ${:.2}", f.monthly_income);
            println!("  Annual Income:  ${:.2}", f.annual_dividend_income);
            println!();
            println!("Estimated Shares: {:.4}", f.estimated_shares);
            println!("Growth Rate Used: {:.2}%", f.growth_rate_percent_used);
            println!("Future Price Estimate: ${:.2}", f.future_price_estimate);
            println!("Total Dividends over Term: ${:.2}", f.total_dividends_over_term);
            println!("Projected Asset Value: ${:.2}", f.projected_asset_value);
        }
        (None, Some(err)) => println!("Forecast unavailable: {err}"),
        (None, None) => {}
    }

    if let Some(m) = &report.momentum {
        println!();
        println!("Momentum: {} (RSI {:.2})", m.trend.as_str(), m.rsi_14);
        println!("  50-day MA:  ${:.2}", m.sma_50);
        if let Some(sma) = m.sma_200 {
            println!("  200-day MA: ${:.2}", sma);
        }
    }

    println!();
    println!(
        "52-Week Range: ${:.2} - ${:.2} ({:+.2}%)",
        report.risk.fifty_two_week_low,
        report.risk.fifty_two_week_high,
        report.risk.fifty_two_week_change_percent
    );
    if report.risk.beta != 0.0 {
        println!("Beta: {:.2}", report.risk.beta);
    }
}
