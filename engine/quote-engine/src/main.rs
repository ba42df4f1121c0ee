use anyhow::Context;
use quote_engine::{CreatorProfile, DealInputs, QuoteCalculator, RateCard};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (profile_path, deal_path) = match (args.next(), args.next()) {
        (Some(p), Some(d)) => (p, d),
        _ => {
            eprintln!("Usage: quote-engine <profile.json> <deal.json>");
            eprintln!("  QUOTE_RATE_CARD=<path> swaps the default rate card");
            std::process::exit(2);
        }
    };

    let rates = RateCard::from_env().context("Failed to load rate card")?;
    info!("Loaded rate card");

    let profile_content = std::fs::read_to_string(&profile_path)
        .with_context(|| format!("Failed to read profile file {}", profile_path))?;
    let profile: CreatorProfile = serde_json::from_str(&profile_content)
        .with_context(|| format!("Failed to parse profile file {}", profile_path))?;

    let deal_content = std::fs::read_to_string(&deal_path)
        .with_context(|| format!("Failed to read deal file {}", deal_path))?;
    let deal: DealInputs = serde_json::from_str(&deal_content)
        .with_context(|| format!("Failed to parse deal file {}", deal_path))?;

    let calculator = QuoteCalculator::new(rates);
    let quote = calculator.compute_quote(&profile, &deal);

    println!("{}", serde_json::to_string_pretty(&quote)?);
    info!(
        low = quote.low,
        standard = quote.standard,
        stretch = quote.stretch,
        "quote complete"
    );

    Ok(())
}
