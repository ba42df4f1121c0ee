use quote_engine::{
    CpmTier, CreatorProfile, DealInputs, ExclusivityScope, ExclusivityTerm, FlatRateEstimator,
    LongFormFactor, Objective, QuoteCalculator, RateCard, RushLevel, UsageTerm,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Testing Quote Engine scenarios");

    let rates = RateCard::default();
    rates.validate()?;
    let calculator = QuoteCalculator::new(rates.clone());
    let estimator = FlatRateEstimator::new(rates);

    let profile = CreatorProfile {
        avg_long_form_views: 10_000.0,
        avg_tiktok_views: 5_000.0,
        avg_reels_views: 4_000.0,
        avg_shorts_views: 3_000.0,
        cpm_tier: CpmTier::Standard,
        custom_cpm: None,
        include_long_form: true,
        followers: 50_000.0,
    };

    // Baseline: two long-form mentions, no add-ons
    let baseline = DealInputs {
        tiktok_count: 0,
        reels_count: 0,
        shorts_count: 0,
        long_form_count: 2,
        long_form_factor: LongFormFactor::Mention,
        objective: Objective::Awareness,
        usage: None,
        whitelisting: None,
        exclusivity: None,
        rush: None,
    };
    let quote = calculator.compute_quote(&profile, &baseline);
    info!(
        "Baseline awareness deal: low {} / standard {} / stretch {} (reach {})",
        quote.low, quote.standard, quote.stretch, quote.breakdown.expected_reach
    );

    // Fully loaded conversion deal with every add-on present
    let loaded = DealInputs {
        tiktok_count: 3,
        reels_count: 2,
        shorts_count: 2,
        long_form_count: 1,
        long_form_factor: LongFormFactor::Dedicated,
        objective: Objective::Conversion,
        usage: Some(UsageTerm { days: 90 }),
        whitelisting: Some(UsageTerm { days: 45 }),
        exclusivity: Some(ExclusivityTerm { scope: ExclusivityScope::Narrow, months: 6 }),
        rush: Some(RushLevel::Immediate),
    };
    let quote = calculator.compute_quote(&profile, &loaded);
    info!(
        "Loaded conversion deal: low {} / standard {} / stretch {}",
        quote.low, quote.standard, quote.stretch
    );
    info!(
        "  usage {:?} whitelisting {:?} exclusivity {:?} rush {:?}",
        quote.breakdown.usage,
        quote.breakdown.whitelisting,
        quote.breakdown.exclusivity,
        quote.breakdown.rush
    );

    // Custom CPM profile: base fees flatten before objective multipliers
    let custom_profile =
        CreatorProfile { cpm_tier: CpmTier::Custom, custom_cpm: Some(18.0), ..profile.clone() };
    let quote = calculator.compute_quote(&custom_profile, &baseline);
    info!(
        "Custom CPM deal: base fees {} / {} / {}",
        quote.breakdown.base_fee_low, quote.breakdown.base_fee_standard,
        quote.breakdown.base_fee_stretch
    );

    // Flat exploratory estimate for the same deliverables
    let flat = estimator.estimate(&profile, &loaded);
    info!("Flat follower-based estimate for loaded deal: {}", flat);

    info!("✅ All scenarios completed");
    Ok(())
}
