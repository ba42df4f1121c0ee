use tracing::{debug, info};

use crate::config::{CpmRates, RateCard};
use crate::models::{
    ContributionRange, CpmTier, CreatorProfile, DealInputs, QuoteBreakdown, QuoteResult,
};

/// Unrounded add-on contribution, accumulated before exposure
#[derive(Debug, Clone, Copy, Default)]
struct RawContribution {
    low: f64,
    high: f64,
}

impl RawContribution {
    fn rounded(self) -> ContributionRange {
        ContributionRange { low: self.low.round(), high: self.high.round() }
    }
}

/// Quote calculator for sponsorship deals
///
/// Pure and synchronous: every invocation is independent, identical inputs
/// produce bit-identical results, and no numeric input can make it fail.
/// Validation of input presence is the caller's responsibility.
pub struct QuoteCalculator {
    rates: RateCard,
}

impl QuoteCalculator {
    /// Create a calculator bound to a rate card
    pub fn new(rates: RateCard) -> Self {
        Self { rates }
    }

    pub fn rate_card(&self) -> &RateCard {
        &self.rates
    }

    /// Compute the three-tier quote and its breakdown
    pub fn compute_quote(&self, profile: &CreatorProfile, inputs: &DealInputs) -> QuoteResult {
        let reach = self.expected_reach(profile, inputs);
        let cpm = self.resolve_cpm(profile);
        let mult = self.rates.multipliers_for_objective(inputs.objective);

        // base fee = (reach / 1000) * CPM * objective multiplier, per bound
        let base_low = (reach / 1000.0) * cpm.conservative * mult.low;
        let base_standard = (reach / 1000.0) * cpm.standard * mult.default;
        let base_stretch = (reach / 1000.0) * cpm.premium * mult.high;

        debug!(
            reach,
            base_low, base_standard, base_stretch, "computed base fees before add-ons"
        );

        let usage = inputs
            .usage
            .map(|term| {
                let bucket = self.rates.usage.snap(term.days);
                debug!(requested_days = term.days, bucket_days = bucket.days, "usage bucket");
                RawContribution {
                    low: base_low * bucket.rates.low,
                    high: base_stretch * bucket.rates.high,
                }
            })
            .unwrap_or_default();

        let whitelisting = inputs
            .whitelisting
            .map(|term| {
                let bucket = self.rates.whitelisting.snap(term.days);
                debug!(requested_days = term.days, bucket_days = bucket.days, "whitelisting bucket");
                RawContribution {
                    low: base_low * bucket.rates.low,
                    high: base_stretch * bucket.rates.high,
                }
            })
            .unwrap_or_default();

        let exclusivity = inputs
            .exclusivity
            .map(|term| {
                let pair = self.rates.exclusivity_rates(term.scope);
                let months = f64::from(term.months);
                RawContribution {
                    low: base_low * pair.low * months,
                    high: base_stretch * pair.high * months,
                }
            })
            .unwrap_or_default();

        let rush = inputs
            .rush
            .map(|level| {
                let pair = self.rates.rush_rates(level);
                RawContribution { low: base_low * pair.low, high: base_stretch * pair.high }
            })
            .unwrap_or_default();

        let add_ons = [usage, whitelisting, exclusivity, rush];
        let add_on_low: f64 = add_ons.iter().map(|c| c.low).sum();
        let add_on_high: f64 = add_ons.iter().map(|c| c.high).sum();
        // the standard bound averages each add-on's low/high pair rather than
        // carrying a dedicated standard add-on rate
        let add_on_standard: f64 = add_ons.iter().map(|c| (c.low + c.high) / 2.0).sum();

        let total_low = base_low + add_on_low;
        let total_standard = base_standard + add_on_standard;
        let total_stretch = base_stretch + add_on_high;

        info!(
            low = total_low.round(),
            standard = total_standard.round(),
            stretch = total_stretch.round(),
            reach,
            "computed quote"
        );

        // rounding happens only here, at the point of exposure
        QuoteResult {
            low: total_low.round(),
            standard: total_standard.round(),
            stretch: total_stretch.round(),
            breakdown: QuoteBreakdown {
                expected_reach: reach.round(),
                base_fee_low: base_low.round(),
                base_fee_standard: base_standard.round(),
                base_fee_stretch: base_stretch.round(),
                usage: usage.rounded(),
                whitelisting: whitelisting.rounded(),
                exclusivity: exclusivity.rounded(),
                rush: rush.rounded(),
            },
        }
    }

    /// Total expected impressions for the requested deliverables
    fn expected_reach(&self, profile: &CreatorProfile, inputs: &DealInputs) -> f64 {
        let short_form = f64::from(inputs.tiktok_count) * profile.avg_tiktok_views
            + f64::from(inputs.reels_count) * profile.avg_reels_views
            + f64::from(inputs.shorts_count) * profile.avg_shorts_views;

        let long_form = if profile.include_long_form {
            let factor = self.rates.factor_multiplier(inputs.long_form_factor);
            f64::from(inputs.long_form_count) * profile.avg_long_form_views * factor
        } else {
            0.0
        };

        short_form + long_form
    }

    /// Resolve the three CPM rates for a profile. A custom tier with an
    /// override value flattens all three bounds to that value; the bounds
    /// diverge again only through the objective multipliers.
    fn resolve_cpm(&self, profile: &CreatorProfile) -> CpmRates {
        if profile.cpm_tier == CpmTier::Custom {
            if let Some(cpm) = profile.custom_cpm {
                return CpmRates { conservative: cpm, standard: cpm, premium: cpm };
            }
        }
        self.rates.cpm_rates_for_tier(profile.cpm_tier)
    }
}

/// Flat follower-based rate estimator for exploratory "what would I charge"
/// scenarios. Much simpler than the quote engine: no tiers, no objectives,
/// no add-ons.
pub struct FlatRateEstimator {
    rates: RateCard,
}

impl FlatRateEstimator {
    pub fn new(rates: RateCard) -> Self {
        Self { rates }
    }

    /// Estimate a single flat fee from follower count and deliverable counts
    pub fn estimate(&self, profile: &CreatorProfile, inputs: &DealInputs) -> f64 {
        let per_thousand = f64::from(inputs.long_form_count) * self.rates.flat.long_form
            + f64::from(inputs.tiktok_count) * self.rates.flat.tiktok
            + f64::from(inputs.reels_count) * self.rates.flat.reels
            + f64::from(inputs.shorts_count) * self.rates.flat.shorts;

        ((profile.followers / 1000.0) * per_thousand).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ExclusivityScope, ExclusivityTerm, LongFormFactor, Objective, RushLevel, UsageTerm,
    };

    fn profile() -> CreatorProfile {
        CreatorProfile {
            avg_long_form_views: 10_000.0,
            avg_tiktok_views: 5_000.0,
            avg_reels_views: 4_000.0,
            avg_shorts_views: 3_000.0,
            cpm_tier: CpmTier::Standard,
            custom_cpm: None,
            include_long_form: true,
            followers: 50_000.0,
        }
    }

    fn bare_deal() -> DealInputs {
        DealInputs {
            tiktok_count: 0,
            reels_count: 0,
            shorts_count: 0,
            long_form_count: 0,
            long_form_factor: LongFormFactor::Mention,
            objective: Objective::Awareness,
            usage: None,
            whitelisting: None,
            exclusivity: None,
            rush: None,
        }
    }

    fn calc() -> QuoteCalculator {
        QuoteCalculator::new(RateCard::default())
    }

    #[test]
    fn reference_scenario_two_mention_videos() {
        // 2 long-form mentions at 10k avg views, standard tier, awareness:
        // reach 20,000 -> base fees 200 / 400 / 660
        let deal = DealInputs { long_form_count: 2, ..bare_deal() };
        let quote = calc().compute_quote(&profile(), &deal);

        assert_eq!(quote.breakdown.expected_reach, 20_000.0);
        assert_eq!(quote.breakdown.base_fee_low, 200.0);
        assert_eq!(quote.breakdown.base_fee_standard, 400.0);
        assert_eq!(quote.breakdown.base_fee_stretch, 660.0);
        assert_eq!(quote.low, 200.0);
        assert_eq!(quote.standard, 400.0);
        assert_eq!(quote.stretch, 660.0);
    }

    #[test]
    fn no_add_ons_means_totals_equal_base_fees() {
        let deal = DealInputs { tiktok_count: 3, long_form_count: 1, ..bare_deal() };
        let quote = calc().compute_quote(&profile(), &deal);

        assert_eq!(quote.low, quote.breakdown.base_fee_low);
        assert_eq!(quote.standard, quote.breakdown.base_fee_standard);
        assert_eq!(quote.stretch, quote.breakdown.base_fee_stretch);
        assert_eq!(quote.breakdown.usage, ContributionRange::default());
        assert_eq!(quote.breakdown.rush, ContributionRange::default());
    }

    #[test]
    fn bounds_are_ordered_with_all_add_ons_present() {
        let deal = DealInputs {
            tiktok_count: 2,
            reels_count: 1,
            shorts_count: 4,
            long_form_count: 1,
            long_form_factor: LongFormFactor::Dedicated,
            objective: Objective::Conversion,
            usage: Some(UsageTerm { days: 90 }),
            whitelisting: Some(UsageTerm { days: 30 }),
            exclusivity: Some(ExclusivityTerm { scope: ExclusivityScope::Narrow, months: 6 }),
            rush: Some(RushLevel::Immediate),
        };
        let quote = calc().compute_quote(&profile(), &deal);

        assert!(quote.low <= quote.standard);
        assert!(quote.standard <= quote.stretch);
    }

    #[test]
    fn custom_cpm_flattens_base_fees_before_objective() {
        let profile = CreatorProfile {
            cpm_tier: CpmTier::Custom,
            custom_cpm: Some(18.0),
            ..profile()
        };
        // awareness multipliers are {1.0, 1.0, 1.1}: low and standard base
        // fees collapse to the same figure, stretch diverges only via 1.1
        let deal = DealInputs { long_form_count: 2, ..bare_deal() };
        let quote = calc().compute_quote(&profile, &deal);

        assert_eq!(quote.breakdown.base_fee_low, 360.0);
        assert_eq!(quote.breakdown.base_fee_standard, 360.0);
        assert_eq!(quote.breakdown.base_fee_stretch, 396.0);
    }

    #[test]
    fn custom_tier_without_override_uses_standard_row() {
        let custom = CreatorProfile { cpm_tier: CpmTier::Custom, custom_cpm: None, ..profile() };
        let standard = profile();
        let deal = DealInputs { long_form_count: 2, ..bare_deal() };

        let a = calc().compute_quote(&custom, &deal);
        let b = calc().compute_quote(&standard, &deal);
        assert_eq!(a, b);
    }

    #[test]
    fn excluded_long_form_contributes_nothing() {
        let profile = CreatorProfile { include_long_form: false, ..profile() };
        let deal = DealInputs {
            long_form_count: 5,
            long_form_factor: LongFormFactor::Dedicated,
            ..bare_deal()
        };
        let quote = calc().compute_quote(&profile, &deal);

        assert_eq!(quote.breakdown.expected_reach, 0.0);
        assert_eq!(quote.standard, 0.0);
    }

    #[test]
    fn usage_duration_snaps_to_nearest_bucket() {
        // 45 days -> 60-day bucket rates {0.15, 0.30};
        // base fees 200/660 -> contribution {30, 198}
        let deal = DealInputs {
            long_form_count: 2,
            usage: Some(UsageTerm { days: 45 }),
            ..bare_deal()
        };
        let quote = calc().compute_quote(&profile(), &deal);
        assert_eq!(quote.breakdown.usage, ContributionRange { low: 30.0, high: 198.0 });

        // 15 days -> 30-day bucket rates {0.10, 0.20}
        let deal = DealInputs {
            long_form_count: 2,
            usage: Some(UsageTerm { days: 15 }),
            ..bare_deal()
        };
        let quote = calc().compute_quote(&profile(), &deal);
        assert_eq!(quote.breakdown.usage, ContributionRange { low: 20.0, high: 132.0 });
    }

    #[test]
    fn standard_total_averages_add_on_bounds() {
        // usage at 60 days: low = 200 * 0.15 = 30, high = 660 * 0.30 = 198
        // standard total = 400 + (30 + 198) / 2 = 514
        let deal = DealInputs {
            long_form_count: 2,
            usage: Some(UsageTerm { days: 60 }),
            ..bare_deal()
        };
        let quote = calc().compute_quote(&profile(), &deal);

        assert_eq!(quote.low, 230.0);
        assert_eq!(quote.standard, 514.0);
        assert_eq!(quote.stretch, 858.0);
    }

    #[test]
    fn exclusivity_scales_linearly_with_months() {
        let with_months = |months| {
            let deal = DealInputs {
                long_form_count: 2,
                exclusivity: Some(ExclusivityTerm { scope: ExclusivityScope::Narrow, months }),
                ..bare_deal()
            };
            calc().compute_quote(&profile(), &deal).breakdown.exclusivity
        };

        let three = with_months(3);
        let six = with_months(6);
        assert_eq!(six.low, three.low * 2.0);
        assert_eq!(six.high, three.high * 2.0);
    }

    #[test]
    fn rush_adds_fixed_percentage_of_base_fees() {
        let deal = DealInputs {
            long_form_count: 2,
            rush: Some(RushLevel::Immediate),
            ..bare_deal()
        };
        let quote = calc().compute_quote(&profile(), &deal);
        // immediate rates {0.30, 0.50}: low = 200 * 0.30, high = 660 * 0.50
        assert_eq!(quote.breakdown.rush, ContributionRange { low: 60.0, high: 330.0 });
    }

    #[test]
    fn negative_averages_propagate_instead_of_failing() {
        let profile = CreatorProfile { avg_long_form_views: -10_000.0, ..profile() };
        let deal = DealInputs { long_form_count: 2, ..bare_deal() };
        let quote = calc().compute_quote(&profile, &deal);

        assert_eq!(quote.breakdown.expected_reach, -20_000.0);
        assert!(quote.low < 0.0);
    }

    #[test]
    fn identical_inputs_yield_bit_identical_results() {
        let deal = DealInputs {
            tiktok_count: 7,
            long_form_count: 1,
            objective: Objective::Repurposing,
            usage: Some(UsageTerm { days: 180 }),
            exclusivity: Some(ExclusivityTerm { scope: ExclusivityScope::Broad, months: 12 }),
            ..bare_deal()
        };
        let calc = calc();
        let a = calc.compute_quote(&profile(), &deal);
        let b = calc.compute_quote(&profile(), &deal);
        assert_eq!(a, b);
    }

    #[test]
    fn flat_estimate_uses_followers_not_reach() {
        let deal = DealInputs { tiktok_count: 2, long_form_count: 1, ..bare_deal() };
        let estimator = FlatRateEstimator::new(RateCard::default());
        // 50k followers: (50_000 / 1000) * (1 * 25 + 2 * 10) = 2250
        assert_eq!(estimator.estimate(&profile(), &deal), 2250.0);

        // reach averages do not enter the flat model
        let dark = CreatorProfile {
            avg_long_form_views: 0.0,
            avg_tiktok_views: 0.0,
            ..profile()
        };
        assert_eq!(estimator.estimate(&dark, &deal), 2250.0);
    }
}
