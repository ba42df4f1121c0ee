//! Type definitions for the sponsorship quote engine

use serde::{Deserialize, Serialize};

/// A creator's historical performance profile
///
/// Supplied by the caller per invocation; the engine never looks anything up.
/// Average view figures are accepted as-is, including zero or negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorProfile {
    /// Average views on long-form (YouTube video) content
    pub avg_long_form_views: f64,
    /// Average views on TikTok posts
    pub avg_tiktok_views: f64,
    /// Average views on Instagram Reels
    pub avg_reels_views: f64,
    /// Average views on YouTube Shorts
    pub avg_shorts_views: f64,
    /// Selected CPM tier
    pub cpm_tier: CpmTier,
    /// Custom CPM override, used only when `cpm_tier` is `Custom`
    pub custom_cpm: Option<f64>,
    /// When false, long-form reach contributes nothing to the quote
    pub include_long_form: bool,
    /// Total follower count, consumed only by the flat-rate estimator
    pub followers: f64,
}

/// CPM tier selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpmTier {
    Conservative,
    Standard,
    Premium,
    Specialized,
    /// Uses `CreatorProfile::custom_cpm` for all three bounds
    Custom,
}

/// Campaign objective, scales price via a {low, default, high} multiplier triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Awareness,
    Repurposing,
    Conversion,
}

/// How prominently the sponsor features in a long-form deliverable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongFormFactor {
    /// Passing mention inside otherwise organic content
    Mention,
    /// Dedicated ad segment
    AdSegment,
    /// Fully dedicated piece
    Dedicated,
}

/// Rush turnaround urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RushLevel {
    Priority,
    Immediate,
}

/// Exclusivity category tightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusivityScope {
    /// Narrow category (e.g. "productivity apps") — higher surcharge
    Narrow,
    /// Broad category (e.g. "all software") — lower surcharge
    Broad,
}

impl ExclusivityScope {
    /// Compatibility shim for deals that stored the category as free text.
    /// Text containing the keyword "broad" maps to `Broad`, anything else
    /// is treated as `Narrow`.
    pub fn from_category_text(text: &str) -> Self {
        if text.to_lowercase().contains("broad") {
            ExclusivityScope::Broad
        } else {
            ExclusivityScope::Narrow
        }
    }
}

/// A usage-style license term (paid usage or whitelisting)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTerm {
    /// Requested license duration in days; snapped to the nearest rate bucket
    pub days: u32,
}

/// A category exclusivity term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusivityTerm {
    pub scope: ExclusivityScope,
    /// Exclusivity duration in months; contributions scale linearly, no cap
    pub months: u32,
}

/// The deal being quoted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInputs {
    /// Requested TikTok posts
    pub tiktok_count: u32,
    /// Requested Instagram Reels
    pub reels_count: u32,
    /// Requested YouTube Shorts
    pub shorts_count: u32,
    /// Requested long-form deliverables
    pub long_form_count: u32,
    /// Sponsor prominence for the long-form deliverables
    pub long_form_factor: LongFormFactor,
    pub objective: Objective,
    /// Paid-usage license add-on
    pub usage: Option<UsageTerm>,
    /// Whitelisting/boosting license add-on
    pub whitelisting: Option<UsageTerm>,
    /// Category exclusivity add-on
    pub exclusivity: Option<ExclusivityTerm>,
    /// Rush turnaround add-on
    pub rush: Option<RushLevel>,
}

/// An add-on's contribution to the low and high bounds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContributionRange {
    pub low: f64,
    pub high: f64,
}

/// Line-item explanation of a quote
///
/// Every figure is rounded to the nearest whole currency unit; absent add-ons
/// show a zero pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Total expected impressions across all requested deliverables
    pub expected_reach: f64,
    pub base_fee_low: f64,
    pub base_fee_standard: f64,
    pub base_fee_stretch: f64,
    pub usage: ContributionRange,
    pub whitelisting: ContributionRange,
    pub exclusivity: ContributionRange,
    pub rush: ContributionRange,
}

/// Three-tier quote plus its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Floor ask
    pub low: f64,
    /// Target ask
    pub standard: f64,
    /// Ambitious ask
    pub stretch: f64,
    pub breakdown: QuoteBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_sniff_finds_broad_keyword() {
        assert_eq!(
            ExclusivityScope::from_category_text("Broad consumer tech"),
            ExclusivityScope::Broad
        );
        assert_eq!(
            ExclusivityScope::from_category_text("all BROAD categories"),
            ExclusivityScope::Broad
        );
    }

    #[test]
    fn scope_sniff_defaults_to_narrow() {
        assert_eq!(
            ExclusivityScope::from_category_text("productivity apps"),
            ExclusivityScope::Narrow
        );
        assert_eq!(ExclusivityScope::from_category_text(""), ExclusivityScope::Narrow);
    }

    #[test]
    fn deal_inputs_round_trip_json() {
        let deal = DealInputs {
            tiktok_count: 2,
            reels_count: 0,
            shorts_count: 1,
            long_form_count: 1,
            long_form_factor: LongFormFactor::AdSegment,
            objective: Objective::Conversion,
            usage: Some(UsageTerm { days: 60 }),
            whitelisting: None,
            exclusivity: Some(ExclusivityTerm { scope: ExclusivityScope::Narrow, months: 3 }),
            rush: Some(RushLevel::Immediate),
        };
        let json = serde_json::to_string(&deal).unwrap();
        let back: DealInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deal);
    }
}
