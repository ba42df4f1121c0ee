use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CpmTier, ExclusivityScope, LongFormFactor, Objective, RushLevel};

/// Errors from loading or validating a rate card
#[derive(Error, Debug)]
pub enum RateCardError {
    #[error("Failed to read rate card file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rate card: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid rate card: {0}")]
    Invalid(String),
}

/// CPM rates for one tier, one rate per quote bound
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CpmRates {
    /// Rate backing the low bound
    pub conservative: f64,
    /// Rate backing the standard bound
    pub standard: f64,
    /// Rate backing the stretch bound
    pub premium: f64,
}

/// CPM rates per tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpmTable {
    pub conservative: CpmRates,
    pub standard: CpmRates,
    pub premium: CpmRates,
    pub specialized: CpmRates,
}

/// {low, default, high} price multipliers for one campaign objective
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObjectiveMultipliers {
    pub low: f64,
    pub default: f64,
    pub high: f64,
}

/// Objective multipliers per campaign objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveTable {
    pub awareness: ObjectiveMultipliers,
    pub repurposing: ObjectiveMultipliers,
    pub conversion: ObjectiveMultipliers,
}

/// Reach multipliers per long-form prominence level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorTable {
    pub mention: f64,
    pub ad_segment: f64,
    pub dedicated: f64,
}

/// {low%, high%} surcharge pair, expressed as fractions of a base fee
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatePair {
    pub low: f64,
    pub high: f64,
}

/// One duration bucket for a usage-style license
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DurationBucket {
    pub days: u32,
    pub rates: RatePair,
}

/// Fixed duration buckets for a usage-style license, ascending by days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRateTable {
    pub buckets: [DurationBucket; 3],
}

impl DurationRateTable {
    /// Snap a requested duration to the nearest bucket by absolute difference.
    /// Equidistant requests snap to the larger bucket (45 days resolves to 60).
    pub fn snap(&self, days: u32) -> &DurationBucket {
        let mut best = &self.buckets[0];
        for bucket in &self.buckets[1..] {
            let dist = days.abs_diff(bucket.days);
            if dist <= days.abs_diff(best.days) {
                best = bucket;
            }
        }
        best
    }
}

/// Per-month exclusivity surcharge pairs per category scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusivityRateTable {
    pub narrow: RatePair,
    pub broad: RatePair,
}

/// Rush surcharge pairs per urgency level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RushRateTable {
    pub priority: RatePair,
    pub immediate: RatePair,
}

/// Flat per-thousand-followers rates for the exploratory estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatRateTable {
    pub long_form: f64,
    pub tiktok: f64,
    pub reels: f64,
    pub shorts: f64,
}

/// Immutable rate tables driving every quote
///
/// `Default` ships the standard tables; deployments can swap the whole card
/// via `from_json_file` without code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCard {
    pub cpm: CpmTable,
    pub objectives: ObjectiveTable,
    pub long_form_factors: FactorTable,
    pub usage: DurationRateTable,
    pub whitelisting: DurationRateTable,
    pub exclusivity: ExclusivityRateTable,
    pub rush: RushRateTable,
    pub flat: FlatRateTable,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            cpm: CpmTable {
                conservative: CpmRates { conservative: 5.0, standard: 10.0, premium: 15.0 },
                standard: CpmRates { conservative: 10.0, standard: 20.0, premium: 30.0 },
                premium: CpmRates { conservative: 15.0, standard: 30.0, premium: 45.0 },
                specialized: CpmRates { conservative: 25.0, standard: 45.0, premium: 65.0 },
            },
            objectives: ObjectiveTable {
                awareness: ObjectiveMultipliers { low: 1.0, default: 1.0, high: 1.1 },
                repurposing: ObjectiveMultipliers { low: 0.85, default: 0.95, high: 1.05 },
                conversion: ObjectiveMultipliers { low: 1.1, default: 1.25, high: 1.4 },
            },
            long_form_factors: FactorTable {
                mention: 1.0,    // passing mention
                ad_segment: 1.5, // dedicated ad segment
                dedicated: 2.0,  // fully dedicated piece
            },
            usage: DurationRateTable {
                buckets: [
                    DurationBucket { days: 30, rates: RatePair { low: 0.10, high: 0.20 } },
                    DurationBucket { days: 60, rates: RatePair { low: 0.15, high: 0.30 } },
                    DurationBucket { days: 180, rates: RatePair { low: 0.25, high: 0.50 } },
                ],
            },
            whitelisting: DurationRateTable {
                buckets: [
                    DurationBucket { days: 30, rates: RatePair { low: 0.20, high: 0.35 } },
                    DurationBucket { days: 60, rates: RatePair { low: 0.30, high: 0.50 } },
                    DurationBucket { days: 180, rates: RatePair { low: 0.50, high: 0.80 } },
                ],
            },
            exclusivity: ExclusivityRateTable {
                narrow: RatePair { low: 0.10, high: 0.20 }, // per month
                broad: RatePair { low: 0.05, high: 0.10 },  // per month
            },
            rush: RushRateTable {
                priority: RatePair { low: 0.15, high: 0.25 },
                immediate: RatePair { low: 0.30, high: 0.50 },
            },
            flat: FlatRateTable {
                long_form: 25.0,
                tiktok: 10.0,
                reels: 10.0,
                shorts: 8.0,
            },
        }
    }
}

impl RateCard {
    /// Load a rate card from a JSON file and validate it
    pub fn from_json_file(path: &str) -> Result<Self, RateCardError> {
        let content = std::fs::read_to_string(path)?;
        let card: RateCard = serde_json::from_str(&content)?;
        card.validate()?;
        Ok(card)
    }

    /// Load the card named by `QUOTE_RATE_CARD`, or the default card if unset
    pub fn from_env() -> Result<Self, RateCardError> {
        match std::env::var("QUOTE_RATE_CARD") {
            Ok(path) => Self::from_json_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Get the CPM rates for a tier. `Custom` falls back to the standard row;
    /// the caller applies any custom override on top.
    pub fn cpm_rates_for_tier(&self, tier: CpmTier) -> CpmRates {
        match tier {
            CpmTier::Conservative => self.cpm.conservative,
            CpmTier::Standard | CpmTier::Custom => self.cpm.standard,
            CpmTier::Premium => self.cpm.premium,
            CpmTier::Specialized => self.cpm.specialized,
        }
    }

    /// Get the multiplier triple for a campaign objective
    pub fn multipliers_for_objective(&self, objective: Objective) -> ObjectiveMultipliers {
        match objective {
            Objective::Awareness => self.objectives.awareness,
            Objective::Repurposing => self.objectives.repurposing,
            Objective::Conversion => self.objectives.conversion,
        }
    }

    /// Get the reach multiplier for a long-form prominence level
    pub fn factor_multiplier(&self, factor: LongFormFactor) -> f64 {
        match factor {
            LongFormFactor::Mention => self.long_form_factors.mention,
            LongFormFactor::AdSegment => self.long_form_factors.ad_segment,
            LongFormFactor::Dedicated => self.long_form_factors.dedicated,
        }
    }

    /// Get the per-month exclusivity rates for a category scope
    pub fn exclusivity_rates(&self, scope: ExclusivityScope) -> RatePair {
        match scope {
            ExclusivityScope::Narrow => self.exclusivity.narrow,
            ExclusivityScope::Broad => self.exclusivity.broad,
        }
    }

    /// Get the rush rates for an urgency level
    pub fn rush_rates(&self, level: RushLevel) -> RatePair {
        match level {
            RushLevel::Priority => self.rush.priority,
            RushLevel::Immediate => self.rush.immediate,
        }
    }

    /// Check the card's internal consistency: no negative rates, ascending
    /// duration buckets, and non-decreasing rates across low/standard/stretch.
    /// The low <= standard <= stretch quote ordering depends on these holding.
    pub fn validate(&self) -> Result<(), RateCardError> {
        for (name, rates) in [
            ("conservative", &self.cpm.conservative),
            ("standard", &self.cpm.standard),
            ("premium", &self.cpm.premium),
            ("specialized", &self.cpm.specialized),
        ] {
            if rates.conservative < 0.0 || rates.standard < 0.0 || rates.premium < 0.0 {
                return Err(RateCardError::Invalid(format!("negative CPM in tier {}", name)));
            }
            if rates.conservative > rates.standard || rates.standard > rates.premium {
                return Err(RateCardError::Invalid(format!(
                    "CPM rates for tier {} must be non-decreasing across bounds",
                    name
                )));
            }
        }

        for (name, m) in [
            ("awareness", &self.objectives.awareness),
            ("repurposing", &self.objectives.repurposing),
            ("conversion", &self.objectives.conversion),
        ] {
            if m.low < 0.0 || m.default < 0.0 || m.high < 0.0 {
                return Err(RateCardError::Invalid(format!(
                    "negative multiplier for objective {}",
                    name
                )));
            }
            if m.low > m.default || m.default > m.high {
                return Err(RateCardError::Invalid(format!(
                    "multipliers for objective {} must be non-decreasing",
                    name
                )));
            }
        }

        for (name, table) in [("usage", &self.usage), ("whitelisting", &self.whitelisting)] {
            for pair in table.buckets.windows(2) {
                if pair[0].days >= pair[1].days {
                    return Err(RateCardError::Invalid(format!(
                        "{} duration buckets must be strictly ascending",
                        name
                    )));
                }
            }
            for bucket in &table.buckets {
                if bucket.rates.low < 0.0 || bucket.rates.low > bucket.rates.high {
                    return Err(RateCardError::Invalid(format!(
                        "{} bucket {}d rates must satisfy 0 <= low <= high",
                        name, bucket.days
                    )));
                }
            }
        }

        for (name, pair) in [
            ("exclusivity.narrow", self.exclusivity.narrow),
            ("exclusivity.broad", self.exclusivity.broad),
            ("rush.priority", self.rush.priority),
            ("rush.immediate", self.rush.immediate),
        ] {
            if pair.low < 0.0 || pair.low > pair.high {
                return Err(RateCardError::Invalid(format!(
                    "{} rates must satisfy 0 <= low <= high",
                    name
                )));
            }
        }

        Ok(())
    }
}
