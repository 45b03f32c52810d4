//! Usage safety classification of the latest period.
//!
//! The superset policy has three tiers split at 100 and 250 kWh. The two-tier
//! policy is the degenerate pass/fail case: anything above 100 kWh is high.

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the safe tier, in kWh.
pub const SAFE_LIMIT_KWH: f64 = 100.0;

/// Upper bound (inclusive) of the moderate tier, in kWh.
pub const MODERATE_LIMIT_KWH: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Safe,
    Moderate,
    High,
}

/// Tiering applied by [`SafetyPolicy::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyPolicy {
    /// safe / high at 100 kWh.
    TwoTier,
    /// safe / moderate / high at 100 and 250 kWh.
    #[default]
    ThreeTier,
}

impl SafetyPolicy {
    pub fn classify(self, units: f64) -> SafetyLevel {
        if units <= SAFE_LIMIT_KWH {
            return SafetyLevel::Safe;
        }
        match self {
            SafetyPolicy::TwoTier => SafetyLevel::High,
            SafetyPolicy::ThreeTier if units <= MODERATE_LIMIT_KWH => SafetyLevel::Moderate,
            SafetyPolicy::ThreeTier => SafetyLevel::High,
        }
    }
}

/// Safety verdict for the last (sorted) record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyReport {
    pub level: SafetyLevel,
    /// Units the verdict was computed from.
    pub units: f64,
    /// Pass/fail flag: `units > 100`.
    pub alert: bool,
}

impl SafetyReport {
    pub fn assess(policy: SafetyPolicy, units: f64) -> Self {
        Self {
            level: policy.classify(units),
            units,
            alert: units > SAFE_LIMIT_KWH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_tier_boundaries() {
        let p = SafetyPolicy::ThreeTier;
        assert_eq!(p.classify(0.0), SafetyLevel::Safe);
        assert_eq!(p.classify(100.0), SafetyLevel::Safe);
        assert_eq!(p.classify(100.5), SafetyLevel::Moderate);
        assert_eq!(p.classify(250.0), SafetyLevel::Moderate);
        assert_eq!(p.classify(250.1), SafetyLevel::High);
    }

    #[test]
    fn two_tier_collapses_moderate_into_high() {
        let p = SafetyPolicy::TwoTier;
        assert_eq!(p.classify(100.0), SafetyLevel::Safe);
        assert_eq!(p.classify(180.0), SafetyLevel::High);
        assert_eq!(p.classify(900.0), SafetyLevel::High);
    }

    #[test]
    fn alert_flag_ignores_tiering() {
        assert!(!SafetyReport::assess(SafetyPolicy::ThreeTier, 100.0).alert);
        assert!(SafetyReport::assess(SafetyPolicy::ThreeTier, 150.0).alert);
        assert!(SafetyReport::assess(SafetyPolicy::TwoTier, 150.0).alert);
    }
}
