//! Margin health indicators.
//!
//! The operating margin (operating profit as a percentage of revenue) is
//! compared with the caller's ideal margin. Their ratio drives both a
//! qualitative [`MarginHealth`] classification and a 0–10 score whose
//! thresholds light up the safety, efficiency and trend pillars.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, or_zero, percentage_of_revenue, ratio};

use super::config::HealthThresholds;

const SCORE_SCALE: Decimal = Decimal::TEN;
const SAFETY_SCORE: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
const EFFICIENCY_SCORE: Decimal = Decimal::from_parts(6, 0, 0, false, 0);
const TREND_SCORE: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Qualitative classification of the operating margin against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginHealth {
    Excellent,
    Ideal,
    Attention,
    Critical,
}

impl MarginHealth {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Ideal => "Ideal",
            Self::Attention => "Attention",
            Self::Critical => "Critical",
        }
    }
}

/// Result of the health evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResults {
    /// Operating profit as a percentage of revenue.
    pub operating_margin_pct: Decimal,

    /// Operating margin divided by the ideal margin. Zero when the ideal
    /// margin is zero.
    pub margin_ratio: Decimal,

    pub margin_health: MarginHealth,

    /// `margin_ratio × 10`, clamped to `0..=10`.
    pub health_score: Decimal,

    /// Score of at least 4.
    pub safety: bool,

    /// Score of at least 6.
    pub efficiency: bool,

    /// Score of at least 8.
    pub trend: bool,
}

/// Calculator for the margin health indicators.
#[derive(Debug, Clone)]
pub struct HealthCalculator<'a> {
    thresholds: &'a HealthThresholds,
}

impl<'a> HealthCalculator<'a> {
    pub fn new(thresholds: &'a HealthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn calculate(
        &self,
        operating_profit: Decimal,
        revenue: Decimal,
        ideal_margin_pct: Decimal,
    ) -> HealthResults {
        let operating_margin_pct = percentage_of_revenue(operating_profit, revenue);
        let margin_ratio = ratio(operating_margin_pct, ideal_margin_pct);
        let health_score = self.score(margin_ratio);

        HealthResults {
            operating_margin_pct,
            margin_ratio,
            margin_health: self.classify(margin_ratio),
            health_score,
            safety: health_score >= SAFETY_SCORE,
            efficiency: health_score >= EFFICIENCY_SCORE,
            trend: health_score >= TREND_SCORE,
        }
    }

    fn classify(
        &self,
        margin_ratio: Decimal,
    ) -> MarginHealth {
        if margin_ratio >= self.thresholds.excellent {
            MarginHealth::Excellent
        } else if margin_ratio >= self.thresholds.ideal {
            MarginHealth::Ideal
        } else if margin_ratio >= self.thresholds.attention {
            MarginHealth::Attention
        } else {
            MarginHealth::Critical
        }
    }

    fn score(
        &self,
        margin_ratio: Decimal,
    ) -> Decimal {
        let raw = or_zero(margin_ratio.checked_mul(SCORE_SCALE));
        max(raw, Decimal::ZERO).min(SCORE_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn thresholds() -> HealthThresholds {
        HealthThresholds::default()
    }

    // =========================================================================
    // classify tests
    // =========================================================================

    #[test]
    fn classify_boundaries() {
        let thresholds = thresholds();
        let calculator = HealthCalculator::new(&thresholds);

        assert_eq!(calculator.classify(dec!(1.1)), MarginHealth::Excellent);
        assert_eq!(calculator.classify(dec!(1.0999)), MarginHealth::Ideal);
        assert_eq!(calculator.classify(dec!(0.9)), MarginHealth::Ideal);
        assert_eq!(calculator.classify(dec!(0.7)), MarginHealth::Attention);
        assert_eq!(calculator.classify(dec!(0.6999)), MarginHealth::Critical);
        assert_eq!(calculator.classify(dec!(-2)), MarginHealth::Critical);
    }

    // =========================================================================
    // score tests
    // =========================================================================

    #[test]
    fn score_is_clamped() {
        let thresholds = thresholds();
        let calculator = HealthCalculator::new(&thresholds);

        assert_eq!(calculator.score(dec!(0.65)), dec!(6.5));
        assert_eq!(calculator.score(dec!(3)), dec!(10));
        assert_eq!(calculator.score(dec!(-1)), dec!(0));
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_default_period() {
        let thresholds = thresholds();
        let calculator = HealthCalculator::new(&thresholds);

        // 7000 / 30000 = 23.33%, ratio to 13% ≈ 1.79
        let result = calculator.calculate(dec!(7000), dec!(30000), dec!(13));

        assert_eq!(result.operating_margin_pct.round_dp(2), dec!(23.33));
        assert_eq!(result.margin_health, MarginHealth::Excellent);
        assert_eq!(result.health_score, dec!(10));
        assert!(result.safety && result.efficiency && result.trend);
    }

    #[test]
    fn calculate_attention_band() {
        let thresholds = thresholds();
        let calculator = HealthCalculator::new(&thresholds);

        // 10% margin against 13% ideal: ratio ≈ 0.769
        let result = calculator.calculate(dec!(3000), dec!(30000), dec!(13));

        assert_eq!(result.margin_health, MarginHealth::Attention);
        assert_eq!(result.health_score.round_dp(2), dec!(7.69));
        assert!(result.safety);
        assert!(result.efficiency);
        assert!(!result.trend);
    }

    #[test]
    fn calculate_without_revenue() {
        let thresholds = thresholds();
        let calculator = HealthCalculator::new(&thresholds);

        let result = calculator.calculate(dec!(-5000), dec!(0), dec!(13));

        assert_eq!(result.operating_margin_pct, dec!(0));
        assert_eq!(result.margin_health, MarginHealth::Critical);
        assert_eq!(result.health_score, dec!(0));
        assert!(!result.safety);
    }

    #[test]
    fn calculate_with_zero_ideal_margin() {
        let thresholds = thresholds();
        let calculator = HealthCalculator::new(&thresholds);

        let result = calculator.calculate(dec!(7000), dec!(30000), dec!(0));

        assert_eq!(result.margin_ratio, dec!(0));
        assert_eq!(result.margin_health, MarginHealth::Critical);
    }
}
