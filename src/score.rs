//! # Likelihood Scorer
//! Pure combination of the four normalized signals into one bounded 0–100
//! score plus the exact components that produced it. The breakdown is part of
//! the output contract: the score must be explainable, not just a number.

use serde::{Deserialize, Serialize};

use crate::alerts::AlertFlags;
use crate::hourly::HourlySummary;
use crate::outlook::CategoricalLabel;

/// Thunder hours beyond this contribute nothing further.
const THUNDER_HOURS_CAP: u32 = 10;
/// Gusts only add once they clear this threshold (mph).
const GUST_THRESHOLD_MPH: u32 = 35;
/// Ceiling on the gust bonus.
const GUST_BONUS_CAP: f64 = 30.0;

/// Final score with its full input breakdown, serializable as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0–100, one decimal of precision.
    pub score: f64,
    pub categorical: CategoricalLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prob_tornado_pct: Option<u32>,
    pub alerts: AlertFlags,
    pub hourly: HourlySummary,
}

/// Base weight per categorical tier.
fn categorical_weight(label: CategoricalLabel) -> f64 {
    match label {
        CategoricalLabel::None => 0.0,
        CategoricalLabel::Tstm => 5.0,
        CategoricalLabel::Mrgl => 15.0,
        CategoricalLabel::Slgt => 25.0,
        CategoricalLabel::Enh => 40.0,
        CategoricalLabel::Mdt => 60.0,
        CategoricalLabel::High => 80.0,
    }
}

/// Combine the signals into a 0–100 score. Total over its domain: absent
/// optionals are valid inputs, never errors.
pub fn score_likelihood(
    categorical: CategoricalLabel,
    prob_tornado_pct: Option<u32>,
    alerts: AlertFlags,
    hourly: HourlySummary,
) -> ScoreResult {
    // 1) Base from the categorical outlook tier
    let mut score = categorical_weight(categorical);

    // 2) Probabilistic tornado percentage carries real weight when present
    if let Some(pct) = prob_tornado_pct {
        score += 1.2 * f64::from(pct);
    }

    // 3) Thunder-mention hours, capped
    let thunder_capped = hourly.thunder_hours.min(THUNDER_HOURS_CAP);
    score += 2.0 * f64::from(thunder_capped);

    // 4) Gust bonus above the threshold, capped
    if hourly.max_gust_mph > GUST_THRESHOLD_MPH {
        score += f64::from(hourly.max_gust_mph - GUST_THRESHOLD_MPH).min(GUST_BONUS_CAP);
    }

    // 5) Max probability of precipitation
    score += 0.2 * f64::from(hourly.max_pop);

    // 6) Alert floors, in increasing severity
    if alerts.watch {
        score = score.max(70.0);
    }
    if alerts.warning {
        score = score.max(90.0);
    }
    if alerts.pds {
        score = score.max(98.0);
    }

    // 7) Clip and round to one decimal
    score = score.clamp(0.0, 100.0);
    score = (score * 10.0).round() / 10.0;

    ScoreResult {
        score,
        categorical,
        prob_tornado_pct,
        alerts,
        hourly,
    }
}
