//! # Hourly Summarizer
//! Reduces the next-24h slice of an hourly forecast to three scalar signals:
//! thunder-mention hours, max probability of precipitation, max wind gust.
//!
//! Windowing takes the reference instant as a parameter so the reduction is
//! testable without mocking the clock.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static RE_THUNDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(thunder|t-storm|storm)").expect("valid thunder regex"));

static RE_FIRST_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)").expect("valid integer regex"));

/// One hourly forecast period as served by the NWS `forecastHourly` endpoint.
/// Only the fields the summarizer consumes are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPeriod {
    /// Period start; missing or unparseable timestamps drop the record from
    /// the window.
    #[serde(rename = "startTime", default)]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(rename = "shortForecast", default)]
    pub short_forecast: String,
    #[serde(rename = "probabilityOfPrecipitation", default)]
    pub probability_of_precipitation: Option<UnitValue>,
    /// Either a bare number or a string like "25 mph".
    #[serde(rename = "windGust", default)]
    pub wind_gust: Option<Value>,
}

/// NWS quantitative values arrive wrapped as `{"unitCode": ..., "value": ...}`
/// with `value` frequently null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitValue {
    #[serde(default)]
    pub value: Option<f64>,
}

/// Scalar signals derived from the windowed hourly periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlySummary {
    pub thunder_hours: u32,
    pub max_pop: u32,
    pub max_gust_mph: u32,
}

/// Keep periods whose start falls in the half-open window `[now, now + 24h)`.
pub fn window_next_24h(periods: &[HourlyPeriod], now: DateTime<Utc>) -> Vec<HourlyPeriod> {
    let end = now + Duration::hours(24);
    periods
        .iter()
        .filter(|p| {
            p.start_time
                .map(|t| {
                    let t = t.with_timezone(&Utc);
                    now <= t && t < end
                })
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Reduce windowed periods to `HourlySummary`. Pure; empty input yields zeros.
pub fn summarize_hourly(periods: &[HourlyPeriod]) -> HourlySummary {
    let mut thunder_hours = 0u32;
    let mut max_pop = 0u32;
    let mut max_gust_mph = 0u32;

    for p in periods {
        if RE_THUNDER.is_match(&p.short_forecast) {
            thunder_hours += 1;
        }

        let pop = p
            .probability_of_precipitation
            .as_ref()
            .and_then(|uv| uv.value)
            .map(|v| v.clamp(0.0, 100.0) as u32)
            .unwrap_or(0);
        max_pop = max_pop.max(pop);

        max_gust_mph = max_gust_mph.max(gust_mph(p.wind_gust.as_ref()));
    }

    HourlySummary {
        thunder_hours,
        max_pop,
        max_gust_mph,
    }
}

/// Extract a gust magnitude in mph: first embedded integer for text values,
/// truncation toward zero for numeric ones, 0 when absent.
fn gust_mph(gust: Option<&Value>) -> u32 {
    match gust {
        Some(Value::String(s)) => RE_FIRST_INT
            .captures(s)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0),
        Some(Value::Number(n)) => n.as_f64().map(|v| v.max(0.0) as u32).unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn period(start: Option<&str>, forecast: &str, pop: Option<f64>, gust: Option<Value>) -> HourlyPeriod {
        HourlyPeriod {
            start_time: start.map(|s| DateTime::parse_from_rfc3339(s).unwrap()),
            short_forecast: forecast.to_string(),
            probability_of_precipitation: pop.map(|v| UnitValue { value: Some(v) }),
            wind_gust: gust,
        }
    }

    #[test]
    fn empty_input_yields_zeros() {
        assert_eq!(summarize_hourly(&[]), HourlySummary::default());
    }

    #[test]
    fn thunder_matching_is_case_insensitive_and_counts_once_per_hour() {
        let periods = vec![
            period(None, "Scattered Thunderstorms", None, None),
            period(None, "T-Storms likely, stormy", None, None), // still one hour
            period(None, "Partly Cloudy", None, None),
        ];
        let s = summarize_hourly(&periods);
        assert_eq!(s.thunder_hours, 2);
    }

    #[test]
    fn all_thunder_hours_with_one_textual_gust() {
        let periods: Vec<_> = (0..6)
            .map(|i| {
                let gust = (i == 3).then(|| json!("50 mph"));
                period(None, "Thunderstorms", None, gust)
            })
            .collect();
        let s = summarize_hourly(&periods);
        assert_eq!(s.thunder_hours, 6);
        assert_eq!(s.max_gust_mph, 50);
    }

    #[test]
    fn pop_clamps_and_defaults() {
        let periods = vec![
            period(None, "", Some(130.0), None),
            period(None, "", None, None),
            period(None, "", Some(-5.0), None),
        ];
        let s = summarize_hourly(&periods);
        assert_eq!(s.max_pop, 100);
    }

    #[test]
    fn numeric_gust_truncates_toward_zero() {
        let periods = vec![period(None, "", None, Some(json!(37.9)))];
        assert_eq!(summarize_hourly(&periods).max_gust_mph, 37);
    }

    #[test]
    fn non_numeric_gust_text_is_zero() {
        let periods = vec![period(None, "", None, Some(json!("breezy")))];
        assert_eq!(summarize_hourly(&periods).max_gust_mph, 0);
    }

    #[test]
    fn window_is_half_open_on_both_ends() {
        let now = Utc.with_ymd_and_hms(2025, 5, 22, 12, 0, 0).unwrap();
        let periods = vec![
            period(Some("2025-05-22T11:00:00Z"), "before", None, None),
            period(Some("2025-05-22T12:00:00Z"), "at start", None, None),
            period(Some("2025-05-23T11:00:00Z"), "last inside", None, None),
            period(Some("2025-05-23T12:00:00Z"), "at end", None, None),
            period(None, "no timestamp", None, None),
        ];
        let kept = window_next_24h(&periods, now);
        let names: Vec<_> = kept.iter().map(|p| p.short_forecast.as_str()).collect();
        assert_eq!(names, vec!["at start", "last inside"]);
    }

    #[test]
    fn window_honors_offset_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 5, 22, 12, 0, 0).unwrap();
        // 07:00-05:00 == 12:00Z, inclusive start
        let periods = vec![period(Some("2025-05-22T07:00:00-05:00"), "local", None, None)];
        assert_eq!(window_next_24h(&periods, now).len(), 1);
    }
}
