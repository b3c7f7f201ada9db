//! NWS endpoints: `/points` metadata (forecast URL discovery), hourly
//! forecast periods, and active alerts at the point.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::alerts::AlertRecord;
use crate::fetch::format_point;
use crate::hourly::HourlyPeriod;

const NWS_BASE: &str = "https://api.weather.gov";

#[derive(Debug, Deserialize)]
struct PointsResponse {
    #[serde(default)]
    properties: PointsProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PointsProperties {
    #[serde(rename = "forecastHourly", default)]
    forecast_hourly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    #[serde(default)]
    properties: HourlyProperties,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyProperties {
    #[serde(default)]
    periods: Vec<HourlyPeriod>,
}

#[derive(Debug, Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    #[serde(default)]
    properties: Option<AlertRecord>,
}

/// Extract the hourly-forecast URL from a `/points` body. An unresolved URL
/// is an error: nothing downstream can run without it.
pub fn parse_forecast_hourly_url(body: &str) -> Result<String> {
    let points: PointsResponse = serde_json::from_str(body).context("parsing points response")?;
    points
        .properties
        .forecast_hourly
        .filter(|u| !u.is_empty())
        .context("points response carries no forecastHourly URL")
}

/// Extract hourly periods from a forecast body.
pub fn parse_hourly_periods(body: &str) -> Result<Vec<HourlyPeriod>> {
    let resp: HourlyResponse =
        serde_json::from_str(body).context("parsing hourly forecast response")?;
    Ok(resp.properties.periods)
}

/// Extract alert records from an active-alerts body.
pub fn parse_alert_records(body: &str) -> Result<Vec<AlertRecord>> {
    let resp: AlertsResponse = serde_json::from_str(body).context("parsing alerts response")?;
    Ok(resp
        .features
        .into_iter()
        .filter_map(|f| f.properties)
        .collect())
}

/// Resolve the hourly-forecast URL for a lat/lon via `/points`.
pub async fn fetch_forecast_hourly_url(
    client: &reqwest::Client,
    lat: f64,
    lon: f64,
) -> Result<String> {
    let url = format!("{NWS_BASE}/points/{}", format_point(lat, lon));
    tracing::info!(%url, "resolving forecast endpoints");
    let body = client
        .get(&url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .context("points request failed")?
        .text()
        .await
        .context("reading points response body")?;
    parse_forecast_hourly_url(&body)
}

/// Fetch all hourly periods from the resolved forecast URL.
pub async fn fetch_hourly_periods(
    client: &reqwest::Client,
    hourly_url: &str,
) -> Result<Vec<HourlyPeriod>> {
    tracing::info!(url = %hourly_url, "fetching hourly forecast");
    let body = client
        .get(hourly_url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .context("hourly forecast request failed")?
        .text()
        .await
        .context("reading hourly forecast body")?;
    parse_hourly_periods(&body)
}

/// Fetch active alerts covering the point.
pub async fn fetch_active_alerts(
    client: &reqwest::Client,
    lat: f64,
    lon: f64,
) -> Result<Vec<AlertRecord>> {
    let url = format!("{NWS_BASE}/alerts/active?point={}", format_point(lat, lon));
    tracing::info!(%url, "fetching active alerts");
    let body = client
        .get(&url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .context("alerts request failed")?
        .text()
        .await
        .context("reading alerts body")?;
    parse_alert_records(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_forecast_url_is_an_error() {
        let body = r#"{"properties": {}}"#;
        assert!(parse_forecast_hourly_url(body).is_err());
    }

    #[test]
    fn forecast_url_resolves() {
        let body = r#"{"properties": {"forecastHourly": "https://api.weather.gov/gridpoints/SGF/30,49/forecast/hourly"}}"#;
        let url = parse_forecast_hourly_url(body).unwrap();
        assert!(url.ends_with("/forecast/hourly"));
    }

    #[test]
    fn alert_features_without_properties_are_skipped() {
        let body = r#"{"features": [{}, {"properties": {"event": "Tornado Watch"}}]}"#;
        let records = parse_alert_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, "Tornado Watch");
    }
}
