//! SPC outlook polygons via the NOAA ArcGIS MapServer: point-intersection
//! queries against the Day-1 categorical and probabilistic-tornado layers.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::outlook::PolygonAttrs;

const SPC_BASE: &str =
    "https://mapservices.weather.noaa.gov/vector/rest/services/outlooks/SPC_wx_outlks/MapServer";

/// Day 1 categorical outlook (MRGL/SLGT/ENH/MDT/HIGH).
pub const LAYER_DAY1_CATEGORICAL: u32 = 1;
/// Day 1 probabilistic tornado (2%, 5%, 10%, ...).
pub const LAYER_DAY1_PROB_TORNADO: u32 = 3;

#[derive(Debug, Deserialize)]
struct GeoJsonResponse {
    #[serde(default)]
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: Option<PolygonAttrs>,
}

/// Extract the per-polygon attribute maps from a GeoJSON query body,
/// preserving the order the query returned them in.
pub fn parse_polygon_attrs(body: &str) -> Result<Vec<PolygonAttrs>> {
    let resp: GeoJsonResponse =
        serde_json::from_str(body).context("parsing spc geojson response")?;
    Ok(resp
        .features
        .into_iter()
        .filter_map(|f| f.properties)
        .collect())
}

/// Query one SPC layer for polygons intersecting the point. Geometry is
/// `lon,lat` (x,y) per the ArcGIS convention.
pub async fn query_layer(
    client: &reqwest::Client,
    layer_id: u32,
    lat: f64,
    lon: f64,
) -> Result<Vec<PolygonAttrs>> {
    let url = format!("{SPC_BASE}/{layer_id}/query");
    let geometry = format!("{lon},{lat}");
    tracing::info!(layer_id, "querying spc outlook layer");
    let body = client
        .get(&url)
        .query(&[
            ("f", "geoJSON"),
            ("geometry", geometry.as_str()),
            ("geometryType", "esriGeometryPoint"),
            ("inSR", "4326"),
            ("spatialRel", "esriSpatialRelIntersects"),
            ("outFields", "*"),
            ("returnGeometry", "false"),
        ])
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .with_context(|| format!("spc layer {layer_id} query failed"))?
        .text()
        .await
        .context("reading spc response body")?;
    parse_polygon_attrs(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_feature_list_parses_to_empty() {
        let attrs = parse_polygon_attrs(r#"{"features": []}"#).unwrap();
        assert!(attrs.is_empty());
    }

    #[test]
    fn attribute_order_survives_parsing() {
        let body = r#"{"features": [{"properties": {"zeta": "1", "alpha": "2", "mid": "3"}}]}"#;
        let attrs = parse_polygon_attrs(body).unwrap();
        let keys: Vec<_> = attrs[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }
}
