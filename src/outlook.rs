//! # Outlook Resolver
//! Extracts the SPC Day-1 categorical risk label and the probabilistic
//! tornado percentage from polygon-query attribute sets.
//!
//! SPC feeds are inconsistent about which attribute carries the label and how
//! it is formatted, so resolution probes an ordered list of candidate keys
//! and matches a normalized label against a fixed, priority-ordered table.
//! When several polygons intersect the point only the first query result is
//! consulted; overlap precedence is the provider's problem, not ours.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute set of one polygon returned by an ArcGIS point query.
/// `serde_json` is built with `preserve_order`, so iteration follows the
/// stored attribute order.
pub type PolygonAttrs = Map<String, Value>;

/// Candidate attribute keys for the label, probed in priority order; the
/// first present, non-empty value wins.
const LABEL_KEYS: [&str; 4] = ["LABEL", "LABEL2", "Type", "label"];

/// Vocabulary in match-priority order (TSTM first, then ascending severity).
const CATEGORY_TABLE: [(&str, CategoricalLabel); 6] = [
    ("TSTM", CategoricalLabel::Tstm),
    ("MRGL", CategoricalLabel::Mrgl),
    ("SLGT", CategoricalLabel::Slgt),
    ("ENH", CategoricalLabel::Enh),
    ("MDT", CategoricalLabel::Mdt),
    ("HIGH", CategoricalLabel::High),
];

static RE_PCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*%").expect("valid percent regex"));

/// SPC categorical outlook tiers, ordered by severity. `None` means the point
/// fell outside every polygon (or no label matched the vocabulary).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoricalLabel {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "TSTM")]
    Tstm,
    #[serde(rename = "MRGL")]
    Mrgl,
    #[serde(rename = "SLGT")]
    Slgt,
    #[serde(rename = "ENH")]
    Enh,
    #[serde(rename = "MDT")]
    Mdt,
    #[serde(rename = "HIGH")]
    High,
}

impl std::fmt::Display for CategoricalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CategoricalLabel::None => "none",
            CategoricalLabel::Tstm => "TSTM",
            CategoricalLabel::Mrgl => "MRGL",
            CategoricalLabel::Slgt => "SLGT",
            CategoricalLabel::Enh => "ENH",
            CategoricalLabel::Mdt => "MDT",
            CategoricalLabel::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// First present, non-empty label-like value of a polygon.
fn label_value(attrs: &PolygonAttrs) -> Option<String> {
    LABEL_KEYS.iter().find_map(|k| {
        attrs
            .get(*k)
            .map(value_as_text)
            .filter(|s| !s.is_empty())
    })
}

/// Render any attribute value as text for pattern matching (numbers included;
/// the percent sometimes lives in a numeric-looking field rendered as text).
fn value_as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Resolve the categorical tier from the first matching polygon, `None` when
/// the list is empty or no vocabulary entry is contained in the normalized
/// label.
pub fn resolve_categorical(polygons: &[PolygonAttrs]) -> CategoricalLabel {
    let Some(attrs) = polygons.first() else {
        return CategoricalLabel::None;
    };
    let Some(raw) = label_value(attrs) else {
        return CategoricalLabel::None;
    };

    let normalized: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    CATEGORY_TABLE
        .iter()
        .find(|(pat, _)| normalized.contains(pat))
        .map(|&(_, label)| label)
        .unwrap_or(CategoricalLabel::None)
}

/// Resolve the probabilistic tornado percentage from the first matching
/// polygon: label field first, then every attribute value in stored order.
pub fn resolve_prob_tornado(polygons: &[PolygonAttrs]) -> Option<u32> {
    let attrs = polygons.first()?;

    if let Some(label) = label_value(attrs) {
        if let Some(pct) = extract_pct(&label) {
            return Some(pct);
        }
    }

    attrs.values().find_map(|v| extract_pct(&value_as_text(v)))
}

fn extract_pct(s: &str) -> Option<u32> {
    RE_PCT
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, Value)]) -> PolygonAttrs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_polygon_list_is_none() {
        assert_eq!(resolve_categorical(&[]), CategoricalLabel::None);
        assert_eq!(resolve_prob_tornado(&[]), None);
    }

    #[test]
    fn label_with_decoration_resolves() {
        let p = attrs(&[("LABEL", json!("Enhanced Risk (ENH)"))]);
        assert_eq!(resolve_categorical(&[p]), CategoricalLabel::Enh);
    }

    #[test]
    fn whitespace_is_stripped_before_matching() {
        let p = attrs(&[("Type", json!("m r g l"))]);
        assert_eq!(resolve_categorical(&[p]), CategoricalLabel::Mrgl);
    }

    #[test]
    fn candidate_keys_probe_in_priority_order() {
        let p = attrs(&[("label", json!("HIGH")), ("LABEL", json!("SLGT"))]);
        assert_eq!(resolve_categorical(&[p]), CategoricalLabel::Slgt);
    }

    #[test]
    fn empty_label_value_falls_through_to_next_key() {
        let p = attrs(&[("LABEL", json!("")), ("Type", json!("MDT"))]);
        assert_eq!(resolve_categorical(&[p]), CategoricalLabel::Mdt);
    }

    #[test]
    fn unknown_label_is_none() {
        let p = attrs(&[("LABEL", json!("General Outlook"))]);
        assert_eq!(resolve_categorical(&[p]), CategoricalLabel::None);
    }

    #[test]
    fn only_first_polygon_is_consulted() {
        let first = attrs(&[("LABEL", json!("MRGL"))]);
        let second = attrs(&[("LABEL", json!("HIGH"))]);
        assert_eq!(
            resolve_categorical(&[first, second]),
            CategoricalLabel::Mrgl
        );
    }

    #[test]
    fn severity_ordering_is_auditable() {
        use CategoricalLabel::*;
        let ordered = [None, Tstm, Mrgl, Slgt, Enh, Mdt, High];
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn pct_from_label_field() {
        let p = attrs(&[("LABEL", json!("5%"))]);
        assert_eq!(resolve_prob_tornado(&[p]), Some(5));
    }

    #[test]
    fn pct_falls_back_to_value_scan_in_stored_order() {
        let p = attrs(&[
            ("LABEL", json!("Tornado Probability")),
            ("fill", json!("#ab0000")),
            ("popupText", json!("10 % within 25 miles")),
            ("alt", json!("30%")),
        ]);
        assert_eq!(resolve_prob_tornado(&[p]), Some(10));
    }

    #[test]
    fn no_pct_anywhere_is_absent() {
        let p = attrs(&[("LABEL", json!("SLGT")), ("stroke", json!("#f00"))]);
        assert_eq!(resolve_prob_tornado(&[p]), None);
    }
}
