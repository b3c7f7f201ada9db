//! # Alert Classifier
//! Reduces active NWS alerts at the point to three boolean flags:
//! tornado watch, tornado warning, PDS (particularly dangerous situation).

use serde::{Deserialize, Serialize};

/// One active alert as served by `alerts/active?point=...` (feature
/// properties only; geometry is the API's concern, not ours).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Independent flags; PDS can co-occur with a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFlags {
    pub watch: bool,
    pub warning: bool,
    pub pds: bool,
}

/// OR-accumulate flags across all records; once set by any record, a flag
/// stays set. Empty input yields all-false.
pub fn classify_alerts(records: &[AlertRecord]) -> AlertFlags {
    let mut flags = AlertFlags::default();

    for r in records {
        let blob = format!(
            "{} {} {}",
            r.event,
            r.headline.as_deref().unwrap_or_default(),
            r.description.as_deref().unwrap_or_default()
        )
        .to_lowercase();

        if blob.contains("tornado warning") {
            flags.warning = true;
        }
        if blob.contains("tornado watch") {
            flags.watch = true;
        }
        if blob.contains("particularly dangerous situation") || blob.contains("pds") {
            flags.pds = true;
        }
    }

    flags
}
