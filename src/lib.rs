// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod alerts;
pub mod config;
pub mod fetch;
pub mod hourly;
pub mod outlook;
pub mod score;

// ---- Re-exports for stable public API ----
pub use crate::alerts::{classify_alerts, AlertFlags, AlertRecord};
pub use crate::hourly::{summarize_hourly, window_next_24h, HourlyPeriod, HourlySummary};
pub use crate::outlook::{
    resolve_categorical, resolve_prob_tornado, CategoricalLabel, PolygonAttrs,
};
pub use crate::score::{score_likelihood, ScoreResult};
