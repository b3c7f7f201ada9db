//! Tornado Likelihood — Binary Entrypoint
//! Fetches the three upstream feeds, runs the pure scoring core, and prints
//! the score with its full breakdown (human summary plus JSON with
//! `TORNADO_JSON=1`).

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tornado_likelihood::config::Config;
use tornado_likelihood::fetch::{build_client, nws, spc};
use tornado_likelihood::{
    classify_alerts, resolve_categorical, resolve_prob_tornado, score_likelihood,
    summarize_hourly, window_next_24h, ScoreResult,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tornado_likelihood=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = Config::from_env().context("loading configuration")?;
    let client = build_client(&cfg.user_agent)?;

    // 1) Resolve forecast endpoints for the point
    let hourly_url = nws::fetch_forecast_hourly_url(&client, cfg.lat, cfg.lon).await?;

    // 2) Hourly forecast, windowed to the next 24h from now
    let periods = nws::fetch_hourly_periods(&client, &hourly_url).await?;
    let now = Utc::now();
    let next24 = window_next_24h(&periods, now);
    let hourly_summary = summarize_hourly(&next24);

    // 3) Active alerts at the point
    let alert_records = nws::fetch_active_alerts(&client, cfg.lat, cfg.lon).await?;
    let alert_flags = classify_alerts(&alert_records);

    // 4) SPC Day 1 categorical + probabilistic tornado polygons
    let cat_polys = spc::query_layer(&client, spc::LAYER_DAY1_CATEGORICAL, cfg.lat, cfg.lon).await?;
    let prob_polys =
        spc::query_layer(&client, spc::LAYER_DAY1_PROB_TORNADO, cfg.lat, cfg.lon).await?;
    let categorical = resolve_categorical(&cat_polys);
    let prob_pct = resolve_prob_tornado(&prob_polys);

    // 5) Combine into a score
    let result = score_likelihood(categorical, prob_pct, alert_flags, hourly_summary);

    render(&cfg, &result)?;
    Ok(())
}

fn render(cfg: &Config, result: &ScoreResult) -> Result<()> {
    if std::env::var("TORNADO_JSON").ok().as_deref() == Some("1") {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("=== Tornado Likelihood (Heuristic) — Next 24h ===");
    println!("Location: {:.4}, {:.4} ({})", cfg.lat, cfg.lon, cfg.location);
    println!(
        "SPC categorical: {} | SPC tornado prob: {}%",
        result.categorical,
        result.prob_tornado_pct.unwrap_or(0)
    );
    println!(
        "Alerts — Watch: {}  Warning: {}  PDS: {}",
        result.alerts.watch, result.alerts.warning, result.alerts.pds
    );
    println!(
        "Hourly summary — thunder_hours: {}, max PoP: {}%, max gust: {} mph",
        result.hourly.thunder_hours, result.hourly.max_pop, result.hourly.max_gust_mph
    );
    println!("Likelihood score (0–100): {}", result.score);
    Ok(())
}
