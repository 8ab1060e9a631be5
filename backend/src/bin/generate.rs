//! GeoYIELD dataset generator
//!
//! Writes the synthetic farm collection to `dataset.path` (default
//! `public/farmData.json`). Set `GEOYIELD__GENERATOR__SEED` for a
//! reproducible file.

use anyhow::Context;
use chrono::Utc;
use geoyield_backend::{init_tracing, Config};
use shared::dataset::save_dataset;
use shared::generator::FarmGenerator;
use shared::validate_dataset;

fn main() -> anyhow::Result<()> {
    init_tracing("geoyield_gen=info,shared=info");

    dotenvy::dotenv().ok();
    let config = Config::load()?;
    let settings = &config.generator;

    let now = Utc::now();
    let generator = match settings.seed {
        Some(seed) => {
            tracing::info!(seed, "Using fixed seed");
            FarmGenerator::seeded(seed, now)
        }
        None => FarmGenerator::from_entropy(now),
    };

    tracing::info!("Generating {} farm records...", settings.record_count);
    let farms = generator
        .with_unique_ids(settings.enforce_unique_ids)
        .generate(settings.record_count);

    if settings.enforce_unique_ids {
        validate_dataset(&farms).context("generated dataset failed validation")?;
    }

    save_dataset(&config.dataset.path, &farms, settings.pretty)
        .with_context(|| format!("could not write {}", config.dataset.path))?;

    tracing::info!(
        records = farms.len(),
        path = %config.dataset.path,
        "Farm dataset written"
    );
    Ok(())
}
