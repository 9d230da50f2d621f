mod bootstrap;

use anyhow::{anyhow, Result};
use league_core::settings::Settings;
use league_data::DatasetStore;
use league_runtime::bundle_cache::BundleCache;
use league_runtime::session::Session;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("League Stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}", settings.view);

    let data_dir = bootstrap::resolve_data_dir(&settings.data_dir);
    let mut cache = BundleCache::new(DatasetStore::new(&data_dir));
    let bundle = cache
        .get()
        .map_err(|e| anyhow!("could not load data from {}: {e}", data_dir.display()))?;

    let counts = bundle.row_counts();
    tracing::debug!(?counts, "dataset loaded");

    let selection = bootstrap::build_selection(&settings, &bundle)?;
    let session = Session::new(bundle, selection);
    let output = session.run()?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
