mod bootstrap;

use anyhow::Result;
use baseline_core::settings::Settings;
use baseline_data::analysis::run_baseline;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("log-baseline v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, Output: {}, Bucket: {}",
        settings.input.display(),
        settings.output.display(),
        settings.bucket
    );

    let metadata = run_baseline(&settings.input, &settings.output, settings.bucket)?;

    println!(
        "Wrote {} with {} keys",
        settings.output.display(),
        metadata.keys
    );

    Ok(())
}
