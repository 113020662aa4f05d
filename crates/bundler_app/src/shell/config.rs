use std::fs;
use std::path::Path;

use anyhow::Context;
use bundler_engine::BundlerConfig;
use engine_logging::engine_info;

use super::Args;

/// Reads the optional RON config, then applies command-line overrides.
pub(crate) fn load_config(args: &Args) -> anyhow::Result<BundlerConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => read_config(path)?,
        None => BundlerConfig::default(),
    };
    if let Some(limit) = args.concurrency {
        config.concurrency_limit = limit;
    }
    if let Some(seconds) = args.timeout {
        config.timeout_seconds = seconds;
    }
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<BundlerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: BundlerConfig = ron::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    engine_info!("Loaded config from {:?}", path);
    Ok(config)
}
