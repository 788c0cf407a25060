use rescache_domain::{CliOverrides, Config};
use std::path::Path;

pub fn load_config(
    config_path: Option<&Path>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    Ok(config)
}
