use dnsperf_domain::{CliOverrides, Config};

/// Loads and validates configuration. Any error here is fatal.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
