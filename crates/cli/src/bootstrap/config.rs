use rootwalk_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    info!(
        listen = %config.server.listen_addr(),
        root_hints = ?config.resolver.root_hints,
        "Configuration loaded"
    );
    Ok(config)
}
