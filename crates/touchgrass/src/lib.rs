//! Terminal front end for the touchgrass workspace model: a line-oriented
//! shell that drives the navigation controller and prints each view.

pub mod render;
pub mod shell;

/// Build-time version string.
///
/// `TOUCHGRASS_VERSION` from the build environment wins (release builds set
/// it); otherwise the crate package version is used.
pub const VERSION: &str = match option_env!("TOUCHGRASS_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Filter used when neither `RUST_LOG` nor the config file provide one.
pub const DEFAULT_LOG_FILTER: &str = "touchgrass=info,tg_nav=info,tg_workspace=info,tg_store=warn";

/// Pick the config a shell session runs with. A store file needs the config
/// directory, so load failures are fatal there; an in-memory session falls
/// back to the defaults.
pub fn shell_config(
    loaded: anyhow::Result<tg_config::AppConfig>,
    in_memory: bool,
) -> anyhow::Result<tg_config::AppConfig> {
    match loaded {
        Ok(config) => Ok(config),
        Err(e) if in_memory => {
            tracing::warn!("Using default config: {:#}", e);
            Ok(tg_config::AppConfig::default())
        }
        Err(e) => Err(e),
    }
}
