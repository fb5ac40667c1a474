use std::path::Path;

use anyhow::Context;
use warden::config::ConfigLoader;
use warden::server::ServerConfig;
use warden_session::SessionConfig;

#[derive(serde::Deserialize, Debug, Clone, Default)]
/// The top-level configuration, determining the schema we expect to see
/// in the configuration files stored under `demos/levels/configuration`.
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Load the configuration by merging `base.yml`, the profile-specific file and
    /// `WARDEN_*` environment variables.
    ///
    /// The profile is read from `WARDEN_PROFILE` and it defaults to `dev`.
    pub fn load() -> Result<Config, anyhow::Error> {
        let configuration_dir =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("configuration");
        ConfigLoader::new()
            .configuration_dir(configuration_dir)
            .default_profile("dev")
            .load()
            .context("Failed to load the application configuration")
    }
}
