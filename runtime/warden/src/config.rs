//! Load hierarchical configuration for a warden application.
//!
//! [`ConfigLoader`] is the key type in this module.
use std::path::PathBuf;

use anyhow::Context;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::de::DeserializeOwned;

static PROFILE_ENV_VAR: &str = "WARDEN_PROFILE";
static ENV_PREFIX: &str = "WARDEN_";

#[derive(Clone, Debug, Default)]
/// A utility to load hierarchical configuration.
///
/// Check out [`ConfigLoader::load`] for more information.
///
/// # Example
///
/// ```rust,no_run
/// use warden::config::ConfigLoader;
///
/// #[derive(Debug, Clone, serde::Deserialize)]
/// pub struct Config {
///     greeting: String,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let config: Config = ConfigLoader::new().default_profile("dev").load()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigLoader {
    configuration_dir: Option<PathBuf>,
    profile: Option<String>,
    default_profile: Option<String>,
}

impl ConfigLoader {
    /// Initialize a new [`ConfigLoader`] instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the configuration profile manually, rather than loading it
    /// from the `WARDEN_PROFILE` environment variable.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// The profile to use if `WARDEN_PROFILE` is not set.
    pub fn default_profile(mut self, profile: impl Into<String>) -> Self {
        self.default_profile = Some(profile.into());
        self
    }

    /// Specify the path to the directory where configuration files are stored.
    ///
    /// By default, configuration files are looked up under `configuration/`,
    /// relative to the current working directory.
    pub fn configuration_dir<Dir>(mut self, dir: Dir) -> Self
    where
        Dir: Into<PathBuf>,
    {
        self.configuration_dir = Some(dir.into());
        self
    }

    /// Load the configuration by merging together three sources:
    ///
    /// 1. Environment variables (`WARDEN_*`, nested keys separated by `__`)
    /// 2. Profile-specific configuration file (`{configuration_dir}/{profile}.yml`)
    /// 3. Base configuration file (`{configuration_dir}/base.yml`)
    ///
    /// The list above is ordered by precedence: environment variables take precedence
    /// over the profile-specific file, which in turn takes precedence over the base file.
    /// Missing files are skipped.
    pub fn load<Config>(self) -> Result<Config, errors::ConfigLoadError>
    where
        Config: DeserializeOwned,
    {
        let profile = match self.profile {
            Some(profile) => profile,
            None => load_profile(self.default_profile).map_err(errors::ConfigLoadError)?,
        };
        let configuration_dir = self
            .configuration_dir
            .unwrap_or_else(|| PathBuf::from("configuration"));
        let span = tracing::info_span!(
            "Loading configuration",
            configuration.directory = %configuration_dir.display(),
            configuration.profile = %profile,
        );
        let _guard = span.enter();

        let base_filepath = configuration_dir.join("base.yml");
        let profile_filepath = configuration_dir.join(format!("{profile}.yml"));
        // `WARDEN_PROFILE` is filtered out so that configuration types
        // can use `#[serde(deny_unknown_fields)]`.
        let env_source = Env::prefixed(ENV_PREFIX)
            .split("__")
            .ignore(&["PROFILE"]);
        let figment = Figment::new()
            .merge(Yaml::file(base_filepath))
            .merge(Yaml::file(profile_filepath))
            .merge(env_source);

        let configuration: Config = figment
            .extract()
            .context("Failed to load hierarchical configuration")
            .map_err(errors::ConfigLoadError)?;
        Ok(configuration)
    }
}

fn load_profile(default: Option<String>) -> Result<String, anyhow::Error> {
    match std::env::var(PROFILE_ENV_VAR) {
        Ok(profile) => Ok(profile),
        Err(std::env::VarError::NotPresent) => default.ok_or_else(|| {
            anyhow::anyhow!(
                "Failed to load the configuration profile: `{PROFILE_ENV_VAR}` is not set \
                and no default profile was specified"
            )
        }),
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "Failed to load the configuration profile from `{PROFILE_ENV_VAR}`"
        ))),
    }
}

/// Errors that can occur when loading configuration.
pub mod errors {
    #[derive(Debug, thiserror::Error)]
    #[error("Failed to load configuration")]
    /// The error returned by [`ConfigLoader::load`](super::ConfigLoader::load).
    pub struct ConfigLoadError(#[source] pub(super) anyhow::Error);
}
