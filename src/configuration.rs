use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_API_VERSION: &str = "5.81";
pub const DEFAULT_ARCHIVE_URL: &str = "https://xkcd.com/";
pub const DEFAULT_VK_API_URL: &str = "https://api.vk.com/method/";

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub access_token: String,
    pub group_id: u64,
    pub api_version: String,
    pub archive_url: Url,
    pub vk_api_url: Url,
}

impl Settings {
    /// Defaults, then `config_file` if it exists, then `VK_*` environment variables.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        Self::build(config_file, Environment::with_prefix("VK"))
    }

    fn build(config_file: &str, env: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api_version", DEFAULT_API_VERSION)?
            .set_default("archive_url", DEFAULT_ARCHIVE_URL)?
            .set_default("vk_api_url", DEFAULT_VK_API_URL)?
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(env)
            .build()?;
        let settings: Self = builder.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::Message("access_token must not be empty".into()));
        }
        if self.group_id == 0 {
            return Err(ConfigError::Message("group_id must be a positive integer".into()));
        }
        Ok(())
    }
}
