//! Configuration file structures for the bot.
//!
//! The configuration is split into two sections: the database holding the
//! pronoun sets and the Zulip account of the bot.
//!
//! # Configuration File Format
//!
//! ```yaml
//! database:
//!   # SQLite database, see the store module for the accepted forms
//!   uri: "sqlite:///genderbot.db"
//!
//! api:
//!   # Base URL of the Zulip server
//!   site: "https://example.zulipchat.com"
//!   # Email of the bot account
//!   email: "genderbot-bot@example.zulipchat.com"
//!   # API key of the bot account
//!   key: "your-api-key"
//! ```
//!
//! # Sources
//!
//! Values are read from, in descending order of precedence:
//!
//! 1. Environment variables prefixed with `GENDERBOT_`, sections separated by
//!    `__` (e.g. `GENDERBOT_API__KEY`)
//! 2. The primary configuration file
//! 3. The fallback configuration file
//!
//! Missing files are skipped. A missing section or option is an error.

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration files.
pub const ENV_PREFIX: &str = "GENDERBOT_";

/// Root configuration structure for the bot.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: Database,
    /// Zulip account configuration
    pub api: Api,
}

/// Database configuration.
///
/// ```yaml
/// database:
///   uri: "sqlite:///genderbot.db"
/// ```
#[derive(Debug, Deserialize)]
pub struct Database {
    /// Connection string of the store.
    pub uri: String,
}

/// Zulip account configuration.
///
/// ```yaml
/// api:
///   site: "https://example.zulipchat.com"
///   email: "genderbot-bot@example.zulipchat.com"
///   key: "your-api-key"
/// ```
#[derive(Debug, Deserialize)]
pub struct Api {
    /// Base URL of the Zulip server.
    ///
    /// Should include the protocol (http/https).
    pub site: String,

    /// Email of the bot account.
    ///
    /// Also used to recognize, and ignore, messages sent by the bot itself.
    pub email: String,

    /// API key of the bot account.
    pub key: String,
}

impl Config {
    /// Loads the configuration from `path`, falling back to `fallback` for
    /// missing values, with environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or a required option is
    /// missing from every source.
    pub fn load(path: &str, fallback: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(fallback))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_config_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const FULL_CONFIG: &str = r#"
database:
  uri: "sqlite:///genderbot.db"
api:
  site: "https://zulip.example.com"
  email: "bot@example.com"
  key: "primary-key"
"#;

    #[test]
    #[serial]
    fn test_load_primary_file() {
        let primary = create_config_file(FULL_CONFIG);

        let config = Config::load(primary.path().to_str().unwrap(), "missing-fallback.yaml").unwrap();

        assert_eq!(config.database.uri, "sqlite:///genderbot.db");
        assert_eq!(config.api.site, "https://zulip.example.com");
        assert_eq!(config.api.email, "bot@example.com");
        assert_eq!(config.api.key, "primary-key");
    }

    #[test]
    #[serial]
    fn test_load_fallback_fills_missing_sections() {
        let primary = create_config_file(
            r#"
database:
  uri: "sqlite://"
"#,
        );
        let fallback = create_config_file(
            r#"
api:
  site: "https://zulip.example.com"
  email: "bot@example.com"
  key: "fallback-key"
"#,
        );

        let config = Config::load(
            primary.path().to_str().unwrap(),
            fallback.path().to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(config.database.uri, "sqlite://");
        assert_eq!(config.api.key, "fallback-key");
    }

    #[test]
    #[serial]
    fn test_load_primary_takes_precedence_over_fallback() {
        let primary = create_config_file(FULL_CONFIG);
        let fallback = create_config_file(
            r#"
database:
  uri: "sqlite:///other.db"
api:
  site: "https://other.example.com"
  email: "other@example.com"
  key: "fallback-key"
"#,
        );

        let config = Config::load(
            primary.path().to_str().unwrap(),
            fallback.path().to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(config.database.uri, "sqlite:///genderbot.db");
        assert_eq!(config.api.key, "primary-key");
    }

    #[test]
    #[serial]
    fn test_load_missing_option_fails() {
        let primary = create_config_file(
            r#"
database:
  uri: "sqlite://"
api:
  site: "https://zulip.example.com"
  email: "bot@example.com"
"#,
        );

        let result = Config::load(primary.path().to_str().unwrap(), "missing-fallback.yaml");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("key"));
    }

    #[test]
    #[serial]
    fn test_load_no_file_fails() {
        let result = Config::load("missing-config.yaml", "missing-fallback.yaml");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_load_env_overrides_files() {
        let primary = create_config_file(FULL_CONFIG);

        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var("GENDERBOT_API__KEY", "env-key") };
        let result = Config::load(primary.path().to_str().unwrap(), "missing-fallback.yaml");
        unsafe { std::env::remove_var("GENDERBOT_API__KEY") };

        let config = result.unwrap();
        assert_eq!(config.api.key, "env-key");
        assert_eq!(config.api.email, "bot@example.com");
    }
}
