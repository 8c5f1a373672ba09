//! Genderbot - A Zulip bot that stores and shares personal pronouns.
//!
//! Users talk to the bot in private messages. They can record the gendered
//! pronouns they go by, and look up the pronouns of anybody else in the
//! organization.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! database:
//!   uri: "sqlite:///genderbot.db"
//!
//! api:
//!   site: "https://example.zulipchat.com"
//!   email: "genderbot-bot@example.zulipchat.com"
//!   key: "your-api-key"
//! ```
//!
//! Values missing from `config.yaml` are read from `~/.genderbot.yaml`.
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the
//! `GENDERBOT_` prefix:
//!
//! ```bash
//! export GENDERBOT_DATABASE__URI="sqlite:////var/lib/genderbot/genderbot.db"
//! export GENDERBOT_API__KEY="your-api-key"
//! ```
//!
//! # Usage
//!
//! ```bash
//! genderbot --config config.yaml
//! ```
//!
//! # Bot Commands
//!
//! - `get [email]` - Show your pronouns, or somebody else's
//! - `set <nominative>, <oblique>, <determiner>, <possessive>, <reflexive>` - Store your pronouns
//! - `invite <email>` - Invite somebody to set their pronouns
//! - `welcome` - Show the introduction message
//!
//! # Architecture
//!
//! - [`bot`] - Event loop answering private messages
//! - [`commands`] - Command routing, handlers and reply formatting
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`store`] - SQLite storage of users and pronoun sets
//! - [`zulip`] - Zulip REST API client and message adapter
//! - [`utils`] - Utility functions for path handling
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::process;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config, utils::default_fallback_path};

mod bot;
mod commands;
mod config;
mod store;
mod utils;
mod zulip;

/// Command-line arguments for the bot.
///
/// # Examples
///
/// ```bash
/// genderbot --config config.yaml --fallback /etc/genderbot.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format.
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Path to the fallback YAML configuration file.
    ///
    /// Defaults to `~/.genderbot.yaml`.
    #[arg(short, long)]
    fallback: Option<String>,
}

/// Loads the configuration designated by `args`.
///
/// The trailing slash of the Zulip URL, if any, is removed.
fn load_config(args: &Args) -> Result<Config, figment::Error> {
    let fallback = args.fallback.clone().unwrap_or_else(default_fallback_path);
    let mut config = Config::load(&args.config, &fallback)?;

    if config.api.site.ends_with('/') {
        config.api.site.pop();
    }

    Ok(config)
}

/// Main entry point for the bot.
///
/// 1. **Logging Setup**: `info` level by default, overridden by `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Merges both YAML files and the environment
/// 4. **Bot Initialization**: Opens the store and builds the Zulip client
/// 5. **Bot Execution**: Answers private messages until the process is terminated
///
/// Configuration and store errors are logged and end the process with exit
/// status 1, without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting genderbot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            process::exit(1);
        }
    };

    let bot = match Bot::new(config) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {:?}", e);
            process::exit(1);
        }
    };
    bot.start().await;
}
