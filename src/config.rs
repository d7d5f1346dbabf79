//! Runtime configuration, read from `HERALD_`-prefixed environment variables.
//! A `.env` file is loaded into the environment first if there is one.

use crate::slack::auth::SlackAccessToken;
use std::{env, num::ParseIntError, time::Duration};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// `host:port` to listen on.
    pub addr: String,
    /// How long in-flight requests get to finish once shutdown starts.
    pub grace_period: Duration,
    /// Upper bound on each call to Slack or Discord.
    pub outbound_timeout: Duration,
    /// Slack is disabled without a token.
    pub slack_token: Option<SlackAccessToken>,
    /// Discord is disabled without a webhook URL.
    pub discord_webhook_url: Option<Url>,
    /// Regular expressions for Sentry tag keys which shouldn't be forwarded.
    pub excluded_fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds: {source}")]
    Seconds {
        var: &'static str,
        source: ParseIntError,
    },
    #[error("{var} must be a URL: {source}")]
    Url {
        var: &'static str,
        source: url::ParseError,
    },
}

const DEFAULT_ADDR: &str = "localhost:3000";
const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(60);
const DEFAULT_OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Build the config from any source of variables. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let seconds = |k: &'static str, default: Duration| match var(k) {
            None => Ok(default),
            Some(v) => v
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|source| ConfigError::Seconds { var: k, source }),
        };

        let discord_webhook_url = var("HERALD_DISCORD_WEBHOOK_URL")
            .map(|v| Url::parse(v.trim()))
            .transpose()
            .map_err(|source| ConfigError::Url {
                var: "HERALD_DISCORD_WEBHOOK_URL",
                source,
            })?;

        Ok(Config {
            addr: var("HERALD_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned()),
            grace_period: seconds("HERALD_GRACE_PERIOD", DEFAULT_GRACE_PERIOD)?,
            outbound_timeout: seconds("HERALD_OUTBOUND_TIMEOUT", DEFAULT_OUTBOUND_TIMEOUT)?,
            slack_token: var("HERALD_SLACK_TOKEN").map(SlackAccessToken),
            discord_webhook_url,
            excluded_fields: var("HERALD_EXCLUDED_FIELDS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|x| !x.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

impl LogFormat {
    /// Read separately from [Config] as logging must be up before the rest of
    /// the config is loaded.
    pub fn from_env() -> Self {
        match env::var("HERALD_LOG_FORMAT") {
            Ok(x) if x.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}
