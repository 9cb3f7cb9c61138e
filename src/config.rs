use std::{path::Path, time::Duration};

use anyhow::{anyhow, Result};
use tracing::warn;

use crate::{
    env::{get_env_u64, get_env_var},
    epochs::EPOCHS_PER_DAY,
    token_store,
};

/// Bot protection lets plain clients through less often than browsers.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_TOKEN_SYMBOL: &str = "ETH";

/// Everything the dashboard client needs, resolved once at startup and passed around explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub user_agent: String,
    pub referer: String,
    pub timeout: Duration,
    pub bypass_token: Option<String>,
    pub token_symbol: String,
    pub leaderboard_span: u64,
}

/// Values given on the command line, these win over the environment.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub bypass_token: Option<String>,
    pub leaderboard_span: Option<u64>,
}

impl DashboardConfig {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            referer: format!("{base_url}/"),
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            bypass_token: None,
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            leaderboard_span: EPOCHS_PER_DAY,
        }
    }

    pub fn load(overrides: ConfigOverrides, token_path: Option<&Path>) -> Result<Self> {
        let base_url = overrides
            .base_url
            .or_else(|| get_env_var("DASHBOARD_URL"))
            .ok_or_else(|| anyhow!("DASHBOARD_URL in env or --base-url is required"))?;

        let mut config = Self::new(&base_url);

        if let Some(user_agent) = get_env_var("DASHBOARD_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(referer) = get_env_var("DASHBOARD_REFERER") {
            config.referer = referer;
        }
        let timeout_secs = match overrides.timeout_secs {
            Some(timeout_secs) => Some(timeout_secs),
            None => get_env_u64("DASHBOARD_TIMEOUT_SECS")?,
        };
        if let Some(timeout_secs) = timeout_secs {
            config.timeout = Duration::from_secs(timeout_secs);
        }
        if let Some(token_symbol) = get_env_var("TOKEN_SYMBOL") {
            config.token_symbol = token_symbol;
        }
        let span = match overrides.leaderboard_span {
            Some(span) => Some(span),
            None => get_env_u64("LEADERBOARD_SPAN")?,
        };
        if let Some(span) = span {
            config.leaderboard_span = span;
        }

        let stored_token = match token_path {
            Some(path) => token_store::load_token(path).unwrap_or_else(|error| {
                warn!(%error, "ignoring unreadable stored bypass token");
                None
            }),
            None => None,
        };
        config.bypass_token = pick_bypass_token(
            overrides.bypass_token,
            get_env_var("DASHBOARD_BYPASS_TOKEN"),
            stored_token,
        );

        Ok(config)
    }
}

/// Command line, then environment, then the stored token. Blank values don't count.
fn pick_bypass_token(
    flag: Option<String>,
    env: Option<String>,
    stored: Option<String>,
) -> Option<String> {
    [flag, env, stored]
        .into_iter()
        .flatten()
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}
