//! Fetches raw JSON documents from the dashboard's HTTP API. Nothing in here looks inside the
//! bodies, that's the normalizer's job, but it does sort failed requests into the few cases the
//! report wants to tell apart.
mod endpoints;

pub use endpoints::EndpointKind;

use anyhow::Context;
use async_trait::async_trait;
use enum_iterator::all;
use mockall::automock;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    address::Address, config::DashboardConfig, epochs::EpochWindow, performance::TimedExt,
};

/// Set by the CDN on responses that are a bot challenge rather than the API's answer.
const CHALLENGE_HEADER: &str = "cf-mitigated";
const BYPASS_COOKIE: &str = "cf_clearance";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("access denied by the dashboard's bot protection, status {0}")]
    AccessDenied(StatusCode),
    #[error("not found")]
    NotFound,
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

fn check_status(status: StatusCode, challenged: bool, url: &str) -> Result<(), FetchError> {
    if challenged || status == StatusCode::FORBIDDEN {
        return Err(FetchError::AccessDenied(status));
    }

    match status {
        StatusCode::NOT_FOUND => Err(FetchError::NotFound),
        status if status.is_success() => Ok(()),
        status => Err(FetchError::Status {
            status,
            url: url.to_string(),
        }),
    }
}

#[automock]
#[async_trait]
pub trait DashboardApi {
    async fn get_network_summary(&self) -> Result<String, FetchError>;
    async fn get_validator(&self, address: &Address) -> Result<String, FetchError>;
    async fn get_slashing_history(&self) -> Result<String, FetchError>;
    async fn get_leaderboard(&self, window: Option<EpochWindow>) -> Result<String, FetchError>;
    async fn get_accusations(&self, address: &Address) -> Result<String, FetchError>;
}

#[derive(Clone, Debug)]
pub struct DashboardApiHttp {
    base_url: String,
    client: reqwest::Client,
}

impl DashboardApiHttp {
    pub fn new(config: &DashboardConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::REFERER,
            HeaderValue::from_str(&config.referer)
                .context("referer is not a valid header value")?,
        );

        if let Some(token) = &config.bypass_token {
            let mut cookie = HeaderValue::from_str(&format!("{BYPASS_COOKIE}={token}"))
                .context("bypass token contains characters not allowed in a cookie")?;
            cookie.set_sensitive(true);
            headers.insert(header::COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("failed to build dashboard http client")?;

        for kind in all::<EndpointKind>() {
            debug!(%kind, path = kind.path_template(), "dashboard endpoint");
        }

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    async fn get(&self, kind: EndpointKind, url: String) -> Result<String, FetchError> {
        debug!(%kind, %url, "fetching dashboard endpoint");

        let res = self
            .client
            .get(&url)
            .send()
            .timed(&format!("get_{kind}"))
            .await?;

        let challenged = res.headers().contains_key(CHALLENGE_HEADER);
        if let Err(error) = check_status(res.status(), challenged, &url) {
            warn!(%kind, %error, "dashboard request failed");
            return Err(error);
        }

        Ok(res.text().await?)
    }
}

#[async_trait]
impl DashboardApi for DashboardApiHttp {
    async fn get_network_summary(&self) -> Result<String, FetchError> {
        let kind = EndpointKind::NetworkSummary;
        self.get(kind, kind.url(&self.base_url, None, None)).await
    }

    async fn get_validator(&self, address: &Address) -> Result<String, FetchError> {
        let kind = EndpointKind::Validator;
        self.get(kind, kind.url(&self.base_url, Some(address), None))
            .await
    }

    async fn get_slashing_history(&self) -> Result<String, FetchError> {
        let kind = EndpointKind::SlashingHistory;
        self.get(kind, kind.url(&self.base_url, None, None)).await
    }

    async fn get_leaderboard(&self, window: Option<EpochWindow>) -> Result<String, FetchError> {
        let kind = EndpointKind::Leaderboard;
        self.get(kind, kind.url(&self.base_url, None, window)).await
    }

    async fn get_accusations(&self, address: &Address) -> Result<String, FetchError> {
        let kind = EndpointKind::Accusations;
        self.get(kind, kind.url(&self.base_url, Some(address), None))
            .await
    }
}
