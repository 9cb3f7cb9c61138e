//! Assembles a validator report from the dashboard. Each section is fetched and normalized on its
//! own, a failing section is recorded as unavailable and the rest of the report carries on.
mod render;

pub use render::{render_network, render_report, Palette};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    address::Address,
    dashboard::{DashboardApi, FetchError},
    epochs::{EpochWindow, EPOCHS_PER_DAY},
    normalize::{
        self, AccusationEvent, MalformedResponse, NetworkSummary, Rank, SlashingHistory,
        ValidatorRecord,
    },
    performance::TimedExt,
};

/// Why a section of the report couldn't be filled in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Unavailable {
    /// The CDN in front of the dashboard wants a bypass token.
    AccessDenied,
    NotFound,
    HttpStatus(u16),
    Transport(String),
    Malformed(String),
}

impl From<FetchError> for Unavailable {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::AccessDenied(_) => Unavailable::AccessDenied,
            FetchError::NotFound => Unavailable::NotFound,
            FetchError::Status { status, .. } => Unavailable::HttpStatus(status.as_u16()),
            FetchError::Transport(error) => Unavailable::Transport(error.to_string()),
        }
    }
}

impl From<MalformedResponse> for Unavailable {
    fn from(error: MalformedResponse) -> Self {
        Unavailable::Malformed(error.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl<T> Section<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Section::Available(value) => Some(value),
            Section::Unavailable(_) => None,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, Section::Unavailable(Unavailable::AccessDenied))
    }

    fn from_fetch(
        name: &str,
        fetched: Result<String, FetchError>,
        normalize: impl FnOnce(&str) -> Result<T, MalformedResponse>,
    ) -> Self {
        let section = fetched
            .map_err(Unavailable::from)
            .and_then(|body| normalize(&body).map_err(Unavailable::from));

        match section {
            Ok(value) => Section::Available(value),
            Err(unavailable) => {
                warn!(section = name, ?unavailable, "report section unavailable");
                Section::Unavailable(unavailable)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReportOptions {
    /// Unit label appended to balances.
    pub token_symbol: String,
    /// Explicit leaderboard window, otherwise one trailing the current epoch.
    pub window: Option<EpochWindow>,
    pub leaderboard_span: u64,
}

impl ReportOptions {
    pub fn new(token_symbol: &str) -> Self {
        Self {
            token_symbol: token_symbol.to_string(),
            window: None,
            leaderboard_span: EPOCHS_PER_DAY,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardStanding {
    pub window: Option<EpochWindow>,
    pub rank: Rank,
}

#[derive(Clone, Debug, Serialize)]
pub struct ValidatorReport {
    pub address: Address,
    pub generated_at: DateTime<Utc>,
    pub network: Section<NetworkSummary>,
    pub validator: Section<ValidatorRecord>,
    pub slashings: Section<SlashingHistory>,
    pub accusations: Section<Vec<AccusationEvent>>,
    pub leaderboard: Section<LeaderboardStanding>,
}

impl ValidatorReport {
    /// Any section bounced off the CDN challenge, worth telling the user to log in.
    pub fn needs_bypass_token(&self) -> bool {
        self.network.is_access_denied()
            || self.validator.is_access_denied()
            || self.slashings.is_access_denied()
            || self.accusations.is_access_denied()
            || self.leaderboard.is_access_denied()
    }
}

/// The leaderboard window when none was given: trailing the current epoch if we know it,
/// otherwise whatever the dashboard defaults to.
fn leaderboard_window(
    options: &ReportOptions,
    network: &Section<NetworkSummary>,
) -> Option<EpochWindow> {
    options.window.or_else(|| {
        network
            .available()
            .and_then(|summary| summary.current_epoch)
            .map(|current_epoch| EpochWindow::trailing(current_epoch, options.leaderboard_span))
    })
}

pub async fn fetch_network_summary(api: &impl DashboardApi) -> Section<NetworkSummary> {
    let fetched = api
        .get_network_summary()
        .timed("fetch_network_summary")
        .await;
    Section::from_fetch(
        "network",
        fetched,
        normalize::normalize_network_summary,
    )
}

pub async fn build_report(
    api: &impl DashboardApi,
    address: &Address,
    options: &ReportOptions,
) -> ValidatorReport {
    info!(%address, "building validator report");

    let (network, validator, slashings, accusations) = futures::join!(
        fetch_network_summary(api),
        api.get_validator(address).timed("fetch_validator"),
        api.get_slashing_history().timed("fetch_slashing_history"),
        api.get_accusations(address).timed("fetch_accusations"),
    );

    let validator = match Section::from_fetch("validator", validator, |body| {
        normalize::normalize_validator(body, &options.token_symbol)
    }) {
        Section::Available(record) if record.is_blank() => {
            debug!(%address, "dashboard returned an empty validator record");
            Section::Unavailable(Unavailable::NotFound)
        }
        section => section,
    };
    let slashings = Section::from_fetch("slashings", slashings, |body| {
        normalize::normalize_slashing_history(body, address)
    });
    let accusations = Section::from_fetch(
        "accusations",
        accusations,
        normalize::normalize_accusations,
    );

    let window = leaderboard_window(options, &network);
    debug!(?window, "fetching leaderboard");
    let leaderboard = Section::from_fetch(
        "leaderboard",
        api.get_leaderboard(window).timed("fetch_leaderboard").await,
        |body| {
            normalize::normalize_leaderboard(body, address)
                .map(|rank| LeaderboardStanding { window, rank })
        },
    );

    ValidatorReport {
        address: address.clone(),
        generated_at: Utc::now(),
        network,
        validator,
        slashings,
        accusations,
        leaderboard,
    }
}
