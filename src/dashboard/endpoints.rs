use std::fmt::Display;

use enum_iterator::Sequence;
use format_url::FormatUrl;

use crate::{address::Address, epochs::EpochWindow};

/// Every dashboard endpoint the report reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Sequence)]
pub enum EndpointKind {
    NetworkSummary,
    Validator,
    SlashingHistory,
    Leaderboard,
    Accusations,
}

impl Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkSummary => write!(f, "network-summary"),
            Self::Validator => write!(f, "validator"),
            Self::SlashingHistory => write!(f, "slashing-history"),
            Self::Leaderboard => write!(f, "leaderboard"),
            Self::Accusations => write!(f, "accusations"),
        }
    }
}

impl EndpointKind {
    pub fn path_template(&self) -> &'static str {
        match self {
            Self::NetworkSummary => "/api/v1/network/summary",
            Self::Validator => "/api/v1/validators/:address",
            Self::SlashingHistory => "/api/v1/slashings",
            Self::Leaderboard => "/api/v1/leaderboard",
            Self::Accusations => "/api/v1/validators/:address/accusations",
        }
    }

    /// Object keys a list-bearing endpoint may wrap its list under, in priority order.
    pub fn list_keys(&self) -> &'static [&'static str] {
        match self {
            Self::NetworkSummary | Self::Validator => &[],
            Self::SlashingHistory => &["data", "events", "slashings"],
            Self::Leaderboard => &["data", "leaderboard", "validators"],
            Self::Accusations => &["data", "events", "accusations"],
        }
    }

    pub fn needs_address(&self) -> bool {
        self.path_template().contains(":address")
    }

    pub fn url(
        &self,
        base_url: &str,
        address: Option<&Address>,
        window: Option<EpochWindow>,
    ) -> String {
        let window_params =
            window.map(|window| (window.start.to_string(), window.end.to_string()));

        let mut url = FormatUrl::new(base_url).with_path_template(self.path_template());

        if let Some(address) = address.filter(|_| self.needs_address()) {
            url = url.with_substitutes(vec![("address", address.as_str())]);
        }

        if let Some((start, end)) = &window_params {
            url = url.with_query_params(vec![
                ("startEpoch", start.as_str()),
                ("endEpoch", end.as_str()),
            ]);
        }

        url.format_url()
    }
}

#[cfg(test)]
mod tests {
    use enum_iterator::all;

    use super::*;

    const BASE_URL: &str = "https://dashboard.test";

    fn address() -> Address {
        "0xabcdef0123456789abcdef0123456789abcdef01".parse().unwrap()
    }

    #[test]
    fn network_summary_url_test() {
        assert_eq!(
            EndpointKind::NetworkSummary.url(BASE_URL, None, None),
            "https://dashboard.test/api/v1/network/summary"
        );
    }

    #[test]
    fn validator_url_test() {
        assert_eq!(
            EndpointKind::Validator.url(BASE_URL, Some(&address()), None),
            "https://dashboard.test/api/v1/validators/0xabcdef0123456789abcdef0123456789abcdef01"
        );
    }

    #[test]
    fn accusations_url_test() {
        assert_eq!(
            EndpointKind::Accusations.url(BASE_URL, Some(&address()), None),
            "https://dashboard.test/api/v1/validators/0xabcdef0123456789abcdef0123456789abcdef01/accusations"
        );
    }

    #[test]
    fn leaderboard_url_with_window_test() {
        let window = EpochWindow::new(100, 200).unwrap();
        assert_eq!(
            EndpointKind::Leaderboard.url(BASE_URL, None, Some(window)),
            "https://dashboard.test/api/v1/leaderboard?startEpoch=100&endEpoch=200"
        );
    }

    #[test]
    fn address_placeholders_test() {
        let with_address: Vec<EndpointKind> =
            all::<EndpointKind>().filter(|kind| kind.needs_address()).collect();
        assert_eq!(
            with_address,
            vec![EndpointKind::Validator, EndpointKind::Accusations]
        );
    }

    #[test]
    fn address_ignored_without_placeholder_test() {
        assert_eq!(
            EndpointKind::SlashingHistory.url(BASE_URL, Some(&address()), None),
            "https://dashboard.test/api/v1/slashings"
        );
    }

    #[test]
    fn only_list_endpoints_have_list_keys_test() {
        for kind in all::<EndpointKind>() {
            let is_list = matches!(
                kind,
                EndpointKind::SlashingHistory
                    | EndpointKind::Leaderboard
                    | EndpointKind::Accusations
            );
            assert_eq!(!kind.list_keys().is_empty(), is_list, "{kind}");
            if is_list {
                assert_eq!(kind.list_keys()[0], "data");
            }
        }
    }
}
