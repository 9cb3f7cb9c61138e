use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::{address::Address, dashboard::EndpointKind};

use super::{
    fields::{extract_list, resolve_text},
    parse_document, MalformedResponse,
};

const ADDRESS_KEYS: &[&str] = &["address", "validator", "validatorAddress", "validator_address"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "position", rename_all = "snake_case")]
pub enum Rank {
    /// 1-based position in the leaderboard.
    Ranked(usize),
    NotRanked,
    /// The leaderboard itself couldn't be located in the response.
    Unknown,
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ranked(position) => write!(f, "#{position}"),
            Rank::NotRanked => write!(f, "not ranked"),
            Rank::Unknown => write!(f, "unknown"),
        }
    }
}

/// Entries are objects carrying an address, some revisions send bare address strings.
fn entry_address(entry: &Value) -> Option<String> {
    match entry {
        Value::String(address) => Some(address.clone()),
        Value::Object(_) => resolve_text(entry, ADDRESS_KEYS),
        _ => None,
    }
}

/// Array order is rank order.
pub fn normalize_leaderboard(raw: &str, address: &Address) -> Result<Rank, MalformedResponse> {
    let document = parse_document(raw)?;

    let rank = match extract_list(&document, EndpointKind::Leaderboard.list_keys()) {
        None => Rank::Unknown,
        Some(entries) => entries
            .iter()
            .position(|entry| {
                entry_address(entry).map_or(false, |entry_address| address.matches(&entry_address))
            })
            .map_or(Rank::NotRanked, |index| Rank::Ranked(index + 1)),
    };

    Ok(rank)
}
