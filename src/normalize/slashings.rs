use serde::Serialize;
use serde_json::Value;

use crate::{address::Address, dashboard::EndpointKind};

use super::{
    fields::{extract_list, resolve_text},
    parse_document, MalformedResponse,
};

const ADDRESS_KEYS: &[&str] = &[
    "validator",
    "validatorAddress",
    "validator_address",
    "address",
    "slashed",
];
const EPOCH_KEYS: &[&str] = &["epoch", "epochNumber"];
const SLOT_KEYS: &[&str] = &["slot", "slotNumber"];
const BLOCK_KEYS: &[&str] = &["block", "blockNumber", "block_number"];
const REASON_KEYS: &[&str] = &["reason", "type", "slashingType", "slashing_type"];
const AMOUNT_KEYS: &[&str] = &["amount", "slashedAmount", "slashed_amount", "penalty"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SlashingEvent {
    pub epoch: Option<String>,
    pub slot: Option<String>,
    pub block: Option<String>,
    pub address: Option<String>,
    pub reason: Option<String>,
    pub amount: Option<String>,
}

impl SlashingEvent {
    fn from_value(value: &Value) -> Self {
        Self {
            epoch: resolve_text(value, EPOCH_KEYS),
            slot: resolve_text(value, SLOT_KEYS),
            block: resolve_text(value, BLOCK_KEYS),
            address: resolve_text(value, ADDRESS_KEYS),
            reason: resolve_text(value, REASON_KEYS),
            amount: resolve_text(value, AMOUNT_KEYS),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SlashingHistory {
    /// Every slashing the dashboard knows about, not only this validator's.
    pub total_events: usize,
    pub matching_events: Vec<SlashingEvent>,
}

pub fn normalize_slashing_history(
    raw: &str,
    address: &Address,
) -> Result<SlashingHistory, MalformedResponse> {
    let document = parse_document(raw)?;
    let list_keys = EndpointKind::SlashingHistory.list_keys();
    let events: Vec<SlashingEvent> = extract_list(&document, list_keys)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(SlashingEvent::from_value)
                .collect()
        })
        .unwrap_or_default();

    let total_events = events.len();
    let matching_events = events
        .into_iter()
        .filter(|event| {
            event
                .address
                .as_deref()
                .map_or(false, |event_address| address.matches(event_address))
        })
        .collect();

    Ok(SlashingHistory {
        total_events,
        matching_events,
    })
}
