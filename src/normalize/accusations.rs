use serde::Serialize;
use serde_json::Value;

use crate::dashboard::EndpointKind;

use super::{
    fields::{extract_list, resolve_text},
    parse_document, MalformedResponse,
};

const EPOCH_KEYS: &[&str] = &["epoch", "epochNumber", "epoch_number"];
const KIND_KEYS: &[&str] = &["type", "accusationType", "accusation_type"];
const STATUS_KEYS: &[&str] = &["status", "state"];
const ACCUSER_KEYS: &[&str] = &["accuser", "accuserAddress", "accuser_address", "reporter"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AccusationEvent {
    pub epoch: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub accuser: Option<String>,
}

impl From<&Value> for AccusationEvent {
    fn from(value: &Value) -> Self {
        Self {
            epoch: resolve_text(value, EPOCH_KEYS),
            kind: resolve_text(value, KIND_KEYS),
            status: resolve_text(value, STATUS_KEYS),
            accuser: resolve_text(value, ACCUSER_KEYS),
        }
    }
}

/// The accusations endpoint is already scoped to one validator, nothing to filter.
pub fn normalize_accusations(raw: &str) -> Result<Vec<AccusationEvent>, MalformedResponse> {
    let document = parse_document(raw)?;

    Ok(extract_list(&document, EndpointKind::Accusations.list_keys())
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(AccusationEvent::from)
                .collect()
        })
        .unwrap_or_default())
}
