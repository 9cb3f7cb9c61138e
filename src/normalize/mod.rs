//! Turns whatever the dashboard sent back into fixed, typed records.
//!
//! The dashboard has renamed fields between API revisions, sometimes wraps lists in an object and
//! sometimes doesn't, and is inconsistent about address casing. Every fn in here tolerates that:
//! fields that can't be resolved come back as `None` (or `0` for counters), and the only error is a
//! body that isn't a JSON object or array at all.
mod accusations;
mod fields;
mod leaderboard;
mod network;
pub mod rates;
mod slashings;
mod validator;

use serde_json::Value;
use thiserror::Error;

pub use accusations::{normalize_accusations, AccusationEvent};
pub use fields::{extract_list, resolve, resolve_counter, resolve_number, resolve_text};
pub use leaderboard::{normalize_leaderboard, Rank};
pub use network::{normalize_network_summary, NetworkSummary};
pub use slashings::{normalize_slashing_history, SlashingEvent, SlashingHistory};
pub use validator::{normalize_validator, ValidatorRecord};

/// Raised when the server returned something other than a JSON document we could walk, as
/// opposed to a document that merely lacks the fields we look for.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedResponse {
    #[error("response body is not valid json: {0}")]
    InvalidJson(String),
    #[error("expected a json object or array at the top level, got {0}")]
    UnexpectedTopLevel(&'static str),
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn parse_document(raw: &str) -> Result<Value, MalformedResponse> {
    let document = serde_json::from_str::<Value>(raw)
        .map_err(|error| MalformedResponse::InvalidJson(error.to_string()))?;

    match document {
        Value::Object(_) | Value::Array(_) => Ok(document),
        other => Err(MalformedResponse::UnexpectedTopLevel(json_kind(&other))),
    }
}

/// Single records are sometimes wrapped as `{"data": {...}}`.
fn unwrap_record(document: &Value) -> &Value {
    match document.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => document,
    }
}
