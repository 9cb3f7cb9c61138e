//! Balances come back from the dashboard either as a huge integer in subunits or as an already
//! human readable decimal, and no field ever says which. This is a best-effort guess: long pure
//! integers are subunits, everything else is shown as is.

use std::fmt::Display;

use serde::Serialize;

use super::{SubunitAmount, SUBUNIT_DIGITS_THRESHOLD};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenAmount {
    /// The value exactly as the dashboard sent it.
    pub raw: String,
    /// Decimal amount followed by the unit label.
    pub rendered: String,
}

fn looks_like_subunits(raw: &str) -> bool {
    raw.len() > SUBUNIT_DIGITS_THRESHOLD && raw.bytes().all(|byte| byte.is_ascii_digit())
}

impl TokenAmount {
    pub fn from_raw(raw: &str, unit: &str) -> Self {
        let amount = if looks_like_subunits(raw) {
            raw.parse::<SubunitAmount>()
                .ok()
                .and_then(SubunitAmount::to_token_string)
                .unwrap_or_else(|| raw.to_string())
        } else {
            raw.to_string()
        };

        Self {
            raw: raw.to_string(),
            rendered: format!("{amount} {unit}"),
        }
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendered)
    }
}
