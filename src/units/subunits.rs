use std::{fmt::Display, num::ParseIntError, str::FromStr};

use serde::Serialize;

use super::{DISPLAY_DECIMALS, SUBUNITS_PER_TOKEN};

/// An amount in the smallest token denomination, 10^18 per whole token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct SubunitAmount(pub u128);

impl SubunitAmount {
    /// Renders whole tokens with a fixed six decimals, rounding half up. None when rounding
    /// would overflow.
    pub fn to_token_string(self) -> Option<String> {
        let SubunitAmount(amount) = self;
        let step = SUBUNITS_PER_TOKEN / 10u128.pow(DISPLAY_DECIMALS);
        let scaled = amount.checked_add(step / 2)? / step;
        let precision = 10u128.pow(DISPLAY_DECIMALS);
        Some(format!(
            "{}.{:0width$}",
            scaled / precision,
            scaled % precision,
            width = DISPLAY_DECIMALS as usize
        ))
    }
}

impl Display for SubunitAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let SubunitAmount(amount) = self;
        write!(f, "{amount}")
    }
}

impl From<SubunitAmount> for String {
    fn from(SubunitAmount(amount): SubunitAmount) -> Self {
        amount.to_string()
    }
}

impl FromStr for SubunitAmount {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>().map(SubunitAmount)
    }
}

impl From<u128> for SubunitAmount {
    fn from(amount: u128) -> Self {
        SubunitAmount(amount)
    }
}
