use std::{fmt::Display, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A validator address, always stored as `0x` followed by 40 lowercase hex characters.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub const LENGTH: usize = 42;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Remote records are inconsistent about casing, compare case-insensitively.
    pub fn matches(&self, other: &str) -> bool {
        other.trim().to_lowercase() == self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("address must be 42 characters long (0x followed by 40 hex characters), got {0}")]
    WrongLength(usize),
    #[error("address must start with 0x followed by 40 hex characters")]
    MissingPrefix,
    #[error("address contains {0:?}, expected 0x followed by 40 hex characters (0-9, a-f)")]
    InvalidCharacter(char),
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.to_lowercase();
        let char_count = folded.chars().count();
        if char_count != Self::LENGTH {
            return Err(ParseAddressError::WrongLength(char_count));
        }

        let hex = folded
            .strip_prefix("0x")
            .ok_or(ParseAddressError::MissingPrefix)?;

        if let Some(invalid) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseAddressError::InvalidCharacter(invalid));
        }

        Ok(Address(folded))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED_CASE: &str = "0xAbCdEf0123456789aBcDeF0123456789ABCDEF01";

    #[test]
    fn parses_and_lowercases_test() {
        let address: Address = MIXED_CASE.parse().unwrap();
        assert_eq!(
            address.as_str(),
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
    }

    #[test]
    fn accepts_uppercase_prefix_test() {
        let address: Address = "0XABCDEF0123456789ABCDEF0123456789ABCDEF01"
            .parse()
            .unwrap();
        assert_eq!(
            address.to_string(),
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
    }

    #[test]
    fn rejects_wrong_length_test() {
        assert_eq!(
            "0xabc".parse::<Address>(),
            Err(ParseAddressError::WrongLength(5))
        );
        assert_eq!(
            format!("{MIXED_CASE}0").parse::<Address>(),
            Err(ParseAddressError::WrongLength(43))
        );
        assert_eq!("".parse::<Address>(), Err(ParseAddressError::WrongLength(0)));
    }

    #[test]
    fn rejects_missing_prefix_test() {
        assert_eq!(
            "00abcdef0123456789abcdef0123456789abcdef01".parse::<Address>(),
            Err(ParseAddressError::MissingPrefix)
        );
    }

    #[test]
    fn rejects_non_hex_test() {
        assert_eq!(
            "0xabcdef0123456789abcdef0123456789abcdefzz".parse::<Address>(),
            Err(ParseAddressError::InvalidCharacter('z'))
        );
        assert_eq!(
            "0x abcdef0123456789abcdef0123456789abcdef0".parse::<Address>(),
            Err(ParseAddressError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn error_names_expected_format_test() {
        let error = "nope".parse::<Address>().unwrap_err();
        assert!(error.to_string().contains("0x followed by 40 hex characters"));
    }

    #[test]
    fn matches_case_insensitively_test() {
        let address: Address = "0xabcdef0123456789abcdef0123456789abcdef01"
            .parse()
            .unwrap();
        assert!(address.matches(MIXED_CASE));
        assert!(!address.matches("0xabcdef0123456789abcdef0123456789abcdef02"));
    }
}
