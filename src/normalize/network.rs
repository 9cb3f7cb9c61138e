use serde::Serialize;

use crate::epochs::Epoch;

use super::{fields::resolve_number, parse_document, unwrap_record, MalformedResponse};

const CURRENT_EPOCH_KEYS: &[&str] = &[
    "currentEpoch",
    "current_epoch",
    "epoch",
    "network.currentEpoch",
];
const ACTIVE_VALIDATORS_KEYS: &[&str] = &[
    "activeValidators",
    "active_validators",
    "validators.active",
    "activeValidatorCount",
];
const TOTAL_VALIDATORS_KEYS: &[&str] = &[
    "totalValidators",
    "total_validators",
    "validators.total",
    "validatorCount",
];
const FINALIZED_EPOCH_KEYS: &[&str] = &[
    "finalizedEpoch",
    "finalized_epoch",
    "finality.finalizedEpoch",
    "lastFinalizedEpoch",
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub current_epoch: Option<Epoch>,
    pub active_validators: Option<u64>,
    pub total_validators: Option<u64>,
    pub finalized_epoch: Option<Epoch>,
}

pub fn normalize_network_summary(raw: &str) -> Result<NetworkSummary, MalformedResponse> {
    let document = parse_document(raw)?;
    let record = unwrap_record(&document);

    Ok(NetworkSummary {
        current_epoch: resolve_number(record, CURRENT_EPOCH_KEYS),
        active_validators: resolve_number(record, ACTIVE_VALIDATORS_KEYS),
        total_validators: resolve_number(record, TOTAL_VALIDATORS_KEYS),
        finalized_epoch: resolve_number(record, FINALIZED_EPOCH_KEYS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_summary_test() {
        let summary = normalize_network_summary(
            r#"{
                "currentEpoch": 1200,
                "activeValidators": 950,
                "totalValidators": 1000,
                "finalizedEpoch": 1198
            }"#,
        )
        .unwrap();

        assert_eq!(
            summary,
            NetworkSummary {
                current_epoch: Some(1200),
                active_validators: Some(950),
                total_validators: Some(1000),
                finalized_epoch: Some(1198),
            }
        );
    }

    #[test]
    fn nested_and_snake_case_summary_test() {
        let summary = normalize_network_summary(
            r#"{
                "data": {
                    "current_epoch": "1200",
                    "validators": { "active": 950, "total": 1000 },
                    "finality": { "finalizedEpoch": "1198" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(summary.current_epoch, Some(1200));
        assert_eq!(summary.active_validators, Some(950));
        assert_eq!(summary.total_validators, Some(1000));
        assert_eq!(summary.finalized_epoch, Some(1198));
    }

    #[test]
    fn partial_summary_is_unknown_not_zero_test() {
        let summary = normalize_network_summary(r#"{"epoch": 5}"#).unwrap();
        assert_eq!(
            summary,
            NetworkSummary {
                current_epoch: Some(5),
                ..NetworkSummary::default()
            }
        );
    }

    #[test]
    fn array_body_yields_unknowns_test() {
        let summary = normalize_network_summary("[1, 2, 3]").unwrap();
        assert_eq!(summary, NetworkSummary::default());
    }

    #[test]
    fn garbage_body_is_malformed_test() {
        assert!(normalize_network_summary("upstream connect error").is_err());
    }
}
