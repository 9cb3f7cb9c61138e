use serde::Serialize;

use crate::units::TokenAmount;

use super::{
    fields::{resolve, resolve_counter, resolve_text},
    parse_document, rates, unwrap_record, MalformedResponse,
};

const ADDRESS_KEYS: &[&str] = &["address", "validatorAddress", "validator_address"];
const STATUS_KEYS: &[&str] = &["status", "state", "validatorStatus", "validator_status"];
const BALANCE_KEYS: &[&str] = &["balance", "currentBalance", "current_balance", "stake"];
const EFFECTIVE_BALANCE_KEYS: &[&str] = &["effectiveBalance", "effective_balance", "effectiveStake"];
const ATTESTATIONS_SUCCEEDED_KEYS: &[&str] = &[
    "attestationsSucceeded",
    "attestations_succeeded",
    "attestations.succeeded",
    "successfulAttestations",
];
const ATTESTATIONS_MISSED_KEYS: &[&str] = &[
    "attestationsMissed",
    "attestations_missed",
    "attestations.missed",
    "missedAttestations",
];
const BLOCKS_PROPOSED_KEYS: &[&str] = &[
    "blocksProposed",
    "blocks_proposed",
    "blocks.proposed",
    "proposedBlocks",
];
const BLOCKS_MINED_KEYS: &[&str] = &["blocksMined", "blocks_mined", "blocks.mined", "minedBlocks"];
const BLOCKS_MISSED_KEYS: &[&str] = &[
    "blocksMissed",
    "blocks_missed",
    "blocks.missed",
    "missedBlocks",
];
const SUCCESS_RATE_KEYS: &[&str] = &[
    "successRate",
    "success_rate",
    "attestationRate",
    "attestations.successRate",
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidatorRecord {
    pub address: Option<String>,
    pub status: Option<String>,
    pub balance: Option<TokenAmount>,
    pub effective_balance: Option<TokenAmount>,
    pub attestations_succeeded: u64,
    pub attestations_missed: u64,
    pub blocks_proposed: u64,
    pub blocks_mined: u64,
    pub blocks_missed: u64,
    /// Rate as reported by the dashboard, when it sent one.
    pub success_rate: Option<String>,
}

impl ValidatorRecord {
    /// The reported rate if there is one, derived from the counters otherwise.
    pub fn attestation_rate(&self) -> Option<String> {
        self.success_rate.clone().or_else(|| {
            rates::rate_text(self.attestations_succeeded, self.attestations_missed)
        })
    }

    pub fn block_rate(&self) -> Option<String> {
        rates::rate_text(self.blocks_proposed, self.blocks_missed)
    }

    /// Nothing at all could be resolved, the dashboard doesn't know this validator.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

pub fn normalize_validator(raw: &str, unit: &str) -> Result<ValidatorRecord, MalformedResponse> {
    let document = parse_document(raw)?;
    let record = unwrap_record(&document);
    let amount = |candidates: &[&str]| {
        resolve_text(record, candidates).map(|raw| TokenAmount::from_raw(&raw, unit))
    };

    Ok(ValidatorRecord {
        address: resolve_text(record, ADDRESS_KEYS),
        status: resolve_text(record, STATUS_KEYS),
        balance: amount(BALANCE_KEYS),
        effective_balance: amount(EFFECTIVE_BALANCE_KEYS),
        attestations_succeeded: resolve_counter(record, ATTESTATIONS_SUCCEEDED_KEYS),
        attestations_missed: resolve_counter(record, ATTESTATIONS_MISSED_KEYS),
        blocks_proposed: resolve_counter(record, BLOCKS_PROPOSED_KEYS),
        blocks_mined: resolve_counter(record, BLOCKS_MINED_KEYS),
        blocks_missed: resolve_counter(record, BLOCKS_MISSED_KEYS),
        success_rate: resolve(record, SUCCESS_RATE_KEYS).and_then(rates::reported_rate),
    })
}
