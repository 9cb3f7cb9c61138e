use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

pub type Epoch = u64;

/// One day worth of 6.4 minute epochs.
pub const EPOCHS_PER_DAY: u64 = 225;

/// Closed interval of epochs scoping a leaderboard query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EpochWindow {
    pub start: Epoch,
    pub end: Epoch,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EpochWindowError {
    #[error("epoch window start {start} is after its end {end}")]
    StartAfterEnd { start: i64, end: i64 },
    #[error("epoch window end {0} is negative")]
    NegativeEnd(i64),
}

impl EpochWindow {
    /// Negative starts are clamped to zero.
    pub fn new(start: i64, end: i64) -> Result<Self, EpochWindowError> {
        if start > end {
            return Err(EpochWindowError::StartAfterEnd { start, end });
        }
        if end < 0 {
            return Err(EpochWindowError::NegativeEnd(end));
        }

        Ok(Self {
            start: start.max(0) as Epoch,
            end: end as Epoch,
        })
    }

    /// The `span` epochs up to and including `current_epoch`.
    pub fn trailing(current_epoch: Epoch, span: u64) -> Self {
        let span = span.max(1);
        Self {
            start: current_epoch.saturating_sub(span - 1),
            end: current_epoch,
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl Display for EpochWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
