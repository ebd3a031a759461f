use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use office_planner_core::{BonusRates, Command};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TRANSFER_DOMAIN: &str = "plan";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded plan payload.
pub(crate) const TRANSFER_HEADER: &str = "plan:v1";
/// Delimiter used to separate the prefix, thermos ceiling and payload.
const FIELD_DELIMITER: char = ':';

/// Computed purchase plan in a form suitable for clipboard transfer.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlanTransfer {
    /// Thermos-count ceiling the plan was computed for.
    pub max: u32,
    /// Per-unit bonus rates the plan assumed.
    pub rates: BonusRates,
    /// Purchase commands in application order.
    pub commands: Vec<Command>,
}

impl PlanTransfer {
    /// Encodes the plan into a single-line string suitable for clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializablePlan {
            rates: self.rates,
            commands: self.commands.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("plan serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{TRANSFER_HEADER}:{}:{encoded}", self.max)
    }

    /// Decodes a plan from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, PlanTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PlanTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(PlanTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(PlanTransferError::MissingVersion)?;
        let ceiling = parts.next().ok_or(PlanTransferError::MissingCeiling)?;
        let payload = parts.next().ok_or(PlanTransferError::MissingPayload)?;

        if domain != TRANSFER_DOMAIN {
            return Err(PlanTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSFER_VERSION {
            return Err(PlanTransferError::UnsupportedVersion(version.to_owned()));
        }

        let max = ceiling
            .trim()
            .parse::<u32>()
            .map_err(|_| PlanTransferError::InvalidCeiling(ceiling.to_owned()))?;
        let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
        let decoded: SerializablePlan = serde_json::from_slice(&bytes)?;

        Ok(Self {
            max,
            rates: decoded.rates,
            commands: decoded.commands,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializablePlan {
    rates: BonusRates,
    commands: Vec<Command>,
}

/// Errors that can occur while decoding plan transfer strings.
#[derive(Debug, Error)]
pub(crate) enum PlanTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("plan string was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded plan.
    #[error("plan string is missing the prefix")]
    MissingPrefix,
    /// The encoded plan did not contain a version segment.
    #[error("plan string is missing the version")]
    MissingVersion,
    /// The encoded plan did not include the thermos ceiling.
    #[error("plan string is missing the thermos ceiling")]
    MissingCeiling,
    /// The encoded plan did not include the payload segment.
    #[error("plan string is missing the payload")]
    MissingPayload,
    /// The encoded plan used an unexpected prefix segment.
    #[error("plan prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded plan used an unsupported version identifier.
    #[error("plan version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The thermos ceiling could not be parsed from the encoded plan.
    #[error("could not parse thermos ceiling '{0}'")]
    InvalidCeiling(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode plan payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse plan payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
