//! Leaf value types of the execution-response model.
//!
//! Contains the opaque identifier newtypes (`ObjectId`, `Digest`,
//! `SuiAddress`), the composite event cursor (`EventId`), object references,
//! gas accounting, and the execution status.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::owner::Owner;

// ==============================================================================
// Opaque Identifiers
// ==============================================================================

/// Declares a non-empty opaque string identifier.
///
/// The wire format (hex or base58) is defined by the node, so the value is
/// only compared by content and never parsed. Decoding an empty string is
/// rejected because every identifier in a response names a concrete object.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(CoreError::MalformedPayload(concat!("empty ", $label).into()));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                if value.is_empty() {
                    return Err(D::Error::custom(concat!("empty ", $label)));
                }
                Ok(Self(value))
            }
        }
    };
}

opaque_id!(
    /// Identity of an on-chain object, stable across versions.
    ObjectId,
    "object id"
);

opaque_id!(
    /// Content hash of a transaction, effects set, or object version.
    Digest,
    "digest"
);

opaque_id!(
    /// Account (or object-as-owner) address.
    SuiAddress,
    "address"
);

/// Cursor for event listings. Ordering is defined by the node; cursors are
/// only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventId {
    pub tx_digest: Digest,
    pub event_seq: i64,
}

// ==============================================================================
// Object References
// ==============================================================================

/// One version of one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: Digest,
}

/// An object reference paired with the owner it had after execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedObjectRef {
    pub owner: Owner,
    pub reference: ObjectRef,
}

// ==============================================================================
// Gas Accounting
// ==============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    pub computation_cost: u64,
    pub storage_cost: u64,
    pub storage_rebate: u64,
}

impl GasCostSummary {
    /// Net fee charged: `computation + storage - rebate`.
    ///
    /// Fails with `ArithmeticAnomaly` when the rebate exceeds the charges, or
    /// when the charges alone overflow `u64`. Use [`Self::net_fee_signed`]
    /// when a negative net value is meaningful to the caller.
    pub fn gas_fee(&self) -> Result<u64, CoreError> {
        self.computation_cost
            .checked_add(self.storage_cost)
            .and_then(|charged| charged.checked_sub(self.storage_rebate))
            .ok_or(CoreError::ArithmeticAnomaly {
                computation_cost: self.computation_cost,
                storage_cost: self.storage_cost,
                storage_rebate: self.storage_rebate,
            })
    }

    /// Exact net fee. Never overflows: three `u64` terms always fit in `i128`.
    pub fn net_fee_signed(&self) -> i128 {
        i128::from(self.computation_cost) + i128::from(self.storage_cost)
            - i128::from(self.storage_rebate)
    }
}

// ==============================================================================
// Execution Status
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Failure,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// Outcome of execution as reported by the node.
///
/// The node is expected to set `error` exactly when `status` is `failure`,
/// but the decoded value keeps whatever was sent. [`Self::is_consistent`]
/// reports whether that expectation holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransactionStatus {
    pub fn success() -> Self {
        Self {
            status: ExecutionStatus::Success,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Failure,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }

    /// The failure message, if one was sent and is non-empty.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// `failure` if and only if a non-empty error is present.
    pub fn is_consistent(&self) -> bool {
        (self.status == ExecutionStatus::Failure) == self.error().is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn gas_fee_nets_out_rebate() {
        let gas = GasCostSummary {
            computation_cost: 100,
            storage_cost: 50,
            storage_rebate: 30,
        };
        assert_eq!(gas.gas_fee().expect("no underflow"), 120);
        assert_eq!(gas.net_fee_signed(), 120);
    }

    #[test]
    fn gas_fee_rebate_exceeding_charges_is_an_anomaly() {
        let gas = GasCostSummary {
            computation_cost: 10,
            storage_cost: 5,
            storage_rebate: 40,
        };
        let err = gas.gas_fee().unwrap_err();
        assert!(matches!(
            err,
            CoreError::ArithmeticAnomaly {
                computation_cost: 10,
                storage_cost: 5,
                storage_rebate: 40,
            }
        ));
        assert_eq!(gas.net_fee_signed(), -25);
    }

    #[test]
    fn gas_fee_rebate_equal_to_charges_is_zero() {
        let gas = GasCostSummary {
            computation_cost: 10,
            storage_cost: 5,
            storage_rebate: 15,
        };
        assert_eq!(gas.gas_fee().expect("exactly zero"), 0);
    }

    #[test]
    fn gas_fee_overflowing_charges_is_an_anomaly() {
        let gas = GasCostSummary {
            computation_cost: u64::MAX,
            storage_cost: 1,
            storage_rebate: 0,
        };
        assert!(matches!(
            gas.gas_fee(),
            Err(CoreError::ArithmeticAnomaly { .. })
        ));
        assert_eq!(gas.net_fee_signed(), i128::from(u64::MAX) + 1);
    }

    #[test]
    fn empty_identifier_is_rejected() {
        assert!(ObjectId::new("").is_err());
        assert!(serde_json::from_value::<Digest>(json!("")).is_err());
        let id: ObjectId = serde_json::from_value(json!("0x5")).expect("non-empty id");
        assert_eq!(id.as_str(), "0x5");
    }

    #[test]
    fn event_id_uses_camel_case_keys() {
        let id: EventId = serde_json::from_value(json!({
            "txDigest": "8xcUqMaPd1mhLkmAGGPrTbDhfTfXb6yTpdYHGYh5iJBB",
            "eventSeq": 3
        }))
        .expect("valid event id");
        assert_eq!(id.event_seq, 3);
        assert_eq!(
            serde_json::to_value(&id).expect("encodes"),
            json!({
                "txDigest": "8xcUqMaPd1mhLkmAGGPrTbDhfTfXb6yTpdYHGYh5iJBB",
                "eventSeq": 3
            })
        );
    }

    #[test]
    fn status_consistency() {
        assert!(TransactionStatus::success().is_consistent());
        assert!(TransactionStatus::failure("InsufficientGas").is_consistent());

        let failure_without_error: TransactionStatus =
            serde_json::from_value(json!({ "status": "failure" })).expect("decodes as sent");
        assert_eq!(failure_without_error.error, None);
        assert!(!failure_without_error.is_consistent());

        let failure_with_empty_error: TransactionStatus =
            serde_json::from_value(json!({ "status": "failure", "error": "" }))
                .expect("decodes as sent");
        assert_eq!(failure_with_empty_error.error.as_deref(), Some(""));
        assert_eq!(failure_with_empty_error.error(), None);
        assert!(!failure_with_empty_error.is_consistent());

        let success_with_error = TransactionStatus {
            status: ExecutionStatus::Success,
            error: Some("stray".into()),
        };
        assert!(!success_with_error.is_consistent());
    }

    #[test]
    fn status_omits_absent_error_on_encode() {
        let encoded = serde_json::to_value(TransactionStatus::success()).expect("encodes");
        assert_eq!(encoded, json!({ "status": "success" }));
    }
}
