//! Whole RPC responses built around [`TransactionEffects`], plus the coin
//! listing model.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::effects::TransactionEffects;
use crate::error::CoreError;
use crate::tagged::{decode_payload, serialize_single_key, split_single_key};
use crate::types::{Digest, ObjectId, ObjectRef, SuiAddress};

// ==============================================================================
// Transaction Data
// ==============================================================================

/// Validator quorum signature over a certificate or effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSignInfo {
    pub epoch: u64,
    pub signature: String,
    pub signers_map: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    /// Gas coin to charge. Re-sent verbatim when building a follow-up
    /// transaction, so it encodes with the same keys it decodes from.
    pub payment: ObjectRef,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishPackage {
    /// Disassembled bytecode per module name.
    pub disassembled: Map<String, Value>,
}

const CALL: &str = "Call";
const PUBLISH: &str = "Publish";

/// One command of a transaction, as `{"Call": {...}}` or `{"Publish": {...}}`.
/// Other kinds (transfers, batches, system transactions) are kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Call(MoveCall),
    Publish(PublishPackage),
    Unrecognized { tag: String, payload: Value },
}

impl TransactionKind {
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let (tag, payload) = split_single_key(value, "transaction kind")?;
        Ok(match tag {
            CALL => Self::Call(decode_payload(tag, payload)?),
            PUBLISH => Self::Publish(decode_payload(tag, payload)?),
            other => Self::Unrecognized {
                tag: other.to_owned(),
                payload: payload.clone(),
            },
        })
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Call(_) => CALL,
            Self::Publish(_) => PUBLISH,
            Self::Unrecognized { tag, .. } => tag,
        }
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Call(call) => serialize_single_key(serializer, CALL, call),
            Self::Publish(publish) => serialize_single_key(serializer, PUBLISH, publish),
            Self::Unrecognized { tag, payload } => serialize_single_key(serializer, tag, payload),
        }
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderSignedData {
    pub transactions: Vec<TransactionKind>,
    pub sender: SuiAddress,
    pub gas_data: GasData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifiedTransaction {
    pub transaction_digest: Digest,
    pub data: SenderSignedData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tx_signatures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_sign_info: Option<AuthSignInfo>,
}

// ==============================================================================
// Responses
// ==============================================================================

/// Response of a transaction lookup by digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub certificate: CertifiedTransaction,
    pub effects: TransactionEffects,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_data: Option<Value>,
}

/// How the effects were finalized: a quorum certificate, or inclusion in a
/// checkpoint `(epoch, sequence number)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinalityInfo {
    Certified(AuthSignInfo),
    Checkpointed(u64, u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransactionEffects {
    pub transaction_effects_digest: Digest,
    pub effects: TransactionEffects,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_sign_info: Option<AuthSignInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finality_info: Option<FinalityInfo>,
}

/// Response of submitting a signed transaction for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteTransactionResponse {
    pub certificate: CertifiedTransaction,
    pub effects: ExecuteTransactionEffects,
    /// Absent on nodes that do not report local execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_local_execution: Option<bool>,
}

impl ExecuteTransactionResponse {
    pub fn transaction_digest(&self) -> &Digest {
        &self.certificate.transaction_digest
    }

    pub fn effects(&self) -> &TransactionEffects {
        &self.effects.effects
    }
}

/// Result of a dry, state-preserving Move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevInspectResults {
    pub effects: TransactionEffects,
    pub results: DevInspectResult,
}

/// `{"Ok": <per-command results>}` or `{"Err": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevInspectResult {
    Ok(Value),
    Err(String),
}

// ==============================================================================
// Coins
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinObject {
    pub coin_type: String,
    pub coin_object_id: ObjectId,
    pub version: u64,
    pub digest: Digest,
    pub balance: u64,
}

impl CoinObject {
    /// Reference to this coin version, e.g. to use it as gas payment.
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            object_id: self.coin_object_id.clone(),
            version: self.version,
            digest: self.digest.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinBalance {
    pub coin_type: String,
    pub coin_object_count: u64,
    pub total_balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinMetadata {
    pub decimals: u8,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub id: ObjectId,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub value: u64,
}
