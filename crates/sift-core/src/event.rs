//! Events emitted by a transaction.
//!
//! Each event arrives as `{"<tag>": {...payload...}}`. Known tags decode to
//! typed payloads; any other tag is kept as [`Event::Unrecognized`] with its
//! raw payload so that newer nodes do not break older clients, and so that
//! re-encoding reproduces what the node sent.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::owner::Owner;
use crate::tagged::{decode_payload, serialize_single_key, split_single_key};
use crate::types::{Digest, ObjectId, SuiAddress};

const COIN_BALANCE_CHANGE: &str = "coinBalanceChange";
const MUTATE_OBJECT: &str = "mutateObject";
const MOVE_EVENT: &str = "moveEvent";
const NEW_OBJECT: &str = "newObject";
const PUBLISH: &str = "publish";

// ==============================================================================
// Payloads
// ==============================================================================

/// BCS-encoded event contents exactly as sent by the node.
///
/// The layout is defined by the deployed Move package, so the text is kept
/// verbatim and never decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bcs(String);

impl Bcs {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinBalanceChangeEvent {
    pub package_id: ObjectId,
    pub transaction_module: String,
    pub sender: SuiAddress,
    /// `Gas`, `Pay`, or `Receive` on current nodes; kept as text.
    pub change_type: String,
    pub owner: Owner,
    pub coin_type: String,
    pub coin_object_id: ObjectId,
    pub version: u64,
    /// Signed: spends are negative.
    pub amount: i64,
    /// Keys this crate does not model, re-encoded as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateObjectEvent {
    pub package_id: ObjectId,
    pub transaction_module: String,
    pub sender: SuiAddress,
    pub object_type: String,
    pub object_id: ObjectId,
    pub version: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An event struct defined by a Move package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEvent {
    pub package_id: ObjectId,
    pub transaction_module: String,
    pub sender: SuiAddress,
    #[serde(rename = "type")]
    pub type_: String,
    /// Field values rendered by the node; the shape depends on `type_`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    pub bcs: Bcs,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObjectEvent {
    pub package_id: ObjectId,
    pub transaction_module: String,
    pub sender: SuiAddress,
    pub recipient: Owner,
    pub object_type: String,
    pub object_id: ObjectId,
    pub version: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishEvent {
    pub sender: SuiAddress,
    pub package_id: ObjectId,
    pub version: u64,
    pub digest: Digest,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ==============================================================================
// Event
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CoinBalanceChange(CoinBalanceChangeEvent),
    MutateObject(MutateObjectEvent),
    MoveEvent(MoveEvent),
    NewObject(NewObjectEvent),
    Publish(PublishEvent),
    /// A tag this crate does not model. `payload` is the untouched value.
    Unrecognized { tag: String, payload: Value },
}

impl Event {
    /// Decode one event from its generic JSON form.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let (tag, payload) = split_single_key(value, "event")?;
        let event = match tag {
            COIN_BALANCE_CHANGE => Self::CoinBalanceChange(decode_payload(tag, payload)?),
            MUTATE_OBJECT => Self::MutateObject(decode_payload(tag, payload)?),
            MOVE_EVENT => Self::MoveEvent(decode_payload(tag, payload)?),
            NEW_OBJECT => Self::NewObject(decode_payload(tag, payload)?),
            PUBLISH => Self::Publish(decode_payload(tag, payload)?),
            other => Self::Unrecognized {
                tag: other.to_owned(),
                payload: payload.clone(),
            },
        };
        Ok(event)
    }

    /// Decode a sequence of events, keeping wire order.
    ///
    /// Errors name the failing index so a bad element in a long list is
    /// easy to locate.
    pub fn decode_all(values: &[Value]) -> Result<Vec<Self>, CoreError> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Self::from_json(value).map_err(|err| match err {
                    CoreError::MalformedPayload(msg) => {
                        CoreError::MalformedPayload(format!("events[{index}]: {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::CoinBalanceChange(_) => COIN_BALANCE_CHANGE,
            Self::MutateObject(_) => MUTATE_OBJECT,
            Self::MoveEvent(_) => MOVE_EVENT,
            Self::NewObject(_) => NEW_OBJECT,
            Self::Publish(_) => PUBLISH,
            Self::Unrecognized { tag, .. } => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }

    /// Sender of the transaction that emitted the event. Not known for
    /// unrecognized tags.
    pub fn sender(&self) -> Option<&SuiAddress> {
        match self {
            Self::CoinBalanceChange(e) => Some(&e.sender),
            Self::MutateObject(e) => Some(&e.sender),
            Self::MoveEvent(e) => Some(&e.sender),
            Self::NewObject(e) => Some(&e.sender),
            Self::Publish(e) => Some(&e.sender),
            Self::Unrecognized { .. } => None,
        }
    }

    pub fn package_id(&self) -> Option<&ObjectId> {
        match self {
            Self::CoinBalanceChange(e) => Some(&e.package_id),
            Self::MutateObject(e) => Some(&e.package_id),
            Self::MoveEvent(e) => Some(&e.package_id),
            Self::NewObject(e) => Some(&e.package_id),
            Self::Publish(e) => Some(&e.package_id),
            Self::Unrecognized { .. } => None,
        }
    }

    /// The object the event is about, if it is about a single object.
    pub fn object_id(&self) -> Option<&ObjectId> {
        match self {
            Self::CoinBalanceChange(e) => Some(&e.coin_object_id),
            Self::MutateObject(e) => Some(&e.object_id),
            Self::NewObject(e) => Some(&e.object_id),
            Self::MoveEvent(_) | Self::Publish(_) | Self::Unrecognized { .. } => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoinBalanceChange(e) => write!(
                f,
                "{COIN_BALANCE_CHANGE} {} {} {} on {}",
                e.change_type, e.amount, e.coin_type, e.coin_object_id
            ),
            Self::MutateObject(e) => {
                write!(f, "{MUTATE_OBJECT} {} v{}", e.object_id, e.version)
            }
            Self::MoveEvent(e) => write!(f, "{MOVE_EVENT} {}", e.type_),
            Self::NewObject(e) => write!(
                f,
                "{NEW_OBJECT} {} v{} -> {}",
                e.object_id, e.version, e.recipient
            ),
            Self::Publish(e) => write!(f, "{PUBLISH} {} v{}", e.package_id, e.version),
            Self::Unrecognized { tag, .. } => write!(f, "{tag} (unrecognized)"),
        }
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::CoinBalanceChange(e) => serialize_single_key(serializer, COIN_BALANCE_CHANGE, e),
            Self::MutateObject(e) => serialize_single_key(serializer, MUTATE_OBJECT, e),
            Self::MoveEvent(e) => serialize_single_key(serializer, MOVE_EVENT, e),
            Self::NewObject(e) => serialize_single_key(serializer, NEW_OBJECT, e),
            Self::Publish(e) => serialize_single_key(serializer, PUBLISH, e),
            Self::Unrecognized { tag, payload } => serialize_single_key(serializer, tag, payload),
        }
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(D::Error::custom)
    }
}
