//! Object ownership.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::tagged::{decode_payload, split_single_key, serialize_single_key};
use crate::types::SuiAddress;

const ADDRESS_OWNER: &str = "AddressOwner";
const OBJECT_OWNER: &str = "ObjectOwner";
const SHARED: &str = "Shared";
const IMMUTABLE: &str = "Immutable";

/// Who may use an object after the transaction.
///
/// Wire forms:
/// - `{"AddressOwner": "<address>"}`
/// - `{"ObjectOwner": "<address>"}`
/// - `{"Shared": {"initial_shared_version": <u64>}}`
/// - `"Immutable"` (also accepted as `{"Immutable": null}`)
///
/// Unknown keys fail with `UnknownVariantTag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    AddressOwner(SuiAddress),
    /// Owned by another object, e.g. a dynamic field.
    ObjectOwner(SuiAddress),
    Shared { initial_shared_version: u64 },
    Immutable,
}

#[derive(Serialize, Deserialize)]
struct SharedPayload {
    initial_shared_version: u64,
}

impl Owner {
    /// Decode one ownership value from its generic JSON form.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        if value.as_str() == Some(IMMUTABLE) {
            return Ok(Self::Immutable);
        }

        let (tag, payload) = split_single_key(value, "owner")?;
        match tag {
            ADDRESS_OWNER => Ok(Self::AddressOwner(decode_payload(tag, payload)?)),
            OBJECT_OWNER => Ok(Self::ObjectOwner(decode_payload(tag, payload)?)),
            SHARED => {
                let shared: SharedPayload = decode_payload(tag, payload)?;
                Ok(Self::Shared {
                    initial_shared_version: shared.initial_shared_version,
                })
            }
            IMMUTABLE if payload.is_null() => Ok(Self::Immutable),
            IMMUTABLE => Err(CoreError::MalformedPayload(format!(
                "`Immutable` carries no payload, got: {payload}"
            ))),
            other => Err(CoreError::UnknownVariantTag {
                kind: "owner",
                tag: other.to_owned(),
            }),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::AddressOwner(_) => ADDRESS_OWNER,
            Self::ObjectOwner(_) => OBJECT_OWNER,
            Self::Shared { .. } => SHARED,
            Self::Immutable => IMMUTABLE,
        }
    }

    /// The owning address for address- or object-owned objects.
    pub fn address(&self) -> Option<&SuiAddress> {
        match self {
            Self::AddressOwner(addr) | Self::ObjectOwner(addr) => Some(addr),
            Self::Shared { .. } | Self::Immutable => None,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared { .. })
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressOwner(addr) => write!(f, "address {addr}"),
            Self::ObjectOwner(addr) => write!(f, "object {addr}"),
            Self::Shared {
                initial_shared_version,
            } => write!(f, "shared since v{initial_shared_version}"),
            Self::Immutable => write!(f, "immutable"),
        }
    }
}

impl Serialize for Owner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::AddressOwner(addr) | Self::ObjectOwner(addr) => {
                serialize_single_key(serializer, self.tag(), addr)
            }
            Self::Shared {
                initial_shared_version,
            } => serialize_single_key(
                serializer,
                SHARED,
                &SharedPayload {
                    initial_shared_version: *initial_shared_version,
                },
            ),
            Self::Immutable => serializer.serialize_str(IMMUTABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(D::Error::custom)
    }
}
