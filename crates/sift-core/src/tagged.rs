//! Single-key tagged-union dispatch.
//!
//! Every polymorphic value in a response (ownership, events, transaction
//! kinds) is sent as an object with exactly one key. The key names the
//! variant and its value is that variant's payload.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::Serializer;
use serde_json::Value;

use crate::error::CoreError;

/// Split a single-key object into `(tag, payload)`.
///
/// `kind` names the union in error messages. Anything other than an object
/// with exactly one entry is a `MalformedPayload`.
pub(crate) fn split_single_key<'a>(
    value: &'a Value,
    kind: &str,
) -> Result<(&'a str, &'a Value), CoreError> {
    let map = value.as_object().ok_or_else(|| {
        CoreError::MalformedPayload(format!("{kind} must be a single-key object, got: {value}"))
    })?;

    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((tag, payload)), None) => Ok((tag.as_str(), payload)),
        (None, _) => Err(CoreError::MalformedPayload(format!(
            "{kind} object has no variant key"
        ))),
        (Some(_), Some(_)) => Err(CoreError::MalformedPayload(format!(
            "{kind} object has {} keys, expected exactly one",
            map.len()
        ))),
    }
}

/// Decode a tagged payload into its variant struct, naming the tag in the
/// error so a failure deep in a response is traceable.
pub(crate) fn decode_payload<T: DeserializeOwned>(tag: &str, payload: &Value) -> Result<T, CoreError> {
    T::deserialize(payload)
        .map_err(|e| CoreError::MalformedPayload(format!("invalid `{tag}` payload: {e}")))
}

/// Encode `{tag: payload}`.
pub(crate) fn serialize_single_key<S, P>(serializer: S, tag: &str, payload: &P) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    P: serde::Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(tag, payload)?;
    map.end()
}
