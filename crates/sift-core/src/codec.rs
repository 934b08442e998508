//! Typed decode/encode entry points.
//!
//! The transport hands over either raw response bytes or an already parsed
//! `serde_json::Value`; both decode into any model type. Shape errors
//! surface as [`CoreError::MalformedPayload`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CoreError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, CoreError> {
    Ok(serde_json::from_value(value)?)
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CoreError> {
    Ok(serde_json::to_vec(value)?)
}

pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, CoreError> {
    Ok(serde_json::to_value(value)?)
}
