use serde_json::Value;

use crate::error::{CoreError, RpcError};

/// Outbound JSON-RPC 2.0 call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Vec<Value>,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Unwrap a JSON-RPC response body into its `result` value.
///
/// A body carrying `error` becomes a `CoreError::Rpc`. A body with neither
/// `result` nor `error` (or `result: null`) is an `InvalidResponse`.
pub fn decode_response(body: &[u8]) -> Result<Value, CoreError> {
    let decoded: JsonRpcResponse = serde_json::from_slice(body).map_err(|e| {
        RpcError::InvalidResponse(format!(
            "decode JSON-RPC response: {e}; body={}",
            String::from_utf8_lossy(body)
        ))
    })?;

    if let Some(err) = decoded.error.filter(|e| !e.is_null()) {
        return Err(parse_jsonrpc_error(err));
    }

    match decoded.result {
        Some(result) if !result.is_null() => Ok(result),
        _ => Err(RpcError::InvalidResponse("response has no result".to_owned()).into()),
    }
}

/// `{"code", "message"}` becomes `ServerError`; any other error value is
/// kept as raw JSON text in `InvalidResponse`.
pub(super) fn parse_jsonrpc_error(err: Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => CoreError::Rpc(RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
        }),
        Err(_) => CoreError::Rpc(RpcError::InvalidResponse(format!(
            "non-standard JSON-RPC error: {err}"
        ))),
    }
}
