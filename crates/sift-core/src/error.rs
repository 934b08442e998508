#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("unknown {kind} tag `{tag}`")]
    UnknownVariantTag { kind: &'static str, tag: String },

    #[error(
        "gas fee out of range: computation {computation_cost} + storage {storage_cost} - rebate {storage_rebate}"
    )]
    ArithmeticAnomaly {
        computation_cost: u64,
        storage_cost: u64,
        storage_rebate: u64,
    },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("RPC server error {code}: {message}")]
    ServerError { code: i64, message: String },

    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("page source failure: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
