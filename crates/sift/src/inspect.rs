//! Decoding and summarizing a recorded execution response.

use eyre::WrapErr;
use serde_json::Value;
use sift_core::response::{ExecuteTransactionResponse, TransactionResponse};
use sift_core::{codec, rpc, CoreError, Owner, TransactionEffects};

/// Which response shape a recording held.
#[derive(Debug)]
pub enum Recorded {
    Execute(Box<ExecuteTransactionResponse>),
    Lookup(Box<TransactionResponse>),
    Effects(Box<TransactionEffects>),
}

impl Recorded {
    pub fn effects(&self) -> &TransactionEffects {
        match self {
            Self::Execute(r) => r.effects(),
            Self::Lookup(r) => &r.effects,
            Self::Effects(e) => e,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Execute(_) => "execute response",
            Self::Lookup(_) => "transaction response",
            Self::Effects(_) => "bare effects",
        }
    }
}

/// Decode raw bytes, unwrapping a JSON-RPC envelope if present, and pick
/// the response shape from its top-level keys.
pub fn decode_recorded(raw: &[u8]) -> eyre::Result<Recorded> {
    let value: Value = codec::decode(raw).wrap_err("recording is not JSON")?;
    let value = if value.get("jsonrpc").is_some() {
        rpc::decode_response(raw).wrap_err("unwrap JSON-RPC envelope")?
    } else {
        value
    };

    let is_execute = value
        .get("effects")
        .and_then(|e| e.get("transactionEffectsDigest"))
        .is_some();
    let recorded = if is_execute {
        Recorded::Execute(Box::new(codec::decode_value(value)?))
    } else if value.get("certificate").is_some() {
        Recorded::Lookup(Box::new(codec::decode_value(value)?))
    } else {
        Recorded::Effects(Box::new(codec::decode_value(value)?))
    };
    tracing::debug!(shape = recorded.label(), "decoded recording");
    Ok(recorded)
}

/// Human-readable summary, one fact per line.
pub fn summarize(recorded: &Recorded) -> Vec<String> {
    let effects = recorded.effects();
    let mut lines = vec![
        format!("shape:        {}", recorded.label()),
        format!("transaction:  {}", effects.transaction_digest),
        format!("status:       {}", effects.status.status),
    ];
    if let Some(error) = effects.status.error() {
        lines.push(format!("error:        {error}"));
    }
    if !effects.status.is_consistent() {
        lines.push("warning:      status and error field disagree".to_owned());
    }

    let gas = &effects.gas_used;
    let fee = match effects.gas_fee() {
        Ok(fee) => fee.to_string(),
        Err(CoreError::ArithmeticAnomaly { .. }) => {
            format!("{} (net rebate)", gas.net_fee_signed())
        }
        Err(other) => other.to_string(),
    };
    lines.push(format!(
        "gas fee:      {fee} = {} + {} - {}",
        gas.computation_cost, gas.storage_cost, gas.storage_rebate
    ));
    lines.push(format!(
        "gas object:   {} v{} ({})",
        effects.gas_object.reference.object_id,
        effects.gas_object.reference.version,
        effects.gas_object.owner
    ));
    lines.push(format!(
        "objects:      {} created, {} mutated, {} unwrapped, {} deleted, {} wrapped",
        effects.created.len(),
        effects.mutated.len(),
        effects.unwrapped.len(),
        effects.deleted.len(),
        effects.wrapped.len()
    ));

    let shared = effects
        .changed_objects()
        .filter(|o| matches!(o.owner, Owner::Shared { .. }))
        .count();
    if shared > 0 {
        lines.push(format!("shared:       {shared} shared object(s) touched"));
    }

    for (index, event) in effects.events.iter().enumerate() {
        lines.push(format!("event[{index}]:     {event}"));
    }
    lines.push(format!("dependencies: {}", effects.dependencies.len()));
    lines
}
