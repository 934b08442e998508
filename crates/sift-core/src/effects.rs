use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::event::Event;
use crate::types::{Digest, GasCostSummary, ObjectRef, OwnedObjectRef, TransactionStatus};

// ==============================================================================
// Transaction Effects
// ==============================================================================

/// Everything one executed transaction changed.
///
/// List fields are omitted on the wire when empty; a missing list decodes
/// to an empty `Vec` and an empty `Vec` is omitted again on encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_epoch: Option<u64>,
    pub gas_used: GasCostSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_objects: Vec<ObjectRef>,
    pub transaction_digest: Digest,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<OwnedObjectRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mutated: Vec<OwnedObjectRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unwrapped: Vec<OwnedObjectRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<ObjectRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wrapped: Vec<ObjectRef>,
    pub gas_object: OwnedObjectRef,
    /// In execution order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Digest>,
}

impl TransactionEffects {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Net gas fee. See [`GasCostSummary::gas_fee`] for the underflow policy.
    pub fn gas_fee(&self) -> Result<u64, CoreError> {
        self.gas_used.gas_fee()
    }

    /// Objects that exist after execution with a new version: created, then
    /// mutated, then unwrapped.
    pub fn changed_objects(&self) -> impl Iterator<Item = &OwnedObjectRef> {
        self.created
            .iter()
            .chain(&self.mutated)
            .chain(&self.unwrapped)
    }

    /// Objects no longer directly accessible: deleted, then wrapped.
    pub fn removed_objects(&self) -> impl Iterator<Item = &ObjectRef> {
        self.deleted.iter().chain(&self.wrapped)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::owner::Owner;
    use crate::test_util::{object_ref, owned_ref, sample_effects_json};
    use crate::types::ExecutionStatus;

    #[test]
    fn decodes_full_effects() {
        let effects: TransactionEffects =
            serde_json::from_value(sample_effects_json()).expect("valid effects");

        assert!(effects.is_success());
        assert_eq!(effects.gas_fee().expect("no underflow"), 120);
        assert_eq!(effects.created.len(), 1);
        assert_eq!(effects.mutated.len(), 2);
        assert_eq!(effects.deleted.len(), 1);
        assert!(effects.unwrapped.is_empty());
        assert_eq!(effects.events.len(), 2);
        assert_eq!(effects.dependencies.len(), 1);
        assert!(matches!(
            effects.mutated[1].owner,
            Owner::Shared {
                initial_shared_version: 4
            }
        ));
        assert_eq!(effects.changed_objects().count(), 3);
        assert_eq!(effects.removed_objects().count(), 1);
    }

    #[test]
    fn round_trips_byte_level_field_names() {
        let wire = sample_effects_json();
        let effects: TransactionEffects = serde_json::from_value(wire.clone()).expect("decodes");
        assert_eq!(serde_json::to_value(&effects).expect("encodes"), wire);
    }

    #[test]
    fn missing_lists_decode_empty() {
        let effects: TransactionEffects = serde_json::from_value(json!({
            "status": { "status": "failure", "error": "InsufficientGas" },
            "gasUsed": { "computationCost": 1, "storageCost": 0, "storageRebate": 0 },
            "transactionDigest": "9aQ6Q3rZk6Mb8vP1xRxK2uD3rYbA7tX1Gm2eKHqVnWyL",
            "gasObject": {
                "owner": { "AddressOwner": "0x9a8c" },
                "reference": { "objectId": "0x2d1c", "version": 13, "digest": "FgBt" }
            }
        }))
        .expect("minimal effects");

        assert!(effects.created.is_empty());
        assert!(effects.events.is_empty());
        assert!(effects.dependencies.is_empty());
        assert_eq!(effects.status.status, ExecutionStatus::Failure);
        assert_eq!(effects.status.error(), Some("InsufficientGas"));
        assert!(effects.status.is_consistent());
    }

    #[test]
    fn failure_without_error_is_kept_as_sent() {
        let mut wire = sample_effects_json();
        wire["status"] = json!({ "status": "failure" });
        let effects: TransactionEffects = serde_json::from_value(wire).expect("decodes");
        assert!(!effects.is_success());
        assert_eq!(effects.status.error, None);
        assert!(!effects.status.is_consistent());
    }

    #[test]
    fn unknown_owner_inside_effects_fails() {
        let mut wire = sample_effects_json();
        wire["created"][0]["owner"] = json!({ "Quantum": "0x1" });
        let err = serde_json::from_value::<TransactionEffects>(wire).unwrap_err();
        assert!(err.to_string().contains("unknown owner tag `Quantum`"));
    }

    #[test]
    fn changed_and_removed_objects_keep_list_order() {
        let effects = TransactionEffects {
            status: TransactionStatus::success(),
            executed_epoch: None,
            gas_used: GasCostSummary::default(),
            shared_objects: Vec::new(),
            transaction_digest: crate::test_util::digest("Tx1"),
            created: vec![owned_ref("0xc1", 1, "0xa")],
            mutated: vec![owned_ref("0xm1", 2, "0xa"), owned_ref("0xm2", 2, "0xb")],
            unwrapped: vec![owned_ref("0xu1", 2, "0xa")],
            deleted: vec![object_ref("0xd1", 2)],
            wrapped: vec![object_ref("0xw1", 2)],
            gas_object: owned_ref("0xm1", 2, "0xa"),
            events: Vec::new(),
            dependencies: Vec::new(),
        };

        let changed: Vec<&str> = effects
            .changed_objects()
            .map(|o| o.reference.object_id.as_str())
            .collect();
        assert_eq!(changed, ["0xc1", "0xm1", "0xm2", "0xu1"]);

        let removed: Vec<&str> = effects
            .removed_objects()
            .map(|o| o.object_id.as_str())
            .collect();
        assert_eq!(removed, ["0xd1", "0xw1"]);

        let encoded = serde_json::to_value(&effects).expect("encodes");
        assert!(encoded.get("events").is_none());
        assert!(encoded.get("executedEpoch").is_none());
    }

    #[test]
    fn missing_gas_object_is_malformed() {
        let mut wire = sample_effects_json();
        wire.as_object_mut().expect("object").remove("gasObject");
        assert!(serde_json::from_value::<TransactionEffects>(wire).is_err());
    }
}
