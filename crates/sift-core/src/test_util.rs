//! Shared test helpers for `sift-core` unit tests.
//!
//! Builders for identifiers and object references, plus one realistic
//! effects payload, so tests across modules agree on fixture data.

use serde_json::{json, Value};

use crate::owner::Owner;
use crate::types::{Digest, ObjectId, ObjectRef, OwnedObjectRef, SuiAddress};

pub fn object_id(s: &str) -> ObjectId {
    ObjectId::new(s).expect("fixture object id is non-empty")
}

pub fn digest(s: &str) -> Digest {
    Digest::new(s).expect("fixture digest is non-empty")
}

pub fn address(s: &str) -> SuiAddress {
    SuiAddress::new(s).expect("fixture address is non-empty")
}

pub fn object_ref(id: &str, version: u64) -> ObjectRef {
    ObjectRef {
        object_id: object_id(id),
        version,
        digest: digest(&format!("digest-of-{id}-v{version}")),
    }
}

/// An address-owned reference.
pub fn owned_ref(id: &str, version: u64, owner: &str) -> OwnedObjectRef {
    OwnedObjectRef {
        owner: Owner::AddressOwner(address(owner)),
        reference: object_ref(id, version),
    }
}

/// A successful payment-style execution: gas 100 + 50 - 30, one created
/// coin, the gas coin and a shared pool mutated, one deleted object, a
/// balance change and an unrecognized event.
pub fn sample_effects_json() -> Value {
    json!({
        "status": { "status": "success" },
        "executedEpoch": 12,
        "gasUsed": { "computationCost": 100, "storageCost": 50, "storageRebate": 30 },
        "transactionDigest": "8xcUqMaPd1mhLkmAGGPrTbDhfTfXb6yTpdYHGYh5iJBB",
        "created": [
            {
                "owner": { "AddressOwner": "0x7c1e" },
                "reference": { "objectId": "0x51e8", "version": 13, "digest": "AqdX8vSx" }
            }
        ],
        "mutated": [
            {
                "owner": { "AddressOwner": "0x9a8c" },
                "reference": { "objectId": "0x2d1c", "version": 13, "digest": "FgBt" }
            },
            {
                "owner": { "Shared": { "initial_shared_version": 4 } },
                "reference": { "objectId": "0x77", "version": 13, "digest": "Kp2w" }
            }
        ],
        "deleted": [
            { "objectId": "0x4e01", "version": 13, "digest": "7gyGAp71YXQRoxmFBaHxofQXAipvgHyBKPyxmdSJxyvz" }
        ],
        "gasObject": {
            "owner": { "AddressOwner": "0x9a8c" },
            "reference": { "objectId": "0x2d1c", "version": 13, "digest": "FgBt" }
        },
        "events": [
            {
                "coinBalanceChange": {
                    "packageId": "0x2",
                    "transactionModule": "gas",
                    "sender": "0x9a8c",
                    "changeType": "Gas",
                    "owner": { "AddressOwner": "0x9a8c" },
                    "coinType": "0x2::sui::SUI",
                    "coinObjectId": "0x2d1c",
                    "version": 12,
                    "amount": -120
                }
            },
            { "epochChange": 12 }
        ],
        "dependencies": ["3Lqf8i2oEyXJP2cnTjYsGgWgN6wEfXkQ8ZiuL8aN6YiG"]
    })
}
