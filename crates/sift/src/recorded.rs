//! File-backed page source that replays a recorded listing.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use eyre::{eyre, WrapErr};
use serde_json::{json, Value};
use sift_core::rpc::RawPageSource;
use sift_core::{CoreError, RpcError};

/// Replays recorded JSON-RPC bodies. The first body answers the request
/// without a cursor; each later body answers the `nextCursor` of the body
/// before it.
pub struct RecordedPages {
    bodies: HashMap<Option<String>, Vec<u8>>,
}

impl RecordedPages {
    pub async fn load(path: &Path) -> eyre::Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .wrap_err_with(|| format!("read recorded listing {}", path.display()))?;
        let entries: Vec<Value> =
            serde_json::from_slice(&raw).wrap_err("recorded listing must be a JSON array")?;
        Self::from_entries(entries)
    }

    /// Build from recorded pages; bare `{"data": ..., "nextCursor": ...}`
    /// pages are wrapped in a JSON-RPC envelope.
    pub fn from_entries(entries: Vec<Value>) -> eyre::Result<Self> {
        let mut bodies = HashMap::with_capacity(entries.len());
        let mut key: Option<String> = None;
        let total = entries.len();

        for (index, entry) in entries.into_iter().enumerate() {
            let envelope = if entry.get("jsonrpc").is_some() {
                entry
            } else {
                json!({ "jsonrpc": "2.0", "id": index, "result": entry })
            };

            let next = envelope
                .get("result")
                .and_then(|r| r.get("nextCursor"))
                .filter(|c| !c.is_null())
                .map(cursor_key);
            if next.is_none() && index + 1 < total {
                return Err(eyre!(
                    "page {index} has no nextCursor but {} more pages follow",
                    total - index - 1
                ));
            }

            let body = serde_json::to_vec(&envelope).wrap_err("re-encode recorded page")?;
            if bodies.insert(key.take(), body).is_some() {
                return Err(eyre!("page {index} repeats an earlier cursor"));
            }
            key = next;
        }

        tracing::debug!(pages = bodies.len(), "loaded recorded listing");
        Ok(Self { bodies })
    }

    pub fn page_count(&self) -> usize {
        self.bodies.len()
    }
}

/// Canonical lookup key for a cursor. `serde_json` maps keep keys sorted, so
/// equal cursors render identically whatever order they were written in.
fn cursor_key(cursor: &Value) -> String {
    cursor.to_string()
}

#[async_trait]
impl RawPageSource for RecordedPages {
    async fn fetch_raw(&self, cursor: Option<Value>) -> Result<Vec<u8>, CoreError> {
        let key = cursor.as_ref().map(cursor_key);
        self.bodies.get(&key).cloned().ok_or_else(|| {
            let shown = key.as_deref().unwrap_or("<start>");
            RpcError::Transport(format!("no recorded page for cursor {shown}")).into()
        })
    }
}
