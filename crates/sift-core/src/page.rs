//! Cursor-paginated listings.

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::response::CoinObject;
use crate::types::{Digest, EventId, ObjectId};

/// One page of a listing.
///
/// `next_cursor` is `None` on the last page. Any other value is opaque and
/// must be handed back unchanged to fetch the following page. The node sends
/// either `null` or omits the key on the last page; both decode to `None`,
/// and `None` is omitted on encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T, C> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<C>,
}

impl<T, C> Page<T, C> {
    pub fn new(data: Vec<T>, next_cursor: Option<C>) -> Self {
        Self { data, next_cursor }
    }

    /// A final page.
    pub fn last(data: Vec<T>) -> Self {
        Self {
            data,
            next_cursor: None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// Coins owned by an address, keyed by the last coin's object id.
pub type CoinPage = Page<CoinObject, ObjectId>;

/// Transaction digests; the cursor is an opaque string.
pub type TransactionsPage = Page<Digest, String>;

pub type EventPage = Page<Event, EventId>;
