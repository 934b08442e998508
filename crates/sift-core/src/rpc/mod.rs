//! Page-fetch abstraction and the pagination walker.
//!
//! The transport is supplied by the caller: either a typed
//! [`PageFetcher`], or a [`RawPageSource`] returning JSON-RPC response
//! bodies, adapted by [`JsonPageFetcher`]. [`pages`] and [`walk`] turn a
//! fetcher into a lazy stream that follows `nextCursor` until it is absent.

#[cfg(test)]
pub mod mock;
mod protocol;

pub use protocol::{decode_response, JsonRpcRequest};

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::codec;
use crate::error::CoreError;
use crate::page::Page;

// ==============================================================================
// Fetch Capabilities
// ==============================================================================

/// Fetch one page of a listing.
///
/// `cursor` is `None` for the first page, otherwise the `next_cursor` of the
/// previous page, unchanged. Implementations own retries and
/// authentication; a returned error ends the walk.
#[async_trait]
pub trait PageFetcher<T, C>: Send + Sync {
    async fn fetch_page(&self, cursor: Option<C>) -> Result<Page<T, C>, CoreError>;
}

/// Transport that returns the raw JSON-RPC response body for a page.
///
/// The cursor arrives already encoded as JSON so the source can splice it
/// into request params as-is.
#[async_trait]
pub trait RawPageSource: Send + Sync {
    async fn fetch_raw(&self, cursor: Option<Value>) -> Result<Vec<u8>, CoreError>;
}

/// Adapts a [`RawPageSource`] into a typed [`PageFetcher`] by unwrapping the
/// JSON-RPC envelope and decoding the page.
pub struct JsonPageFetcher<S, T, C> {
    source: S,
    _page: PhantomData<fn() -> Page<T, C>>,
}

impl<S, T, C> JsonPageFetcher<S, T, C> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            _page: PhantomData,
        }
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

#[async_trait]
impl<S, T, C> PageFetcher<T, C> for JsonPageFetcher<S, T, C>
where
    S: RawPageSource,
    T: DeserializeOwned + Send + 'static,
    C: Serialize + DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, cursor: Option<C>) -> Result<Page<T, C>, CoreError> {
        let cursor = cursor.as_ref().map(|c| codec::encode_value(c)).transpose()?;
        trace!(page.cursor = ?cursor, "requesting page");
        let body = self.source.fetch_raw(cursor).await?;
        let result = decode_response(&body)?;
        codec::decode_value(result)
    }
}

// ==============================================================================
// Walker
// ==============================================================================

/// Stream whole pages starting at `start` (`None` = first page).
///
/// Ends after yielding the first page without a `next_cursor`, or right
/// after yielding the first fetch error. Nothing is fetched until the stream
/// is polled, and dropping the stream simply stops fetching. Empty pages
/// that still carry a cursor are yielded and followed.
pub fn pages<'a, T, C, F>(
    fetcher: &'a F,
    start: Option<C>,
) -> impl Stream<Item = Result<Page<T, C>, CoreError>> + 'a
where
    F: PageFetcher<T, C> + ?Sized,
    T: 'a,
    C: Clone + 'a,
{
    // Outer `None`: listing exhausted. `Some(cursor)`: fetch at `cursor`.
    stream::try_unfold(Some(start), move |next: Option<Option<C>>| async move {
        let Some(cursor) = next else {
            return Ok::<_, CoreError>(None);
        };
        let page = fetcher.fetch_page(cursor).await?;
        debug!(
            page.items = page.data.len(),
            page.has_next = !page.is_last(),
            "fetched page"
        );
        let following = page.next_cursor.clone().map(Some);
        Ok(Some((page, following)))
    })
}

/// Stream every item of a listing, in page order and then in-page order.
///
/// Items are never reordered, deduplicated, or cached. Walking again from
/// the same `start` refetches and, over an unchanged backing store, yields
/// the same sequence. To resume later, walk [`pages`] instead and keep the
/// last page's `next_cursor`.
pub fn walk<'a, T, C, F>(
    fetcher: &'a F,
    start: Option<C>,
) -> impl Stream<Item = Result<T, CoreError>> + 'a
where
    F: PageFetcher<T, C> + ?Sized,
    T: 'a,
    C: Clone + 'a,
{
    pages(fetcher, start)
        .map_ok(|page| stream::iter(page.data.into_iter().map(Ok::<T, CoreError>)))
        .try_flatten()
}
