use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{CoreError, RpcError};
use crate::page::Page;

use super::PageFetcher;

/// A canned page source for testing. Pages are keyed by the cursor that
/// requests them (`None` for the first page) and populated via the builder
/// pattern. Every fetch is counted, including failed ones.
pub struct MockPages<T, C: Eq + Hash> {
    pages: HashMap<Option<C>, Page<T, C>>,
    failures: HashSet<Option<C>>,
    fetches: AtomicUsize,
}

impl<T, C: Eq + Hash> MockPages<T, C> {
    pub fn builder() -> MockPagesBuilder<T, C> {
        MockPagesBuilder {
            pages: HashMap::new(),
            failures: HashSet::new(),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

pub struct MockPagesBuilder<T, C: Eq + Hash> {
    pages: HashMap<Option<C>, Page<T, C>>,
    failures: HashSet<Option<C>>,
}

impl<T, C: Eq + Hash> MockPagesBuilder<T, C> {
    pub fn with_page(mut self, cursor: Option<C>, page: Page<T, C>) -> Self {
        self.pages.insert(cursor, page);
        self
    }

    /// Make the fetch at `cursor` fail with a transport error.
    pub fn with_failure(mut self, cursor: Option<C>) -> Self {
        self.failures.insert(cursor);
        self
    }

    pub fn build(self) -> MockPages<T, C> {
        MockPages {
            pages: self.pages,
            failures: self.failures,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl<T, C> PageFetcher<T, C> for MockPages<T, C>
where
    T: Clone + Send + Sync + 'static,
    C: Clone + Debug + Eq + Hash + Send + Sync + 'static,
{
    async fn fetch_page(&self, cursor: Option<C>) -> Result<Page<T, C>, CoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failures.contains(&cursor) {
            return Err(RpcError::Transport(format!("injected failure at {cursor:?}")).into());
        }
        self.pages.get(&cursor).cloned().ok_or_else(|| {
            RpcError::InvalidResponse(format!("no page recorded for cursor {cursor:?}")).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_cursor_is_an_error_and_counted() {
        let mock: MockPages<u8, u8> = MockPages::builder()
            .with_page(None, Page::last(vec![1]))
            .build();
        assert!(mock.fetch_page(Some(9)).await.is_err());
        assert_eq!(
            mock.fetch_page(None).await.expect("first page").data,
            vec![1]
        );
        assert_eq!(mock.fetch_count(), 2);
    }
}
