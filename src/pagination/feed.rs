use std::future::Future;

use thiserror::Error;

use super::MergeError;
use crate::models::{Accumulated, Page, PageRequest};

/// Errors from the collaborator that serves pages.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Failed to read page data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse page data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Anything that can answer "the next page after this cursor".
///
/// `Ok(None)` means the request went through but produced no data.
pub trait PageSource<T>: Send + Sync {
    fn fetch(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Option<Page<T>>, SourceError>> + Send;
}

/// What a call to [`Feed::load_more`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was merged.
    Merged { added: usize },
    /// The last page said there is nothing more; no request was sent.
    Exhausted,
    /// Another fetch is still in flight; this one was not sent.
    Busy,
    /// The fetch failed or returned nothing; the list is as before.
    Unchanged,
}

/// One paginated query and its accumulated list.
pub struct Feed<T, S> {
    source: S,
    page_size: u32,
    state: parking_lot::Mutex<Accumulated<T>>,
    in_flight: tokio::sync::Mutex<()>,
}

impl<T, S> Feed<T, S>
where
    T: Clone + Send,
    S: PageSource<T>,
{
    pub fn new(source: S, page_size: u32) -> Result<Self, FeedError> {
        if page_size == 0 {
            return Err(FeedError::InvalidPageSize);
        }
        Ok(Self {
            source,
            page_size,
            state: parking_lot::Mutex::new(Accumulated::initial()),
            in_flight: tokio::sync::Mutex::new(()),
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Copy of everything loaded so far.
    pub fn snapshot(&self) -> Accumulated<T> {
        self.state.lock().clone()
    }

    /// Fetch the page after the current cursor and merge it.
    pub async fn load_more(&self) -> Result<LoadOutcome, FeedError> {
        let Ok(_in_flight) = self.in_flight.try_lock() else {
            tracing::debug!("Fetch already in flight, ignoring load_more");
            return Ok(LoadOutcome::Busy);
        };

        let request = {
            let state = self.state.lock();
            if !state.has_more {
                return Ok(LoadOutcome::Exhausted);
            }
            match &state.cursor {
                Some(cursor) => PageRequest::after(cursor.clone(), self.page_size),
                None => PageRequest::first(self.page_size),
            }
        };

        tracing::debug!(after = ?request.after, page_size = request.page_size, "Fetching page");
        let page = match self.source.fetch(request).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                tracing::warn!("Page fetch returned no data, keeping current list");
                return Ok(LoadOutcome::Unchanged);
            }
            Err(e) => {
                tracing::warn!("Page fetch failed, keeping current list: {}", e);
                return Ok(LoadOutcome::Unchanged);
            }
        };

        let added = self.state.lock().apply(Some(page))?;
        Ok(LoadOutcome::Merged { added })
    }

    /// Call [`Feed::load_more`] up to `pages` times, stopping early once the
    /// list is exhausted or a fetch does not merge.
    pub async fn load_pages(&self, pages: usize) -> Result<usize, FeedError> {
        let mut loaded = 0;
        for _ in 0..pages {
            match self.load_more().await? {
                LoadOutcome::Merged { .. } => loaded += 1,
                LoadOutcome::Exhausted | LoadOutcome::Busy | LoadOutcome::Unchanged => break,
            }
        }
        Ok(loaded)
    }
}
