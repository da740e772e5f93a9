use std::future::Future;
use std::path::Path;

use super::{PageSource, SourceError};
use crate::models::{Launch, Page, PageRequest};

/// Serves a fixed launch catalog page by page.
///
/// A page's cursor is the id of its last launch. `after` continues past the
/// launch with that id; an unknown cursor yields an empty final page.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    launches: Vec<Launch>,
}

impl FixtureSource {
    pub fn new(launches: Vec<Launch>) -> Self {
        Self { launches }
    }

    /// Load a JSON array of launches.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let launches: Vec<Launch> = serde_json::from_str(json)?;
        Ok(Self::new(launches))
    }

    pub fn len(&self) -> usize {
        self.launches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.launches.is_empty()
    }

    /// The page answering `request`.
    pub fn page(&self, request: &PageRequest) -> Page<Launch> {
        let start = match &request.after {
            None => 0,
            Some(cursor) => self
                .launches
                .iter()
                .position(|launch| launch.id.as_str() == cursor)
                .map_or(self.launches.len(), |i| i + 1),
        };
        let end = start
            .saturating_add(request.page_size.max(1) as usize)
            .min(self.launches.len());

        let items = self.launches[start..end].to_vec();
        let cursor = items
            .last()
            .map(|launch| launch.id.to_string())
            .or_else(|| request.after.clone())
            .unwrap_or_default();
        Page::new(items, cursor, end < self.launches.len())
    }
}

impl PageSource<Launch> for FixtureSource {
    fn fetch(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Option<Page<Launch>>, SourceError>> + Send {
        let page = self.page(&request);
        async move { Ok(Some(page)) }
    }
}
