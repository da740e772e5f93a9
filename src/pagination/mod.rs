//! Cursor pagination: merging fetched pages into an accumulated list.
//!
//! [`merge_page`] is the pure merge. [`Feed`] is the caller side that asks a
//! [`PageSource`] for the next page and keeps at most one fetch in flight.

mod feed;
mod fixture;

pub use feed::*;
pub use fixture::*;

use thiserror::Error;

use crate::models::{Accumulated, Page};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("Malformed page: missing `{0}`")]
    MissingField(&'static str),
}

/// Append `page` to `accumulated`, taking its cursor and `hasMore`.
///
/// An absent page returns `accumulated` unchanged. A page lacking its
/// cursor, `hasMore` or item list is rejected. Items are not de-duplicated.
pub fn merge_page<T: Clone>(
    accumulated: &Accumulated<T>,
    page: Option<Page<T>>,
) -> Result<Accumulated<T>, MergeError> {
    let mut merged = accumulated.clone();
    merged.apply(page)?;
    Ok(merged)
}

impl<T> Accumulated<T> {
    /// In-place [`merge_page`]. Returns the number of items appended.
    ///
    /// On error `self` is left as it was.
    pub fn apply(&mut self, page: Option<Page<T>>) -> Result<usize, MergeError> {
        let Some(page) = page else {
            tracing::debug!("No page to merge, keeping {} items", self.items.len());
            return Ok(0);
        };

        let cursor = page.cursor.ok_or(MergeError::MissingField("cursor"))?;
        let has_more = page.has_more.ok_or(MergeError::MissingField("hasMore"))?;
        let items = page.items.ok_or(MergeError::MissingField("launches"))?;

        let added = items.len();
        self.items.extend(items);
        tracing::debug!(
            added,
            total = self.items.len(),
            %cursor,
            has_more,
            "Merged page"
        );
        self.cursor = Some(cursor);
        self.has_more = has_more;
        Ok(added)
    }
}
