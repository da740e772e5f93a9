use serde::{Deserialize, Serialize};

/// Server default for `launches(pageSize:)`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One page of a cursor-paginated query, exactly as the server sent it.
///
/// Every field is optional so a page with missing parts still deserializes;
/// [`crate::pagination::merge_page`] rejects it instead of the parser.
///
/// Wire shape: `{ "cursor": "...", "hasMore": true, "launches": [...] }`.
/// `items` is accepted in place of `launches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub has_more: Option<bool>,
    #[serde(default, rename = "launches", alias = "items")]
    pub items: Option<Vec<T>>,
}

impl<T> Page<T> {
    /// A well-formed page.
    pub fn new(items: Vec<T>, cursor: impl Into<String>, has_more: bool) -> Self {
        Self {
            cursor: Some(cursor.into()),
            has_more: Some(has_more),
            items: Some(items),
        }
    }
}

/// The concatenation of every page fetched so far for one logical query.
///
/// `cursor` and `has_more` always describe the most recently merged page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accumulated<T> {
    pub items: Vec<T>,
    pub cursor: Option<String>,
    pub has_more: bool,
}

impl<T> Accumulated<T> {
    /// State before the first page: nothing loaded, more assumed available.
    pub fn initial() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_more: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether asking for another page could return anything.
    pub fn can_load_more(&self) -> bool {
        self.has_more
    }
}

impl<T> Default for Accumulated<T> {
    fn default() -> Self {
        Self::initial()
    }
}

/// Arguments of the next page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Continue after this cursor; `None` starts from the beginning.
    pub after: Option<String>,
    pub page_size: u32,
}

impl PageRequest {
    pub fn first(page_size: u32) -> Self {
        Self {
            after: None,
            page_size,
        }
    }

    pub fn after(cursor: impl Into<String>, page_size: u32) -> Self {
        Self {
            after: Some(cursor.into()),
            page_size,
        }
    }
}
