use serde::{Deserialize, Serialize};

/// Number of products requested per catalog page.
pub const PAGE_SIZE: u32 = 18;

/// Opaque cursor state of a product connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether a page exists after `end_cursor`.
    pub has_next_page: bool,
    /// Whether a page exists before `start_cursor`.
    pub has_previous_page: bool,
    /// Cursor of the first edge on the page.
    pub start_cursor: Option<String>,
    /// Cursor of the last edge on the page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor to request the following page with, if one exists.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_next_page {
            return None;
        }
        self.end_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

/// Direction and size of a single page request.
///
/// Exactly one direction is active per request: a `before` cursor selects
/// backward paging, anything else pages forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Forward { first: u32, after: Option<String> },
    Backward { last: u32, before: String },
}

impl PageRequest {
    /// First page of a context.
    pub fn first_page() -> Self {
        PageRequest::Forward {
            first: PAGE_SIZE,
            after: None,
        }
    }

    /// Page following `cursor`.
    pub fn after(cursor: impl Into<String>) -> Self {
        PageRequest::Forward {
            first: PAGE_SIZE,
            after: Some(cursor.into()),
        }
    }

    /// Resolve the request from the `after`/`before` query parameters.
    pub fn from_cursors(after: Option<String>, before: Option<String>) -> Self {
        match before.filter(|cursor| !cursor.is_empty()) {
            Some(before) => PageRequest::Backward {
                last: PAGE_SIZE,
                before,
            },
            None => PageRequest::Forward {
                first: PAGE_SIZE,
                after: after.filter(|cursor| !cursor.is_empty()),
            },
        }
    }

    /// Whether the request starts from the beginning of the connection.
    pub fn is_first_page(&self) -> bool {
        matches!(self, PageRequest::Forward { after: None, .. })
    }

    /// GraphQL variables `(first, after, last, before)` for the request.
    pub fn variables(&self) -> (Option<u32>, Option<&str>, Option<u32>, Option<&str>) {
        match self {
            PageRequest::Forward { first, after } => (Some(*first), after.as_deref(), None, None),
            PageRequest::Backward { last, before } => (None, None, Some(*last), Some(before)),
        }
    }
}
