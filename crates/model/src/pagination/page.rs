use crate::pagination::{cursor::Cursor, token::Token};
use serde::{Deserialize, Serialize};

/// Outgoing cursors of a page. Either side may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageCursors {
    pub after: Option<Token>,
    pub before: Option<Token>,
}

impl PageCursors {
    /// Cursor for the page that follows this one, if there is one.
    pub fn next(&self) -> Option<Cursor> {
        self.after.clone().map(Cursor::After)
    }

    /// Cursor for the page that precedes this one, if there is one.
    pub fn previous(&self) -> Option<Cursor> {
        self.before.clone().map(Cursor::Before)
    }

    pub fn is_empty(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }
}

/// A page of records in the requested order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub rows: Vec<R>,
    pub cursors: PageCursors,
    pub has_more: bool,
}

impl<R> Page<R> {
    pub fn empty() -> Self {
        Page {
            rows: Vec::new(),
            cursors: PageCursors::default(),
            has_more: false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
