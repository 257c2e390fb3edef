use serde::{Deserialize, Serialize};

/// A bounded, ordered, continuable query window.
///
/// `start_time` and `end_time` are inclusive bounds in milliseconds since the
/// epoch; `None` leaves that side unbounded. `offset` is an opaque
/// continuation token handed back in [`TimePage::next_page_link`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    pub limit: u32,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub asc_order: bool,
    pub offset: Option<String>,
}

impl PageLink {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            start_time: None,
            end_time: None,
            asc_order: false,
            offset: None,
        }
    }

    /// Same window, continuing after `offset`.
    pub fn next(&self, offset: String) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePage<T> {
    pub data: Vec<T>,
    pub has_next: bool,
    pub next_page_link: Option<PageLink>,
}
