//! # Pagination
//!
//! Page numbers start at 1. Missing or non-numeric `page`/`limit` values
//! fall back to the defaults; zero and negative values clamp to 1 so the
//! computed skip can never go negative.

use serde::{Deserialize, Serialize};

use super::raw::{RawQuery, RawValue};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Requested page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Both values are clamped to at least 1
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Documents skipped before this page
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Exclusive index of the last document on this page
    pub fn end_index(&self) -> u64 {
        self.page.saturating_mul(self.limit)
    }

    /// Apply an upper bound to `limit`
    pub fn capped(self, max_limit: u64) -> Self {
        Self::new(self.page, self.limit.min(max_limit))
    }
}

/// Links to the neighbouring pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRequest>,
}

impl Pagination {
    /// `next` exists while documents remain past this page, `prev` on every
    /// page after the first.
    pub fn for_page(page: PageRequest, total: u64) -> Self {
        let next = (page.end_index() < total).then(|| PageRequest::new(page.page + 1, page.limit));
        let prev = (page.page > 1).then(|| PageRequest::new(page.page - 1, page.limit));
        Self { next, prev }
    }
}

/// Build the page request from `page` and `limit`. Never fails: anything
/// unusable falls back to the defaults.
pub fn build_page(raw: &RawQuery) -> PageRequest {
    let page = parse_positive(lenient(raw, "page")).unwrap_or(DEFAULT_PAGE);
    let limit = parse_positive(lenient(raw, "limit")).unwrap_or(DEFAULT_LIMIT);
    PageRequest::new(page, limit)
}

/// Repeated keys use the first value; mappings are ignored
fn lenient<'a>(raw: &'a RawQuery, key: &str) -> Option<&'a str> {
    match raw.get(key)? {
        RawValue::Scalar(value) => Some(value),
        RawValue::List(values) => values.first().map(String::as_str),
        RawValue::Map(_) => None,
    }
}

/// Lenient integer parse: leading whitespace, optional sign, then digits,
/// ignoring anything after them (`"2abc"` is 2). Values that overflow
/// saturate. Non-positive results clamp to 1; no digits gives `None`.
fn parse_positive(value: Option<&str>) -> Option<u64> {
    let value = value?.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }

    if negative {
        return Some(1);
    }
    let parsed = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(parsed.max(1))
}
