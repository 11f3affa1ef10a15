//! `QueryState` and its shareable query-string representation.
//!
//! # Representation
//! - Flat string map: declared filter keys, `page`, `page_size`.
//! - Blank filters, `page=1` and the default page size are omitted.
//! - Numbers are decimal strings.
//!
//! # Invariants
//! - `from_params(to_params(s)) == s` whenever every filter key of `s` is
//!   declared by the view.
//! - `to_params` is idempotent across a parse/serialize cycle.

use crate::query::views::ListDefinition;
use log::debug;
use std::collections::BTreeMap;

/// Flat key/value representation, e.g. the address-bar query.
pub type QueryParams = BTreeMap<String, String>;

pub const PAGE_KEY: &str = "page";
pub const PAGE_SIZE_KEY: &str = "page_size";

/// Filter values plus pagination for one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    filters: BTreeMap<String, String>,
    page: u32,
    page_size: u32,
    default_page_size: u32,
}

impl QueryState {
    /// Empty filters on page 1 with the view's default page size.
    pub fn new(default_page_size: u32) -> Self {
        let default_page_size = default_page_size.max(1);
        Self {
            filters: BTreeMap::new(),
            page: 1,
            page_size: default_page_size,
            default_page_size,
        }
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Sets one filter; a blank value removes the key.
    pub fn set_filter(&mut self, key: impl Into<String>, value: &str) {
        let key = key.into();
        let value = value.trim();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value.to_string());
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Sets pagination; zero values clamp to 1.
    pub fn set_page(&mut self, page: u32, page_size: u32) {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
    }

    /// Serializes to the shareable representation.
    pub fn to_params(&self) -> QueryParams {
        let mut params = self.filters.clone();
        if self.page != 1 {
            params.insert(PAGE_KEY.to_string(), self.page.to_string());
        }
        if self.page_size != self.default_page_size {
            params.insert(PAGE_SIZE_KEY.to_string(), self.page_size.to_string());
        }
        params
    }

    /// Rebuilds state from a representation.
    ///
    /// Undeclared keys are dropped; a missing or invalid `page`/`page_size`
    /// falls back to the default.
    pub fn from_params(
        params: &QueryParams,
        definition: &ListDefinition,
        default_page_size: u32,
    ) -> Self {
        let mut state = Self::new(default_page_size);
        for (key, value) in params {
            if definition.declares(key) {
                state.set_filter(key.as_str(), value);
            } else if key != PAGE_KEY && key != PAGE_SIZE_KEY {
                debug!(
                    "event=undeclared_key module=query status=dropped view={}",
                    definition.name
                );
            }
        }
        let page = parse_positive(params.get(PAGE_KEY)).unwrap_or(1);
        let page_size =
            parse_positive(params.get(PAGE_SIZE_KEY)).unwrap_or(state.default_page_size);
        state.set_page(page, page_size);
        state
    }

    /// `key=value&...` with percent-encoding, in key order.
    pub fn to_query_string(&self) -> String {
        encode_query(&self.to_params())
    }
}

fn parse_positive(raw: Option<&String>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
}

/// Encodes a representation as a URL query string (no leading `?`).
pub fn encode_query(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes a URL query string; a leading `?` is allowed, `+` means space.
///
/// Pairs that are not valid percent-encoded UTF-8 are skipped. Later
/// duplicates replace earlier ones.
pub fn decode_query(query: &str) -> QueryParams {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|value| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{decode_query, encode_query, QueryParams};

    #[test]
    fn query_string_round_trips_non_ascii() {
        let mut params = QueryParams::new();
        params.insert("duration_range".into(), "30天以上".into());
        params.insert("search".into(), "a&b c".into());
        let encoded = encode_query(&params);
        assert!(!encoded.contains(' '));
        assert_eq!(decode_query(&format!("?{encoded}")), params);
    }

    #[test]
    fn decode_treats_plus_as_space_and_skips_bad_escapes() {
        let params = decode_query("search=a+b&bad=%FF&page=2");
        assert_eq!(params.get("search").map(String::as_str), Some("a b"));
        assert!(!params.contains_key("bad"));
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
    }
}
