//! Query-string contract of the catalog pages.
//!
//! Filters live in the URL: `q`, repeatable `brands`, `category` and
//! `types`, `price_min`, `price_max`, `sort` and the cursor parameters
//! `page`, `after` and `before`. Every link that changes a filter drops the
//! cursor parameters so the result starts from the first page. Links built
//! for a rendered page also carry its `feed` id so filter changes reuse the
//! products that page already loaded.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::facets::FilterFacets;
use crate::domain::filter::{FilterSelection, format_number};
use crate::domain::page_info::PageRequest;
use crate::domain::sort::{SORT_OPTIONS, SortOption, resolve_sort};

const CURSOR_KEYS: [&str; 4] = ["page", "after", "before", "generation"];

#[derive(Debug, Error)]
#[error("invalid query string: {0}")]
pub struct BrowseQueryError(#[from] serde_html_form::de::Error);

/// Parsed catalog query string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub price_min: Option<String>,
    #[serde(default)]
    pub price_max: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    /// Feed generation the page was rendered with, sent by load-more requests.
    #[serde(default)]
    pub generation: Option<String>,
    /// Feed of the page the request came from.
    #[serde(default)]
    pub feed: Option<String>,
}

/// Facet value with its selection state and the link toggling it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub selected: bool,
    pub href: String,
}

/// Active filter shown as a removable pill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPill {
    pub label: String,
    pub href: String,
}

/// Sort menu entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortLink {
    pub title: &'static str,
    pub selected: bool,
    pub href: String,
}

/// Everything the filter sidebar renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPanel {
    pub brands: Vec<FacetOption>,
    pub categories: Vec<FacetOption>,
    pub types: Vec<FacetOption>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub price_floor: f64,
    pub price_ceiling: f64,
    pub pills: Vec<FilterPill>,
    pub sort_links: Vec<SortLink>,
    /// Link clearing every filter but keeping the search term and sort.
    pub clear_href: String,
    pub has_active_filters: bool,
}

impl BrowseQuery {
    /// Parse a raw query string, accepting repeated keys.
    pub fn parse(query: &str) -> Result<Self, BrowseQueryError> {
        Ok(serde_html_form::from_str(query)?)
    }

    /// Search term, trimmed; `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|term| !term.is_empty())
    }

    /// Filters requested by the URL. Non-numeric price bounds are ignored.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            brands: non_blank(&self.brands),
            categories: non_blank(&self.category),
            types: non_blank(&self.types),
            price_min: parse_price(self.price_min.as_deref()),
            price_max: parse_price(self.price_max.as_deref()),
        }
    }

    pub fn sort_option(&self) -> &'static SortOption {
        resolve_sort(self.sort.as_deref().filter(|slug| !slug.is_empty()))
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_cursors(self.after.clone(), self.before.clone())
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation.as_deref().and_then(|value| value.trim().parse().ok())
    }

    /// Feed id carried by the request; malformed ids are ignored.
    pub fn feed_id(&self) -> Option<Uuid> {
        self.feed.as_deref().and_then(|value| Uuid::parse_str(value.trim()).ok())
    }

    /// Copy of the query whose links point back at feed `id`.
    pub fn with_feed(&self, id: Uuid) -> Self {
        Self {
            feed: Some(id.to_string()),
            ..self.clone()
        }
    }

    /// Pairs of the current query without the cursor parameters.
    fn filter_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(term) = self.term() {
            pairs.push(("q", term.to_string()));
        }
        for value in non_blank(&self.brands) {
            pairs.push(("brands", value));
        }
        for value in non_blank(&self.category) {
            pairs.push(("category", value));
        }
        for value in non_blank(&self.types) {
            pairs.push(("types", value));
        }
        if let Some(min) = parse_price(self.price_min.as_deref()) {
            pairs.push(("price_min", format_number(min)));
        }
        if let Some(max) = parse_price(self.price_max.as_deref()) {
            pairs.push(("price_max", format_number(max)));
        }
        if let Some(slug) = self.sort_option().slug {
            pairs.push(("sort", slug.to_string()));
        }
        if let Some(feed) = self.feed_id() {
            pairs.push(("feed", feed.to_string()));
        }
        pairs
    }

    /// Query string of the current filters, cursors stripped.
    pub fn filter_query(&self) -> String {
        encode(&self.filter_pairs())
    }

    /// Link toggling `value` of the `key` dimension on `base`.
    pub fn toggle_href(&self, base: &str, key: &str, value: &str) -> String {
        let mut pairs = self.filter_pairs();
        let before = pairs.len();
        pairs.retain(|(existing_key, existing)| !(*existing_key == key && existing == value));
        if pairs.len() == before {
            if let Some(static_key) = dimension_key(key) {
                pairs.push((static_key, value.to_string()));
            }
        }
        href(base, &pairs)
    }

    /// Link dropping both price bounds.
    pub fn clear_price_href(&self, base: &str) -> String {
        let mut pairs = self.filter_pairs();
        pairs.retain(|(key, _)| *key != "price_min" && *key != "price_max");
        href(base, &pairs)
    }

    /// Link dropping every filter while keeping the term, the sort and the feed.
    pub fn clear_href(&self, base: &str) -> String {
        let mut pairs = self.filter_pairs();
        pairs.retain(|(key, _)| matches!(*key, "q" | "sort" | "feed"));
        href(base, &pairs)
    }

    /// Link applying `sort`; `None` restores the default.
    pub fn sort_href(&self, base: &str, sort: Option<&str>) -> String {
        let mut pairs = self.filter_pairs();
        pairs.retain(|(key, _)| *key != "sort");
        if let Some(slug) = sort {
            pairs.push(("sort", slug.to_string()));
        }
        href(base, &pairs)
    }

    /// Sidebar model for `facets` on the page at `base`.
    pub fn filter_panel(&self, base: &str, facets: &FilterFacets) -> FilterPanel {
        let selection = self.selection();
        let options = |key: &str, values: &BTreeSet<String>, chosen: &[String]| {
            // Selected values stay visible even before a page containing them loads.
            let mut all: Vec<&String> = values.iter().collect();
            for value in chosen {
                if !values.contains(value) {
                    all.push(value);
                }
            }
            all.into_iter()
                .map(|value| FacetOption {
                    value: value.clone(),
                    selected: chosen.contains(value),
                    href: self.toggle_href(base, key, value),
                })
                .collect::<Vec<_>>()
        };

        let mut pills = Vec::new();
        for (key, values) in [
            ("brands", &selection.brands),
            ("category", &selection.categories),
            ("types", &selection.types),
        ] {
            for value in values {
                pills.push(FilterPill {
                    label: value.clone(),
                    href: self.toggle_href(base, key, value),
                });
            }
        }
        if selection.price_min.is_some() || selection.price_max.is_some() {
            let label = match (selection.price_min, selection.price_max) {
                (Some(min), Some(max)) => {
                    format!("{} - {}", format_number(min), format_number(max))
                }
                (Some(min), None) => format!("Desde {}", format_number(min)),
                (None, Some(max)) => format!("Hasta {}", format_number(max)),
                (None, None) => String::new(),
            };
            pills.push(FilterPill {
                label,
                href: self.clear_price_href(base),
            });
        }

        let current = self.sort_option();
        let sort_links = SORT_OPTIONS
            .iter()
            .map(|option| SortLink {
                title: option.title,
                selected: option == current,
                href: self.sort_href(base, option.slug),
            })
            .collect();

        let bounds = facets.price_bounds();
        FilterPanel {
            brands: options("brands", &facets.brands, &selection.brands),
            categories: options("category", &facets.categories, &selection.categories),
            types: options("types", &facets.types, &selection.types),
            price_min: selection.price_min,
            price_max: selection.price_max,
            price_floor: bounds.min.floor(),
            price_ceiling: bounds.max.ceil(),
            has_active_filters: !selection.is_empty(),
            clear_href: self.clear_href(base),
            pills,
            sort_links,
        }
    }
}

fn dimension_key(key: &str) -> Option<&'static str> {
    match key {
        "brands" => Some("brands"),
        "category" => Some("category"),
        "types" => Some("types"),
        _ => None,
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_price(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn encode(pairs: &[(&'static str, String)]) -> String {
    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    serde_html_form::to_string(&borrowed).unwrap_or_default()
}

fn href(base: &str, pairs: &[(&'static str, String)]) -> String {
    let query = encode(pairs);
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}
