//! Incrementally loaded product list for one browsing context.
//!
//! A [`ProductFeed`] owns every product fetched so far, the cursor state and
//! the facets derived from them. Pages are requested through a two-step
//! protocol so that no lock has to be held while the network call runs:
//! [`ProductFeed::begin_load`] hands out a [`LoadTicket`] and moves the feed to
//! `Loading`, and [`ProductFeed::complete_load`] or [`ProductFeed::abort_load`]
//! settle it. Generations are handed out by the owner of the feeds and are
//! never reused, so a ticket only ever settles the feed that issued it.

use serde::Serialize;

use crate::domain::facets::FilterFacets;
use crate::domain::filter::FilterSelection;
use crate::domain::page_info::PageInfo;
use crate::domain::product::{Product, ProductPage};
use crate::domain::sort::SortOption;

/// What the visitor is browsing. Changing it starts a new feed.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseContext {
    /// A fixed collection; filters are applied locally.
    Collection {
        handle: String,
        sort: &'static SortOption,
    },
    /// Free-text search; filters are also part of the backend query.
    Search {
        term: Option<String>,
        selection: FilterSelection,
        sort: &'static SortOption,
    },
}

impl BrowseContext {
    /// Sort applied to every page of the context.
    pub fn sort(&self) -> &'static SortOption {
        match self {
            BrowseContext::Collection { sort, .. } | BrowseContext::Search { sort, .. } => sort,
        }
    }
}

/// Loader state of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoaderState {
    /// Ready to load the next page.
    Idle,
    /// A page request is in flight.
    Loading,
    /// The backend reported no further pages; terminal for the context.
    Exhausted,
}

/// Permission to fetch the page after `cursor` for a given feed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    generation: u64,
    cursor: String,
    context: BrowseContext,
}

impl LoadTicket {
    /// Cursor the next page starts after.
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Context the page belongs to.
    pub fn context(&self) -> &BrowseContext {
        &self.context
    }

    /// Generation of the feed when the ticket was issued.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of settling a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was appended; holds the number of new products.
    Appended(usize),
    /// The fetch failed; nothing changed.
    Failed,
    /// The ticket belongs to another feed or context; result dropped.
    Stale,
}

/// Loaded products, cursor state and facets of one browsing context.
#[derive(Debug, Clone)]
pub struct ProductFeed {
    context: BrowseContext,
    generation: u64,
    loaded: Vec<Product>,
    page_info: PageInfo,
    facets: FilterFacets,
    state: LoaderState,
}

impl ProductFeed {
    /// Start a feed from the first page of `context`.
    ///
    /// `generation` must be unique among every feed its tickets could reach.
    pub fn new(context: BrowseContext, generation: u64, initial: ProductPage) -> Self {
        let facets = FilterFacets::from_products(&initial.products);
        let state = state_for(&initial.page_info);
        Self {
            context,
            generation,
            loaded: initial.products,
            page_info: initial.page_info,
            facets,
            state,
        }
    }

    /// Seed the facets with values known before any page was loaded.
    pub fn seed_facets(&mut self, facets: FilterFacets) {
        self.facets.merge(facets);
    }

    pub fn context(&self) -> &BrowseContext {
        &self.context
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every product loaded in this context, in load order.
    pub fn loaded(&self) -> &[Product] {
        &self.loaded
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    pub fn facets(&self) -> &FilterFacets {
        &self.facets
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    /// Whether a sentinel should still trigger loads.
    pub fn can_load_more(&self) -> bool {
        self.state == LoaderState::Idle && self.page_info.next_cursor().is_some()
    }

    /// Loaded products passing `selection`.
    pub fn displayed<'a>(&'a self, selection: &FilterSelection) -> Vec<&'a Product> {
        selection.apply(&self.loaded)
    }

    /// Claim the next page. `None` while loading, when exhausted, or without a cursor.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.state != LoaderState::Idle {
            return None;
        }
        let cursor = self.page_info.next_cursor()?.to_string();
        self.state = LoaderState::Loading;
        Some(LoadTicket {
            generation: self.generation,
            cursor,
            context: self.context.clone(),
        })
    }

    fn issued(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && ticket.context == self.context
    }

    /// Append a fetched page.
    pub fn complete_load(&mut self, ticket: &LoadTicket, page: ProductPage) -> LoadOutcome {
        if !self.issued(ticket) {
            return LoadOutcome::Stale;
        }

        let appended = page.products.len();
        self.facets.absorb(&page.products);
        self.loaded.extend(page.products);
        self.state = state_for(&page.page_info);
        self.page_info = page.page_info;

        LoadOutcome::Appended(appended)
    }

    /// Give up on a failed fetch, leaving products and cursor untouched.
    pub fn abort_load(&mut self, ticket: &LoadTicket) -> LoadOutcome {
        if !self.issued(ticket) {
            return LoadOutcome::Stale;
        }
        if self.state == LoaderState::Loading {
            self.state = LoaderState::Idle;
        }
        LoadOutcome::Failed
    }
}

fn state_for(page_info: &PageInfo) -> LoaderState {
    if page_info.has_next_page {
        LoaderState::Idle
    } else {
        LoaderState::Exhausted
    }
}
