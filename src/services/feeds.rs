//! In-process store of product feeds.
//!
//! Every catalog page view opens its own [`ProductFeed`] under a fresh id that
//! the page echoes back on load-more requests. Feeds belong to the visitor id
//! kept in the session cookie, so one visitor can browse several contexts at
//! once without disturbing each other. Generations come from one counter and
//! are never reused, even after eviction.
//!
//! The store is bounded: inserting past capacity evicts the least recently
//! opened feed. The mutex is only taken for the short, synchronous feed
//! transitions and is never held across a network call.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::facets::FilterFacets;
use crate::domain::feed::{BrowseContext, LoadOutcome, LoadTicket, ProductFeed};
use crate::domain::product::ProductPage;

#[derive(Debug)]
struct StoredFeed {
    visitor: Uuid,
    feed: ProductFeed,
}

#[derive(Debug, Default)]
struct Slots {
    feeds: HashMap<Uuid, StoredFeed>,
    order: VecDeque<Uuid>,
    next_generation: u64,
}

#[derive(Debug)]
pub struct FeedStore {
    slots: Mutex<Slots>,
    capacity: usize,
}

impl FeedStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Feed store lock was poisoned, continuing with its last state");
                poisoned.into_inner()
            }
        }
    }

    /// Open a feed of `context` for `visitor` from its first page.
    ///
    /// Returns the id of the new feed and a copy of it.
    pub fn open(
        &self,
        visitor: Uuid,
        context: BrowseContext,
        initial: ProductPage,
        seed: Option<FilterFacets>,
    ) -> (Uuid, ProductFeed) {
        let id = Uuid::new_v4();
        let mut slots = self.lock();

        let generation = slots.next_generation;
        slots.next_generation += 1;
        let mut feed = ProductFeed::new(context, generation, initial);
        if let Some(seed) = seed {
            feed.seed_facets(seed);
        }

        slots.feeds.insert(
            id,
            StoredFeed {
                visitor,
                feed: feed.clone(),
            },
        );
        slots.order.push_back(id);
        while slots.order.len() > self.capacity {
            if let Some(evicted) = slots.order.pop_front() {
                slots.feeds.remove(&evicted);
                log::debug!("Evicted feed {evicted}");
            }
        }

        (id, feed)
    }

    /// Run `f` against feed `id` when it belongs to `visitor`.
    pub fn with_feed<T>(
        &self,
        visitor: Uuid,
        id: Uuid,
        f: impl FnOnce(&mut ProductFeed) -> T,
    ) -> Option<T> {
        let mut slots = self.lock();
        slots
            .feeds
            .get_mut(&id)
            .filter(|stored| stored.visitor == visitor)
            .map(|stored| f(&mut stored.feed))
    }

    /// Copy of feed `id` of `visitor`.
    pub fn snapshot(&self, visitor: Uuid, id: Uuid) -> Option<ProductFeed> {
        self.with_feed(visitor, id, |feed| feed.clone())
    }

    pub fn begin_load(&self, visitor: Uuid, id: Uuid) -> Option<LoadTicket> {
        self.with_feed(visitor, id, ProductFeed::begin_load).flatten()
    }

    /// Settle `ticket` with a fetched page. A missing feed counts as stale.
    pub fn complete_load(
        &self,
        visitor: Uuid,
        id: Uuid,
        ticket: &LoadTicket,
        page: ProductPage,
    ) -> LoadOutcome {
        self.with_feed(visitor, id, |feed| feed.complete_load(ticket, page))
            .unwrap_or(LoadOutcome::Stale)
    }

    pub fn abort_load(&self, visitor: Uuid, id: Uuid, ticket: &LoadTicket) -> LoadOutcome {
        self.with_feed(visitor, id, |feed| feed.abort_load(ticket))
            .unwrap_or(LoadOutcome::Stale)
    }

    pub fn len(&self) -> usize {
        self.lock().feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
