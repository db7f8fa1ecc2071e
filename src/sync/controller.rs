use std::fmt::Display;
use std::future::Future;

use crate::domain::listing::{Listing, PageDescriptor};
use crate::domain::query::ListQuery;
use crate::sync::sequence::{RequestSequencer, Ticket};

/// Remote collection a list screen reads from.
pub trait ListSource {
    type Item;
    type Error: Display;

    fn fetch(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Listing<Self::Item>, Self::Error>> + Send;
}

/// What a list screen currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<T> {
    Idle,
    Loading,
    Loaded(Listing<T>),
    /// The last fetch failed; the list is empty until a manual retry.
    Failed(String),
}

/// Owns one list screen's query and contents.
///
/// Every fetch is tagged with a [`Ticket`]; a response whose ticket is no
/// longer the latest is discarded, so a slow response for an older query can
/// never overwrite the result of a newer one.
pub struct ListController<S: ListSource> {
    source: S,
    query: ListQuery,
    state: ListState<S::Item>,
    sequencer: RequestSequencer,
}

impl<S: ListSource> ListController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            query: ListQuery::default(),
            state: ListState::Idle,
            sequencer: RequestSequencer::default(),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn state(&self) -> &ListState<S::Item> {
        &self.state
    }

    /// Descriptor of the page on screen, if one is loaded.
    pub fn page(&self) -> Option<&PageDescriptor> {
        match &self.state {
            ListState::Loaded(listing) => Some(&listing.page),
            _ => None,
        }
    }

    /// Marks a fetch for `query` as started and returns its ticket.
    pub fn begin(&mut self, query: ListQuery) -> Ticket {
        self.query = query;
        self.state = ListState::Loading;
        self.sequencer.issue()
    }

    /// Applies the result of the fetch tagged `ticket`.
    ///
    /// Returns `false` when the ticket is stale and the result was discarded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Listing<S::Item>, S::Error>,
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            log::debug!("Discarding stale list response {ticket:?}");
            return false;
        }

        self.state = match result {
            Ok(listing) => ListState::Loaded(listing),
            Err(err) => {
                log::error!("Failed to load list: {err}");
                ListState::Failed(err.to_string())
            }
        };
        true
    }

    /// Fetches `query` and applies the response.
    pub async fn load(&mut self, query: ListQuery) -> bool {
        let ticket = self.begin(query);
        let result = self.source.fetch(&self.query).await;
        self.complete(ticket, result)
    }

    /// Re-issues the current query; only ever triggered by the user.
    pub async fn retry(&mut self) -> bool {
        self.load(self.query.clone()).await
    }
}
