//! Event-driven filter-state synchronization for interactive list screens.
//!
//! The address-bar parameters ([`FilterParams`]) are the single source of
//! truth. Every effective change re-derives the [`ListQuery`] and triggers
//! exactly one fetch through the [`ListController`].

pub mod controller;
pub mod debounce;
pub mod sequence;

use crate::domain::query::{FilterKey, FilterParams, ListQuery};

pub use controller::{ListController, ListSource, ListState};
pub use debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
pub use sequence::{RequestSequencer, Ticket};

/// Keeps a list screen's parameters and its fetched contents in step.
pub struct FilterSynchronizer<S: ListSource> {
    params: FilterParams,
    controller: ListController<S>,
}

impl<S: ListSource> FilterSynchronizer<S> {
    pub fn new(source: S, params: FilterParams) -> Self {
        Self {
            params: params.normalized(),
            controller: ListController::new(source),
        }
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Current address-bar query string.
    pub fn query_string(&self) -> String {
        self.params.to_query_string()
    }

    pub fn controller(&self) -> &ListController<S> {
        &self.controller
    }

    /// Performs the initial fetch for the current parameters.
    pub async fn start(&mut self) -> bool {
        let query = ListQuery::from(&self.params);
        self.controller.load(query).await
    }

    /// Replaces the parameters, e.g. after browser navigation.
    ///
    /// Fetches only when the parameters actually changed.
    pub async fn navigate(&mut self, params: FilterParams) -> bool {
        let params = params.normalized();
        if params == self.params && !matches!(self.controller.state(), ListState::Idle) {
            return false;
        }
        self.params = params;
        let query = ListQuery::from(&self.params);
        self.controller.load(query).await
    }

    /// Applies one filter change; non-page changes return to the first page.
    pub async fn set_filter(&mut self, key: FilterKey, value: Option<String>) -> bool {
        let mut next = self.params.clone();
        if !next.apply(key, value) {
            return false;
        }
        self.navigate(next).await
    }

    /// Moves to `page`. Pages outside the loaded range are ignored.
    pub async fn go_to_page(&mut self, page: u32) -> bool {
        let Some((target, current)) = self
            .controller
            .page()
            .map(|descriptor| (descriptor.target(page), descriptor.current_page))
        else {
            return false;
        };
        match target {
            Some(target) if target != current => {
                self.set_filter(FilterKey::Page, Some(target.to_string()))
                    .await
            }
            _ => false,
        }
    }

    /// Clears every filter.
    pub async fn reset(&mut self) -> bool {
        self.navigate(FilterParams::default()).await
    }

    pub async fn retry(&mut self) -> bool {
        self.controller.retry().await
    }
}
