use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use super::{generation::*, *};
use crate::Result;
use chowkashi_core::util::sort::sort_listings;
use usecases::{LocationInput, SearchRequest, SearchResults};

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub filters: FilterSet,
    pub location: Option<ResolvedLocation>,
    pub results: Option<SearchResults>,
    pub cache: LocationCache,
}

/// Holds the filter and location state of one user and runs
/// searches against it.
///
/// Searches and location lookups may overlap. Each one draws a
/// ticket and its response is only applied if no newer request
/// of the same kind has been issued in the meantime.
#[derive(Debug)]
pub struct SearchSession<B, G, D, N> {
    backend: B,
    geocoder: G,
    device: D,
    notices: N,
    searches: Generation,
    lookups: Generation,
    state: Mutex<SessionState>,
}

impl<B, G, D, N> SearchSession<B, G, D, N>
where
    B: ListingRepo + SearchFunctions,
    G: GeoCodingGateway,
    D: DeviceLocator,
    N: NoticeGateway,
{
    pub fn new(backend: B, geocoder: G, device: D, notices: N) -> Self {
        Self {
            backend,
            geocoder,
            device,
            notices,
            searches: Generation::default(),
            lookups: Generation::default(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn with_cache(self, cache: LocationCache) -> Self {
        self.state().cache = cache;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // A panic while holding the lock cannot leave the plain
    // data behind it half-updated.
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn filters(&self) -> FilterSet {
        self.state().filters.clone()
    }

    pub fn set_filters(&self, filters: FilterSet) {
        self.state().filters = filters;
    }

    pub fn update_filters(&self, update: impl FnOnce(&mut FilterSet)) {
        update(&mut self.state().filters);
    }

    pub fn reset_filters(&self) {
        self.set_filters(FilterSet::default());
    }

    pub fn location(&self) -> Option<ResolvedLocation> {
        self.state().location.clone()
    }

    pub fn clear_location(&self) {
        // Pending lookups must not bring the old location back.
        self.lookups.next_ticket();
        self.state().location = None;
    }

    pub fn results(&self) -> Option<SearchResults> {
        self.state().results.clone()
    }

    /// Resolves and stores the user location.
    ///
    /// A failed lookup is reported to the user and keeps the
    /// previous location. Superseded lookups report nothing.
    pub async fn resolve_location(
        &self,
        input: &LocationInput,
    ) -> Outcome<Option<ResolvedLocation>> {
        let ticket = self.lookups.next_ticket();
        let resolved = usecases::try_resolve_location(&self.device, &self.geocoder, input).await;
        let mut state = self.state();
        if !self.lookups.is_current(ticket) {
            debug!("Dropping superseded location lookup for {input:?}");
            return Outcome::Superseded;
        }
        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(notice) => {
                self.notices.notify(notice);
                None
            }
        };
        if let Some(location) = &resolved {
            if state.cache.update_location(location.pos) {
                info!("Location changed significantly to {}", location.label);
            }
            state.location = Some(location.clone());
        }
        Outcome::Applied(resolved)
    }

    /// Searches listings around the current location with the current filters.
    pub async fn search(&self, text: &str, enhance: bool) -> Result<Outcome<SearchResults>> {
        let ticket = self.searches.next_ticket();
        let req = {
            let state = self.state();
            let location = state.location.as_ref();
            SearchRequest {
                text: text.to_string(),
                postal_code: None,
                near_me: location.is_some_and(|l| l.source == LocationSource::Device),
                user_location: location.map(|l| l.pos),
                filters: state.filters.clone(),
                enhance,
            }
        };
        let results = usecases::search_listings(&self.backend, &self.backend, &req).await?;
        Ok(self.apply_results(ticket, results))
    }

    /// Searches listings by postal code, an empty input lists everything.
    ///
    /// Rejected input leaves a pending search untouched.
    pub async fn search_postal_code(&self, input: &str) -> Result<Outcome<SearchResults>> {
        let postal_code = usecases::parse_postal_code_input(input)
            .inspect_err(|_| self.notices.notify(Notice::InvalidPostalCode))?;
        let ticket = self.searches.next_ticket();
        let (filters, user_pos) = {
            let state = self.state();
            (state.filters.clone(), state.location.as_ref().map(|l| l.pos))
        };
        let listings = usecases::search_by_postal_code(&self.backend, &postal_code).await?;
        let annotated = usecases::annotate_listings(listings, user_pos);
        let filtered = usecases::apply_client_filters(annotated, &filters);
        let results = SearchResults {
            listings: sort_listings(&filtered, filters.sort),
            user_location: user_pos,
            query: postal_code,
            degraded: false,
        };
        Ok(self.apply_results(ticket, results))
    }

    fn apply_results(&self, ticket: Ticket, results: SearchResults) -> Outcome<SearchResults> {
        let mut state = self.state();
        if !self.searches.is_current(ticket) {
            debug!("Dropping superseded results for '{}'", results.query);
            return Outcome::Superseded;
        }
        if results.degraded {
            self.notices.notify(Notice::SearchFailed);
        }
        state.results = Some(results.clone());
        Outcome::Applied(results)
    }

    /// Distances of the given listings to the current location.
    ///
    /// Returns `None` without a location.
    pub async fn distances(&self, listings: &[BusinessListing]) -> Option<HashMap<Id, Distance>> {
        let (user_pos, mut cache) = {
            let state = self.state();
            (state.location.as_ref()?.pos, state.cache.clone())
        };
        let distances =
            usecases::compute_distances(listings, user_pos, &self.geocoder, &mut cache, Timestamp::now())
                .await;
        let mut state = self.state();
        if state.location.as_ref().map(|l| l.pos) == Some(user_pos) {
            state.cache = cache;
        }
        Some(distances)
    }
}
