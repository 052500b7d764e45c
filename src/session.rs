//! One explorer page lifetime: fetch state, live search text and the
//! renderer's expand/collapse flags.

use crate::auth::{Token, TokenResolver, TokenStore};
use crate::error::{FetchFailure, LookupError};
use crate::fetcher::{CatalogFetcher, FetchOutcome};
use crate::filter::filter_catalog;
use crate::models::{Catalog, CatalogSnapshot, Endpoint, HttpMethod};
use crate::render::{EndpointId, ExpansionState, Renderer, ViewTree};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Uninitialized,
    Loading,
    Loaded(Catalog),
    Failed(FetchFailure),
}

/// Identifies one load attempt. Outcomes for any other ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Message panel shown in place of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePanel {
    pub kind: &'static str,
    pub message: String,
    pub remediation: &'static str,
}

impl From<&FetchFailure> for StatePanel {
    fn from(failure: &FetchFailure) -> Self {
        Self {
            kind: failure.kind(),
            message: failure.to_string(),
            remediation: failure.remediation(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SessionView {
    Uninitialized,
    Loading,
    Loaded { query: String, tree: ViewTree },
    Failed { panel: StatePanel },
}

#[derive(Debug)]
pub struct ExplorerSession {
    state: FetchState,
    renderer: Renderer,
    query: String,
    generation: u64,
    pending: Option<u64>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for ExplorerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerSession {
    pub fn new() -> Self {
        Self {
            state: FetchState::Uninitialized,
            renderer: Renderer::new(),
            query: String::new(),
            generation: 0,
            pending: None,
            loaded_at: None,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            FetchState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match &self.state {
            FetchState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Resolves the token, then fetches and applies the outcome. Without a
    /// token the session fails with `MissingToken` and no request is made.
    pub async fn load<S: TokenStore>(
        &mut self,
        resolver: &TokenResolver<S>,
        fetcher: &CatalogFetcher,
    ) -> &FetchState {
        if let Some((ticket, token)) = self.prepare_load(resolver) {
            let outcome = fetcher.fetch(&token).await;
            self.apply_outcome(ticket, outcome);
        }
        &self.state
    }

    /// First half of a load for callers that must not hold the session while
    /// the request is in flight. Returns `None` after failing with
    /// `MissingToken`; otherwise the session is `Loading` and the caller
    /// settles the ticket with `apply_outcome`.
    pub fn prepare_load<S: TokenStore>(
        &mut self,
        resolver: &TokenResolver<S>,
    ) -> Option<(LoadTicket, Token)> {
        let Some(token) = resolver.resolve() else {
            tracing::warn!("no access token; skipping catalog request");
            self.fail_before_request(FetchFailure::MissingToken);
            return None;
        };
        Some((self.begin_load(), token))
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.state = FetchState::Loading;
        LoadTicket(self.generation)
    }

    pub fn fail_before_request(&mut self, failure: FetchFailure) {
        self.generation += 1;
        self.pending = None;
        self.loaded_at = None;
        self.state = FetchState::Failed(failure);
    }

    /// Returns whether the outcome was applied. A ticket is settled by its
    /// first outcome; anything later for it, or for an older ticket, is ignored.
    pub fn apply_outcome(&mut self, ticket: LoadTicket, outcome: FetchOutcome) -> bool {
        if self.pending != Some(ticket.0) {
            tracing::debug!(ticket = ticket.0, current = self.generation, "discarding stale catalog outcome");
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(catalog) => {
                self.renderer.reset_for_new_catalog();
                self.loaded_at = Some(Utc::now());
                self.state = FetchState::Loaded(catalog);
            }
            Err(failure) => {
                self.loaded_at = None;
                self.state = FetchState::Failed(failure);
            }
        }
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn expansion(&self) -> &ExpansionState {
        self.renderer.expansion()
    }

    pub fn toggle_category(&mut self, index: usize) -> Result<bool, LookupError> {
        let visible = self.visible_catalog()?;
        if index >= visible.categories.len() {
            return Err(LookupError::CategoryIndex(index));
        }
        Ok(self.renderer.toggle_category(index))
    }

    pub fn toggle_endpoint(&mut self, id: EndpointId) -> Result<bool, LookupError> {
        self.visible_endpoint(id)?;
        Ok(self.renderer.toggle_endpoint(id))
    }

    pub fn expand_all(&mut self) -> Result<(), LookupError> {
        let visible = self.visible_catalog()?;
        self.renderer.expand_all(&visible);
        Ok(())
    }

    /// Command for an endpoint as currently displayed (after filtering).
    pub fn command_for(&self, id: EndpointId) -> Result<String, LookupError> {
        let (endpoint, base_url) = self.visible_endpoint(id)?;
        Ok(crate::command::synthesize(&endpoint, &base_url))
    }

    /// Looks an endpoint up in the full catalog by category name and path.
    pub fn find_endpoint(
        &self,
        category: &str,
        path: &str,
        method: Option<HttpMethod>,
    ) -> Result<&Endpoint, LookupError> {
        let catalog = self.catalog().ok_or(LookupError::NotLoaded)?;
        let (_, found) = catalog
            .category_by_name(category)
            .ok_or_else(|| LookupError::UnknownCategory(category.to_string()))?;

        let mut matches = found
            .endpoints
            .iter()
            .filter(|e| e.path == path && method.is_none_or(|m| e.method == m));

        let first = matches.next().ok_or_else(|| LookupError::UnknownEndpoint {
            category: found.name.clone(),
            method: method.map(|m| m.to_string()).unwrap_or_else(|| "*".to_string()),
            path: path.to_string(),
        })?;
        if matches.next().is_some() {
            return Err(LookupError::Ambiguous(path.to_string()));
        }
        Ok(first)
    }

    pub fn view(&self) -> SessionView {
        match &self.state {
            FetchState::Uninitialized => SessionView::Uninitialized,
            FetchState::Loading => SessionView::Loading,
            FetchState::Failed(failure) => SessionView::Failed { panel: failure.into() },
            FetchState::Loaded(catalog) => SessionView::Loaded {
                query: self.query.clone(),
                tree: self.renderer.render(&filter_catalog(catalog, &self.query)),
            },
        }
    }

    pub fn snapshot(&self, service_root: &str) -> Option<CatalogSnapshot> {
        let catalog = self.catalog()?;
        Some(CatalogSnapshot {
            service_root: service_root.to_string(),
            fetched_at: self.loaded_at.unwrap_or_else(Utc::now),
            catalog: catalog.clone(),
        })
    }

    fn visible_catalog(&self) -> Result<Catalog, LookupError> {
        let catalog = self.catalog().ok_or(LookupError::NotLoaded)?;
        Ok(filter_catalog(catalog, &self.query).into_owned())
    }

    fn visible_endpoint(&self, id: EndpointId) -> Result<(Endpoint, String), LookupError> {
        let visible = self.visible_catalog()?;
        let category = visible
            .categories
            .get(id.category)
            .ok_or(LookupError::CategoryIndex(id.category))?;
        let endpoint = category.endpoints.get(id.endpoint).ok_or(LookupError::EndpointIndex {
            category: id.category,
            endpoint: id.endpoint,
        })?;
        Ok((endpoint.clone(), visible.base_url.clone()))
    }
}
