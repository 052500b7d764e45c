//! Pure projection of a catalog and its expand/collapse flags into a view
//! tree that presentation adapters paint.

use crate::command;
use crate::models::{Catalog, Category, Endpoint, HttpMethod};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Position of an endpoint within the catalog being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointId {
    pub category: usize,
    pub endpoint: usize,
}

impl EndpointId {
    pub fn new(category: usize, endpoint: usize) -> Self {
        Self { category, endpoint }
    }
}

/// Which nodes are open. Absent means collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    categories: HashSet<usize>,
    endpoints: HashSet<EndpointId>,
}

impl ExpansionState {
    pub fn is_category_expanded(&self, index: usize) -> bool {
        self.categories.contains(&index)
    }

    pub fn is_endpoint_expanded(&self, id: EndpointId) -> bool {
        self.endpoints.contains(&id)
    }

    /// Returns the new state of the node.
    pub fn toggle_category(&mut self, index: usize) -> bool {
        if self.categories.remove(&index) {
            false
        } else {
            self.categories.insert(index);
            true
        }
    }

    pub fn toggle_endpoint(&mut self, id: EndpointId) -> bool {
        if self.endpoints.remove(&id) {
            false
        } else {
            self.endpoints.insert(id);
            true
        }
    }

    pub fn expand_all(&mut self, catalog: &Catalog) {
        for (c, category) in catalog.categories.iter().enumerate() {
            self.categories.insert(c);
            for e in 0..category.endpoints.len() {
                self.endpoints.insert(EndpointId::new(c, e));
            }
        }
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.endpoints.clear();
    }

    pub fn expanded_count(&self) -> usize {
        self.categories.len() + self.endpoints.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTree {
    pub base_url: String,
    pub total_endpoints: usize,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub endpoint_count: usize,
    pub count_label: String,
    pub expanded: bool,
    /// Only populated while the category is expanded.
    pub endpoints: Vec<EndpointView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointView {
    pub id: EndpointId,
    pub method: HttpMethod,
    pub path: String,
    pub description: String,
    pub requires_auth: bool,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EndpointDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDetails {
    pub full_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub command: String,
}

/// Owns the expand/collapse flags and projects catalogs through them.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    expansion: ExpansionState,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Forgets every flag and opens the first category. Called whenever a new
    /// catalog replaces the previous one.
    pub fn reset_for_new_catalog(&mut self) {
        self.expansion.clear();
        self.expansion.categories.insert(0);
    }

    pub fn toggle_category(&mut self, index: usize) -> bool {
        self.expansion.toggle_category(index)
    }

    pub fn toggle_endpoint(&mut self, id: EndpointId) -> bool {
        self.expansion.toggle_endpoint(id)
    }

    pub fn expand_all(&mut self, catalog: &Catalog) {
        self.expansion.expand_all(catalog);
    }

    pub fn render(&self, catalog: &Catalog) -> ViewTree {
        ViewTree {
            base_url: catalog.base_url.clone(),
            total_endpoints: catalog.endpoint_count(),
            categories: catalog
                .categories
                .iter()
                .enumerate()
                .map(|(index, category)| self.category_view(index, category, &catalog.base_url))
                .collect(),
        }
    }

    fn category_view(&self, index: usize, category: &Category, base_url: &str) -> CategoryView {
        let expanded = self.expansion.is_category_expanded(index);
        let endpoints = if expanded {
            category
                .endpoints
                .iter()
                .enumerate()
                .map(|(e, endpoint)| self.endpoint_view(EndpointId::new(index, e), endpoint, base_url))
                .collect()
        } else {
            Vec::new()
        };

        CategoryView {
            index,
            name: category.name.clone(),
            description: category.description.clone(),
            endpoint_count: category.endpoints.len(),
            count_label: count_label(category.endpoints.len()),
            expanded,
            endpoints,
        }
    }

    fn endpoint_view(&self, id: EndpointId, endpoint: &Endpoint, base_url: &str) -> EndpointView {
        let expanded = self.expansion.is_endpoint_expanded(id);
        EndpointView {
            id,
            method: endpoint.method,
            path: endpoint.path.clone(),
            description: endpoint.description.clone(),
            requires_auth: endpoint.requires_auth,
            expanded,
            details: expanded.then(|| details(endpoint, base_url)),
        }
    }
}

fn details(endpoint: &Endpoint, base_url: &str) -> EndpointDetails {
    EndpointDetails {
        full_url: endpoint.full_url(base_url),
        roles: endpoint.roles.clone().filter(|roles| !roles.is_empty()),
        content_type: endpoint.effective_content_type().map(str::to_string),
        body: endpoint.body.as_ref().map(pretty),
        query_params: endpoint.query_params.as_ref().map(pretty),
        response: endpoint.response.as_ref().map(pretty),
        command: command::synthesize(endpoint, base_url),
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn count_label(count: usize) -> String {
    match count {
        1 => "1 endpoint".to_string(),
        n => format!("{} endpoints", n),
    }
}
