//! Taxonomy endpoint handler.

use crate::api::AppState;
use crate::taxonomy::{Category, TaxonomyRegistry};
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub members: &'static [&'static str],
    pub default: &'static str,
}

impl TaxonomyResponse {
    pub fn from_registry(registry: &TaxonomyRegistry) -> Self {
        let categories = Category::ALL
            .iter()
            .map(|&category| CategoryInfo {
                category,
                members: registry.members(category),
                default: registry.default_member(category),
            })
            .collect();
        Self { categories }
    }
}

/// GET /v1/taxonomy - Members and designated defaults per category.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse::from_registry(state.engine.registry()))
}
