//! Catalog Routes
//!
//! - GET /api/v1/catalog?q= - Search the built-in foods

use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

use crate::api::dto::{CatalogQuery, CatalogResponse};
use crate::api::state::AppState;

/// GET /api/v1/catalog
pub async fn search_catalog(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogQuery>,
) -> Json<CatalogResponse> {
    let items: Vec<_> = state.catalog.search(&params.q).into_iter().cloned().collect();

    Json(CatalogResponse {
        total: items.len(),
        items,
    })
}
