//! Public booth profile endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use clipdeal_catalog::{paginate, select, CatalogFilter, CatalogParams, Page};
use clipdeal_core::MarketError;
use serde::{Deserialize, Serialize};

use crate::api::contents::{summarize, ContentSummary};
use crate::api::envelope::{self, ApiResult, Envelope};
use crate::state::AppState;

/// Public booth profile with producer display fields.
#[derive(Debug, Serialize)]
pub struct BoothResponse {
    pub slug: String,
    pub view_count: u64,
    pub is_boosted: bool,
    pub created_at: DateTime<Utc>,
    pub producer_name: String,
    pub producer_username: String,
    pub producer_country: Option<String>,
    pub producer_genre_tags: Vec<String>,
    /// Count of publicly visible listings.
    pub content_count: usize,
}

/// GET /api/v1/booths/:slug - booth profile; bumps the view counter.
pub async fn booth_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<(StatusCode, Json<Envelope<BoothResponse>>)> {
    let mut booth = state
        .store
        .get_booth_by_slug(&slug)
        .await?
        .ok_or_else(|| MarketError::not_found("booth", &slug))?;

    booth.view_count = state.store.increment_booth_views(booth.id).await?;

    let producer = state
        .store
        .get_user(booth.producer_id)
        .await?
        .ok_or_else(|| MarketError::not_found("user", booth.producer_id))?;

    let content_count = state
        .store
        .visible_contents_by_producer(booth.producer_id)
        .await?
        .len();

    let response = BoothResponse {
        slug: booth.slug,
        view_count: booth.view_count,
        is_boosted: booth.is_boosted,
        created_at: booth.created_at,
        producer_name: producer.display_name().to_string(),
        producer_username: producer.username.clone(),
        producer_country: producer.country.clone(),
        producer_genre_tags: producer.genre_tags.clone(),
        content_count,
    };

    Ok(envelope::ok("Booth profile retrieved successfully", response))
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// GET /api/v1/booths/:slug/contents - this producer's public listings,
/// newest first.
pub async fn booth_contents(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<(StatusCode, Json<Envelope<Page<ContentSummary>>>)> {
    let filter = CatalogFilter::parse(&CatalogParams {
        page: query.page,
        ..Default::default()
    })?;

    let booth = state
        .store
        .get_booth_by_slug(&slug)
        .await?
        .ok_or_else(|| MarketError::not_found("booth", &slug))?;

    let contents = state
        .store
        .visible_contents_by_producer(booth.producer_id)
        .await?;
    let page = paginate(select(contents, &filter), filter.page);

    let results = summarize(&state, page.results).await?;
    let page = Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results,
    };

    Ok(envelope::ok("Booth contents retrieved successfully", page))
}
