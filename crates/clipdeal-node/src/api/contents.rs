//! Public catalog endpoints and producer-side listing management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use clipdeal_catalog::{paginate, select, CatalogFilter, CatalogParams, Page};
use clipdeal_core::{Content, ContentStatus, Currency, MarketError};
use clipdeal_deals::listings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::api::envelope::{self, ApiResult, Envelope};
use crate::state::AppState;

/// A catalog row with producer display fields attached.
#[derive(Debug, Serialize)]
pub struct ContentSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre_tags: Vec<String>,
    pub price: Decimal,
    pub currency: Currency,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub view_count: u64,
    /// Producer company name, username fallback.
    pub producer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Detail view adds the media reference and status.
#[derive(Debug, Serialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub summary: ContentSummary,
    pub video_url: Option<String>,
    pub status: ContentStatus,
}

impl ContentSummary {
    fn build(content: Content, producer_name: String) -> Self {
        Self {
            id: content.id,
            title: content.title,
            description: content.description,
            genre_tags: content.genre_tags,
            price: content.price,
            currency: content.currency,
            duration_seconds: content.duration_seconds,
            thumbnail_url: content.thumbnail_url,
            view_count: content.view_count,
            producer_name,
            created_at: content.created_at,
        }
    }
}

/// Resolve producer display names and build summaries for one page of rows.
pub(crate) async fn summarize(
    state: &AppState,
    contents: Vec<Content>,
) -> ApiResult<Vec<ContentSummary>> {
    let mut items = Vec::with_capacity(contents.len());
    for content in contents {
        let producer_name = state
            .store
            .get_user(content.producer_id)
            .await?
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        items.push(ContentSummary::build(content, producer_name));
    }
    Ok(items)
}

/// GET /api/v1/contents - filtered, sorted, paginated public catalog.
pub async fn list_contents(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> ApiResult<(StatusCode, Json<Envelope<Page<ContentSummary>>>)> {
    // Validation happens before any rows are read.
    let filter = CatalogFilter::parse(&params)?;

    let contents = state.store.visible_contents().await?;
    let page = paginate(select(contents, &filter), filter.page);

    let results = summarize(&state, page.results).await?;
    let page = Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results,
    };

    Ok(envelope::ok("Contents retrieved successfully", page))
}

/// GET /api/v1/contents/:id - public detail; bumps the view counter.
///
/// Draft and soft-deleted rows 404 exactly like absent ones.
pub async fn content_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<ContentDetail>>)> {
    let mut content = state
        .store
        .get_visible_content(id)
        .await?
        .ok_or_else(|| MarketError::not_found("content", id))?;

    content.view_count = state.store.increment_content_views(id).await?;

    let video_url = content.video_url.take();
    let status = content.status;
    let producer_name = state
        .store
        .get_user(content.producer_id)
        .await?
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let detail = ContentDetail {
        summary: ContentSummary::build(content, producer_name),
        video_url,
        status,
    };

    Ok(envelope::ok("Content retrieved successfully", detail))
}

/// Request to create a listing.
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre_tags: Vec<String>,
    pub price: Decimal,
    pub currency: String,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

/// Partial update; absent fields are untouched.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre_tags: Option<Vec<String>>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

/// POST /api/v1/contents - create a draft listing (producer only).
pub async fn create_content(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateContentRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<ContentDetail>>)> {
    let currency: Currency = req.currency.parse()?;

    let content = listings::create_listing(
        state.store.as_ref(),
        &user,
        listings::NewListing {
            title: req.title,
            description: req.description,
            genre_tags: req.genre_tags,
            price: req.price,
            currency,
            duration_seconds: req.duration_seconds,
            thumbnail_url: req.thumbnail_url,
            video_url: req.video_url,
        },
    )
    .await?;

    let detail = owner_detail(content, &user);
    Ok(envelope::created("Content created successfully", detail))
}

/// PATCH /api/v1/contents/:id - update an owned listing.
pub async fn update_content(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContentRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<ContentDetail>>)> {
    let currency = match req.currency {
        Some(raw) => Some(raw.parse::<Currency>()?),
        None => None,
    };

    let content = listings::update_listing(
        state.store.as_ref(),
        &user,
        id,
        listings::ListingPatch {
            title: req.title,
            description: req.description,
            genre_tags: req.genre_tags,
            price: req.price,
            currency,
            duration_seconds: req.duration_seconds,
            thumbnail_url: req.thumbnail_url,
            video_url: req.video_url,
        },
    )
    .await?;

    let detail = owner_detail(content, &user);
    Ok(envelope::ok("Content updated successfully", detail))
}

/// POST /api/v1/contents/:id/publish - move a draft into the public catalog.
pub async fn publish_content(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<ContentDetail>>)> {
    let content = listings::publish_listing(state.store.as_ref(), &user, id).await?;
    let detail = owner_detail(content, &user);
    Ok(envelope::ok("Content published successfully", detail))
}

/// DELETE /api/v1/contents/:id - soft delete an owned listing.
pub async fn delete_content(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<Value>>)> {
    listings::delete_listing(state.store.as_ref(), &user, id).await?;
    Ok(envelope::ok_empty("Content deleted successfully"))
}

fn owner_detail(mut content: Content, owner: &clipdeal_core::User) -> ContentDetail {
    let video_url = content.video_url.take();
    let status = content.status;
    ContentDetail {
        summary: ContentSummary::build(content, owner.display_name().to_string()),
        video_url,
        status,
    }
}
