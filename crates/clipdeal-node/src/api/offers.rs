//! Offer endpoints: submission, related-party listing and responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use clipdeal_catalog::{paginate, Page};
use clipdeal_core::{Currency, Offer, OfferStatus};
use clipdeal_deals::offers as offer_service;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::api::booths::PageQuery;
use crate::api::envelope::{self, ApiResult, Envelope};
use crate::state::AppState;

/// Request to submit an offer.
#[derive(Debug, Deserialize)]
pub struct SubmitOfferRequest {
    pub content_id: Uuid,
    pub offered_price: Decimal,
    pub currency: String,
    pub message: Option<String>,
}

/// Offer details with denormalized display fields.
#[derive(Debug, Serialize)]
pub struct OfferResponse {
    pub id: Uuid,
    pub content_id: Uuid,
    pub content_title: String,
    pub buyer_name: String,
    pub offered_price: Decimal,
    pub currency: Currency,
    pub message: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

async fn offer_response(state: &AppState, offer: Offer) -> ApiResult<OfferResponse> {
    let content_title = state
        .store
        .get_content_snapshot(offer.content_id)
        .await?
        .map(|c| c.title)
        .unwrap_or_else(|| "unknown".to_string());
    let buyer_name = state
        .store
        .get_user(offer.buyer_id)
        .await?
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Ok(OfferResponse {
        id: offer.id,
        content_id: offer.content_id,
        content_title,
        buyer_name,
        offered_price: offer.offered_price,
        currency: offer.currency,
        message: offer.message,
        status: offer.status,
        created_at: offer.created_at,
        responded_at: offer.responded_at,
    })
}

/// POST /api/v1/offers - buyer submits an offer against public content.
pub async fn submit_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<SubmitOfferRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<OfferResponse>>)> {
    let currency: Currency = req.currency.parse()?;

    let offer = offer_service::submit_offer(
        state.store.as_ref(),
        &user,
        offer_service::NewOffer {
            content_id: req.content_id,
            offered_price: req.offered_price,
            currency,
            message: req.message,
        },
    )
    .await?;

    let response = offer_response(&state, offer).await?;
    Ok(envelope::created("Offer submitted successfully", response))
}

/// GET /api/v1/offers - offers the authenticated user is a party to.
pub async fn list_offers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<(StatusCode, Json<Envelope<Page<OfferResponse>>>)> {
    let page_number = parse_page(query.page.as_deref())?;

    let offers = offer_service::related_offers(state.store.as_ref(), &user).await?;
    let page = paginate(offers, page_number);

    let mut results = Vec::with_capacity(page.results.len());
    for offer in page.results {
        results.push(offer_response(&state, offer).await?);
    }
    let page = Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results,
    };

    Ok(envelope::ok("Offers retrieved successfully", page))
}

/// POST /api/v1/offers/:id/accept - accept a pending offer; the LOI is
/// issued within this request, best effort.
pub async fn accept_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<OfferResponse>>)> {
    let offer = offer_service::accept_offer(state.store.as_ref(), &user, id).await?;
    let response = offer_response(&state, offer).await?;
    Ok(envelope::ok("Offer accepted successfully", response))
}

/// POST /api/v1/offers/:id/reject - reject a pending offer.
pub async fn reject_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<OfferResponse>>)> {
    let offer = offer_service::reject_offer(state.store.as_ref(), &user, id).await?;
    let response = offer_response(&state, offer).await?;
    Ok(envelope::ok("Offer rejected successfully", response))
}

pub(crate) fn parse_page(raw: Option<&str>) -> ApiResult<u32> {
    match raw {
        None | Some("") => Ok(1),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| {
                clipdeal_core::MarketError::validation(
                    "page",
                    format!("invalid page number '{}'", raw),
                )
                .into()
            }),
    }
}
