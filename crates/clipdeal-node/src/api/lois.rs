//! LOI endpoints. Documents are visible only to their related parties.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use clipdeal_catalog::{paginate, Page};
use clipdeal_core::{Currency, Loi, MarketError};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::api::booths::PageQuery;
use crate::api::envelope::{self, ApiResult, Envelope};
use crate::api::offers::parse_page;
use crate::state::AppState;

/// Full LOI document payload.
#[derive(Debug, Serialize)]
pub struct LoiResponse {
    pub id: Uuid,
    pub document_number: String,
    pub offer_id: Uuid,
    pub buyer_name: String,
    pub buyer_company: Option<String>,
    pub buyer_country: Option<String>,
    pub producer_name: String,
    pub producer_company: Option<String>,
    pub producer_country: Option<String>,
    pub content_title: String,
    pub content_description: String,
    pub agreed_price: Decimal,
    pub currency: Currency,
    pub pdf_url: Option<String>,
    pub pdf_generated_at: Option<DateTime<Utc>>,
    pub is_pdf_ready: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Loi> for LoiResponse {
    fn from(loi: Loi) -> Self {
        let is_pdf_ready = loi.is_pdf_ready();
        Self {
            id: loi.id,
            document_number: loi.document_number,
            offer_id: loi.offer_id,
            buyer_name: loi.buyer_name,
            buyer_company: loi.buyer_company,
            buyer_country: loi.buyer_country,
            producer_name: loi.producer_name,
            producer_company: loi.producer_company,
            producer_country: loi.producer_country,
            content_title: loi.content_title,
            content_description: loi.content_description,
            agreed_price: loi.agreed_price,
            currency: loi.currency,
            pdf_url: loi.pdf_url,
            pdf_generated_at: loi.pdf_generated_at,
            is_pdf_ready,
            created_at: loi.created_at,
        }
    }
}

/// GET /api/v1/loi - documents where the user is buyer or producer.
pub async fn list_lois(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<(StatusCode, Json<Envelope<Page<LoiResponse>>>)> {
    let page_number = parse_page(query.page.as_deref())?;

    let mut lois = state.store.lois_for_user(user.id).await?;
    lois.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let page = paginate(lois, page_number);
    let page = Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results: page.results.into_iter().map(LoiResponse::from).collect(),
    };

    Ok(envelope::ok("LOIs retrieved successfully", page))
}

/// GET /api/v1/loi/:id - document detail.
///
/// Absent documents are 404; existing documents fetched by a third party are
/// 403, not 404: related parties already know the document exists.
pub async fn loi_detail(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<LoiResponse>>)> {
    let loi = state
        .store
        .get_loi(id)
        .await?
        .ok_or_else(|| MarketError::not_found("loi", id))?;

    if !loi.is_related_party(user.id) {
        return Err(MarketError::Forbidden(
            "you are not a party to this LOI".to_string(),
        )
        .into());
    }

    Ok(envelope::ok(
        "LOI retrieved successfully",
        LoiResponse::from(loi),
    ))
}
