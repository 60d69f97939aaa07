//! Admin reporting dashboard.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use clipdeal_core::MarketError;
use clipdeal_deals::reporting::{self, Dashboard, Period};
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::envelope::{self, ApiResult, Envelope};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub period: Option<String>,
}

/// GET /api/v1/admin/dashboard?period=7d|30d - summary statistics.
///
/// Unlike catalog ordering, the period parameter is strict: it selects the
/// dataset, so an unknown value is a hard 400.
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<(StatusCode, Json<Envelope<Dashboard>>)> {
    if !user.is_admin() {
        return Err(MarketError::Forbidden("admin role required".to_string()).into());
    }

    let period: Period = query.period.as_deref().unwrap_or("7d").parse()?;

    let dashboard =
        reporting::build_dashboard(state.store.as_ref(), period, Utc::now()).await?;

    Ok(envelope::ok(
        "Dashboard data retrieved successfully",
        dashboard,
    ))
}
