//! Signup endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use clipdeal_core::{Role, User};
use clipdeal_deals::provision;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::envelope::{self, ApiResult, Envelope};
use crate::state::AppState;

/// Request to create an account.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    /// `producer`, `buyer` or `admin`.
    pub role: String,
    pub company_name: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub genre_tags: Vec<String>,
}

/// Account details returned to the client.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub genre_tags: Vec<String>,
    pub is_onboarded: bool,
    pub booth_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            company_name: user.company_name,
            country: user.country,
            genre_tags: user.genre_tags,
            is_onboarded: user.is_onboarded,
            booth_slug: user.booth_slug,
            created_at: user.created_at,
        }
    }
}

/// Create an account. Producer signups provision the booth within the same
/// request; a provisioning failure fails the whole signup.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<UserResponse>>)> {
    let role: Role = req.role.parse()?;

    let user = provision::signup(
        state.store.as_ref(),
        provision::NewUser {
            username: req.username,
            email: req.email,
            role,
            company_name: req.company_name,
            country: req.country,
            genre_tags: req.genre_tags,
        },
    )
    .await?;

    Ok(envelope::created(
        "User created successfully",
        UserResponse::from(user),
    ))
}
