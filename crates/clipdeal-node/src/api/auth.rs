//! Authenticated-user extractor.
//!
//! Credential and session management are external collaborators; by the time
//! a request reaches this service the session layer has resolved it to a user
//! id carried in the `x-user-id` header. The extractor turns that id into a
//! stored [`User`] or rejects with a `not_authenticated` envelope.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clipdeal_core::{MarketError, User};
use uuid::Uuid;

use crate::api::envelope::ApiError;
use crate::state::AppState;

/// The user identified by the session collaborator.
pub struct AuthUser(pub User);

/// Header carrying the resolved user id.
pub const USER_ID_HEADER: &str = "x-user-id";

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError(MarketError::NotAuthenticated))?;

        let id = Uuid::parse_str(raw).map_err(|_| ApiError(MarketError::NotAuthenticated))?;

        let user = state
            .store
            .get_user(id)
            .await
            .map_err(ApiError)?
            .ok_or(ApiError(MarketError::NotAuthenticated))?;

        Ok(AuthUser(user))
    }
}
