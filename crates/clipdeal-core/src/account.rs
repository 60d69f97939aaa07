//! User accounts and producer booths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// A marketplace account.
///
/// The role is fixed at signup. Credential and session handling live in an
/// external service; this row only carries identity and profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Unique login name.
    pub username: String,

    /// Unique contact address.
    pub email: String,

    pub role: Role,

    /// Company shown on public pages; falls back to the username when empty.
    pub company_name: Option<String>,

    pub country: Option<String>,

    /// Genres this account works in, shown on the booth profile.
    pub genre_tags: Vec<String>,

    /// Whether the account finished the onboarding flow.
    pub is_onboarded: bool,

    /// Denormalized slug of the producer's booth, written back at provisioning.
    pub booth_slug: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            role,
            company_name: None,
            country: None,
            genre_tags: Vec::new(),
            is_onboarded: false,
            booth_slug: None,
            created_at: Utc::now(),
        }
    }

    /// Public display name: company name, username fallback.
    pub fn display_name(&self) -> &str {
        match self.company_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }

    pub fn is_producer(&self) -> bool {
        self.role == Role::Producer
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A producer's public storefront, provisioned exactly once at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booth {
    pub id: Uuid,

    /// The owning producer (one-to-one).
    pub producer_id: Uuid,

    /// Unique URL slug.
    pub slug: String,

    /// Monotonically non-decreasing; updated via atomic increment only.
    pub view_count: u64,

    pub is_boosted: bool,
    pub boost_expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Booth {
    pub fn new(producer_id: Uuid, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            producer_id,
            slug: slug.into(),
            view_count: 0,
            is_boosted: false,
            boost_expires_at: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut user = User::new("studiok", "k@example.com", Role::Producer);
        assert_eq!(user.display_name(), "studiok");

        user.company_name = Some(String::new());
        assert_eq!(user.display_name(), "studiok");

        user.company_name = Some("Studio K".to_string());
        assert_eq!(user.display_name(), "Studio K");
    }
}
