//! Common enums used across the Clipdeal marketplace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Creates and licenses content; owns exactly one booth.
    Producer,
    /// Browses the catalog and submits offers.
    Buyer,
    /// Operates the marketplace; can read the reporting dashboard.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Producer => "producer",
            Role::Buyer => "buyer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "producer" => Ok(Role::Producer),
            "buyer" => Ok(Role::Buyer),
            "admin" => Ok(Role::Admin),
            other => Err(MarketError::validation(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Lifecycle status of a content listing.
///
/// Deletion is soft: the row is retained with status [`ContentStatus::Deleted`]
/// and excluded from every read path by the store's visibility filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Visible only to the owning producer.
    Draft,
    /// Visible in the public catalog.
    Public,
    /// Soft-deleted; never visible anywhere.
    Deleted,
}

impl ContentStatus {
    /// Returns true if the content appears in public browsing.
    pub fn is_visible(&self) -> bool {
        matches!(self, ContentStatus::Public)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, ContentStatus::Deleted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Public => "public",
            ContentStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a purchase offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Submitted, awaiting the producer's response.
    Pending,
    /// Accepted by the producer; an LOI is issued.
    Accepted,
    /// Rejected by the producer.
    Rejected,
    /// Lapsed without a response.
    Expired,
}

impl OfferStatus {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OfferStatus::Pending)
    }

    /// Returns true if an offer in this state may move to `next`.
    ///
    /// The only legal transitions are pending -> accepted/rejected/expired;
    /// terminal states never transition again.
    pub fn can_transition_to(&self, next: OfferStatus) -> bool {
        matches!(self, OfferStatus::Pending) && next.is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Currencies accepted for listing prices and offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "KRW")]
    Krw,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "JPY")]
    Jpy,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Krw => "KRW",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = MarketError;

    /// Case-insensitive: currency codes are normalized to uppercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "KRW" => Ok(Currency::Krw),
            "EUR" => Ok(Currency::Eur),
            "JPY" => Ok(Currency::Jpy),
            other => Err(MarketError::validation(
                "currency",
                format!("unsupported currency '{}'", other),
            )),
        }
    }
}
