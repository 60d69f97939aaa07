//! Content listings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ContentStatus, Currency};

/// A licensable short-form listing owned by a producer.
///
/// Deletion is soft: the row stays with [`ContentStatus::Deleted`] so offers
/// and LOIs that reference it keep resolving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: Uuid,

    /// The owning producer.
    pub producer_id: Uuid,

    pub title: String,
    pub description: String,

    /// Free-form genre labels used by catalog filtering.
    pub genre_tags: Vec<String>,

    /// Asking price. Always a decimal; money never goes through floats.
    pub price: Decimal,
    pub currency: Currency,

    /// Runtime of the clip, if known.
    pub duration_seconds: Option<u32>,

    /// Opaque references into the external media store.
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,

    pub status: ContentStatus,

    /// Monotonically non-decreasing; updated via atomic increment only.
    pub view_count: u64,

    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Content {
    /// Create a new draft listing.
    pub fn new(
        producer_id: Uuid,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            producer_id,
            title: title.into(),
            description: description.into(),
            genre_tags: Vec::new(),
            price,
            currency,
            duration_seconds: None,
            thumbnail_url: None,
            video_url: None,
            status: ContentStatus::Draft,
            view_count: 0,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Returns true if the listing appears in public browsing.
    pub fn is_visible(&self) -> bool {
        self.status.is_visible()
    }
}
