//! The store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clipdeal_core::{Booth, Content, Loi, Offer, Result, User};
use uuid::Uuid;

/// Storage seam for the marketplace.
///
/// Uniqueness rules live behind the insert methods: a violated constraint
/// comes back as [`clipdeal_core::MarketError::UniqueViolation`] with the
/// constraint name (`user.username`, `user.email`, `booth.slug`,
/// `booth.producer`, `loi.offer`, `loi.document_number`). Content reads are
/// visibility-aware so no caller ever re-states the soft-delete filter.
#[async_trait]
pub trait MarketStore: Send + Sync {
    // --- users ---

    /// Insert a user. Unique on username and email.
    async fn insert_user(&self, user: User) -> Result<User>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Remove a user row entirely. Used to unwind a failed producer signup.
    async fn remove_user(&self, id: Uuid) -> Result<()>;

    /// Write the provisioned booth slug back onto the user row.
    async fn set_booth_slug(&self, user_id: Uuid, slug: &str) -> Result<()>;

    async fn list_users(&self) -> Result<Vec<User>>;

    // --- booths ---

    /// Insert a booth. Unique on slug and on producer id.
    async fn insert_booth(&self, booth: Booth) -> Result<Booth>;

    async fn get_booth_by_slug(&self, slug: &str) -> Result<Option<Booth>>;

    async fn get_booth_for_producer(&self, producer_id: Uuid) -> Result<Option<Booth>>;

    /// Atomically bump the booth view counter; returns the new count.
    async fn increment_booth_views(&self, id: Uuid) -> Result<u64>;

    // --- contents ---

    async fn insert_content(&self, content: Content) -> Result<Content>;

    /// Fetch a listing regardless of draft/public status. Soft-deleted rows
    /// are absent here too; only [`MarketStore::get_content_snapshot`] sees them.
    async fn get_content(&self, id: Uuid) -> Result<Option<Content>>;

    /// Fetch a listing including soft-deleted rows. For derived-document
    /// snapshots only, never for serving reads.
    async fn get_content_snapshot(&self, id: Uuid) -> Result<Option<Content>>;

    /// Fetch a listing only if it is publicly visible.
    async fn get_visible_content(&self, id: Uuid) -> Result<Option<Content>>;

    /// Replace a listing row. Errors if the row is absent or soft-deleted.
    async fn update_content(&self, content: Content) -> Result<Content>;

    /// Soft delete: flip status to deleted, keep the row.
    async fn soft_delete_content(&self, id: Uuid, at: DateTime<Utc>) -> Result<()>;

    /// Atomically bump the content view counter; returns the new count.
    async fn increment_content_views(&self, id: Uuid) -> Result<u64>;

    /// All publicly visible listings.
    async fn visible_contents(&self) -> Result<Vec<Content>>;

    /// Publicly visible listings owned by one producer.
    async fn visible_contents_by_producer(&self, producer_id: Uuid) -> Result<Vec<Content>>;

    /// All non-deleted listings (drafts included). Admin reporting and owner
    /// views.
    async fn active_contents(&self) -> Result<Vec<Content>>;

    /// Non-deleted listings owned by one producer.
    async fn active_contents_by_producer(&self, producer_id: Uuid) -> Result<Vec<Content>>;

    // --- offers ---

    async fn insert_offer(&self, offer: Offer) -> Result<Offer>;

    async fn get_offer(&self, id: Uuid) -> Result<Option<Offer>>;

    /// Replace an offer row.
    async fn update_offer(&self, offer: Offer) -> Result<Offer>;

    async fn offers_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<Offer>>;

    /// Offers submitted against any of this producer's listings.
    async fn offers_for_producer(&self, producer_id: Uuid) -> Result<Vec<Offer>>;

    async fn list_offers(&self) -> Result<Vec<Offer>>;

    // --- lois ---

    /// Insert an LOI. Unique on offer id and on document number.
    async fn insert_loi(&self, loi: Loi) -> Result<Loi>;

    async fn get_loi(&self, id: Uuid) -> Result<Option<Loi>>;

    async fn get_loi_for_offer(&self, offer_id: Uuid) -> Result<Option<Loi>>;

    /// LOIs where the user is buyer or producer.
    async fn lois_for_user(&self, user_id: Uuid) -> Result<Vec<Loi>>;

    async fn list_lois(&self) -> Result<Vec<Loi>>;
}
