//! Producer-side content management.

use chrono::Utc;
use clipdeal_core::{Content, ContentStatus, Currency, MarketError, Result, User};
use clipdeal_store::MarketStore;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// Input for creating a listing. New listings start as drafts.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub genre_tags: Vec<String>,
    pub price: Decimal,
    pub currency: Currency,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

/// Partial update; absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre_tags: Option<Vec<String>>,
    pub price: Option<Decimal>,
    pub currency: Option<Currency>,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

/// Create a draft listing owned by `owner`.
pub async fn create_listing(
    store: &dyn MarketStore,
    owner: &User,
    new: NewListing,
) -> Result<Content> {
    ensure_producer(owner)?;

    let title = new.title.trim();
    if title.is_empty() {
        return Err(MarketError::validation("title", "title is required"));
    }
    if new.price < Decimal::ZERO {
        return Err(MarketError::validation("price", "price cannot be negative"));
    }

    let mut content = Content::new(owner.id, title, new.description, new.price, new.currency);
    content.genre_tags = new.genre_tags;
    content.duration_seconds = new.duration_seconds;
    content.thumbnail_url = new.thumbnail_url;
    content.video_url = new.video_url;

    store.insert_content(content).await
}

/// Apply a partial update to an owned listing.
pub async fn update_listing(
    store: &dyn MarketStore,
    owner: &User,
    id: Uuid,
    patch: ListingPatch,
) -> Result<Content> {
    let mut content = owned_listing(store, owner, id).await?;

    if let Some(title) = patch.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(MarketError::validation("title", "title cannot be empty"));
        }
        content.title = title;
    }
    if let Some(description) = patch.description {
        content.description = description;
    }
    if let Some(tags) = patch.genre_tags {
        content.genre_tags = tags;
    }
    if let Some(price) = patch.price {
        if price < Decimal::ZERO {
            return Err(MarketError::validation("price", "price cannot be negative"));
        }
        content.price = price;
    }
    if let Some(currency) = patch.currency {
        content.currency = currency;
    }
    if let Some(duration) = patch.duration_seconds {
        content.duration_seconds = Some(duration);
    }
    if let Some(url) = patch.thumbnail_url {
        content.thumbnail_url = Some(url);
    }
    if let Some(url) = patch.video_url {
        content.video_url = Some(url);
    }

    store.update_content(content).await
}

/// Move a draft into the public catalog.
pub async fn publish_listing(store: &dyn MarketStore, owner: &User, id: Uuid) -> Result<Content> {
    let mut content = owned_listing(store, owner, id).await?;

    if content.status != ContentStatus::Draft {
        return Err(MarketError::InvalidTransition {
            from: content.status.to_string(),
            to: "public".to_string(),
        });
    }
    content.status = ContentStatus::Public;

    let content = store.update_content(content).await?;
    info!(content_id = %content.id, "listing published");
    Ok(content)
}

/// Soft delete an owned listing. The row is retained.
pub async fn delete_listing(store: &dyn MarketStore, owner: &User, id: Uuid) -> Result<()> {
    let content = owned_listing(store, owner, id).await?;
    store.soft_delete_content(content.id, Utc::now()).await
}

async fn owned_listing(store: &dyn MarketStore, owner: &User, id: Uuid) -> Result<Content> {
    ensure_producer(owner)?;

    let content = store
        .get_content(id)
        .await?
        .ok_or_else(|| MarketError::not_found("content", id))?;

    if content.producer_id != owner.id {
        return Err(MarketError::Forbidden(
            "only the owning producer may modify a listing".to_string(),
        ));
    }

    Ok(content)
}

fn ensure_producer(user: &User) -> Result<()> {
    if user.is_producer() {
        Ok(())
    } else {
        Err(MarketError::Forbidden(
            "producer role required".to_string(),
        ))
    }
}
