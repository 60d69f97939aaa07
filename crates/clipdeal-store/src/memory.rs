//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clipdeal_core::{Booth, Content, ContentStatus, Loi, MarketError, Offer, Result, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::MarketStore;

/// All tables and unique indexes, guarded by one lock.
///
/// A single lock keeps every multi-row invariant (index + row insert, offer
/// update then LOI read) atomic with respect to parallel request workers.
#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    username_idx: HashMap<String, Uuid>,
    email_idx: HashMap<String, Uuid>,

    booths: HashMap<Uuid, Booth>,
    slug_idx: HashMap<String, Uuid>,
    producer_booth_idx: HashMap<Uuid, Uuid>,

    contents: HashMap<Uuid, Content>,

    offers: HashMap<Uuid, Offer>,

    lois: HashMap<Uuid, Loi>,
    loi_offer_idx: HashMap<Uuid, Uuid>,
    loi_docnum_idx: HashMap<String, Uuid>,
}

/// In-memory implementation of [`MarketStore`].
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unique_violation(constraint: &'static str, value: impl ToString) -> MarketError {
    MarketError::UniqueViolation {
        constraint,
        value: value.to_string(),
    }
}

#[async_trait]
impl MarketStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> Result<User> {
        let mut t = self.tables.write().await;

        if t.username_idx.contains_key(&user.username) {
            return Err(unique_violation("user.username", &user.username));
        }
        if t.email_idx.contains_key(&user.email) {
            return Err(unique_violation("user.email", &user.email));
        }

        t.username_idx.insert(user.username.clone(), user.id);
        t.email_idx.insert(user.email.clone(), user.id);
        t.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.get(&id).cloned())
    }

    async fn remove_user(&self, id: Uuid) -> Result<()> {
        let mut t = self.tables.write().await;

        let user = t
            .users
            .remove(&id)
            .ok_or_else(|| MarketError::not_found("user", id))?;
        t.username_idx.remove(&user.username);
        t.email_idx.remove(&user.email);

        // Drop any booth provisioned for this user during the same signup.
        if let Some(booth_id) = t.producer_booth_idx.remove(&id) {
            if let Some(booth) = t.booths.remove(&booth_id) {
                t.slug_idx.remove(&booth.slug);
            }
        }

        Ok(())
    }

    async fn set_booth_slug(&self, user_id: Uuid, slug: &str) -> Result<()> {
        let mut t = self.tables.write().await;
        let user = t
            .users
            .get_mut(&user_id)
            .ok_or_else(|| MarketError::not_found("user", user_id))?;
        user.booth_slug = Some(slug.to_string());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().cloned().collect())
    }

    async fn insert_booth(&self, booth: Booth) -> Result<Booth> {
        let mut t = self.tables.write().await;

        if t.slug_idx.contains_key(&booth.slug) {
            return Err(unique_violation("booth.slug", &booth.slug));
        }
        if t.producer_booth_idx.contains_key(&booth.producer_id) {
            return Err(unique_violation("booth.producer", booth.producer_id));
        }

        t.slug_idx.insert(booth.slug.clone(), booth.id);
        t.producer_booth_idx.insert(booth.producer_id, booth.id);
        t.booths.insert(booth.id, booth.clone());

        Ok(booth)
    }

    async fn get_booth_by_slug(&self, slug: &str) -> Result<Option<Booth>> {
        let t = self.tables.read().await;
        Ok(t.slug_idx
            .get(slug)
            .and_then(|id| t.booths.get(id))
            .cloned())
    }

    async fn get_booth_for_producer(&self, producer_id: Uuid) -> Result<Option<Booth>> {
        let t = self.tables.read().await;
        Ok(t.producer_booth_idx
            .get(&producer_id)
            .and_then(|id| t.booths.get(id))
            .cloned())
    }

    async fn increment_booth_views(&self, id: Uuid) -> Result<u64> {
        let mut t = self.tables.write().await;
        let booth = t
            .booths
            .get_mut(&id)
            .ok_or_else(|| MarketError::not_found("booth", id))?;
        booth.view_count += 1;
        Ok(booth.view_count)
    }

    async fn insert_content(&self, content: Content) -> Result<Content> {
        let mut t = self.tables.write().await;
        t.contents.insert(content.id, content.clone());
        Ok(content)
    }

    async fn get_content(&self, id: Uuid) -> Result<Option<Content>> {
        let t = self.tables.read().await;
        Ok(t.contents
            .get(&id)
            .filter(|c| !c.status.is_deleted())
            .cloned())
    }

    async fn get_content_snapshot(&self, id: Uuid) -> Result<Option<Content>> {
        let t = self.tables.read().await;
        Ok(t.contents.get(&id).cloned())
    }

    async fn get_visible_content(&self, id: Uuid) -> Result<Option<Content>> {
        let t = self.tables.read().await;
        Ok(t.contents.get(&id).filter(|c| c.is_visible()).cloned())
    }

    async fn update_content(&self, content: Content) -> Result<Content> {
        let mut t = self.tables.write().await;
        let existing = t
            .contents
            .get_mut(&content.id)
            .filter(|c| !c.status.is_deleted())
            .ok_or_else(|| MarketError::not_found("content", content.id))?;
        *existing = content.clone();
        Ok(content)
    }

    async fn soft_delete_content(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut t = self.tables.write().await;
        let content = t
            .contents
            .get_mut(&id)
            .filter(|c| !c.status.is_deleted())
            .ok_or_else(|| MarketError::not_found("content", id))?;
        content.status = ContentStatus::Deleted;
        content.deleted_at = Some(at);
        Ok(())
    }

    async fn increment_content_views(&self, id: Uuid) -> Result<u64> {
        let mut t = self.tables.write().await;
        let content = t
            .contents
            .get_mut(&id)
            .filter(|c| c.is_visible())
            .ok_or_else(|| MarketError::not_found("content", id))?;
        content.view_count += 1;
        Ok(content.view_count)
    }

    async fn visible_contents(&self) -> Result<Vec<Content>> {
        let t = self.tables.read().await;
        Ok(t.contents
            .values()
            .filter(|c| c.is_visible())
            .cloned()
            .collect())
    }

    async fn visible_contents_by_producer(&self, producer_id: Uuid) -> Result<Vec<Content>> {
        let t = self.tables.read().await;
        Ok(t.contents
            .values()
            .filter(|c| c.is_visible() && c.producer_id == producer_id)
            .cloned()
            .collect())
    }

    async fn active_contents(&self) -> Result<Vec<Content>> {
        let t = self.tables.read().await;
        Ok(t.contents
            .values()
            .filter(|c| !c.status.is_deleted())
            .cloned()
            .collect())
    }

    async fn active_contents_by_producer(&self, producer_id: Uuid) -> Result<Vec<Content>> {
        let t = self.tables.read().await;
        Ok(t.contents
            .values()
            .filter(|c| !c.status.is_deleted() && c.producer_id == producer_id)
            .cloned()
            .collect())
    }

    async fn insert_offer(&self, offer: Offer) -> Result<Offer> {
        let mut t = self.tables.write().await;
        t.offers.insert(offer.id, offer.clone());
        Ok(offer)
    }

    async fn get_offer(&self, id: Uuid) -> Result<Option<Offer>> {
        let t = self.tables.read().await;
        Ok(t.offers.get(&id).cloned())
    }

    async fn update_offer(&self, offer: Offer) -> Result<Offer> {
        let mut t = self.tables.write().await;
        let existing = t
            .offers
            .get_mut(&offer.id)
            .ok_or_else(|| MarketError::not_found("offer", offer.id))?;
        *existing = offer.clone();
        Ok(offer)
    }

    async fn offers_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<Offer>> {
        let t = self.tables.read().await;
        Ok(t.offers
            .values()
            .filter(|o| o.buyer_id == buyer_id)
            .cloned()
            .collect())
    }

    async fn offers_for_producer(&self, producer_id: Uuid) -> Result<Vec<Offer>> {
        let t = self.tables.read().await;
        Ok(t.offers
            .values()
            .filter(|o| {
                t.contents
                    .get(&o.content_id)
                    .map(|c| c.producer_id == producer_id)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn list_offers(&self) -> Result<Vec<Offer>> {
        let t = self.tables.read().await;
        Ok(t.offers.values().cloned().collect())
    }

    async fn insert_loi(&self, loi: Loi) -> Result<Loi> {
        let mut t = self.tables.write().await;

        if t.loi_offer_idx.contains_key(&loi.offer_id) {
            return Err(unique_violation("loi.offer", loi.offer_id));
        }
        if t.loi_docnum_idx.contains_key(&loi.document_number) {
            return Err(unique_violation("loi.document_number", &loi.document_number));
        }

        t.loi_offer_idx.insert(loi.offer_id, loi.id);
        t.loi_docnum_idx.insert(loi.document_number.clone(), loi.id);
        t.lois.insert(loi.id, loi.clone());

        Ok(loi)
    }

    async fn get_loi(&self, id: Uuid) -> Result<Option<Loi>> {
        let t = self.tables.read().await;
        Ok(t.lois.get(&id).cloned())
    }

    async fn get_loi_for_offer(&self, offer_id: Uuid) -> Result<Option<Loi>> {
        let t = self.tables.read().await;
        Ok(t.loi_offer_idx
            .get(&offer_id)
            .and_then(|id| t.lois.get(id))
            .cloned())
    }

    async fn lois_for_user(&self, user_id: Uuid) -> Result<Vec<Loi>> {
        let t = self.tables.read().await;
        Ok(t.lois
            .values()
            .filter(|l| l.is_related_party(user_id))
            .cloned()
            .collect())
    }

    async fn list_lois(&self) -> Result<Vec<Loi>> {
        let t = self.tables.read().await;
        Ok(t.lois.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipdeal_core::{Currency, Role};

    fn producer() -> User {
        User::new("studio", "studio@example.com", Role::Producer)
    }

    fn listing(producer_id: Uuid) -> Content {
        let mut c = Content::new(
            producer_id,
            "Drama Night",
            "a drama short",
            "50".parse().unwrap(),
            Currency::Usd,
        );
        c.status = ContentStatus::Public;
        c
    }

    #[tokio::test]
    async fn test_username_and_email_unique() {
        let store = InMemoryStore::new();
        store.insert_user(producer()).await.unwrap();

        let dup_name = User::new("studio", "other@example.com", Role::Buyer);
        let err = store.insert_user(dup_name).await.unwrap_err();
        assert_eq!(err.violated_constraint(), Some("user.username"));

        let dup_mail = User::new("other", "studio@example.com", Role::Buyer);
        let err = store.insert_user(dup_mail).await.unwrap_err();
        assert_eq!(err.violated_constraint(), Some("user.email"));
    }

    #[tokio::test]
    async fn test_booth_slug_unique() {
        let store = InMemoryStore::new();
        let a = store.insert_user(producer()).await.unwrap();
        let b = store
            .insert_user(User::new("studio2", "s2@example.com", Role::Producer))
            .await
            .unwrap();

        store.insert_booth(Booth::new(a.id, "acme")).await.unwrap();
        let err = store
            .insert_booth(Booth::new(b.id, "acme"))
            .await
            .unwrap_err();
        assert_eq!(err.violated_constraint(), Some("booth.slug"));
    }

    #[tokio::test]
    async fn test_one_booth_per_producer() {
        let store = InMemoryStore::new();
        let a = store.insert_user(producer()).await.unwrap();

        store.insert_booth(Booth::new(a.id, "acme")).await.unwrap();
        let err = store
            .insert_booth(Booth::new(a.id, "acme-films"))
            .await
            .unwrap_err();
        assert_eq!(err.violated_constraint(), Some("booth.producer"));
    }

    #[tokio::test]
    async fn test_remove_user_unwinds_booth() {
        let store = InMemoryStore::new();
        let a = store.insert_user(producer()).await.unwrap();
        store.insert_booth(Booth::new(a.id, "acme")).await.unwrap();

        store.remove_user(a.id).await.unwrap();

        assert!(store.get_booth_by_slug("acme").await.unwrap().is_none());
        // The slug and username are free again.
        let b = store.insert_user(producer()).await.unwrap();
        store.insert_booth(Booth::new(b.id, "acme")).await.unwrap();
    }

    #[tokio::test]
    async fn test_soft_delete_hides_everywhere() {
        let store = InMemoryStore::new();
        let p = store.insert_user(producer()).await.unwrap();
        let c = store.insert_content(listing(p.id)).await.unwrap();

        store.soft_delete_content(c.id, Utc::now()).await.unwrap();

        assert!(store.get_content(c.id).await.unwrap().is_none());
        assert!(store.get_visible_content(c.id).await.unwrap().is_none());
        assert!(store.visible_contents().await.unwrap().is_empty());
        assert!(store.active_contents().await.unwrap().is_empty());
        // The row itself is retained for derived-document snapshots.
        assert!(store.get_content_snapshot(c.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_draft_not_visible_but_active() {
        let store = InMemoryStore::new();
        let p = store.insert_user(producer()).await.unwrap();
        let mut draft = listing(p.id);
        draft.status = ContentStatus::Draft;
        let c = store.insert_content(draft).await.unwrap();

        assert!(store.get_visible_content(c.id).await.unwrap().is_none());
        assert!(store.visible_contents().await.unwrap().is_empty());
        assert_eq!(store.active_contents().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_view_increment_is_exact_under_concurrency() {
        let store = Arc::new(InMemoryStore::new());
        let p = store.insert_user(producer()).await.unwrap();
        let c = store.insert_content(listing(p.id)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            let id = c.id;
            handles.push(tokio::spawn(async move {
                store.increment_content_views(id).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let after = store.get_content(c.id).await.unwrap().unwrap();
        assert_eq!(after.view_count, 50);
    }

    #[tokio::test]
    async fn test_increment_rejects_hidden_content() {
        let store = InMemoryStore::new();
        let p = store.insert_user(producer()).await.unwrap();
        let mut draft = listing(p.id);
        draft.status = ContentStatus::Draft;
        let c = store.insert_content(draft).await.unwrap();

        assert!(store.increment_content_views(c.id).await.is_err());
    }

    #[tokio::test]
    async fn test_loi_unique_per_offer() {
        let store = InMemoryStore::new();
        let p = store.insert_user(producer()).await.unwrap();
        let b = store
            .insert_user(User::new("buyer", "b@example.com", Role::Buyer))
            .await
            .unwrap();
        let c = store.insert_content(listing(p.id)).await.unwrap();
        let o = store
            .insert_offer(Offer::new(
                c.id,
                b.id,
                "40".parse().unwrap(),
                Currency::Usd,
                None,
            ))
            .await
            .unwrap();

        let loi = Loi::from_offer(&o, &c, &b, &p, "LOI-20260829-AAAAAA");
        store.insert_loi(loi).await.unwrap();

        let dup = Loi::from_offer(&o, &c, &b, &p, "LOI-20260829-BBBBBB");
        let err = store.insert_loi(dup).await.unwrap_err();
        assert_eq!(err.violated_constraint(), Some("loi.offer"));
    }

    #[tokio::test]
    async fn test_loi_document_number_unique() {
        let store = InMemoryStore::new();
        let p = store.insert_user(producer()).await.unwrap();
        let b = store
            .insert_user(User::new("buyer", "b@example.com", Role::Buyer))
            .await
            .unwrap();
        let c = store.insert_content(listing(p.id)).await.unwrap();
        let o1 = store
            .insert_offer(Offer::new(
                c.id,
                b.id,
                "40".parse().unwrap(),
                Currency::Usd,
                None,
            ))
            .await
            .unwrap();
        let o2 = store
            .insert_offer(Offer::new(
                c.id,
                b.id,
                "45".parse().unwrap(),
                Currency::Usd,
                None,
            ))
            .await
            .unwrap();

        store
            .insert_loi(Loi::from_offer(&o1, &c, &b, &p, "LOI-20260829-AAAAAA"))
            .await
            .unwrap();
        let err = store
            .insert_loi(Loi::from_offer(&o2, &c, &b, &p, "LOI-20260829-AAAAAA"))
            .await
            .unwrap_err();
        assert_eq!(err.violated_constraint(), Some("loi.document_number"));
    }

    #[tokio::test]
    async fn test_offers_for_producer_joins_contents() {
        let store = InMemoryStore::new();
        let p = store.insert_user(producer()).await.unwrap();
        let other = store
            .insert_user(User::new("studio2", "s2@example.com", Role::Producer))
            .await
            .unwrap();
        let b = store
            .insert_user(User::new("buyer", "b@example.com", Role::Buyer))
            .await
            .unwrap();

        let mine = store.insert_content(listing(p.id)).await.unwrap();
        let theirs = store.insert_content(listing(other.id)).await.unwrap();

        store
            .insert_offer(Offer::new(
                mine.id,
                b.id,
                "10".parse().unwrap(),
                Currency::Usd,
                None,
            ))
            .await
            .unwrap();
        store
            .insert_offer(Offer::new(
                theirs.id,
                b.id,
                "10".parse().unwrap(),
                Currency::Usd,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(store.offers_for_producer(p.id).await.unwrap().len(), 1);
        assert_eq!(store.offers_for_buyer(b.id).await.unwrap().len(), 2);
    }
}
