//! Offer lifecycle: submission and the pending -> terminal state machine.

use chrono::Utc;
use clipdeal_core::{Currency, MarketError, Offer, OfferStatus, Result, Role, User};
use clipdeal_store::MarketStore;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::loi;

/// Input for submitting an offer against a public listing.
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub content_id: Uuid,
    pub offered_price: Decimal,
    pub currency: Currency,
    pub message: Option<String>,
}

/// Submit an offer. Only buyers may offer, and only against publicly visible
/// content; a hidden or absent listing is a plain not-found either way.
pub async fn submit_offer(store: &dyn MarketStore, buyer: &User, new: NewOffer) -> Result<Offer> {
    if buyer.role != Role::Buyer {
        return Err(MarketError::Forbidden("buyer role required".to_string()));
    }
    if new.offered_price <= Decimal::ZERO {
        return Err(MarketError::validation(
            "offered_price",
            "offered price must be positive",
        ));
    }

    let content = store
        .get_visible_content(new.content_id)
        .await?
        .ok_or_else(|| MarketError::not_found("content", new.content_id))?;

    let offer = Offer::new(
        content.id,
        buyer.id,
        new.offered_price,
        new.currency,
        new.message,
    );
    let offer = store.insert_offer(offer).await?;
    info!(offer_id = %offer.id, content_id = %content.id, "offer submitted");
    Ok(offer)
}

/// Accept a pending offer. Only the producer of the offered content may
/// accept, and only from pending. The LOI is issued as the next step of the
/// same operation, best effort: its failure never rolls back the accept.
pub async fn accept_offer(store: &dyn MarketStore, actor: &User, offer_id: Uuid) -> Result<Offer> {
    let offer = respond(store, actor, offer_id, OfferStatus::Accepted).await?;

    loi::issue_on_accept(store, &offer).await;

    Ok(offer)
}

/// Reject a pending offer.
pub async fn reject_offer(store: &dyn MarketStore, actor: &User, offer_id: Uuid) -> Result<Offer> {
    respond(store, actor, offer_id, OfferStatus::Rejected).await
}

/// Mark a pending offer as lapsed.
pub async fn expire_offer(store: &dyn MarketStore, actor: &User, offer_id: Uuid) -> Result<Offer> {
    respond(store, actor, offer_id, OfferStatus::Expired).await
}

async fn respond(
    store: &dyn MarketStore,
    actor: &User,
    offer_id: Uuid,
    next: OfferStatus,
) -> Result<Offer> {
    let mut offer = store
        .get_offer(offer_id)
        .await?
        .ok_or_else(|| MarketError::not_found("offer", offer_id))?;

    // The snapshot read keeps working even if the listing was soft-deleted
    // after the offer came in.
    let content = store
        .get_content_snapshot(offer.content_id)
        .await?
        .ok_or_else(|| MarketError::not_found("content", offer.content_id))?;

    if content.producer_id != actor.id {
        return Err(MarketError::Forbidden(
            "only the producer of the offered content may respond".to_string(),
        ));
    }

    if !offer.status.can_transition_to(next) {
        return Err(MarketError::InvalidTransition {
            from: offer.status.to_string(),
            to: next.to_string(),
        });
    }

    offer.status = next;
    offer.responded_at = Some(Utc::now());
    let offer = store.update_offer(offer).await?;
    info!(offer_id = %offer.id, status = %offer.status, "offer responded");
    Ok(offer)
}

/// Offers the user is a party to: their own as a buyer, or offers against
/// their listings as a producer. Admins see everything.
pub async fn related_offers(store: &dyn MarketStore, user: &User) -> Result<Vec<Offer>> {
    let mut offers = match user.role {
        Role::Buyer => store.offers_for_buyer(user.id).await?,
        Role::Producer => store.offers_for_producer(user.id).await?,
        Role::Admin => store.list_offers().await?,
    };
    offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(offers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipdeal_core::{Content, ContentStatus};
    use clipdeal_store::InMemoryStore;

    struct Fixture {
        store: InMemoryStore,
        producer: User,
        buyer: User,
        content: Content,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let producer = store
            .insert_user(User::new("studio", "s@example.com", Role::Producer))
            .await
            .unwrap();
        let buyer = store
            .insert_user(User::new("acquirer", "b@example.com", Role::Buyer))
            .await
            .unwrap();
        let mut content = Content::new(
            producer.id,
            "Drama Night",
            "a drama short",
            "50".parse().unwrap(),
            Currency::Usd,
        );
        content.status = ContentStatus::Public;
        let content = store.insert_content(content).await.unwrap();
        Fixture {
            store,
            producer,
            buyer,
            content,
        }
    }

    fn offer_on(content_id: Uuid) -> NewOffer {
        NewOffer {
            content_id,
            offered_price: "40".parse().unwrap(),
            currency: Currency::Usd,
            message: Some("interested".to_string()),
        }
    }

    #[tokio::test]
    async fn test_accept_issues_exactly_one_loi() {
        let f = fixture().await;
        let offer = submit_offer(&f.store, &f.buyer, offer_on(f.content.id))
            .await
            .unwrap();

        let accepted = accept_offer(&f.store, &f.producer, offer.id).await.unwrap();
        assert_eq!(accepted.status, OfferStatus::Accepted);
        assert!(accepted.responded_at.is_some());

        let loi = f.store.get_loi_for_offer(offer.id).await.unwrap().unwrap();
        assert_eq!(loi.agreed_price, "40".parse().unwrap());
        assert_eq!(loi.content_title, "Drama Night");
        assert_eq!(f.store.list_lois().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_accept_is_terminal() {
        let f = fixture().await;
        let offer = submit_offer(&f.store, &f.buyer, offer_on(f.content.id))
            .await
            .unwrap();
        accept_offer(&f.store, &f.producer, offer.id).await.unwrap();

        // Re-triggering acceptance is a conflict and never issues a second LOI.
        let err = accept_offer(&f.store, &f.producer, offer.id)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "invalid_transition");
        assert_eq!(f.store.list_lois().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_accept_after_reject_is_conflict() {
        let f = fixture().await;
        let offer = submit_offer(&f.store, &f.buyer, offer_on(f.content.id))
            .await
            .unwrap();
        reject_offer(&f.store, &f.producer, offer.id).await.unwrap();

        let err = accept_offer(&f.store, &f.producer, offer.id)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "invalid_transition");
        assert!(f
            .store
            .get_loi_for_offer(offer.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_expire_is_terminal_and_issues_no_loi() {
        let f = fixture().await;
        let offer = submit_offer(&f.store, &f.buyer, offer_on(f.content.id))
            .await
            .unwrap();

        let expired = expire_offer(&f.store, &f.producer, offer.id).await.unwrap();
        assert_eq!(expired.status, OfferStatus::Expired);
        assert!(expired.responded_at.is_some());

        let err = accept_offer(&f.store, &f.producer, offer.id)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "invalid_transition");
        assert!(f
            .store
            .get_loi_for_offer(offer.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_only_content_producer_may_respond() {
        let f = fixture().await;
        let offer = submit_offer(&f.store, &f.buyer, offer_on(f.content.id))
            .await
            .unwrap();

        let rival = f
            .store
            .insert_user(User::new("rival", "r@example.com", Role::Producer))
            .await
            .unwrap();
        let err = accept_offer(&f.store, &rival, offer.id).await.unwrap_err();
        assert_eq!(err.error_code(), "permission_denied");
    }

    #[tokio::test]
    async fn test_offer_on_hidden_content_is_not_found() {
        let f = fixture().await;
        let mut draft = Content::new(
            f.producer.id,
            "Unreleased",
            "",
            "10".parse().unwrap(),
            Currency::Usd,
        );
        draft.status = ContentStatus::Draft;
        let draft = f.store.insert_content(draft).await.unwrap();

        let err = submit_offer(&f.store, &f.buyer, offer_on(draft.id))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "not_found");
    }

    #[tokio::test]
    async fn test_producer_cannot_submit() {
        let f = fixture().await;
        let err = submit_offer(&f.store, &f.producer, offer_on(f.content.id))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "permission_denied");
    }

    #[tokio::test]
    async fn test_accept_survives_soft_deleted_content() {
        let f = fixture().await;
        let offer = submit_offer(&f.store, &f.buyer, offer_on(f.content.id))
            .await
            .unwrap();

        f.store
            .soft_delete_content(f.content.id, Utc::now())
            .await
            .unwrap();

        let accepted = accept_offer(&f.store, &f.producer, offer.id).await.unwrap();
        assert_eq!(accepted.status, OfferStatus::Accepted);
        // The LOI still snapshots the deleted listing's terms.
        let loi = f.store.get_loi_for_offer(offer.id).await.unwrap().unwrap();
        assert_eq!(loi.content_title, "Drama Night");
    }

    #[tokio::test]
    async fn test_related_offers_by_role() {
        let f = fixture().await;
        let offer = submit_offer(&f.store, &f.buyer, offer_on(f.content.id))
            .await
            .unwrap();

        let as_buyer = related_offers(&f.store, &f.buyer).await.unwrap();
        assert_eq!(as_buyer.len(), 1);
        assert_eq!(as_buyer[0].id, offer.id);

        let as_producer = related_offers(&f.store, &f.producer).await.unwrap();
        assert_eq!(as_producer.len(), 1);

        let stranger = f
            .store
            .insert_user(User::new("other", "o@example.com", Role::Buyer))
            .await
            .unwrap();
        assert!(related_offers(&f.store, &stranger).await.unwrap().is_empty());
    }
}
