//! LOI issuance: an idempotent derived write keyed on the offer.

use chrono::Utc;
use clipdeal_core::ident::document_number;
use clipdeal_core::{Loi, MarketError, Offer, Result};
use clipdeal_store::MarketStore;
use tracing::{info, warn};

/// Retries against the unlikely document-number collision.
const MAX_DOCNUM_ATTEMPTS: u32 = 5;

/// Issue the LOI for an accepted offer.
///
/// Idempotent by offer id: if a document already exists for this offer it is
/// returned as-is, whether found up front or lost to a concurrent issuer at
/// insert time. The store's unique LOI-per-offer index is what makes the
/// duplicate detectable.
pub async fn issue_loi(store: &dyn MarketStore, offer: &Offer) -> Result<Loi> {
    if let Some(existing) = store.get_loi_for_offer(offer.id).await? {
        return Ok(existing);
    }

    let content = store
        .get_content_snapshot(offer.content_id)
        .await?
        .ok_or_else(|| MarketError::not_found("content", offer.content_id))?;
    let buyer = store
        .get_user(offer.buyer_id)
        .await?
        .ok_or_else(|| MarketError::not_found("user", offer.buyer_id))?;
    let producer = store
        .get_user(content.producer_id)
        .await?
        .ok_or_else(|| MarketError::not_found("user", content.producer_id))?;

    for _ in 0..MAX_DOCNUM_ATTEMPTS {
        let loi = Loi::from_offer(
            offer,
            &content,
            &buyer,
            &producer,
            document_number(Utc::now()),
        );

        match store.insert_loi(loi).await {
            Ok(loi) => {
                info!(offer_id = %offer.id, document = %loi.document_number, "LOI issued");
                return Ok(loi);
            }
            Err(err) if err.violated_constraint() == Some("loi.offer") => {
                // A concurrent issuer won the race; theirs is the document.
                return store
                    .get_loi_for_offer(offer.id)
                    .await?
                    .ok_or_else(|| MarketError::not_found("loi", offer.id));
            }
            Err(err) if err.violated_constraint() == Some("loi.document_number") => continue,
            Err(err) => return Err(err),
        }
    }

    Err(MarketError::Internal(format!(
        "exhausted {} document number candidates for offer {}",
        MAX_DOCNUM_ATTEMPTS, offer.id
    )))
}

/// Best-effort issuance on the accept path.
///
/// The accepted offer is the source of truth; the LOI is a derived projection
/// that can be reconciled later, so a failure here is logged and swallowed
/// rather than surfaced to the accepting request.
pub async fn issue_on_accept(store: &dyn MarketStore, offer: &Offer) {
    if let Err(err) = issue_loi(store, offer).await {
        warn!(offer_id = %offer.id, error = %err, "LOI issuance failed; offer stays accepted");
    }
}
