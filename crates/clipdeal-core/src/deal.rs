//! Offers and Letters of Intent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::User;
use crate::content::Content;
use crate::types::{Currency, OfferStatus};

/// A buyer's proposed purchase terms against one content listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,

    pub content_id: Uuid,
    pub buyer_id: Uuid,

    pub offered_price: Decimal,
    pub currency: Currency,

    /// Optional note to the producer.
    pub message: Option<String>,

    pub status: OfferStatus,

    pub created_at: DateTime<Utc>,

    /// Set when the offer leaves pending.
    pub responded_at: Option<DateTime<Utc>>,
}

impl Offer {
    pub fn new(
        content_id: Uuid,
        buyer_id: Uuid,
        offered_price: Decimal,
        currency: Currency,
        message: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_id,
            buyer_id,
            offered_price,
            currency,
            message,
            status: OfferStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        }
    }
}

/// Letter of Intent: an immutable snapshot of deal terms, materialized exactly
/// once when the parent offer is accepted.
///
/// Every party-facing field is denormalized at issuance so later edits to
/// users or content never rewrite an issued document. Only the PDF metadata
/// may change afterwards, written by the external document renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loi {
    pub id: Uuid,

    /// The accepted offer (one-to-one, unique).
    pub offer_id: Uuid,

    /// Unique generated document number.
    pub document_number: String,

    pub buyer_id: Uuid,
    pub buyer_name: String,
    pub buyer_company: Option<String>,
    pub buyer_country: Option<String>,

    pub producer_id: Uuid,
    pub producer_name: String,
    pub producer_company: Option<String>,
    pub producer_country: Option<String>,

    pub content_title: String,
    pub content_description: String,

    pub agreed_price: Decimal,
    pub currency: Currency,

    /// Filled by the external PDF renderer.
    pub pdf_url: Option<String>,
    pub pdf_generated_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Loi {
    /// Snapshot deal terms from an accepted offer.
    pub fn from_offer(
        offer: &Offer,
        content: &Content,
        buyer: &User,
        producer: &User,
        document_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            offer_id: offer.id,
            document_number: document_number.into(),
            buyer_id: buyer.id,
            buyer_name: buyer.username.clone(),
            buyer_company: buyer.company_name.clone(),
            buyer_country: buyer.country.clone(),
            producer_id: producer.id,
            producer_name: producer.username.clone(),
            producer_company: producer.company_name.clone(),
            producer_country: producer.country.clone(),
            content_title: content.title.clone(),
            content_description: content.description.clone(),
            agreed_price: offer.offered_price,
            currency: offer.currency,
            pdf_url: None,
            pdf_generated_at: None,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the external renderer has produced the PDF.
    pub fn is_pdf_ready(&self) -> bool {
        self.pdf_url.is_some()
    }

    /// Returns true if `user_id` is a party to this document.
    pub fn is_related_party(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id || self.producer_id == user_id
    }
}
