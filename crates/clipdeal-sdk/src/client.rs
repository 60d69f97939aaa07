//! Clipdeal client implementation.

use chrono::{DateTime, Utc};
use clipdeal_core::{ContentStatus, Currency, MarketError, OfferStatus, Result, Role};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// Header carrying the acting user's id.
const USER_ID_HEADER: &str = "x-user-id";

/// Client for interacting with a Clipdeal node.
#[derive(Clone)]
pub struct ClipdealClient {
    /// Base URL of the Clipdeal node.
    base_url: String,

    /// HTTP client.
    http_client: reqwest::Client,

    /// User acting through this client, if any. Unset clients can only reach
    /// the public catalog and booth routes.
    user_id: Option<Uuid>,
}

/// Response envelope every node route answers with.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    message: String,
    data: Option<T>,
    error_code: Option<String>,
}

/// One page of results.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

/// Request body for creating an account.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub genre_tags: Vec<String>,
}

/// Account details returned by the node.
#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub genre_tags: Vec<String>,
    pub booth_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public booth profile.
#[derive(Debug, Deserialize)]
pub struct BoothProfile {
    pub slug: String,
    pub view_count: u64,
    pub is_boosted: bool,
    pub producer_name: String,
    pub producer_username: String,
    pub producer_country: Option<String>,
    pub producer_genre_tags: Vec<String>,
    pub content_count: usize,
    pub created_at: DateTime<Utc>,
}

/// A catalog row. Detail fetches additionally carry `video_url` and `status`.
#[derive(Debug, Deserialize)]
pub struct ContentRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre_tags: Vec<String>,
    pub price: Decimal,
    pub currency: Currency,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub view_count: u64,
    pub producer_name: String,
    pub created_at: DateTime<Utc>,
    pub video_url: Option<String>,
    pub status: Option<ContentStatus>,
}

/// Offer details.
#[derive(Debug, Deserialize)]
pub struct OfferDetails {
    pub id: Uuid,
    pub content_id: Uuid,
    pub content_title: String,
    pub buyer_name: String,
    pub offered_price: Decimal,
    pub currency: Currency,
    pub message: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

/// LOI document.
#[derive(Debug, Deserialize)]
pub struct LoiDocument {
    pub id: Uuid,
    pub document_number: String,
    pub offer_id: Uuid,
    pub buyer_name: String,
    pub producer_name: String,
    pub content_title: String,
    pub agreed_price: Decimal,
    pub currency: Currency,
    pub pdf_url: Option<String>,
    pub is_pdf_ready: bool,
    pub created_at: DateTime<Utc>,
}

/// Catalog search parameters. Empty fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub currency: Option<Currency>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
}

impl CatalogQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(genre) = &self.genre {
            params.push(("genre", genre.clone()));
        }
        if let Some(min) = self.min_price {
            params.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("max_price", max.to_string()));
        }
        if let Some(currency) = self.currency {
            params.push(("currency", currency.to_string()));
        }
        if let Some(ordering) = &self.ordering {
            params.push(("ordering", ordering.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

#[derive(Debug, Serialize)]
struct SubmitOfferRequest {
    content_id: Uuid,
    offered_price: Decimal,
    currency: Currency,
    message: Option<String>,
}

impl ClipdealClient {
    /// Connect to a Clipdeal node.
    pub async fn connect(url: &str) -> Result<Self> {
        let base_url = url.trim_end_matches('/').to_string();
        let http_client = reqwest::Client::new();

        // Verify connection with health check
        let health_url = format!("{}/health", base_url);
        http_client
            .get(&health_url)
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?
            .error_for_status()
            .map_err(|e| MarketError::Connection(e.to_string()))?;

        Ok(Self {
            base_url,
            http_client,
            user_id: None,
        })
    }

    /// Act as the given user on subsequent requests.
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Create an account. Producer accounts come back with their booth slug.
    pub async fn signup(&self, request: &SignupRequest) -> Result<UserProfile> {
        let url = format!("{}/api/v1/users", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// Browse the public catalog.
    pub async fn list_contents(&self, query: &CatalogQuery) -> Result<Page<ContentRow>> {
        let url = format!("{}/api/v1/contents", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// Fetch one public listing. Counts as a view.
    pub async fn get_content(&self, id: Uuid) -> Result<ContentRow> {
        let url = format!("{}/api/v1/contents/{}", self.base_url, id);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// Fetch a booth profile by slug. Counts as a view.
    pub async fn get_booth(&self, slug: &str) -> Result<BoothProfile> {
        let url = format!("{}/api/v1/booths/{}", self.base_url, slug);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// List one booth's public contents, newest first.
    pub async fn booth_contents(&self, slug: &str, page: Option<u32>) -> Result<Page<ContentRow>> {
        let url = format!("{}/api/v1/booths/{}/contents", self.base_url, slug);
        let mut request = self.http_client.get(&url);
        if let Some(page) = page {
            request = request.query(&[("page", page.to_string())]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// Submit an offer against a public listing.
    pub async fn submit_offer(
        &self,
        content_id: Uuid,
        offered_price: Decimal,
        currency: Currency,
        message: Option<String>,
    ) -> Result<OfferDetails> {
        let url = format!("{}/api/v1/offers", self.base_url);
        let body = SubmitOfferRequest {
            content_id,
            offered_price,
            currency,
            message,
        };
        let response = self
            .authed(self.http_client.post(&url))?
            .json(&body)
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// Offers the acting user is a party to.
    pub async fn list_offers(&self, page: Option<u32>) -> Result<Page<OfferDetails>> {
        let url = format!("{}/api/v1/offers", self.base_url);
        let mut request = self.authed(self.http_client.get(&url))?;
        if let Some(page) = page {
            request = request.query(&[("page", page.to_string())]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// Accept a pending offer. The node issues the LOI within this call.
    pub async fn accept_offer(&self, id: Uuid) -> Result<OfferDetails> {
        self.respond_to_offer(id, "accept").await
    }

    /// Reject a pending offer.
    pub async fn reject_offer(&self, id: Uuid) -> Result<OfferDetails> {
        self.respond_to_offer(id, "reject").await
    }

    async fn respond_to_offer(&self, id: Uuid, action: &str) -> Result<OfferDetails> {
        let url = format!("{}/api/v1/offers/{}/{}", self.base_url, id, action);
        let response = self
            .authed(self.http_client.post(&url))?
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// LOI documents the acting user is a party to, newest first.
    pub async fn list_lois(&self, page: Option<u32>) -> Result<Page<LoiDocument>> {
        let url = format!("{}/api/v1/loi", self.base_url);
        let mut request = self.authed(self.http_client.get(&url))?;
        if let Some(page) = page {
            request = request.query(&[("page", page.to_string())]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    /// Fetch one LOI document the acting user is a party to.
    pub async fn get_loi(&self, id: Uuid) -> Result<LoiDocument> {
        let url = format!("{}/api/v1/loi/{}", self.base_url, id);
        let response = self
            .authed(self.http_client.get(&url))?
            .send()
            .await
            .map_err(|e| MarketError::Connection(e.to_string()))?;
        decode(response).await
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let user_id = self.user_id.ok_or(MarketError::NotAuthenticated)?;
        Ok(request.header(USER_ID_HEADER, user_id.to_string()))
    }
}

/// Unwrap the response envelope, mapping failures onto the error taxonomy.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| MarketError::Connection(e.to_string()))?;

    if !envelope.success {
        return Err(match envelope.error_code.as_deref() {
            Some("not_authenticated") => MarketError::NotAuthenticated,
            Some("permission_denied") => MarketError::Forbidden(envelope.message),
            _ => MarketError::Remote(envelope.message),
        });
    }

    envelope
        .data
        .ok_or_else(|| MarketError::Remote("response envelope carried no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_query_params() {
        let query = CatalogQuery {
            search: Some("drama".to_string()),
            max_price: Some("30".parse().unwrap()),
            currency: Some(Currency::Usd),
            page: Some(2),
            ..Default::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("search", "drama".to_string())));
        assert!(params.contains(&("max_price", "30".to_string())));
        assert!(params.contains(&("currency", "USD".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_empty_query_sends_nothing() {
        assert!(CatalogQuery::default().to_params().is_empty());
    }
}
