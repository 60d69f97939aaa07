//! Admin reporting: read-only aggregation for the operations dashboard.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use clipdeal_core::{MarketError, OfferStatus, Result, Role, User};
use clipdeal_store::MarketStore;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// How many recent rows each section carries.
const RECENT_LIMIT: usize = 10;

/// Reporting window. Parsing is strict: aggregation inputs select the
/// dataset, so anything but the two known values is a hard validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    SevenDays,
    ThirtyDays,
}

impl Period {
    pub fn days(&self) -> i64 {
        match self {
            Period::SevenDays => 7,
            Period::ThirtyDays => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::SevenDays => "7d",
            Period::ThirtyDays => "30d",
        }
    }
}

impl FromStr for Period {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "7d" => Ok(Period::SevenDays),
            "30d" => Ok(Period::ThirtyDays),
            other => Err(MarketError::validation(
                "period",
                format!("invalid period '{}': must be '7d' or '30d'", other),
            )),
        }
    }
}

/// All-time counts.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_users: usize,
    pub total_producers: usize,
    pub total_buyers: usize,
    pub total_contents: usize,
    pub total_offers: usize,
    pub pending_offers: usize,
    pub total_lois: usize,
}

/// New-record counts scoped to the selected window.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodStats {
    pub period: &'static str,
    pub new_users: usize,
    pub new_contents: usize,
    pub new_offers: usize,
    pub new_lois: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentContent {
    pub id: Uuid,
    pub title: String,
    pub producer: String,
    pub status: clipdeal_core::ContentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentOffer {
    pub id: Uuid,
    pub content_title: String,
    pub buyer: String,
    pub producer: String,
    pub status: OfferStatus,
    pub offered_price: Decimal,
    pub currency: clipdeal_core::Currency,
    pub created_at: DateTime<Utc>,
}

/// The full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub period_stats: PeriodStats,
    pub recent_users: Vec<RecentUser>,
    pub recent_contents: Vec<RecentContent>,
    pub recent_offers: Vec<RecentOffer>,
}

/// Compute the dashboard: all-time counts, period-scoped new-record counts,
/// and the ten most recent users/contents/offers with display fields. Pure
/// fan-out of reads; nothing here mutates.
pub async fn build_dashboard(
    store: &dyn MarketStore,
    period: Period,
    now: DateTime<Utc>,
) -> Result<Dashboard> {
    let period_start = now - Duration::days(period.days());

    let users = store.list_users().await?;
    let contents = store.active_contents().await?;
    let offers = store.list_offers().await?;
    let lois = store.list_lois().await?;

    let display_names: HashMap<Uuid, String> = users
        .iter()
        .map(|u| (u.id, u.display_name().to_string()))
        .collect();
    let display = |id: &Uuid| -> String {
        display_names
            .get(id)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string())
    };
    let content_by_id: HashMap<Uuid, &clipdeal_core::Content> =
        contents.iter().map(|c| (c.id, c)).collect();

    let summary = Summary {
        total_users: users.len(),
        total_producers: users.iter().filter(|u| u.role == Role::Producer).count(),
        total_buyers: users.iter().filter(|u| u.role == Role::Buyer).count(),
        total_contents: contents.len(),
        total_offers: offers.len(),
        pending_offers: offers
            .iter()
            .filter(|o| o.status == OfferStatus::Pending)
            .count(),
        total_lois: lois.len(),
    };

    let period_stats = PeriodStats {
        period: period.as_str(),
        new_users: users.iter().filter(|u| u.created_at >= period_start).count(),
        new_contents: contents
            .iter()
            .filter(|c| c.created_at >= period_start)
            .count(),
        new_offers: offers
            .iter()
            .filter(|o| o.created_at >= period_start)
            .count(),
        new_lois: lois.iter().filter(|l| l.created_at >= period_start).count(),
    };

    let recent_users = most_recent(&users, |u: &&User| u.created_at)
        .into_iter()
        .map(|u| RecentUser {
            id: u.id,
            email: u.email.clone(),
            role: u.role,
            company_name: u.display_name().to_string(),
            created_at: u.created_at,
        })
        .collect();

    let recent_contents = most_recent(&contents, |c: &&clipdeal_core::Content| c.created_at)
        .into_iter()
        .map(|c| RecentContent {
            id: c.id,
            title: c.title.clone(),
            producer: display(&c.producer_id),
            status: c.status,
            created_at: c.created_at,
        })
        .collect();

    let recent_offers = most_recent(&offers, |o: &&clipdeal_core::Offer| o.created_at)
        .into_iter()
        .map(|o| RecentOffer {
            id: o.id,
            content_title: content_by_id
                .get(&o.content_id)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            buyer: display(&o.buyer_id),
            producer: content_by_id
                .get(&o.content_id)
                .map(|c| display(&c.producer_id))
                .unwrap_or_else(|| "unknown".to_string()),
            status: o.status,
            offered_price: o.offered_price,
            currency: o.currency,
            created_at: o.created_at,
        })
        .collect();

    Ok(Dashboard {
        summary,
        period_stats,
        recent_users,
        recent_contents,
        recent_offers,
    })
}

fn most_recent<T>(items: &[T], created_at: impl Fn(&&T) -> DateTime<Utc>) -> Vec<&T> {
    let mut refs: Vec<&T> = items.iter().collect();
    refs.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    refs.truncate(RECENT_LIMIT);
    refs
}
