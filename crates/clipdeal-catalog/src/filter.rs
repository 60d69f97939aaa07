//! Catalog query parameters and validation.

use rust_decimal::Decimal;
use serde::Deserialize;

use clipdeal_core::{MarketError, Result};

/// Raw query parameters as they arrive on the wire.
///
/// Everything is a string so malformed input reaches our validation instead
/// of a framework-level deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogParams {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub currency: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
}

/// Whitelisted sort orders. Default is newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
    PriceAsc,
    PriceDesc,
    ViewCountAsc,
    ViewCountDesc,
}

impl Ordering {
    /// Permissive lookup: unrecognized values fall back to the default.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("created_at") => Ordering::CreatedAtAsc,
            Some("-created_at") => Ordering::CreatedAtDesc,
            Some("price") => Ordering::PriceAsc,
            Some("-price") => Ordering::PriceDesc,
            Some("view_count") => Ordering::ViewCountAsc,
            Some("-view_count") => Ordering::ViewCountDesc,
            _ => Ordering::default(),
        }
    }
}

/// A validated catalog query.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Uppercased currency code, matched exactly against the listing.
    pub currency: Option<String>,
    pub ordering: Ordering,
    /// 1-based page number.
    pub page: u32,
}

impl CatalogFilter {
    /// Validate raw parameters. Fails before any data is touched.
    pub fn parse(params: &CatalogParams) -> Result<Self> {
        let min_price = parse_price("min_price", params.min_price.as_deref())?;
        let max_price = parse_price("max_price", params.max_price.as_deref())?;

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(MarketError::validation(
                    "min_price",
                    "min_price cannot be greater than max_price",
                ));
            }
        }

        let page = match params.page.as_deref() {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| {
                    MarketError::validation("page", format!("invalid page number '{}'", raw))
                })?,
        };

        Ok(Self {
            search: non_empty(params.search.as_deref()),
            genre: non_empty(params.genre.as_deref()),
            min_price,
            max_price,
            currency: non_empty(params.currency.as_deref()).map(|c| c.to_ascii_uppercase()),
            ordering: Ordering::from_param(params.ordering.as_deref()),
            page,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_price(field: &str, raw: Option<&str>) -> Result<Option<Decimal>> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<Decimal>()
            .map(Some)
            .map_err(|_| MarketError::validation(field, format!("invalid price value '{}'", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_greater_than_max_rejected() {
        let params = CatalogParams {
            min_price: Some("10".to_string()),
            max_price: Some("5".to_string()),
            ..Default::default()
        };
        let err = CatalogFilter::parse(&params).unwrap_err();
        assert_eq!(err.error_code(), "validation_error");
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let params = CatalogParams {
            min_price: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(CatalogFilter::parse(&params).is_err());

        let params = CatalogParams {
            max_price: Some("1.2.3".to_string()),
            ..Default::default()
        };
        assert!(CatalogFilter::parse(&params).is_err());
    }

    #[test]
    fn test_equal_bounds_allowed() {
        let params = CatalogParams {
            min_price: Some("5".to_string()),
            max_price: Some("5".to_string()),
            ..Default::default()
        };
        let filter = CatalogFilter::parse(&params).unwrap();
        assert_eq!(filter.min_price, filter.max_price);
    }

    #[test]
    fn test_unknown_ordering_falls_back_to_default() {
        assert_eq!(
            Ordering::from_param(Some("alphabetical")),
            Ordering::CreatedAtDesc
        );
        assert_eq!(Ordering::from_param(None), Ordering::CreatedAtDesc);
        assert_eq!(Ordering::from_param(Some("price")), Ordering::PriceAsc);
        assert_eq!(Ordering::from_param(Some("-price")), Ordering::PriceDesc);
    }

    #[test]
    fn test_currency_uppercased() {
        let params = CatalogParams {
            currency: Some("usd".to_string()),
            ..Default::default()
        };
        let filter = CatalogFilter::parse(&params).unwrap();
        assert_eq!(filter.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_invalid_page_rejected() {
        let params = CatalogParams {
            page: Some("zero".to_string()),
            ..Default::default()
        };
        assert!(CatalogFilter::parse(&params).is_err());

        let params = CatalogParams {
            page: Some("0".to_string()),
            ..Default::default()
        };
        assert!(CatalogFilter::parse(&params).is_err());
    }

    #[test]
    fn test_blank_params_ignored() {
        let params = CatalogParams {
            search: Some("   ".to_string()),
            genre: Some(String::new()),
            ..Default::default()
        };
        let filter = CatalogFilter::parse(&params).unwrap();
        assert!(filter.search.is_none());
        assert!(filter.genre.is_none());
        assert_eq!(filter.page, 1);
    }
}
