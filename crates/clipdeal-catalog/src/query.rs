//! Filtering, ordering and pagination over public listings.

use clipdeal_core::Content;
use serde::Serialize;

use crate::filter::{CatalogFilter, Ordering};

/// Fixed page size for every list endpoint.
pub const PAGE_SIZE: usize = 20;

/// One page of results with page-number cursors.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Total matching items across all pages.
    pub count: usize,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

/// Apply filter and ordering to a set of publicly visible listings.
///
/// Callers pass rows that already went through the store's visibility filter;
/// this function only narrows and sorts.
pub fn select(mut contents: Vec<Content>, filter: &CatalogFilter) -> Vec<Content> {
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        contents.retain(|c| {
            c.title.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        });
    }

    if let Some(genre) = &filter.genre {
        contents.retain(|c| c.genre_tags.iter().any(|t| t == genre));
    }

    if let Some(min) = filter.min_price {
        contents.retain(|c| c.price >= min);
    }
    if let Some(max) = filter.max_price {
        contents.retain(|c| c.price <= max);
    }

    if let Some(currency) = &filter.currency {
        contents.retain(|c| c.currency.as_str() == currency);
    }

    match filter.ordering {
        Ordering::CreatedAtAsc => contents.sort_by_key(|c| c.created_at),
        Ordering::CreatedAtDesc => {
            contents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        Ordering::PriceAsc => contents.sort_by(|a, b| a.price.cmp(&b.price)),
        Ordering::PriceDesc => contents.sort_by(|a, b| b.price.cmp(&a.price)),
        Ordering::ViewCountAsc => contents.sort_by_key(|c| c.view_count),
        Ordering::ViewCountDesc => {
            contents.sort_by(|a, b| b.view_count.cmp(&a.view_count));
        }
    }

    contents
}

/// Slice a result set into one page. Pages are 1-based; a page past the end
/// is empty rather than an error, and its `previous` cursor points at the
/// last page that holds data so clients can step back into range.
pub fn paginate<T>(items: Vec<T>, page: u32) -> Page<T> {
    let count = items.len();
    let last_page = (count.div_ceil(PAGE_SIZE)) as u32;
    let start = (page as usize - 1).saturating_mul(PAGE_SIZE);
    let results: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();

    let has_next = start + results.len() < count;

    Page {
        count,
        next: has_next.then(|| page + 1),
        previous: (page > 1 && count > 0).then(|| (page - 1).min(last_page)),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use clipdeal_core::{ContentStatus, Currency};
    use uuid::Uuid;

    fn listing(title: &str, description: &str, price: &str) -> Content {
        let mut c = Content::new(
            Uuid::new_v4(),
            title,
            description,
            price.parse().unwrap(),
            Currency::Usd,
        );
        c.status = ContentStatus::Public;
        c
    }

    #[test]
    fn test_search_matches_title_and_description_case_insensitive() {
        let contents = vec![
            listing("Drama Night", "city footage", "10"),
            listing("Sunrise", "a quiet drama about loss", "20"),
            listing("Cooking 101", "pasta tutorial", "30"),
        ];
        let filter = CatalogFilter {
            search: Some("drama".to_string()),
            ..Default::default()
        };

        let out = select(contents, &filter);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|c| c.title != "Cooking 101"));
    }

    #[test]
    fn test_genre_membership() {
        let mut a = listing("A", "", "10");
        a.genre_tags = vec!["drama".to_string(), "thriller".to_string()];
        let mut b = listing("B", "", "10");
        b.genre_tags = vec!["comedy".to_string()];

        let filter = CatalogFilter {
            genre: Some("thriller".to_string()),
            ..Default::default()
        };
        let out = select(vec![a, b], &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "A");
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let contents = vec![
            listing("cheap", "", "5"),
            listing("mid", "", "10"),
            listing("dear", "", "15"),
        ];
        let filter = CatalogFilter {
            min_price: Some("10".parse().unwrap()),
            max_price: Some("15".parse().unwrap()),
            ..Default::default()
        };

        let out = select(contents, &filter);
        let titles: Vec<_> = out.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"mid"));
        assert!(titles.contains(&"dear"));
    }

    #[test]
    fn test_currency_exact_match() {
        let mut krw = listing("K", "", "10000");
        krw.currency = Currency::Krw;
        let usd = listing("U", "", "10");

        let filter = CatalogFilter {
            currency: Some("KRW".to_string()),
            ..Default::default()
        };
        let out = select(vec![krw, usd], &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "K");
    }

    #[test]
    fn test_default_ordering_newest_first() {
        let mut old = listing("old", "", "10");
        old.created_at = Utc::now() - Duration::days(2);
        let new = listing("new", "", "10");

        let out = select(vec![old, new], &CatalogFilter::default());
        assert_eq!(out[0].title, "new");
        assert_eq!(out[1].title, "old");
    }

    #[test]
    fn test_price_ordering() {
        let contents = vec![
            listing("b", "", "20"),
            listing("a", "", "10"),
            listing("c", "", "30"),
        ];
        let filter = CatalogFilter {
            ordering: Ordering::PriceAsc,
            ..Default::default()
        };
        let out = select(contents, &filter);
        let titles: Vec<_> = out.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_paginate_cursors() {
        let items: Vec<u32> = (0..45).collect();

        let p1 = paginate(items.clone(), 1);
        assert_eq!(p1.count, 45);
        assert_eq!(p1.results.len(), 20);
        assert_eq!(p1.next, Some(2));
        assert_eq!(p1.previous, None);

        let p3 = paginate(items.clone(), 3);
        assert_eq!(p3.results.len(), 5);
        assert_eq!(p3.next, None);
        assert_eq!(p3.previous, Some(2));

        let past_end = paginate(items, 9);
        assert!(past_end.results.is_empty());
        assert_eq!(past_end.next, None);
        // The cursor steps back into range, not onto another empty page.
        assert_eq!(past_end.previous, Some(3));
    }

    #[test]
    fn test_paginate_empty_set_has_no_cursors() {
        let page = paginate(Vec::<u32>::new(), 5);
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
    }

    #[test]
    fn test_paginate_exact_boundary() {
        let items: Vec<u32> = (0..40).collect();
        let p2 = paginate(items, 2);
        assert_eq!(p2.results.len(), 20);
        assert_eq!(p2.next, None);
    }
}
