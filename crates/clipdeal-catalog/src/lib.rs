//! # Clipdeal Catalog
//!
//! Query engine for public content browsing: parameter validation,
//! filtering, whitelisted ordering and fixed-size pagination.
//!
//! Validation policy differs by parameter class, deliberately:
//! - parameters that select the dataset (prices) are strict and reject the
//!   request before any query runs;
//! - parameters that express a preference (ordering) are permissive and fall
//!   back to the default when unrecognized.

pub mod filter;
pub mod query;

pub use filter::{CatalogFilter, CatalogParams, Ordering};
pub use query::{paginate, select, Page, PAGE_SIZE};
