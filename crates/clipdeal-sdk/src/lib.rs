//! # Clipdeal SDK
//!
//! Client SDK for interacting with Clipdeal nodes.

pub mod client;

pub use client::{CatalogQuery, ClipdealClient, SignupRequest};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::client::{CatalogQuery, ClipdealClient, SignupRequest};
    pub use clipdeal_core::prelude::*;
}
