//! # Clipdeal Core
//!
//! Core domain types for the Clipdeal marketplace.
//!
//! This crate provides the fundamental building blocks:
//! - [`User`] and [`Booth`] - accounts and producer storefronts
//! - [`Content`] - a licensable short-form listing
//! - [`Offer`] and [`Loi`] - purchase proposals and the Letter of Intent
//!   issued on acceptance
//! - [`MarketError`] - the shared error taxonomy

pub mod account;
pub mod content;
pub mod deal;
pub mod error;
pub mod ident;
pub mod types;

// Re-exports for convenience
pub use account::{Booth, User};
pub use content::Content;
pub use deal::{Loi, Offer};
pub use error::{MarketError, Result};
pub use types::{ContentStatus, Currency, OfferStatus, Role};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::account::{Booth, User};
    pub use crate::content::Content;
    pub use crate::deal::{Loi, Offer};
    pub use crate::error::{MarketError, Result};
    pub use crate::types::{ContentStatus, Currency, OfferStatus, Role};
}
