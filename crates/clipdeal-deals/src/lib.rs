//! # Clipdeal Deals
//!
//! Application services for the marketplace. What used to be implicit
//! post-write hooks in systems of this shape are explicit calls here:
//! signup invokes booth provisioning directly, and accepting an offer
//! invokes LOI issuance directly, both within the triggering operation.

pub mod listings;
pub mod loi;
pub mod offers;
pub mod provision;
pub mod reporting;

pub use listings::{ListingPatch, NewListing};
pub use offers::NewOffer;
pub use provision::NewUser;
pub use reporting::{Dashboard, Period};
