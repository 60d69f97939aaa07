//! API endpoint modules.

pub mod admin;
pub mod auth;
pub mod booths;
pub mod contents;
pub mod envelope;
pub mod health;
pub mod lois;
pub mod offers;
pub mod users;
