//! Signup and booth provisioning.

use clipdeal_core::ident::{slugify, suffixed_slug};
use clipdeal_core::{Booth, MarketError, Result, Role, User};
use clipdeal_store::MarketStore;
use tracing::{info, warn};

/// Bound on slug collision retries before the signup is failed outright.
const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Base slug used when neither company name nor username yields one.
const FALLBACK_SLUG: &str = "booth";

/// Signup input. Credentials are handled by the external session service and
/// never pass through here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub genre_tags: Vec<String>,
}

/// Create an account. For producers this also provisions the booth, in the
/// same operation: a booth failure unwinds the user row and fails the signup,
/// so a producer never exists without a booth.
pub async fn signup(store: &dyn MarketStore, new: NewUser) -> Result<User> {
    let username = new.username.trim();
    if username.is_empty() {
        return Err(MarketError::validation("username", "username is required"));
    }
    let email = new.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(MarketError::validation("email", "a valid email is required"));
    }

    let mut user = User::new(username, email, new.role);
    user.company_name = new.company_name.filter(|c| !c.trim().is_empty());
    user.country = new.country.filter(|c| !c.trim().is_empty());
    user.genre_tags = new.genre_tags;

    let mut user = store.insert_user(user).await?;

    if user.role == Role::Producer {
        match provision_booth(store, &user).await {
            Ok(booth) => {
                store.set_booth_slug(user.id, &booth.slug).await?;
                user.booth_slug = Some(booth.slug.clone());
                info!(user_id = %user.id, slug = %booth.slug, "booth provisioned");
            }
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "booth provisioning failed, unwinding signup");
                if let Err(unwind) = store.remove_user(user.id).await {
                    warn!(user_id = %user.id, error = %unwind, "failed to unwind user row");
                }
                return Err(err);
            }
        }
    }

    Ok(user)
}

/// Provision the booth for a newly created producer.
///
/// The slug base comes from the company name, falling back to the username.
/// The store's unique slug index is the authority on collisions: each
/// candidate (`base`, `base-1`, `base-2`, ...) is claimed by inserting it,
/// and a conflict moves on to the next suffix. There is no check-then-insert
/// window for a concurrent signup to race through.
pub async fn provision_booth(store: &dyn MarketStore, user: &User) -> Result<Booth> {
    let base = base_slug(user);

    for n in 0..MAX_SLUG_ATTEMPTS {
        let candidate = suffixed_slug(&base, n);
        match store.insert_booth(Booth::new(user.id, candidate)).await {
            Ok(booth) => return Ok(booth),
            Err(err) if err.violated_constraint() == Some("booth.slug") => continue,
            Err(err) => return Err(err),
        }
    }

    Err(MarketError::Internal(format!(
        "exhausted {} slug candidates for base '{}'",
        MAX_SLUG_ATTEMPTS, base
    )))
}

fn base_slug(user: &User) -> String {
    let from_company = user
        .company_name
        .as_deref()
        .map(slugify)
        .filter(|s| !s.is_empty());

    from_company
        .or_else(|| Some(slugify(&user.username)).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}
