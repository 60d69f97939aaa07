//! Slug and document-number generation.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Characters used in document-number suffixes. No 0/O or 1/I.
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const SUFFIX_LEN: usize = 6;

/// Turn free text into a URL slug: lowercase, alphanumeric runs joined by `-`.
///
/// Text with no ASCII alphanumerics (for example a non-Latin company name)
/// slugifies to the empty string; callers fall back to another source.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_sep = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

/// Append a numeric suffix to a base slug: `acme` -> `acme-3`.
pub fn suffixed_slug(base: &str, n: u32) -> String {
    if n == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, n)
    }
}

/// Generate an LOI document number: `LOI-YYYYMMDD-XXXXXX`.
///
/// The suffix is random; the store's unique document-number index catches the
/// unlikely collision and the issuer regenerates.
pub fn document_number(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();

    format!("LOI-{}-{}", now.format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Studio K"), "studio-k");
        assert_eq!(slugify("  ACME   Films  "), "acme-films");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_slugify_strips_symbols() {
        assert_eq!(slugify("K&B Media (Seoul)"), "k-b-media-seoul");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("한국제작사"), "");
    }

    #[test]
    fn test_suffixed_slug() {
        assert_eq!(suffixed_slug("acme", 0), "acme");
        assert_eq!(suffixed_slug("acme", 2), "acme-2");
    }

    #[test]
    fn test_document_number_shape() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        let doc = document_number(now);
        assert!(doc.starts_with("LOI-20260829-"));
        assert_eq!(doc.len(), "LOI-20260829-".len() + 6);

        let suffix = &doc["LOI-20260829-".len()..];
        assert!(suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)));
    }
}
