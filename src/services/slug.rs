/// Slug allocation for posts
///
/// A slug is derived from the title by normalization; a collision with an
/// existing slug gets a suffix of the current unix seconds. Two collisions
/// on the same base within the same second will still collide — that is a
/// known, accepted weakness of the disambiguator. The posts_slug_key unique
/// constraint is the backstop: the conflicting write fails with
/// `DuplicateSlug` and is not retried here.
use crate::db;
use crate::error::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Fallback base for titles that normalize to nothing (e.g. all punctuation).
const EMPTY_TITLE_BASE: &str = "post";

/// Normalize a title into a lowercase, hyphen-separated ASCII slug.
///
/// Runs of anything other than ASCII alphanumerics collapse to a single
/// hyphen; leading and trailing hyphens are stripped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        EMPTY_TITLE_BASE.to_string()
    } else {
        slug
    }
}

/// Append the epoch-seconds disambiguator to a colliding base.
fn with_timestamp_suffix(base: &str) -> String {
    format!("{}-{}", base, Utc::now().timestamp())
}

/// Allocate a slug for a post title against the current store.
///
/// On title edit, pass the post's own id in `exclude_post_id` so its current
/// slug does not count as a collision with itself.
pub async fn allocate(
    pool: &PgPool,
    title: &str,
    exclude_post_id: Option<Uuid>,
) -> Result<String> {
    let base = slugify(title);

    if !db::posts::slug_exists(pool, &base, exclude_post_id).await? {
        return Ok(base);
    }

    Ok(with_timestamp_suffix(&base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_punctuation_collapses_to_hyphens() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_equivalent_titles_share_a_base() {
        assert_eq!(slugify("Hello World"), slugify("Hello, World!"));
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("  spaced   out \t title "), "spaced-out-title");
    }

    #[test]
    fn test_leading_and_trailing_junk_stripped() {
        assert_eq!(slugify("--Hello--"), "hello");
        assert_eq!(slugify("!!!Rust 2024!!!"), "rust-2024");
    }

    #[test]
    fn test_non_ascii_is_a_separator() {
        assert_eq!(slugify("café au lait"), "caf-au-lait");
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(slugify(""), "post");
        assert_eq!(slugify("???"), "post");
    }

    #[test]
    fn test_timestamp_suffix_shape() {
        let suffixed = with_timestamp_suffix("hello-world");
        let rest = suffixed.strip_prefix("hello-world-").unwrap();
        assert!(rest.parse::<i64>().is_ok());
    }
}
