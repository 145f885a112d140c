//! URL slug generation.
//!
//! Slugs are derived from titles and names, cut to [`MAX_SLUG_LENGTH`], and
//! made unique by appending `-2`, `-3`, ... when the base is already taken.

use crate::error::CoreError;

/// Maximum slug length stored in any `slug` column.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Slugify `text` and cut the result to [`MAX_SLUG_LENGTH`] characters,
/// never leaving a trailing hyphen.
pub fn slugify_truncated(text: &str) -> String {
    let full = slug::slugify(text);
    // slugify output is ASCII, so byte slicing is safe.
    let cut = if full.len() > MAX_SLUG_LENGTH {
        &full[..MAX_SLUG_LENGTH]
    } else {
        &full
    };
    cut.trim_end_matches('-').to_string()
}

/// Pick the first slug derived from `base` that is not in `taken`.
///
/// `taken` holds every existing slug starting with `base`; the suffix is
/// placed so the result still fits in [`MAX_SLUG_LENGTH`].
pub fn pick_available_slug(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|s| s == base) {
        return base.to_string();
    }
    let mut n = 2u32;
    loop {
        let suffix = format!("-{n}");
        let keep = MAX_SLUG_LENGTH.saturating_sub(suffix.len()).min(base.len());
        let candidate = format!("{}{suffix}", base[..keep].trim_end_matches('-'));
        if !taken.iter().any(|s| *s == candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Longest suffix [`pick_available_slug`] can append (`-` and a `u32`).
const MAX_SUFFIX_LENGTH: usize = 11;

/// Prefix shared by `base` and every suffixed candidate derived from it.
///
/// A long base is cut to make room for the suffix, so `...-2` may not start
/// with the full base. Lookups of taken slugs must match on this instead.
pub fn slug_search_prefix(base: &str) -> &str {
    let keep = MAX_SLUG_LENGTH.saturating_sub(MAX_SUFFIX_LENGTH).min(base.len());
    base[..keep].trim_end_matches('-')
}

/// Validate an explicitly supplied slug: lowercase ASCII letters, digits
/// and single hyphens, within the length limit.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    let well_formed = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--");
    if !well_formed {
        return Err(CoreError::Validation(format!(
            "Slug '{slug}' may only contain lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}
