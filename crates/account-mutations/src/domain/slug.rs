//! URL-safe slugs derived from usernames.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. Non-ASCII input is transliterated first, so
//! `Łukasz` becomes `lukasz` rather than losing its first letter.

use deunicode::deunicode;

/// Derive the slug stored alongside a username.
///
/// The value is transliterated to ASCII, letters are lowercased, digits are
/// kept, and every run of other characters collapses into a single hyphen.
/// Leading and trailing hyphens are dropped. The result may be empty when
/// nothing alphanumeric survives; check it with [`is_valid_slug`].
///
/// # Examples
/// ```
/// use account_mutations::domain::slugify;
///
/// assert_eq!(slugify("Bob2"), "bob2");
/// assert_eq!(slugify("  Ada  Lovelace! "), "ada-lovelace");
/// assert_eq!(slugify("Łukasz"), "lukasz");
/// ```
#[must_use]
pub fn slugify(value: &str) -> String {
    let ascii = deunicode(value);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Return `true` when `value` is a valid slug.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}
