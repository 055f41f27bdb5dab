//! Email address normalisation and hashing.

use sha2::{Digest, Sha256};

/// Normalise an address for storage.
///
/// Surrounding whitespace is removed and the domain part is lowercased; the
/// local part is kept as typed because some mail hosts treat it as
/// case-sensitive.
///
/// # Examples
/// ```
/// use account_mutations::domain::normalize_email;
///
/// assert_eq!(normalize_email(" Ada@Example.COM "), "Ada@example.com");
/// ```
#[must_use]
pub fn normalize_email(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => trimmed.to_owned(),
    }
}

/// Hex SHA-256 of the lowercased address.
///
/// Stores index this value to enforce case-insensitive uniqueness.
#[must_use]
pub fn email_hash(value: &str) -> String {
    let digest = Sha256::digest(value.trim().to_lowercase().as_bytes());
    hex::encode(digest)
}

/// Case-insensitive address equality.
#[must_use]
pub fn same_email(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}
