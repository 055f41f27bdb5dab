//! Password input handling.
//!
//! Secrets keep caller-provided whitespace: `"  pw  "` is verified and hashed
//! exactly as submitted. Passwords may legitimately contain leading or
//! trailing spaces.

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// Password value submitted by the account owner.
///
/// ## Invariants
/// - The value is stored verbatim; it is never trimmed or normalised.
/// - Memory is zeroed on drop and `Debug` output is redacted.
///
/// # Examples
/// ```
/// use account_mutations::domain::Secret;
///
/// let secret = Secret::new("  pw  ");
/// assert_eq!(secret.expose(), "  pw  ");
/// assert_eq!(secret.char_count(), 6);
/// assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap a raw password string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the raw password for verification or hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Length in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the secret is the empty string.
    ///
    /// Whitespace-only secrets are not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  pw  ")]
    #[case("\tpw\n")]
    #[case("   ")]
    fn whitespace_is_preserved(#[case] raw: &str) {
        let secret = Secret::new(raw);
        assert_eq!(secret.expose(), raw);
        assert!(!secret.is_empty());
    }

    #[rstest]
    fn deserialisation_keeps_whitespace() {
        let secret: Secret = serde_json::from_str(r#""  pw  ""#).expect("deserialise");
        assert_eq!(secret.expose(), "  pw  ");
    }

    #[rstest]
    fn char_count_counts_characters_not_bytes() {
        assert_eq!(Secret::new("żółw").char_count(), 4);
    }
}
