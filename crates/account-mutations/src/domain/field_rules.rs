//! Shared per-field checks used by several validators.
//!
//! Text fields are trimmed before any rule runs and count as absent when
//! blank. Secret fields are never trimmed; only the empty string counts as
//! absent.

use tracing::debug;

use super::ports::SecretVerifier;
use super::{Account, FieldError, Secret, ValidationErrors};

/// Maximum username length in characters.
pub const USERNAME_MAX_LENGTH: usize = 200;
/// Maximum email address length in characters.
pub const EMAIL_MAX_LENGTH: usize = 200;
/// Maximum password length in characters.
pub const SECRET_MAX_LENGTH: usize = 200;

/// Trim a required text field and enforce its length limit.
pub(crate) fn required_text(raw: Option<&str>, max: usize) -> Result<String, FieldError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    if trimmed.chars().count() > max {
        return Err(FieldError::TooLong { max });
    }
    Ok(trimmed.to_owned())
}

/// Enforce presence and length of a secret without altering it.
pub(crate) fn required_secret(raw: Option<&Secret>, max: usize) -> Result<&Secret, FieldError> {
    let secret = raw.filter(|value| !value.is_empty()).ok_or(FieldError::Required)?;
    if secret.char_count() > max {
        return Err(FieldError::TooLong { max });
    }
    Ok(secret)
}

/// Check the current password supplied as proof of possession.
pub(crate) fn current_secret_matches<V>(
    verifier: &V,
    account: &Account,
    raw: Option<&Secret>,
) -> Result<(), FieldError>
where
    V: SecretVerifier + ?Sized,
{
    let secret = required_secret(raw, SECRET_MAX_LENGTH)?;
    if verifier.verify(account, secret) {
        Ok(())
    } else {
        Err(FieldError::InvalidCredential)
    }
}

/// Emit one debug event per rejected field.
///
/// Only field names and error codes are logged, never submitted values.
pub(crate) fn trace_rejection(operation: &'static str, account: &Account, errors: &ValidationErrors) {
    let account_id = account.id();
    for (field, error) in errors.iter() {
        debug!(
            %account_id,
            operation,
            %field,
            kind = %error.kind(),
            "account mutation field rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::FixtureCredentials;
    use crate::domain::AccountId;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_text_is_required(#[case] raw: Option<&str>) {
        assert_eq!(required_text(raw, 10), Err(FieldError::Required));
    }

    #[rstest]
    fn text_is_trimmed_before_length_check() {
        assert_eq!(required_text(Some("  abc  "), 3), Ok("abc".to_owned()));
        assert_eq!(
            required_text(Some("abcd"), 3),
            Err(FieldError::TooLong { max: 3 })
        );
    }

    #[rstest]
    fn whitespace_only_secret_is_present() {
        let secret = Secret::new("   ");
        assert_eq!(required_secret(Some(&secret), 10), Ok(&secret));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Secret::new("")))]
    fn missing_secret_is_required(#[case] raw: Option<Secret>) {
        assert_eq!(required_secret(raw.as_ref(), 10), Err(FieldError::Required));
    }

    #[rstest]
    fn secret_length_counts_untrimmed_characters() {
        let secret = Secret::new(" abc ");
        assert_eq!(
            required_secret(Some(&secret), 4),
            Err(FieldError::TooLong { max: 4 })
        );
    }

    #[rstest]
    fn current_secret_must_verify() {
        let account = Account::builder(AccountId::random(), "bob", "bob@example.com")
            .password_hash(FixtureCredentials::hash_for("  pw  "))
            .build();

        assert_eq!(
            current_secret_matches(&FixtureCredentials, &account, Some(&Secret::new("  pw  "))),
            Ok(())
        );
        assert_eq!(
            current_secret_matches(&FixtureCredentials, &account, Some(&Secret::new("pw"))),
            Err(FieldError::InvalidCredential)
        );
    }
}
