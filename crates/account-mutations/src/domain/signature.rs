//! Signature mutation.

use serde::Deserialize;
use tracing::debug;

use super::field_rules::trace_rejection;
use super::{Account, EditSignatureCommand, Field, FieldError, ValidationErrors};

/// Submitted signature. An absent signature is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditSignatureInput {
    /// Raw signature text.
    pub signature: Option<String>,
}

impl EditSignatureInput {
    /// Build an input carrying `signature`.
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: Some(signature.into()),
        }
    }
}

/// Validate a signature edit against `length_max` characters.
///
/// The signature is stored verbatim; an empty string clears it.
///
/// # Errors
/// Returns [`FieldError::TooLong`] on [`Field::Signature`] when the
/// signature exceeds `length_max` characters.
///
/// # Examples
/// ```
/// use account_mutations::domain::{
///     validate_signature, Account, AccountId, EditSignatureInput, ErrorKind, Field,
/// };
///
/// let account = Account::builder(AccountId::random(), "bob", "bob@example.com").build();
///
/// let command = validate_signature(&account, &EditSignatureInput::new("abc"), 3)
///     .expect("signature fits");
/// assert_eq!(command.signature, "abc");
///
/// let errors = validate_signature(&account, &EditSignatureInput::new("abcd"), 3)
///     .expect_err("signature too long");
/// assert_eq!(errors.kind_of(Field::Signature), Some(ErrorKind::TooLong));
/// ```
pub fn validate_signature(
    account: &Account,
    input: &EditSignatureInput,
    length_max: usize,
) -> Result<EditSignatureCommand, ValidationErrors> {
    let signature = input.signature.as_deref().unwrap_or_default();
    if signature.chars().count() > length_max {
        let errors =
            ValidationErrors::single(Field::Signature, FieldError::TooLong { max: length_max });
        trace_rejection("edit_signature", account, &errors);
        return Err(errors);
    }

    debug!(
        account_id = %account.id(),
        cleared = signature.is_empty(),
        "signature edit validated"
    );
    Ok(EditSignatureCommand {
        account_id: account.id(),
        signature: signature.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::AccountId;
    use rstest::{fixture, rstest};

    const LIMIT: usize = 10;

    #[fixture]
    fn account() -> Account {
        Account::builder(AccountId::random(), "bob", "bob@example.com")
            .signature("old")
            .build()
    }

    #[rstest]
    fn signature_at_limit_is_accepted(account: Account) {
        let signature = "a".repeat(LIMIT);
        let command = validate_signature(&account, &EditSignatureInput::new(signature.clone()), LIMIT)
            .expect("signature at limit");
        assert_eq!(command.signature, signature);
    }

    #[rstest]
    fn signature_over_limit_is_too_long(account: Account) {
        let errors = validate_signature(
            &account,
            &EditSignatureInput::new("a".repeat(LIMIT + 1)),
            LIMIT,
        )
        .expect_err("signature over limit");

        assert_eq!(
            errors.get(Field::Signature),
            Some(&FieldError::TooLong { max: LIMIT })
        );
    }

    #[rstest]
    fn length_counts_characters(account: Account) {
        let signature = "ż".repeat(LIMIT);
        assert!(validate_signature(&account, &EditSignatureInput::new(signature), LIMIT).is_ok());
    }

    #[rstest]
    #[case::explicit_empty(EditSignatureInput::new(""))]
    #[case::absent(EditSignatureInput::default())]
    fn empty_signature_clears(account: Account, #[case] input: EditSignatureInput) {
        let command = validate_signature(&account, &input, LIMIT).expect("empty signature");
        assert_eq!(command.signature, "");
    }

    #[rstest]
    fn signature_is_stored_verbatim(account: Account) {
        let command = validate_signature(&account, &EditSignatureInput::new("  hi  "), LIMIT)
            .expect("padded signature");
        assert_eq!(command.signature, "  hi  ");
    }

    #[rstest]
    fn zero_limit_only_admits_empty_signature(account: Account) {
        assert!(validate_signature(&account, &EditSignatureInput::new(""), 0).is_ok());
        assert!(validate_signature(&account, &EditSignatureInput::new("a"), 0).is_err());
    }
}
