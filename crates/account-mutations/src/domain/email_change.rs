//! Email mutation.
//!
//! The current password and the new address are judged independently, so a
//! wrong password and an unchanged address are reported together. The new
//! address is compared case-insensitively against the current one before the
//! injected [`EmailPolicy`] is consulted.

use serde::Deserialize;
use tracing::debug;

use super::field_rules::{EMAIL_MAX_LENGTH, current_secret_matches, required_text, trace_rejection};
use super::ports::{EmailPolicy, SecretVerifier};
use super::{
    Account, ChangeEmailCommand, Field, FieldError, Secret, ValidationErrors, email_hash,
    normalize_email, same_email,
};

/// Submitted email change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangeEmailInput {
    /// Current password, as proof of possession.
    pub password: Option<Secret>,
    /// Candidate address, trimmed before validation.
    pub new_email: Option<String>,
}

impl ChangeEmailInput {
    /// Build an input carrying both fields.
    pub fn new(password: impl Into<Secret>, new_email: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            new_email: Some(new_email.into()),
        }
    }
}

fn check_new_email<P>(policy: &P, account: &Account, raw: Option<&str>) -> Result<String, FieldError>
where
    P: EmailPolicy + ?Sized,
{
    let candidate = required_text(raw, EMAIL_MAX_LENGTH)?;
    if same_email(&candidate, account.email()) {
        return Err(FieldError::Unchanged);
    }
    policy
        .validate(&candidate)
        .map_err(FieldError::delegated)?;
    Ok(candidate)
}

/// Validate an email change.
///
/// # Errors
/// Returns every failing field; [`Field::Password`] and [`Field::NewEmail`]
/// are judged independently.
///
/// # Examples
/// ```
/// use account_mutations::domain::ports::{FixtureCredentials, FixtureEmailPolicy};
/// use account_mutations::domain::{
///     validate_email_change, Account, AccountId, ChangeEmailInput, ErrorKind, Field,
/// };
///
/// let account = Account::builder(AccountId::random(), "bob", "a@x.com")
///     .password_hash(FixtureCredentials::hash_for("pw"))
///     .build();
///
/// let errors = validate_email_change(
///     &FixtureCredentials,
///     &FixtureEmailPolicy,
///     &account,
///     &ChangeEmailInput::new("pw", "A@x.com"),
/// )
/// .expect_err("same address");
/// assert_eq!(errors.kind_of(Field::NewEmail), Some(ErrorKind::Unchanged));
/// ```
pub fn validate_email_change<V, P>(
    verifier: &V,
    policy: &P,
    account: &Account,
    input: &ChangeEmailInput,
) -> Result<ChangeEmailCommand, ValidationErrors>
where
    V: SecretVerifier + ?Sized,
    P: EmailPolicy + ?Sized,
{
    let mut errors = ValidationErrors::new();
    errors.record(
        Field::Password,
        current_secret_matches(verifier, account, input.password.as_ref()),
    );
    let new_email = errors.record(
        Field::NewEmail,
        check_new_email(policy, account, input.new_email.as_deref()),
    );

    let new_email = match new_email {
        Some(address) if errors.is_empty() => address,
        _ => {
            trace_rejection("change_email", account, &errors);
            return Err(errors);
        }
    };

    debug!(account_id = %account.id(), "email change validated");
    Ok(ChangeEmailCommand {
        account_id: account.id(),
        email_hash: email_hash(&new_email),
        email: normalize_email(&new_email),
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{FixtureCredentials, FixtureEmailPolicy, MockEmailPolicy};
    use crate::domain::{AccountId, ErrorKind, PolicyViolation};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    const PASSWORD: &str = "pw";

    #[fixture]
    fn account() -> Account {
        Account::builder(AccountId::random(), "bob", "a@x.com")
            .password_hash(FixtureCredentials::hash_for(PASSWORD))
            .build()
    }

    fn policy_never_called() -> MockEmailPolicy {
        let mut policy = MockEmailPolicy::new();
        policy.expect_validate().times(0);
        policy
    }

    #[rstest]
    fn valid_change_produces_normalised_command(account: Account) {
        let mut policy = MockEmailPolicy::new();
        policy
            .expect_validate()
            .with(eq("New@Example.COM"))
            .times(1)
            .returning(|_| Ok(()));

        let command = validate_email_change(
            &FixtureCredentials,
            &policy,
            &account,
            &ChangeEmailInput::new(PASSWORD, "  New@Example.COM "),
        )
        .expect("valid email change");

        assert_eq!(command.account_id, account.id());
        assert_eq!(command.email, "New@example.com");
        assert_eq!(command.email_hash, email_hash("new@example.com"));
    }

    #[rstest]
    #[case::case_only("A@x.com")]
    #[case::padded(" a@x.com ")]
    fn same_address_is_unchanged_without_consulting_policy(
        account: Account,
        #[case] candidate: &str,
    ) {
        let errors = validate_email_change(
            &FixtureCredentials,
            &policy_never_called(),
            &account,
            &ChangeEmailInput::new(PASSWORD, candidate),
        )
        .expect_err("unchanged address");

        assert_eq!(errors.fields(), vec![Field::NewEmail]);
        assert_eq!(errors.get(Field::NewEmail), Some(&FieldError::Unchanged));
    }

    #[rstest]
    fn wrong_password_and_unchanged_address_fail_together(account: Account) {
        let errors = validate_email_change(
            &FixtureCredentials,
            &policy_never_called(),
            &account,
            &ChangeEmailInput::new("wrong", "A@x.com"),
        )
        .expect_err("both fields fail");

        assert_eq!(errors.kind_of(Field::Password), Some(ErrorKind::InvalidCredential));
        assert_eq!(errors.kind_of(Field::NewEmail), Some(ErrorKind::Unchanged));
    }

    #[rstest]
    fn wrong_password_blocks_an_otherwise_valid_address(account: Account) {
        let errors = validate_email_change(
            &FixtureCredentials,
            &FixtureEmailPolicy,
            &account,
            &ChangeEmailInput::new("wrong", "b@x.com"),
        )
        .expect_err("wrong password");

        assert_eq!(errors.fields(), vec![Field::Password]);
    }

    #[rstest]
    #[case::absent(ChangeEmailInput { password: Some(Secret::new(PASSWORD)), new_email: None })]
    #[case::blank(ChangeEmailInput::new(PASSWORD, "   "))]
    fn blank_address_is_required(account: Account, #[case] input: ChangeEmailInput) {
        let errors = validate_email_change(
            &FixtureCredentials,
            &policy_never_called(),
            &account,
            &input,
        )
        .expect_err("blank address");

        assert_eq!(errors.get(Field::NewEmail), Some(&FieldError::Required));
    }

    #[rstest]
    fn overlong_address_is_too_long(account: Account) {
        let address = format!("{}@x.com", "a".repeat(EMAIL_MAX_LENGTH));
        let errors = validate_email_change(
            &FixtureCredentials,
            &policy_never_called(),
            &account,
            &ChangeEmailInput::new(PASSWORD, address),
        )
        .expect_err("overlong address");

        assert_eq!(
            errors.get(Field::NewEmail),
            Some(&FieldError::TooLong {
                max: EMAIL_MAX_LENGTH
            })
        );
    }

    #[rstest]
    fn policy_rejection_is_delegated(account: Account) {
        let errors = validate_email_change(
            &FixtureCredentials,
            &FixtureEmailPolicy,
            &account,
            &ChangeEmailInput::new(PASSWORD, "not-an-address"),
        )
        .expect_err("invalid address");

        assert_eq!(
            errors.get(Field::NewEmail),
            Some(&FieldError::Delegated {
                violations: vec![PolicyViolation::new(
                    "email_invalid",
                    "enter a valid email address"
                )]
            })
        );
    }

    #[rstest]
    fn missing_password_is_required(account: Account) {
        let input = ChangeEmailInput {
            password: None,
            new_email: Some("b@x.com".to_owned()),
        };
        let errors = validate_email_change(&FixtureCredentials, &FixtureEmailPolicy, &account, &input)
            .expect_err("missing password");

        assert_eq!(errors.get(Field::Password), Some(&FieldError::Required));
    }
}
