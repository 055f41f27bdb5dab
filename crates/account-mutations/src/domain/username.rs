//! Username mutation.
//!
//! Rules run in a fixed order and stop at the first failure:
//! required, length, unchanged, the injected [`UsernamePolicy`], then the
//! derived slug. The unchanged check is an exact, case-sensitive comparison;
//! an unchanged name never reaches the policy. A name the policy accepts but
//! that yields no usable slug is rejected as invalid.

use serde::Deserialize;
use tracing::debug;

use super::field_rules::{USERNAME_MAX_LENGTH, required_text, trace_rejection};
use super::ports::UsernamePolicy;
use super::{
    Account, Actor, ChangeUsernameCommand, ExpectedValue, Field, FieldError, ValidationErrors,
    is_valid_slug, slugify,
};

/// Submitted username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangeUsernameInput {
    /// Candidate username, trimmed before validation.
    pub username: Option<String>,
}

impl ChangeUsernameInput {
    /// Build an input carrying `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }
}

fn check_username<P>(
    policy: &P,
    account: &Account,
    input: &ChangeUsernameInput,
) -> Result<(String, String), FieldError>
where
    P: UsernamePolicy + ?Sized,
{
    let candidate = required_text(input.username.as_deref(), USERNAME_MAX_LENGTH)?;
    if candidate == account.username() {
        return Err(FieldError::Unchanged);
    }
    policy
        .validate(&candidate)
        .map_err(FieldError::delegated)?;
    let slug = slugify(&candidate);
    if !is_valid_slug(&slug) {
        return Err(FieldError::Invalid {
            expected: ExpectedValue::SluggableUsername,
        });
    }
    Ok((candidate, slug))
}

/// Validate a username change.
///
/// `changed_by` identifies a staff member acting on the account; `None`
/// records the account itself.
///
/// # Errors
/// Returns the first failing rule on [`Field::Username`]. A name whose slug
/// would be empty fails with [`FieldError::Invalid`].
pub fn validate_username_change<P>(
    policy: &P,
    account: &Account,
    input: &ChangeUsernameInput,
    changed_by: Option<Actor>,
) -> Result<ChangeUsernameCommand, ValidationErrors>
where
    P: UsernamePolicy + ?Sized,
{
    let (username, slug) = match check_username(policy, account, input) {
        Ok(checked) => checked,
        Err(error) => {
            let errors = ValidationErrors::single(Field::Username, error);
            trace_rejection("change_username", account, &errors);
            return Err(errors);
        }
    };

    let changed_by = changed_by.unwrap_or_else(|| Actor::of(account));
    debug!(
        account_id = %account.id(),
        changed_by = %changed_by.id,
        "username change validated"
    );
    Ok(ChangeUsernameCommand {
        account_id: account.id(),
        old_username: account.username().to_owned(),
        username,
        slug,
        changed_by,
    })
}
