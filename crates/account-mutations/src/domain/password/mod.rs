//! Password mutation.
//!
//! Two independent fields are checked:
//!
//! - `password`: the current password, which must verify against the stored
//!   hash.
//! - `new_password`: the replacement, which must satisfy the account-aware
//!   strength policy.
//!
//! Both fields always run and may fail together. Neither value is ever
//! trimmed.

use serde::Deserialize;
use tracing::debug;

use super::field_rules::{
    SECRET_MAX_LENGTH, current_secret_matches, required_secret, trace_rejection,
};
use super::ports::{PasswordPolicy, SecretHasher, SecretVerifier};
use super::{
    Account, ChangePasswordCommand, Field, FieldError, MutationError, Secret, ValidationErrors,
};

/// Submitted password change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordInput {
    /// Current password, as proof of possession.
    pub password: Option<Secret>,
    /// Replacement password.
    pub new_password: Option<Secret>,
}

impl ChangePasswordInput {
    /// Build an input carrying both secrets.
    pub fn new(password: impl Into<Secret>, new_password: impl Into<Secret>) -> Self {
        Self {
            password: Some(password.into()),
            new_password: Some(new_password.into()),
        }
    }
}

fn check_new_password<'a, P>(
    policy: &P,
    account: &Account,
    raw: Option<&'a Secret>,
) -> Result<&'a Secret, FieldError>
where
    P: PasswordPolicy + ?Sized,
{
    let new_password = required_secret(raw, SECRET_MAX_LENGTH)?;
    policy
        .validate(new_password, account)
        .map_err(FieldError::delegated)?;
    Ok(new_password)
}

/// Validate both password fields without hashing.
///
/// # Errors
/// Returns every failing field; `password` and `new_password` are judged
/// independently.
pub fn check_password_change<'a, V, P>(
    verifier: &V,
    policy: &P,
    account: &Account,
    input: &'a ChangePasswordInput,
) -> Result<&'a Secret, ValidationErrors>
where
    V: SecretVerifier + ?Sized,
    P: PasswordPolicy + ?Sized,
{
    let mut errors = ValidationErrors::new();
    errors.record(
        Field::Password,
        current_secret_matches(verifier, account, input.password.as_ref()),
    );
    let new_password = errors.record(
        Field::NewPassword,
        check_new_password(policy, account, input.new_password.as_ref()),
    );

    match new_password {
        Some(secret) if errors.is_empty() => Ok(secret),
        _ => {
            trace_rejection("change_password", account, &errors);
            Err(errors)
        }
    }
}

/// Validate a password change and hash the new password.
///
/// # Errors
/// Returns [`MutationError::Validation`] when either field fails and
/// [`MutationError::Hashing`] when the hasher cannot hash the new password.
pub fn validate_password_change<V, P, H>(
    verifier: &V,
    policy: &P,
    hasher: &H,
    account: &Account,
    input: &ChangePasswordInput,
) -> Result<ChangePasswordCommand, MutationError>
where
    V: SecretVerifier + ?Sized,
    P: PasswordPolicy + ?Sized,
    H: SecretHasher + ?Sized,
{
    let new_password = check_password_change(verifier, policy, account, input)?;
    let password_hash = hasher.hash(new_password)?;

    debug!(account_id = %account.id(), "password change validated");
    Ok(ChangePasswordCommand {
        account_id: account.id(),
        password_hash,
    })
}
