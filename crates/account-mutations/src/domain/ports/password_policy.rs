//! Driven port for password strength rules.
//!
//! The policy is account-aware: it may reject passwords derived from the
//! account's own username or email.

use crate::domain::{Account, PolicyViolation, Secret};

/// Password strength policy consulted before a password change is accepted.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordPolicy: Send + Sync {
    /// Validate a candidate password for `account`.
    ///
    /// # Errors
    /// Returns every rule the candidate breaks, in policy order.
    fn validate(&self, candidate: &Secret, account: &Account) -> Result<(), Vec<PolicyViolation>>;
}

/// Minimum password length accepted by [`FixturePasswordPolicy`].
pub const FIXTURE_PASSWORD_MIN: usize = 8;

/// In-memory password policy for tests and examples.
///
/// Rejects passwords shorter than eight characters, entirely numeric
/// passwords and passwords containing the account's username.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordPolicy;

impl PasswordPolicy for FixturePasswordPolicy {
    fn validate(&self, candidate: &Secret, account: &Account) -> Result<(), Vec<PolicyViolation>> {
        let raw = candidate.expose();
        let mut violations = Vec::new();

        if candidate.char_count() < FIXTURE_PASSWORD_MIN {
            violations.push(PolicyViolation::new(
                "password_too_short",
                format!("password must be at least {FIXTURE_PASSWORD_MIN} characters"),
            ));
        }
        if !raw.is_empty() && raw.chars().all(|ch| ch.is_ascii_digit()) {
            violations.push(PolicyViolation::new(
                "password_entirely_numeric",
                "password can't be entirely numeric",
            ));
        }
        let username = account.username().to_lowercase();
        if !username.is_empty() && raw.to_lowercase().contains(username.as_str()) {
            violations.push(PolicyViolation::new(
                "password_too_similar",
                "password is too similar to the username",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
