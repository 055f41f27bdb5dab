//! Driven port for email syntax, domain and availability rules.

use crate::domain::PolicyViolation;

/// Email policy consulted before an email change is accepted.
#[cfg_attr(test, mockall::automock)]
pub trait EmailPolicy: Send + Sync {
    /// Validate a trimmed candidate address.
    ///
    /// # Errors
    /// Returns every rule the candidate breaks, in policy order.
    fn validate(&self, candidate: &str) -> Result<(), Vec<PolicyViolation>>;
}

/// In-memory email policy for tests and examples.
///
/// Requires exactly one `@`, a non-empty local part and a dotted domain.
/// Availability is not checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmailPolicy;

impl EmailPolicy for FixtureEmailPolicy {
    fn validate(&self, candidate: &str) -> Result<(), Vec<PolicyViolation>> {
        let well_formed = match candidate.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain
                        .split('.')
                        .all(|label| !label.is_empty() && !label.contains(char::is_whitespace))
                    && domain.contains('.')
            }
            None => false,
        };

        if well_formed {
            Ok(())
        } else {
            Err(vec![PolicyViolation::new(
                "email_invalid",
                "enter a valid email address",
            )])
        }
    }
}
