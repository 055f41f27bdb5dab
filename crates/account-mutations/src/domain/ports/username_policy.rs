//! Driven port for username format and availability rules.
//!
//! Character set, length, reserved words, profanity and uniqueness checks
//! belong to the adapter. The domain only orders the call after its own
//! required/length/unchanged checks and surfaces the result verbatim.

use crate::domain::PolicyViolation;

/// Username policy consulted before a username change is accepted.
#[cfg_attr(test, mockall::automock)]
pub trait UsernamePolicy: Send + Sync {
    /// Validate a trimmed candidate username.
    ///
    /// # Errors
    /// Returns every rule the candidate breaks, in policy order.
    fn validate(&self, candidate: &str) -> Result<(), Vec<PolicyViolation>>;
}

/// Minimum username length accepted by [`FixtureUsernamePolicy`].
pub const FIXTURE_USERNAME_MIN: usize = 3;
/// Maximum username length accepted by [`FixtureUsernamePolicy`].
pub const FIXTURE_USERNAME_MAX: usize = 14;

/// In-memory username policy for tests and examples.
///
/// Accepts 3 to 14 ASCII letters and digits. Availability is not checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsernamePolicy;

impl UsernamePolicy for FixtureUsernamePolicy {
    fn validate(&self, candidate: &str) -> Result<(), Vec<PolicyViolation>> {
        let mut violations = Vec::new();
        let length = candidate.chars().count();
        if length < FIXTURE_USERNAME_MIN {
            violations.push(PolicyViolation::new(
                "username_too_short",
                format!("username must be at least {FIXTURE_USERNAME_MIN} characters"),
            ));
        }
        if length > FIXTURE_USERNAME_MAX {
            violations.push(PolicyViolation::new(
                "username_too_long",
                format!("username must be at most {FIXTURE_USERNAME_MAX} characters"),
            ));
        }
        if !candidate.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            violations.push(PolicyViolation::new(
                "username_invalid_characters",
                "username may only contain latin letters and digits",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bob2")]
    #[case("abc")]
    #[case("abcdefghijklmn")]
    fn fixture_accepts_alphanumeric_names(#[case] candidate: &str) {
        assert!(FixtureUsernamePolicy.validate(candidate).is_ok());
    }

    #[rstest]
    #[case("ab", &["username_too_short"])]
    #[case("abcdefghijklmno", &["username_too_long"])]
    #[case("bob smith", &["username_invalid_characters"])]
    #[case("b!", &["username_too_short", "username_invalid_characters"])]
    fn fixture_reports_every_broken_rule(#[case] candidate: &str, #[case] codes: &[&str]) {
        let violations = FixtureUsernamePolicy
            .validate(candidate)
            .expect_err("candidate breaks policy");
        let reported: Vec<&str> = violations.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(reported, codes);
    }
}
