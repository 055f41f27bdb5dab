//! Driven ports for password verification and hashing.
//!
//! Password and email changes must prove possession of the current password
//! before any command is produced. The domain only sees a yes/no answer from
//! [`SecretVerifier`] and an opaque [`PasswordHash`] from [`SecretHasher`];
//! algorithms and parameters live in outbound adapters.

use crate::domain::{Account, PasswordHash, Secret};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential adapters.
    pub enum CredentialError {
        /// Hashing a new password failed.
        Hashing {
            /// Adapter-supplied failure description.
            message: String
        } => "password hashing failed: {message}",
        /// The adapter was configured with unusable parameters.
        InvalidParameters {
            /// Adapter-supplied failure description.
            message: String
        } => "invalid password hashing parameters: {message}",
    }
}

/// Checks a candidate password against the account's stored hash.
#[cfg_attr(test, mockall::automock)]
pub trait SecretVerifier: Send + Sync {
    /// Return `true` only when `candidate` matches the stored hash.
    ///
    /// Accounts without a stored hash never verify.
    fn verify(&self, account: &Account, candidate: &Secret) -> bool;
}

/// Produces the stored form of a new password.
#[cfg_attr(test, mockall::automock)]
pub trait SecretHasher: Send + Sync {
    /// Hash `secret` for storage.
    ///
    /// # Errors
    /// Returns [`CredentialError`] when the adapter cannot produce a hash.
    fn hash(&self, secret: &Secret) -> Result<PasswordHash, CredentialError>;
}

const FIXTURE_PREFIX: &str = "fixture$";

/// Plain-text credential adapter for tests and examples.
///
/// Hashes are `fixture$<password>`, so fixture accounts can be built with a
/// known password. Never use outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentials;

impl FixtureCredentials {
    /// Stored hash this adapter produces for `password`.
    #[must_use]
    pub fn hash_for(password: &str) -> PasswordHash {
        PasswordHash::new(format!("{FIXTURE_PREFIX}{password}"))
    }
}

impl SecretVerifier for FixtureCredentials {
    fn verify(&self, account: &Account, candidate: &Secret) -> bool {
        account
            .password_hash()
            .and_then(|hash| hash.as_str().strip_prefix(FIXTURE_PREFIX))
            .is_some_and(|stored| stored == candidate.expose())
    }
}

impl SecretHasher for FixtureCredentials {
    fn hash(&self, secret: &Secret) -> Result<PasswordHash, CredentialError> {
        Ok(Self::hash_for(secret.expose()))
    }
}
