//! Argon2id credential adapter.
//!
//! Implements both credential ports. New passwords are hashed with Argon2id
//! (version 0x13) and a fresh random salt; stored hashes are read back in PHC
//! string form, so verification follows the parameters recorded in each hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use tracing::warn;

use crate::domain::ports::{CredentialError, SecretHasher, SecretVerifier};
use crate::domain::{Account, PasswordHash, Secret};

/// Argon2id-backed [`SecretVerifier`] and [`SecretHasher`].
///
/// The default parameters are m=19456 KiB, t=2, p=1.
///
/// # Examples
/// ```
/// use account_mutations::domain::ports::{SecretHasher, SecretVerifier};
/// use account_mutations::domain::{Account, AccountId, Secret};
/// use account_mutations::outbound::Argon2Credentials;
///
/// let credentials = Argon2Credentials::with_params(1024, 1, 1).expect("valid params");
/// let hash = credentials.hash(&Secret::new("  pw  ")).expect("hash");
/// let account = Account::builder(AccountId::random(), "bob", "bob@example.com")
///     .password_hash(hash)
///     .build();
///
/// assert!(credentials.verify(&account, &Secret::new("  pw  ")));
/// assert!(!credentials.verify(&account, &Secret::new("pw")));
/// ```
#[derive(Debug, Clone)]
pub struct Argon2Credentials {
    params: Params,
}

impl Default for Argon2Credentials {
    fn default() -> Self {
        Self::new()
    }
}

impl Argon2Credentials {
    /// Create an adapter with the default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }

    /// Create an adapter with explicit cost parameters.
    ///
    /// # Errors
    /// Returns [`CredentialError::InvalidParameters`] when Argon2 rejects the
    /// combination.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, CredentialError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| CredentialError::invalid_parameters(err.to_string()))?;
        Ok(Self { params })
    }

    /// Cost parameters used for new hashes.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl SecretVerifier for Argon2Credentials {
    fn verify(&self, account: &Account, candidate: &Secret) -> bool {
        let Some(stored) = account.password_hash() else {
            return false;
        };
        let parsed = match PhcHash::new(stored.as_str()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    account_id = %account.id(),
                    error = %err,
                    "stored password hash could not be parsed"
                );
                return false;
            }
        };
        self.argon2()
            .verify_password(candidate.expose().as_bytes(), &parsed)
            .is_ok()
    }
}

impl SecretHasher for Argon2Credentials {
    fn hash(&self, secret: &Secret) -> Result<PasswordHash, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(secret.expose().as_bytes(), &salt)
            .map_err(|err| CredentialError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(hash.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::AccountId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn credentials() -> Argon2Credentials {
        Argon2Credentials::with_params(1024, 1, 1).expect("small params are valid")
    }

    fn account_with(hash: PasswordHash) -> Account {
        Account::builder(AccountId::random(), "bob", "bob@example.com")
            .password_hash(hash)
            .build()
    }

    #[rstest]
    fn defaults_match_documented_costs() {
        let credentials = Argon2Credentials::new();
        assert_eq!(credentials.params().m_cost(), 19_456);
        assert_eq!(credentials.params().t_cost(), 2);
        assert_eq!(credentials.params().p_cost(), 1);
    }

    #[rstest]
    fn hashes_are_argon2id_phc_strings(credentials: Argon2Credentials) {
        let hash = credentials.hash(&Secret::new("pw")).expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$v=19$"));
    }

    #[rstest]
    fn each_hash_uses_a_fresh_salt(credentials: Argon2Credentials) {
        let first = credentials.hash(&Secret::new("pw")).expect("hash");
        let second = credentials.hash(&Secret::new("pw")).expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("  pw  ", true)]
    #[case("pw", false)]
    #[case("  PW  ", false)]
    fn verification_is_exact(
        credentials: Argon2Credentials,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let account = account_with(credentials.hash(&Secret::new("  pw  ")).expect("hash"));
        assert_eq!(credentials.verify(&account, &Secret::new(candidate)), expected);
    }

    #[rstest]
    fn unparsable_hash_never_verifies(credentials: Argon2Credentials) {
        let account = account_with(PasswordHash::new("not a phc string"));
        assert!(!credentials.verify(&account, &Secret::new("not a phc string")));
    }

    #[rstest]
    fn account_without_hash_never_verifies(credentials: Argon2Credentials) {
        let account = Account::builder(AccountId::random(), "bob", "bob@example.com").build();
        assert!(!credentials.verify(&account, &Secret::new("")));
    }

    #[rstest]
    fn hashes_with_other_costs_still_verify(credentials: Argon2Credentials) {
        let other = Argon2Credentials::with_params(2048, 2, 1).expect("valid params");
        let account = account_with(other.hash(&Secret::new("pw")).expect("hash"));
        assert!(credentials.verify(&account, &Secret::new("pw")));
    }

    #[rstest]
    fn invalid_params_are_rejected() {
        let error = Argon2Credentials::with_params(1, 1, 1).expect_err("memory too small");
        assert!(matches!(error, CredentialError::InvalidParameters { .. }));
    }
}
