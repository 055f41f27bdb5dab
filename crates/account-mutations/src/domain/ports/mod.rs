//! Domain ports for the collaborators the validators consume.
//!
//! Each trait is synchronous and side-effect free from the domain's point of
//! view; adapters may consult a database or network but must not mutate the
//! account. Every port ships a `Fixture*` implementation for tests and demos,
//! and a `mockall` mock under `cfg(test)`.

mod macros;
pub(crate) use macros::define_port_error;

mod credentials;
mod email_policy;
mod password_policy;
mod username_policy;

#[cfg(test)]
pub use credentials::{MockSecretHasher, MockSecretVerifier};
pub use credentials::{CredentialError, FixtureCredentials, SecretHasher, SecretVerifier};
#[cfg(test)]
pub use email_policy::MockEmailPolicy;
pub use email_policy::{EmailPolicy, FixtureEmailPolicy};
#[cfg(test)]
pub use password_policy::MockPasswordPolicy;
pub use password_policy::{FIXTURE_PASSWORD_MIN, FixturePasswordPolicy, PasswordPolicy};
#[cfg(test)]
pub use username_policy::MockUsernamePolicy;
pub use username_policy::{
    FIXTURE_USERNAME_MAX, FIXTURE_USERNAME_MIN, FixtureUsernamePolicy, UsernamePolicy,
};
