//! Outbound adapters implementing domain ports.
//!
//! - **argon2_credentials**: Argon2id password verification and hashing.
//!
//! Username, email and password policies depend on the host application's
//! data and are supplied by the caller.

mod argon2_credentials;

pub use argon2_credentials::Argon2Credentials;
