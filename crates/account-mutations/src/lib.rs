//! Validation core for self-service account mutations.
//!
//! The crate turns user-supplied payloads for five account changes into
//! validated, ready-to-persist commands:
//!
//! - forum options (presence and notification preferences)
//! - signature
//! - username
//! - password (requires the current password)
//! - email address (requires the current password)
//!
//! Persistence, transport and presentation stay with the caller. Format,
//! uniqueness and strength rules are injected through the traits in
//! [`domain::ports`], so every validator is a pure function of the account
//! snapshot, the input and those collaborators.
//!
//! # Example
//!
//! ```
//! use account_mutations::config::AccountMutationSettings;
//! use account_mutations::domain::ports::{
//!     FixtureCredentials, FixtureEmailPolicy, FixturePasswordPolicy, FixtureUsernamePolicy,
//! };
//! use account_mutations::domain::{
//!     Account, AccountId, AccountMutations, ChangeUsernameInput, PasswordHash,
//! };
//!
//! let account = Account::builder(AccountId::random(), "bob", "bob@example.com")
//!     .password_hash(PasswordHash::new("fixture$secret"))
//!     .build();
//! let mutations = AccountMutations::new(
//!     FixtureUsernamePolicy,
//!     FixtureEmailPolicy,
//!     FixturePasswordPolicy,
//!     FixtureCredentials,
//!     AccountMutationSettings::new(256),
//! );
//!
//! let command = mutations
//!     .change_username(&account, &ChangeUsernameInput::new("Bob2"), None)
//!     .expect("new username is valid");
//!
//! assert_eq!(command.username, "Bob2");
//! assert_eq!(command.slug, "bob2");
//! assert!(command.is_self_service());
//! ```

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::AccountMutationSettings;
