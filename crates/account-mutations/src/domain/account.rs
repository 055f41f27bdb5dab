//! Account snapshot consumed by the mutation validators.
//!
//! The account record itself is owned by the persistence layer. Validators
//! only read the attributes exposed here: identity, credentials, forum
//! options and signature.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`AccountId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Opaque password hash in PHC string form.
///
/// The hash is never logged; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`SecretHasher`].
    ///
    /// [`SecretHasher`]: crate::domain::ports::SecretHasher
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Forum presence and notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForumOptions {
    /// Hide the account from "who is online" listings.
    pub is_hiding_presence: bool,
    /// Restriction level for private thread invitations.
    ///
    /// Any non-negative value is accepted here; the store enforces the set of
    /// levels it supports.
    pub limits_private_thread_invites_to: u32,
    /// Subscribe to threads the account starts.
    pub subscribe_to_started_threads: bool,
    /// Subscribe to threads the account replies to.
    pub subscribe_to_replied_threads: bool,
}

/// Read-only snapshot of the account under mutation.
///
/// ## Invariants
/// - The snapshot reflects the account state at validation time; callers are
///   responsible for re-checking consistency when persisting a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    username: String,
    email: String,
    password_hash: Option<PasswordHash>,
    forum_options: ForumOptions,
    signature: Option<String>,
}

impl Account {
    /// Create a builder for an account snapshot.
    pub fn builder(
        id: AccountId,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> AccountBuilder {
        AccountBuilder::new(id, username, email)
    }

    /// Stable account identifier.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Current username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Current email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Stored password hash, absent for accounts without a usable password.
    #[must_use]
    pub const fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    /// Current forum options.
    #[must_use]
    pub const fn forum_options(&self) -> &ForumOptions {
        &self.forum_options
    }

    /// Current signature, if any.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

/// Builder for constructing [`Account`] snapshots incrementally.
#[derive(Debug, Clone)]
pub struct AccountBuilder {
    id: AccountId,
    username: String,
    email: String,
    password_hash: Option<PasswordHash>,
    forum_options: ForumOptions,
    signature: Option<String>,
}

impl AccountBuilder {
    /// Create a new builder with default options and no password.
    pub fn new(id: AccountId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: None,
            forum_options: ForumOptions::default(),
            signature: None,
        }
    }

    /// Set the stored password hash.
    #[must_use]
    pub fn password_hash(mut self, hash: PasswordHash) -> Self {
        self.password_hash = Some(hash);
        self
    }

    /// Set the forum options.
    #[must_use]
    pub const fn forum_options(mut self, options: ForumOptions) -> Self {
        self.forum_options = options;
        self
    }

    /// Set the current signature.
    #[must_use]
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Build the final [`Account`] snapshot.
    #[must_use]
    pub fn build(self) -> Account {
        Account {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            forum_options: self.forum_options,
            signature: self.signature,
        }
    }
}

/// Identity of whoever performs a username change.
///
/// Self-service changes record the account itself; staff-assisted changes
/// record the staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the acting account.
    pub id: AccountId,
    /// Username of the acting account at the time of the change.
    pub username: String,
}

impl Actor {
    /// Build an actor from explicit parts.
    pub fn new(id: AccountId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// The account acting on itself.
    #[must_use]
    pub fn of(account: &Account) -> Self {
        Self::new(account.id(), account.username())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn builder_defaults_to_no_password_and_default_options() {
        let account = Account::builder(AccountId::random(), "bob", "bob@example.com").build();

        assert!(account.password_hash().is_none());
        assert_eq!(account.forum_options(), &ForumOptions::default());
        assert!(account.signature().is_none());
    }

    #[rstest]
    fn builder_sets_all_fields() {
        let id = AccountId::random();
        let options = ForumOptions {
            is_hiding_presence: true,
            limits_private_thread_invites_to: 2,
            subscribe_to_started_threads: true,
            subscribe_to_replied_threads: false,
        };
        let account = Account::builder(id, "bob", "bob@example.com")
            .password_hash(PasswordHash::new("hash"))
            .forum_options(options)
            .signature("Cheers")
            .build();

        assert_eq!(account.id(), id);
        assert_eq!(account.username(), "bob");
        assert_eq!(account.email(), "bob@example.com");
        assert_eq!(account.password_hash().map(PasswordHash::as_str), Some("hash"));
        assert_eq!(account.forum_options(), &options);
        assert_eq!(account.signature(), Some("Cheers"));
    }

    #[rstest]
    fn actor_of_uses_account_identity() {
        let account = Account::builder(AccountId::random(), "bob", "bob@example.com").build();
        let actor = Actor::of(&account);

        assert_eq!(actor.id, account.id());
        assert_eq!(actor.username, "bob");
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }

    #[rstest]
    fn account_id_serialises_as_plain_uuid() {
        let uuid = Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid");
        let json = serde_json::to_value(AccountId::new(uuid)).expect("serialise");
        assert_eq!(json, serde_json::json!("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
    }
}
