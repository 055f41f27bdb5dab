//! Domain types and validators for account mutations.
//!
//! Purpose: turn loosely typed mutation payloads into validated commands.
//! Validators never persist anything and never read global state; the
//! account snapshot, the input and the injected [`ports`] are their only
//! inputs.
//!
//! Public surface:
//! - [`Account`] and friends: the read-only account snapshot.
//! - `*Input`: raw payloads, deserialisable with serde.
//! - `validate_*`: one validator per mutation.
//! - `*Command` and [`MutationCommand`]: ready-to-persist results.
//! - [`ValidationErrors`] and [`MutationError`]: field-scoped failures.
//! - [`AccountMutations`]: a service bundling the collaborators.

mod account;
mod account_mutations;
mod commands;
mod email_address;
mod email_change;
mod error;
mod field_rules;
mod forum_options;
mod password;
pub mod ports;
mod secret;
mod signature;
mod slug;
mod username;

pub use self::account::{Account, AccountBuilder, AccountId, Actor, ForumOptions, PasswordHash};
pub use self::account_mutations::AccountMutations;
pub use self::commands::{
    ChangeEmailCommand, ChangeForumOptionsCommand, ChangePasswordCommand, ChangeUsernameCommand,
    EditSignatureCommand, MutationCommand,
};
pub use self::email_address::{email_hash, normalize_email, same_email};
pub use self::email_change::{ChangeEmailInput, validate_email_change};
pub use self::error::{
    ErrorKind, ExpectedValue, Field, FieldError, MutationError, PolicyViolation, ValidationErrors,
};
pub use self::field_rules::{EMAIL_MAX_LENGTH, SECRET_MAX_LENGTH, USERNAME_MAX_LENGTH};
pub use self::forum_options::{ForumOptionsInput, validate_forum_options};
pub use self::password::{ChangePasswordInput, check_password_change, validate_password_change};
pub use self::secret::Secret;
pub use self::signature::{EditSignatureInput, validate_signature};
pub use self::slug::{is_valid_slug, slugify};
pub use self::username::{ChangeUsernameInput, validate_username_change};
