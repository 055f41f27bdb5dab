//! Validated, ready-to-persist account mutation commands.
//!
//! Commands describe exactly which account fields to set. They are produced
//! once per request and handed to the persistence layer, which applies them
//! atomically. No command is built unless every field of its input passed
//! validation.

use serde::Serialize;

use super::{AccountId, Actor, ForumOptions, PasswordHash};

/// Replace all four forum options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeForumOptionsCommand {
    /// Account to update.
    pub account_id: AccountId,
    /// New option values, stored verbatim.
    pub options: ForumOptions,
}

/// Replace the signature. An empty string clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSignatureCommand {
    /// Account to update.
    pub account_id: AccountId,
    /// New signature, stored verbatim.
    pub signature: String,
}

/// Rename the account and record the change in its username history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeUsernameCommand {
    /// Account to update.
    pub account_id: AccountId,
    /// Username before the change, kept for the history entry.
    pub old_username: String,
    /// New username.
    pub username: String,
    /// URL slug derived from the new username.
    pub slug: String,
    /// Who performed the change.
    pub changed_by: Actor,
}

impl ChangeUsernameCommand {
    /// Whether the account renamed itself.
    #[must_use]
    pub fn is_self_service(&self) -> bool {
        self.changed_by.id == self.account_id
    }
}

/// Replace the stored password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordCommand {
    /// Account to update.
    pub account_id: AccountId,
    /// Hash of the new password.
    pub password_hash: PasswordHash,
}

/// Replace the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEmailCommand {
    /// Account to update.
    pub account_id: AccountId,
    /// Normalised new address.
    pub email: String,
    /// Hex SHA-256 of the lowercased address, for uniqueness lookups.
    pub email_hash: String,
}

/// Any validated account mutation.
///
/// Persistence adapters accept this single type; each variant wraps the
/// command produced by one validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mutation", rename_all = "snake_case")]
pub enum MutationCommand {
    /// Forum options change.
    ForumOptions(ChangeForumOptionsCommand),
    /// Signature edit.
    Signature(EditSignatureCommand),
    /// Username change.
    Username(ChangeUsernameCommand),
    /// Password change.
    Password(ChangePasswordCommand),
    /// Email change.
    Email(ChangeEmailCommand),
}

impl MutationCommand {
    /// Account the command targets.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        match self {
            Self::ForumOptions(command) => command.account_id,
            Self::Signature(command) => command.account_id,
            Self::Username(command) => command.account_id,
            Self::Password(command) => command.account_id,
            Self::Email(command) => command.account_id,
        }
    }
}

macro_rules! impl_from_command {
    ($($command:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$command> for MutationCommand {
                fn from(value: $command) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_command! {
    ChangeForumOptionsCommand => ForumOptions,
    EditSignatureCommand => Signature,
    ChangeUsernameCommand => Username,
    ChangePasswordCommand => Password,
    ChangeEmailCommand => Email,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    fn fixed_id() -> AccountId {
        AccountId::new(Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid"))
    }

    #[rstest]
    fn staff_rename_is_not_self_service() {
        let command = ChangeUsernameCommand {
            account_id: fixed_id(),
            old_username: "bob".to_owned(),
            username: "Bob2".to_owned(),
            slug: "bob2".to_owned(),
            changed_by: Actor::new(AccountId::random(), "moderator"),
        };
        assert!(!command.is_self_service());
    }

    #[rstest]
    fn wrapped_command_reports_account() {
        let command = MutationCommand::from(EditSignatureCommand {
            account_id: fixed_id(),
            signature: String::new(),
        });
        assert_eq!(command.account_id(), fixed_id());
    }

    #[rstest]
    fn tagged_serialisation_names_the_mutation() {
        let command = MutationCommand::from(ChangeEmailCommand {
            account_id: fixed_id(),
            email: "a@x.com".to_owned(),
            email_hash: "hash".to_owned(),
        });

        let value = serde_json::to_value(&command).expect("serialise");
        assert_eq!(
            value,
            json!({
                "mutation": "email",
                "account_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "email": "a@x.com",
                "email_hash": "hash",
            })
        );
    }
}
