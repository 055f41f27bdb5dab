//! Account mutation service.
//!
//! Bundles the injected policies, the credential adapter and the settings so
//! callers hold one value instead of threading collaborators through every
//! call. Each method delegates to the matching free validator.

use std::sync::Arc;

use super::ports::{EmailPolicy, PasswordPolicy, SecretHasher, SecretVerifier, UsernamePolicy};
use super::{
    Account, Actor, ChangeEmailCommand, ChangeEmailInput, ChangeForumOptionsCommand,
    ChangePasswordCommand, ChangePasswordInput, ChangeUsernameCommand, ChangeUsernameInput,
    EditSignatureCommand, EditSignatureInput, ForumOptionsInput, MutationError, ValidationErrors,
    validate_email_change, validate_forum_options, validate_password_change, validate_signature,
    validate_username_change,
};
use crate::config::AccountMutationSettings;

/// Validates account mutations against a fixed set of collaborators.
///
/// `C` both verifies current passwords and hashes new ones.
pub struct AccountMutations<U, E, P, C> {
    usernames: Arc<U>,
    emails: Arc<E>,
    passwords: Arc<P>,
    credentials: Arc<C>,
    settings: AccountMutationSettings,
}

impl<U, E, P, C> Clone for AccountMutations<U, E, P, C> {
    fn clone(&self) -> Self {
        Self {
            usernames: Arc::clone(&self.usernames),
            emails: Arc::clone(&self.emails),
            passwords: Arc::clone(&self.passwords),
            credentials: Arc::clone(&self.credentials),
            settings: self.settings.clone(),
        }
    }
}

impl<U, E, P, C> AccountMutations<U, E, P, C> {
    /// Create a service owning its collaborators.
    pub fn new(
        usernames: U,
        emails: E,
        passwords: P,
        credentials: C,
        settings: AccountMutationSettings,
    ) -> Self {
        Self::from_shared(
            Arc::new(usernames),
            Arc::new(emails),
            Arc::new(passwords),
            Arc::new(credentials),
            settings,
        )
    }

    /// Create a service from collaborators shared with other components.
    pub const fn from_shared(
        usernames: Arc<U>,
        emails: Arc<E>,
        passwords: Arc<P>,
        credentials: Arc<C>,
        settings: AccountMutationSettings,
    ) -> Self {
        Self {
            usernames,
            emails,
            passwords,
            credentials,
            settings,
        }
    }

    /// Settings the service validates against.
    #[must_use]
    pub const fn settings(&self) -> &AccountMutationSettings {
        &self.settings
    }
}

impl<U, E, P, C> AccountMutations<U, E, P, C>
where
    U: UsernamePolicy,
    E: EmailPolicy,
    P: PasswordPolicy,
    C: SecretVerifier + SecretHasher,
{
    /// Validate a forum options submission.
    ///
    /// # Errors
    /// See [`validate_forum_options`].
    pub fn change_forum_options(
        &self,
        account: &Account,
        input: &ForumOptionsInput,
    ) -> Result<ChangeForumOptionsCommand, ValidationErrors> {
        validate_forum_options(account, input)
    }

    /// Validate a signature edit against the configured length limit.
    ///
    /// # Errors
    /// See [`validate_signature`].
    pub fn edit_signature(
        &self,
        account: &Account,
        input: &EditSignatureInput,
    ) -> Result<EditSignatureCommand, ValidationErrors> {
        validate_signature(account, input, self.settings.signature_length_max)
    }

    /// Validate a username change, optionally performed by `changed_by`.
    ///
    /// # Errors
    /// See [`validate_username_change`].
    pub fn change_username(
        &self,
        account: &Account,
        input: &ChangeUsernameInput,
        changed_by: Option<Actor>,
    ) -> Result<ChangeUsernameCommand, ValidationErrors> {
        validate_username_change(self.usernames.as_ref(), account, input, changed_by)
    }

    /// Validate a password change and hash the new password.
    ///
    /// # Errors
    /// See [`validate_password_change`].
    pub fn change_password(
        &self,
        account: &Account,
        input: &ChangePasswordInput,
    ) -> Result<ChangePasswordCommand, MutationError> {
        validate_password_change(
            self.credentials.as_ref(),
            self.passwords.as_ref(),
            self.credentials.as_ref(),
            account,
            input,
        )
    }

    /// Validate an email change.
    ///
    /// # Errors
    /// See [`validate_email_change`].
    pub fn change_email(
        &self,
        account: &Account,
        input: &ChangeEmailInput,
    ) -> Result<ChangeEmailCommand, ValidationErrors> {
        validate_email_change(self.credentials.as_ref(), self.emails.as_ref(), account, input)
    }
}
