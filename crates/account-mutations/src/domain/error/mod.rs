//! Field-scoped validation errors.
//!
//! These errors are transport agnostic. Each failure names the input
//! [`Field`] it belongs to and a stable [`ErrorKind`] code; rendering them
//! into user-facing messages or HTTP responses is left to the caller.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use super::ports::CredentialError;

/// Input field a validation failure is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Presence visibility toggle.
    IsHidingPresence,
    /// Private thread invitation restriction.
    LimitsPrivateThreadInvitesTo,
    /// Subscription to started threads.
    SubscribeToStartedThreads,
    /// Subscription to replied threads.
    SubscribeToRepliedThreads,
    /// Signature text.
    Signature,
    /// Candidate username.
    Username,
    /// Current password supplied as proof of possession.
    Password,
    /// Replacement password.
    NewPassword,
    /// Candidate email address.
    NewEmail,
}

impl Field {
    /// Stable snake_case identifier.
    ///
    /// # Examples
    /// ```
    /// use account_mutations::domain::Field;
    ///
    /// assert_eq!(Field::NewEmail.as_str(), "new_email");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsHidingPresence => "is_hiding_presence",
            Self::LimitsPrivateThreadInvitesTo => "limits_private_thread_invites_to",
            Self::SubscribeToStartedThreads => "subscribe_to_started_threads",
            Self::SubscribeToRepliedThreads => "subscribe_to_replied_threads",
            Self::Signature => "signature",
            Self::Username => "username",
            Self::Password => "password",
            Self::NewPassword => "new_password",
            Self::NewEmail => "new_email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable machine-readable code describing a field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The field was absent or blank.
    Required,
    /// The field held a value of the wrong type.
    Invalid,
    /// The new value equals the current one.
    Unchanged,
    /// The value exceeds its length limit.
    TooLong,
    /// The current password did not verify.
    InvalidCredential,
    /// An injected policy rejected the value.
    Delegated,
}

impl ErrorKind {
    /// Stable snake_case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Invalid => "invalid",
            Self::Unchanged => "unchanged",
            Self::TooLong => "too_long",
            Self::InvalidCredential => "invalid_credential",
            Self::Delegated => "delegated",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value type expected by a typed option field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedValue {
    /// A boolean-ish value.
    Boolean,
    /// An integer greater than or equal to zero.
    NonNegativeInteger,
    /// A username that yields a non-empty URL slug.
    SluggableUsername,
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::NonNegativeInteger => f.write_str("non-negative integer"),
            Self::SluggableUsername => f.write_str("username containing letters or digits"),
        }
    }
}

/// One reason reported by an injected username, email or password policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyViolation {
    /// Policy-defined stable code, for example `password_too_common`.
    pub code: String,
    /// Human-readable explanation supplied by the policy.
    pub message: String,
}

impl PolicyViolation {
    /// Build a violation from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

fn join_violations(violations: &[PolicyViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure of a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field was absent or blank.
    #[error("this field is required")]
    Required,
    /// The field held a value of the wrong type or shape.
    #[error("must be a valid {expected}")]
    Invalid {
        /// Type the field should have held.
        expected: ExpectedValue,
    },
    /// The new value equals the current one.
    #[error("new value is the same as the current one")]
    Unchanged,
    /// The value exceeds its length limit.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum length in characters.
        max: usize,
    },
    /// The current password did not verify.
    #[error("entered password is invalid")]
    InvalidCredential,
    /// An injected policy rejected the value, possibly for several reasons.
    #[error("{}", join_violations(.violations))]
    Delegated {
        /// Reasons reported by the policy, in policy order.
        violations: Vec<PolicyViolation>,
    },
}

impl FieldError {
    /// Stable code for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Required => ErrorKind::Required,
            Self::Invalid { .. } => ErrorKind::Invalid,
            Self::Unchanged => ErrorKind::Unchanged,
            Self::TooLong { .. } => ErrorKind::TooLong,
            Self::InvalidCredential => ErrorKind::InvalidCredential,
            Self::Delegated { .. } => ErrorKind::Delegated,
        }
    }

    /// Wrap policy violations.
    #[must_use]
    pub const fn delegated(violations: Vec<PolicyViolation>) -> Self {
        Self::Delegated { violations }
    }
}

impl Serialize for FieldError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("code", &self.kind())?;
        map.serialize_entry("message", &self.to_string())?;
        match self {
            Self::Invalid { expected } => map.serialize_entry("expected", expected)?,
            Self::TooLong { max } => map.serialize_entry("max", max)?,
            Self::Delegated { violations } => map.serialize_entry("violations", violations)?,
            Self::Required | Self::Unchanged | Self::InvalidCredential => {}
        }
        map.end()
    }
}

/// Collected field failures for one mutation input.
///
/// ## Invariants
/// - At most one [`FieldError`] per [`Field`]; the first failing rule wins.
/// - Iteration order follows [`Field`] declaration order.
///
/// # Examples
/// ```
/// use account_mutations::domain::{ErrorKind, Field, FieldError, ValidationErrors};
///
/// let mut errors = ValidationErrors::new();
/// errors.insert(Field::Username, FieldError::Unchanged);
/// errors.insert(Field::Username, FieldError::Required);
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.kind_of(Field::Username), Some(ErrorKind::Unchanged));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a collection holding one failure.
    #[must_use]
    pub fn single(field: Field, error: FieldError) -> Self {
        let mut errors = Self::new();
        errors.insert(field, error);
        errors
    }

    /// Record a failure unless the field already failed.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.entry(field).or_insert(error);
    }

    /// Record the error side of a field check, returning the success value.
    pub fn record<T>(&mut self, field: Field, outcome: Result<T, FieldError>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(error) => {
                self.insert(field, error);
                None
            }
        }
    }

    /// Failure recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Error kind recorded for `field`, if any.
    #[must_use]
    pub fn kind_of(&self, field: Field) -> Option<ErrorKind> {
        self.get(field).map(FieldError::kind)
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// Failed fields in field order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }

    /// `Ok(())` when empty, otherwise the collected failures.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")?;
        let mut separator = ": ";
        for (field, error) in self.iter() {
            write!(f, "{separator}{field}: {error}")?;
            separator = "; ";
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Failure of a mutation that also invokes the password hasher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// One or more input fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The validated new password could not be hashed.
    #[error("new password could not be hashed: {0}")]
    Hashing(#[from] CredentialError),
}

impl MutationError {
    /// Field failures, when this is a validation error.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Hashing(_) => None,
        }
    }
}
