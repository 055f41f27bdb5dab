//! Forum options mutation.
//!
//! All four options are required on every submission; a missing field is a
//! `Required` failure on that field rather than a silent skip. Values are
//! type-checked here because the payload arrives as loosely typed JSON.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::field_rules::trace_rejection;
use super::{
    Account, ChangeForumOptionsCommand, ExpectedValue, Field, FieldError, ForumOptions,
    ValidationErrors,
};

/// Submitted forum options, exactly as received.
///
/// JSON `null` is treated the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForumOptionsInput {
    /// Boolean-ish presence toggle.
    pub is_hiding_presence: Option<Value>,
    /// Non-negative integer invitation restriction.
    pub limits_private_thread_invites_to: Option<Value>,
    /// Boolean-ish started-thread subscription.
    pub subscribe_to_started_threads: Option<Value>,
    /// Boolean-ish replied-thread subscription.
    pub subscribe_to_replied_threads: Option<Value>,
}

impl ForumOptionsInput {
    /// Build a complete input from typed values.
    ///
    /// # Examples
    /// ```
    /// use account_mutations::domain::{ForumOptions, ForumOptionsInput};
    ///
    /// let input = ForumOptionsInput::from_options(&ForumOptions::default());
    /// assert!(input.is_hiding_presence.is_some());
    /// ```
    #[must_use]
    pub fn from_options(options: &ForumOptions) -> Self {
        Self {
            is_hiding_presence: Some(Value::Bool(options.is_hiding_presence)),
            limits_private_thread_invites_to: Some(Value::from(
                options.limits_private_thread_invites_to,
            )),
            subscribe_to_started_threads: Some(Value::Bool(options.subscribe_to_started_threads)),
            subscribe_to_replied_threads: Some(Value::Bool(options.subscribe_to_replied_threads)),
        }
    }
}

const TRUE_SPELLINGS: &[&str] = &[
    "t", "T", "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON", "1",
];
const FALSE_SPELLINGS: &[&str] = &[
    "f", "F", "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF", "0",
];

/// Strings must match one of the listed spellings exactly; they are neither
/// trimmed nor case-folded.
fn parse_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(text) if TRUE_SPELLINGS.contains(&text.as_str()) => Some(true),
        Value::String(text) if FALSE_SPELLINGS.contains(&text.as_str()) => Some(false),
        Value::String(_) => None,
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_non_negative_integer(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|raw| u32::try_from(raw).ok()),
        Value::String(text) => {
            let digits = text.trim();
            if !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit()) {
                digits.parse().ok()
            } else {
                None
            }
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn boolean_field(raw: Option<&Value>) -> Result<bool, FieldError> {
    let value = raw.ok_or(FieldError::Required)?;
    parse_boolean(value).ok_or(FieldError::Invalid {
        expected: ExpectedValue::Boolean,
    })
}

fn non_negative_integer_field(raw: Option<&Value>) -> Result<u32, FieldError> {
    let value = raw.ok_or(FieldError::Required)?;
    parse_non_negative_integer(value).ok_or(FieldError::Invalid {
        expected: ExpectedValue::NonNegativeInteger,
    })
}

/// Validate a forum options submission.
///
/// Every field is checked independently, so all failing fields are reported
/// together.
///
/// # Errors
/// Returns the failing fields when any option is missing or mistyped.
pub fn validate_forum_options(
    account: &Account,
    input: &ForumOptionsInput,
) -> Result<ChangeForumOptionsCommand, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let is_hiding_presence = errors.record(
        Field::IsHidingPresence,
        boolean_field(input.is_hiding_presence.as_ref()),
    );
    let limits_private_thread_invites_to = errors.record(
        Field::LimitsPrivateThreadInvitesTo,
        non_negative_integer_field(input.limits_private_thread_invites_to.as_ref()),
    );
    let subscribe_to_started_threads = errors.record(
        Field::SubscribeToStartedThreads,
        boolean_field(input.subscribe_to_started_threads.as_ref()),
    );
    let subscribe_to_replied_threads = errors.record(
        Field::SubscribeToRepliedThreads,
        boolean_field(input.subscribe_to_replied_threads.as_ref()),
    );

    let (
        Some(is_hiding_presence),
        Some(limits_private_thread_invites_to),
        Some(subscribe_to_started_threads),
        Some(subscribe_to_replied_threads),
    ) = (
        is_hiding_presence,
        limits_private_thread_invites_to,
        subscribe_to_started_threads,
        subscribe_to_replied_threads,
    )
    else {
        trace_rejection("change_forum_options", account, &errors);
        return Err(errors);
    };

    debug!(account_id = %account.id(), "forum options change validated");
    Ok(ChangeForumOptionsCommand {
        account_id: account.id(),
        options: ForumOptions {
            is_hiding_presence,
            limits_private_thread_invites_to,
            subscribe_to_started_threads,
            subscribe_to_replied_threads,
        },
    })
}
