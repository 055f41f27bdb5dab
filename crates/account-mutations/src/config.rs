//! Account mutation configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default upper bound for signature length, in characters.
pub const DEFAULT_SIGNATURE_LENGTH_MAX: usize = 256;

/// Configuration values consumed by the mutation validators.
///
/// Values are passed explicitly into each validator; nothing reads them from
/// global state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNT_MUTATIONS")]
pub struct AccountMutationSettings {
    /// Maximum signature length in characters.
    #[ortho_config(default = DEFAULT_SIGNATURE_LENGTH_MAX)]
    pub signature_length_max: usize,
}

impl AccountMutationSettings {
    /// Build settings directly, bypassing file and environment layers.
    ///
    /// # Examples
    /// ```
    /// use account_mutations::config::AccountMutationSettings;
    ///
    /// let settings = AccountMutationSettings::new(500);
    /// assert_eq!(settings.signature_length_max, 500);
    /// ```
    #[must_use]
    pub const fn new(signature_length_max: usize) -> Self {
        Self {
            signature_length_max,
        }
    }
}
