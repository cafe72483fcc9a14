use crate::SettingsError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Configuration for a [`TokenIssuer`](crate::TokenIssuer).
///
/// Field names follow the `JwtSettings` configuration section:
///
/// ```json
/// {
///   "JwtSettings": {
///     "Key": "a-signing-key-that-is-at-least-32-bytes",
///     "Issuer": "mediator",
///     "Audience": "mediator-clients",
///     "DurationInMinutes": 60
///   }
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialSettings {
    /// Symmetric signing key.
    pub key: String,
    /// Value stamped into, and required of, the `iss` field.
    pub issuer: String,
    /// Value stamped into, and required of, the `aud` field.
    pub audience: String,
    /// Lifetime of a freshly issued credential.
    pub duration_in_minutes: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SettingsDocument {
    Section {
        #[serde(rename = "JwtSettings")]
        settings: CredentialSettings,
    },
    Bare(CredentialSettings),
}

impl CredentialSettings {
    /// Minimum signing key length in bytes.
    pub const MIN_KEY_LEN: usize = 32;

    /// Parse settings from JSON, either as the bare object or from a document
    /// holding a `JwtSettings` section. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings = match serde_json::from_str(json)? {
            SettingsDocument::Section { settings } => settings,
            SettingsDocument::Bare(settings) => settings,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check the key length and lifetime.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.key.len() < Self::MIN_KEY_LEN {
            return Err(SettingsError::KeyTooShort {
                minimum: Self::MIN_KEY_LEN,
                actual: self.key.len(),
            });
        }
        if self.duration_in_minutes <= 0 {
            return Err(SettingsError::InvalidDuration(self.duration_in_minutes));
        }
        Ok(())
    }

    /// Lifetime of a freshly issued credential.
    pub fn lifetime(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.duration_in_minutes).unwrap_or(TimeDelta::MAX)
    }
}

impl Debug for CredentialSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("duration_in_minutes", &self.duration_in_minutes)
            .finish()
    }
}
