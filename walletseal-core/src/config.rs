use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ConfigError;

/// Message every account signs to derive its encryption key.
///
/// Changing it changes every derived key and makes existing envelopes
/// undecryptable.
pub const DEFAULT_SIGNING_MESSAGE: &str = "The quick brown fox jumps over the lazy dog";

/// Which representation of the wallet signature is hashed into key material.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize,
)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DigestInput {
    /// SHA-256 over the decoded signature bytes.
    #[default]
    SignatureBytes,
    /// SHA-256 over the signature text exactly as returned by the wallet
    /// (`0x`-prefixed hex). Keys derived this way match the ones produced by
    /// the browser client, which hashes the string it receives from
    /// `personal_sign`.
    SignatureText,
}

/// Parameters of the key derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DerivationConfig {
    /// Plaintext message signed by the wallet.
    pub message: String,
    /// Signature representation fed to the digest.
    pub digest_input: DigestInput,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_SIGNING_MESSAGE.to_string(),
            digest_input: DigestInput::default(),
        }
    }
}

impl DerivationConfig {
    /// Loads a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the document is not valid JSON, carries unknown
    /// fields, or sets an empty message.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.message.is_empty() {
            return Err(ConfigError::EmptyMessage);
        }
        Ok(config)
    }

    /// Returns a copy with the given digest input.
    #[must_use]
    pub fn with_digest_input(mut self, digest_input: DigestInput) -> Self {
        self.digest_input = digest_input;
        self
    }
}
