//! Derivation of a symmetric key from a wallet signature.
//!
//! # Protocol
//!
//! 1. The account signs a fixed, public message with `personal_sign`.
//! 2. The signature is hashed with SHA-256.
//! 3. The digest is imported as an AES-256-CTR key.
//!
//! Because the message is constant and wallet signatures are deterministic,
//! the same account always yields the same key. The key is therefore never
//! persisted: it is derived again whenever it is needed.
//!
//! # Security
//!
//! Anyone able to obtain one signature over the message from the account can
//! derive the same key. Wallet UIs display the message before signing.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{
    config::{DerivationConfig, DigestInput},
    error::{OperationError, ProtocolError},
    key::{KeyAlgorithm, SymmetricKey, KEY_LEN},
    signer::PersonalSigner,
};

/// Turns wallet signatures into [`SymmetricKey`]s.
#[derive(Debug, Clone, Default)]
pub struct KeyDeriver {
    config: DerivationConfig,
}

impl KeyDeriver {
    /// Creates a deriver with the given configuration.
    #[must_use]
    pub const fn new(config: DerivationConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &DerivationConfig {
        &self.config
    }

    /// Returns the message to sign as a `0x`-prefixed lowercase hex string,
    /// the encoding `personal_sign` expects.
    #[must_use]
    pub fn signing_message(&self) -> String {
        format!("0x{}", hex::encode(self.config.message.as_bytes()))
    }

    /// Asks `signer` to sign the derivation message for `account` and derives
    /// the key from the signature.
    ///
    /// This triggers a signing prompt in the user's wallet.
    ///
    /// # Errors
    /// Returns [`OperationError::KeyGeneration`] if the wallet fails to sign or
    /// the signature cannot be turned into a key.
    pub async fn derive(
        &self,
        account: &str,
        signer: &dyn PersonalSigner,
    ) -> Result<SymmetricKey, OperationError> {
        log::debug!("requesting derivation signature from {account}");
        let signature = signer
            .personal_sign(&self.signing_message(), account)
            .await
            .map_err(|err| OperationError::key_generation(&ProtocolError::from(err)))?;
        self.key_from_signature(&signature)
    }

    /// Derives the key from a signature the host already obtained over
    /// [`Self::signing_message`].
    ///
    /// The signature is hex, with or without a `0x` prefix.
    ///
    /// # Errors
    /// Returns [`OperationError::KeyGeneration`] if the signature is empty or not hex.
    pub fn key_from_signature(&self, signature: &str) -> Result<SymmetricKey, OperationError> {
        let material = self
            .digest_signature(signature)
            .map_err(|err| OperationError::key_generation(&err))?;
        let key = SymmetricKey::import(*material, KeyAlgorithm::Aes256Ctr);
        log::debug!("derived key {}", key.fingerprint());
        Ok(key)
    }

    fn digest_signature(&self, signature: &str) -> Result<Zeroizing<[u8; KEY_LEN]>, ProtocolError> {
        let trimmed = signature.trim();
        let stripped = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if stripped.is_empty() {
            return Err(ProtocolError::MalformedSignature("empty signature".to_string()));
        }
        let raw = hex::decode(stripped)
            .map(Zeroizing::new)
            .map_err(|err| ProtocolError::MalformedSignature(err.to_string()))?;

        let digest = match self.config.digest_input {
            DigestInput::SignatureBytes => Sha256::digest(raw.as_slice()),
            DigestInput::SignatureText => Sha256::digest(signature.as_bytes()),
        };
        let mut material = Zeroizing::new([0u8; KEY_LEN]);
        material.copy_from_slice(&digest);
        Ok(material)
    }
}
