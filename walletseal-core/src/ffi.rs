//! Foreign-language surface exported through `UniFFI`.
//!
//! Signing stays on the host side: the host asks its wallet to sign
//! [`signing_message`] and hands the signature to
//! [`derive_key_from_signature`]. Keys cross the boundary only as opaque
//! objects.

#![allow(clippy::needless_pass_by_value)]

use std::sync::Arc;

use crate::{cipher, DerivationConfig, DigestInput, KeyDeriver, OperationError, SymmetricKey};

/// Returns the `0x`-prefixed hex message to pass to `personal_sign`.
#[uniffi::export]
#[must_use]
pub fn signing_message() -> String {
    KeyDeriver::default().signing_message()
}

/// Derives the encryption key from a signature over [`signing_message`].
///
/// # Errors
/// Returns [`OperationError::KeyGeneration`] if the signature is not hex.
#[uniffi::export]
pub fn derive_key_from_signature(
    signature_hex: String,
    digest_input: DigestInput,
) -> Result<Arc<SymmetricKey>, OperationError> {
    let deriver = KeyDeriver::new(DerivationConfig::default().with_digest_input(digest_input));
    deriver.key_from_signature(&signature_hex).map(Arc::new)
}

/// Encrypts `plaintext` into a `<nonce-hex>:<ciphertext-hex>` envelope.
///
/// # Errors
/// Returns [`OperationError::Encryption`] on failure.
#[uniffi::export]
pub fn encrypt_payload(
    key: Arc<SymmetricKey>,
    plaintext: String,
) -> Result<String, OperationError> {
    cipher::encrypt(&key, &plaintext)
}

/// Decrypts an envelope produced by [`encrypt_payload`].
///
/// # Errors
/// Returns [`OperationError::Decryption`] on failure.
#[uniffi::export]
pub fn decrypt_payload(key: Arc<SymmetricKey>, envelope: String) -> Result<String, OperationError> {
    cipher::decrypt(&key, &envelope)
}
