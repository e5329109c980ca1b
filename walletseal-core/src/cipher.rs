//! Payload encryption with AES-256-CTR.
//!
//! Each encryption draws a fresh 16-byte nonce which is used as the initial
//! counter block; the whole block is incremented as a 128-bit big-endian
//! counter. This is the `WebCrypto` `AES-CTR` algorithm with `length: 128`.
//!
//! There is no authentication tag. A tampered envelope either fails to decode
//! as UTF-8 or decrypts to different text.

use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::{rngs::OsRng, RngCore};

use crate::{
    envelope::{CipherEnvelope, Nonce, NONCE_LEN},
    error::{OperationError, ProtocolError},
    key::{KeyAlgorithm, SymmetricKey},
};

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

/// Encrypts `plaintext` under `key` with a fresh random nonce.
///
/// Returns the envelope string `<nonce-hex>:<ciphertext-hex>`.
///
/// # Errors
/// Returns [`OperationError::Encryption`] if the system random number generator
/// or the cipher fails.
pub fn encrypt(key: &SymmetricKey, plaintext: &str) -> Result<String, OperationError> {
    let nonce = random_nonce().map_err(|err| OperationError::encryption(&err))?;
    encrypt_with_nonce(key, plaintext, nonce)
}

/// Encrypts `plaintext` under `key` with a caller-supplied nonce.
///
/// Reusing a nonce with the same key exposes the XOR of the two plaintexts.
/// Prefer [`encrypt`] unless the nonce source is managed elsewhere.
///
/// # Errors
/// Returns [`OperationError::Encryption`] if the cipher rejects its parameters.
pub fn encrypt_with_nonce(
    key: &SymmetricKey,
    plaintext: &str,
    nonce: Nonce,
) -> Result<String, OperationError> {
    let mut buffer = plaintext.as_bytes().to_vec();
    apply_keystream(key, &nonce, &mut buffer).map_err(|err| OperationError::encryption(&err))?;
    log::debug!("encrypted {} byte payload", buffer.len());
    Ok(CipherEnvelope::new(nonce, buffer).to_string())
}

/// Decrypts an envelope produced by [`encrypt`] under `key`.
///
/// A wrong key or a corrupted envelope is not detected unless the result is
/// not valid UTF-8.
///
/// # Errors
/// Returns [`OperationError::Decryption`] if the envelope is malformed, the
/// cipher fails, or the recovered bytes are not UTF-8.
pub fn decrypt(key: &SymmetricKey, envelope: &str) -> Result<String, OperationError> {
    open(key, envelope).map_err(|err| OperationError::decryption(&err))
}

fn open(key: &SymmetricKey, envelope: &str) -> Result<String, ProtocolError> {
    let (nonce, mut buffer) = CipherEnvelope::parse(envelope)?.into_parts();
    apply_keystream(key, &nonce, &mut buffer)?;
    let plaintext =
        String::from_utf8(buffer).map_err(|err| ProtocolError::InvalidUtf8(err.to_string()))?;
    log::debug!("decrypted {} byte payload", plaintext.len());
    Ok(plaintext)
}

fn apply_keystream(
    key: &SymmetricKey,
    nonce: &Nonce,
    buffer: &mut [u8],
) -> Result<(), ProtocolError> {
    match key.algorithm() {
        KeyAlgorithm::Aes256Ctr => {
            let mut cipher = Aes256Ctr::new_from_slices(key.as_bytes(), nonce)
                .map_err(|err| ProtocolError::Cipher(err.to_string()))?;
            cipher
                .try_apply_keystream(buffer)
                .map_err(|err| ProtocolError::Cipher(err.to_string()))
        }
    }
}

fn random_nonce() -> Result<Nonce, ProtocolError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|err| ProtocolError::Rng(err.to_string()))?;
    Ok(nonce)
}
