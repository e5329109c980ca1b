//! Transport encoding of encrypted payloads.

use std::{fmt, str::FromStr};

use crate::error::EnvelopeError;

/// Length of the counter-mode nonce in bytes.
pub const NONCE_LEN: usize = 16;

/// Initial counter block of an encryption.
pub type Nonce = [u8; NONCE_LEN];

const SEPARATOR: char = ':';

/// An encrypted payload: the nonce it was encrypted under and the ciphertext.
///
/// Serialized as `<nonce-hex>:<ciphertext-hex>` with lowercase hex. Parsing
/// accepts either case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherEnvelope {
    nonce: Nonce,
    ciphertext: Vec<u8>,
}

impl CipherEnvelope {
    /// Creates an envelope from its parts.
    #[must_use]
    pub const fn new(nonce: Nonce, ciphertext: Vec<u8>) -> Self {
        Self { nonce, ciphertext }
    }

    /// Nonce the payload was encrypted under.
    #[must_use]
    pub const fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Encrypted bytes, as long as the plaintext.
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub(crate) fn into_parts(self) -> (Nonce, Vec<u8>) {
        (self.nonce, self.ciphertext)
    }

    /// Parses `<nonce-hex>:<ciphertext-hex>`, splitting on the first `:`.
    ///
    /// # Errors
    /// Returns [`EnvelopeError`] if the separator is absent, either half is not
    /// hex, or the nonce is not [`NONCE_LEN`] bytes long.
    pub fn parse(envelope: &str) -> Result<Self, EnvelopeError> {
        let (nonce_hex, ciphertext_hex) = envelope
            .split_once(SEPARATOR)
            .ok_or(EnvelopeError::MissingSeparator)?;

        let nonce_bytes = decode_part(nonce_hex, "nonce")?;
        let nonce: Nonce =
            nonce_bytes
                .as_slice()
                .try_into()
                .map_err(|_| EnvelopeError::InvalidNonceLength {
                    expected: NONCE_LEN,
                    actual: nonce_bytes.len(),
                })?;
        let ciphertext = decode_part(ciphertext_hex, "ciphertext")?;

        Ok(Self { nonce, ciphertext })
    }
}

fn decode_part(part: &str, label: &'static str) -> Result<Vec<u8>, EnvelopeError> {
    hex::decode(part).map_err(|err| EnvelopeError::InvalidHex {
        part: label,
        reason: err.to_string(),
    })
}

impl fmt::Display for CipherEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            hex::encode(self.nonce),
            hex::encode(&self.ciphertext)
        )
    }
}

impl FromStr for CipherEnvelope {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
