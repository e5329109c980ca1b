//! Symmetric key handle produced by key derivation.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the symmetric key material in bytes.
pub const KEY_LEN: usize = 32;

/// Cipher a [`SymmetricKey`] is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// AES-256 in counter mode with a 128-bit big-endian counter block.
    Aes256Ctr,
}

impl KeyAlgorithm {
    /// Algorithm name as used by the `WebCrypto` API.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Aes256Ctr => "AES-CTR",
        }
    }
}

/// Opaque symmetric key usable only to encrypt and decrypt payloads.
///
/// The raw key material never leaves the crate.
///
/// # Security
///
/// - The key is zeroized on drop.
/// - `Debug` never prints the material.
/// - Equality is evaluated in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "ffi", derive(uniffi::Object))]
pub struct SymmetricKey {
    material: [u8; KEY_LEN],
    #[zeroize(skip)]
    algorithm: KeyAlgorithm,
}

impl SymmetricKey {
    pub(crate) const fn import(material: [u8; KEY_LEN], algorithm: KeyAlgorithm) -> Self {
        Self {
            material,
            algorithm,
        }
    }

    pub(crate) const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.material
    }

    /// Cipher this key was derived for.
    #[must_use]
    pub const fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }
}

#[cfg_attr(feature = "ffi", uniffi::export)]
impl SymmetricKey {
    /// Non-secret identifier of the key: hex of the first 8 bytes of
    /// SHA-256 over the key material.
    ///
    /// Useful to tell keys apart in logs and UIs without revealing them.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.material);
        hex::encode(&digest[..8])
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm
            && bool::from(self.material[..].ct_eq(&other.material[..]))
    }
}

impl Eq for SymmetricKey {}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("algorithm", &self.algorithm)
            .field("material", &"[REDACTED]")
            .finish()
    }
}
