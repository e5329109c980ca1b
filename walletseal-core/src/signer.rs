//! Wallet interfaces consumed by key derivation.
//!
//! The private key never enters this crate. Wallets are reached through these
//! two capabilities, supplied by the host (a browser extension bridge, a
//! hardware wallet, a local key for development).

use async_trait::async_trait;

use crate::error::WalletError;

/// Capability to sign a message with an account's key using the EIP-191
/// `personal_sign` scheme.
///
/// Key derivation relies on the wallet producing the same signature every time
/// the same account signs the same message (RFC 6979 deterministic nonces).
#[async_trait]
pub trait PersonalSigner: Send + Sync {
    /// Signs `message_hex` with the key of `account`.
    ///
    /// # Arguments
    ///
    /// * `message_hex` - The message as a `0x`-prefixed hex string.
    /// * `account` - The account expected to sign.
    ///
    /// # Returns
    ///
    /// The signature as a `0x`-prefixed hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the user rejects the prompt, the wallet cannot be
    /// reached, or it does not control `account`.
    async fn personal_sign(&self, message_hex: &str, account: &str) -> Result<String, WalletError>;
}

/// Source of the accounts the wallet exposes to this client.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Requests access to the wallet accounts. May prompt the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user rejects the request or the wallet cannot be reached.
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;
}
