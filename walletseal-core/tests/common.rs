//! Common test utilities shared across integration tests.
#![allow(dead_code, missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use walletseal_core::{AccountProvider, PersonalSigner, WalletError};

/// The only account of [`MockWallet`].
pub const ACCOUNT: &str = "0xabc0000000000000000000000000000000000abc";

/// Signature bytes `0x01..=0x20`.
pub const FIXED_SIGNATURE: &str =
    "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20";

/// Envelope of `"hello world"` under the key of [`FIXED_SIGNATURE`] and an all-zero nonce.
pub const GOLDEN_ENVELOPE: &str = "00000000000000000000000000000000:fed2ec9a789d09c07e1b14";

/// Wallet stand-in with a single account that always returns the same signature.
pub struct MockWallet {
    accounts: Vec<String>,
    signature: String,
    sign_requests: AtomicUsize,
}

impl MockWallet {
    /// Wallet controlling [`ACCOUNT`] that answers every prompt with `signature`.
    pub fn new(signature: &str) -> Self {
        Self {
            accounts: vec![ACCOUNT.to_string()],
            signature: signature.to_string(),
            sign_requests: AtomicUsize::new(0),
        }
    }

    /// Wallet that exposes no account.
    pub fn without_accounts() -> Self {
        Self {
            accounts: Vec::new(),
            ..Self::new(FIXED_SIGNATURE)
        }
    }

    /// Number of signing prompts received so far.
    pub fn sign_requests(&self) -> usize {
        self.sign_requests.load(Ordering::SeqCst)
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new(FIXED_SIGNATURE)
    }
}

#[async_trait]
impl AccountProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        Ok(self.accounts.clone())
    }
}

#[async_trait]
impl PersonalSigner for MockWallet {
    async fn personal_sign(&self, message_hex: &str, account: &str) -> Result<String, WalletError> {
        self.sign_requests.fetch_add(1, Ordering::SeqCst);
        if !message_hex.starts_with("0x") {
            return Err(WalletError::Other(format!(
                "message is not 0x-prefixed hex: {message_hex}"
            )));
        }
        if !self.accounts.iter().any(|a| a == account) {
            return Err(WalletError::AccountMismatch(account.to_string()));
        }
        Ok(self.signature.clone())
    }
}

/// Wallet whose user rejects every prompt.
pub struct RejectingWallet;

#[async_trait]
impl AccountProvider for RejectingWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        Err(WalletError::Rejected("User rejected the request.".to_string()))
    }
}

#[async_trait]
impl PersonalSigner for RejectingWallet {
    async fn personal_sign(&self, _: &str, _: &str) -> Result<String, WalletError> {
        Err(WalletError::Rejected("User denied message signature.".to_string()))
    }
}
