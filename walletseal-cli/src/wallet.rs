//! Local account standing in for a browser wallet extension.

use alloy::signers::{local::PrivateKeySigner, Signer};
use async_trait::async_trait;
use eyre::WrapErr;
use walletseal_core::{AccountProvider, PersonalSigner, WalletError};

/// Wallet backed by a secp256k1 private key held in memory.
///
/// Signs with EIP-191 `personal_sign` and RFC 6979 nonces, like browser
/// wallets do, so keys derived through it match the ones derived through an
/// extension holding the same private key.
pub struct LocalWallet {
    signer: PrivateKeySigner,
}

impl LocalWallet {
    /// Loads the wallet from a hex private key (with or without `0x`).
    pub fn from_private_key(private_key: &str) -> eyre::Result<Self> {
        let signer: PrivateKeySigner = private_key.trim().parse().wrap_err("invalid private key")?;
        Ok(Self { signer })
    }

    /// Checksummed address of the account.
    pub fn address(&self) -> String {
        self.signer.address().to_string()
    }
}

#[async_trait]
impl AccountProvider for LocalWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        Ok(vec![self.address()])
    }
}

#[async_trait]
impl PersonalSigner for LocalWallet {
    async fn personal_sign(&self, message_hex: &str, account: &str) -> Result<String, WalletError> {
        if !account.eq_ignore_ascii_case(&self.address()) {
            return Err(WalletError::AccountMismatch(format!(
                "wallet controls {}, asked to sign for {account}",
                self.address()
            )));
        }
        let message = hex::decode(message_hex.trim_start_matches("0x"))
            .map_err(|err| WalletError::Other(format!("message is not hex: {err}")))?;
        tracing::debug!(account, bytes = message.len(), "signing personal message");
        let signature = self
            .signer
            .sign_message(&message)
            .await
            .map_err(|err| WalletError::Other(err.to_string()))?;
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}
