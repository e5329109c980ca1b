use crate::{
    cipher,
    deriver::KeyDeriver,
    error::{OperationError, ProtocolError},
    key::SymmetricKey,
    signer::{AccountProvider, PersonalSigner},
};

/// A connected account together with the key derived for it.
///
/// Holds no other state: every encryption draws its own nonce, so a session can
/// be shared across threads and used concurrently.
#[derive(Debug)]
pub struct EncryptionSession {
    account: String,
    key: SymmetricKey,
}

impl EncryptionSession {
    /// Creates a session from an account and a key already derived for it.
    #[must_use]
    pub const fn new(account: String, key: SymmetricKey) -> Self {
        Self { account, key }
    }

    /// Requests the wallet accounts, selects the first one, and derives its key.
    ///
    /// The wallet may prompt twice: once to expose its accounts and once to sign.
    ///
    /// # Errors
    /// Returns [`OperationError::KeyGeneration`] if the wallet exposes no account,
    /// fails either request, or returns an unusable signature.
    pub async fn connect(
        provider: &dyn AccountProvider,
        signer: &dyn PersonalSigner,
        deriver: &KeyDeriver,
    ) -> Result<Self, OperationError> {
        let accounts = provider
            .request_accounts()
            .await
            .map_err(|err| OperationError::key_generation(&ProtocolError::from(err)))?;
        let account = accounts
            .into_iter()
            .next()
            .ok_or_else(|| OperationError::key_generation(&ProtocolError::NoAccount))?;
        log::info!("deriving encryption key for {account}");
        let key = deriver.derive(&account, signer).await?;
        Ok(Self { account, key })
    }

    /// Account the key belongs to.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Key derived for [`Self::account`].
    #[must_use]
    pub const fn key(&self) -> &SymmetricKey {
        &self.key
    }

    /// Encrypts `plaintext` under the session key. See [`cipher::encrypt`].
    ///
    /// # Errors
    /// Returns [`OperationError::Encryption`] on failure.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, OperationError> {
        cipher::encrypt(&self.key, plaintext)
    }

    /// Decrypts `envelope` under the session key. See [`cipher::decrypt`].
    ///
    /// # Errors
    /// Returns [`OperationError::Decryption`] on failure.
    pub fn decrypt(&self, envelope: &str) -> Result<String, OperationError> {
        cipher::decrypt(&self.key, envelope)
    }
}
