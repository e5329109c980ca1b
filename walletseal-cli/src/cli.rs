//! Command definitions and execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{eyre, WrapErr};
use walletseal_core::{
    cipher, DerivationConfig, DigestInput, EncryptionSession, KeyDeriver, OperationError,
};

use crate::wallet::LocalWallet;

/// WalletSeal developer CLI: wallet-bound encryption with a local account
#[derive(Parser, Debug)]
#[command(name = "walletseal")]
#[command(version, about)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Hex private key of the account standing in for the wallet
    #[arg(
        long,
        env = "WALLETSEAL_PRIVATE_KEY",
        hide_env_values = true,
        global = true
    )]
    pub private_key: Option<String>,

    /// JSON derivation config file (`message`, `digest_input`)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Signature representation hashed into the key: signature-bytes or signature-text
    #[arg(long, global = true)]
    pub digest_input: Option<DigestInput>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the account address of the local wallet
    Account,
    /// Print the hex message the wallet signs to derive the key
    Message,
    /// Derive the key and print its fingerprint
    Fingerprint,
    /// Encrypt a text payload into a `<nonce-hex>:<ciphertext-hex>` envelope
    Encrypt {
        /// Text to encrypt
        plaintext: String,
    },
    /// Decrypt an envelope produced by `encrypt`
    Decrypt {
        /// Envelope to decrypt
        envelope: String,
    },
}

impl Cli {
    /// Executes the command and returns what should be printed.
    pub async fn run(self) -> eyre::Result<String> {
        let config = self.load_config()?;
        let deriver = KeyDeriver::new(config);

        match self.command {
            Commands::Message => Ok(deriver.signing_message()),
            Commands::Account => Ok(self.wallet()?.address()),
            Commands::Fingerprint => {
                let session = connect(&self.wallet()?, &deriver).await?;
                Ok(session.key().fingerprint())
            }
            Commands::Encrypt { ref plaintext } => {
                let session = connect(&self.wallet()?, &deriver).await?;
                cipher::encrypt(session.key(), plaintext).map_err(report)
            }
            Commands::Decrypt { ref envelope } => {
                let session = connect(&self.wallet()?, &deriver).await?;
                session.decrypt(envelope.trim()).map_err(report)
            }
        }
    }

    fn load_config(&self) -> eyre::Result<DerivationConfig> {
        let config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?;
                DerivationConfig::from_json(&json)?
            }
            None => DerivationConfig::default(),
        };
        Ok(match self.digest_input {
            Some(digest_input) => config.with_digest_input(digest_input),
            None => config,
        })
    }

    fn wallet(&self) -> eyre::Result<LocalWallet> {
        let private_key = self
            .private_key
            .as_deref()
            .ok_or_else(|| eyre!("--private-key or WALLETSEAL_PRIVATE_KEY is required"))?;
        LocalWallet::from_private_key(private_key)
    }
}

async fn connect(wallet: &LocalWallet, deriver: &KeyDeriver) -> eyre::Result<EncryptionSession> {
    let session = EncryptionSession::connect(wallet, wallet, deriver)
        .await
        .map_err(report)?;
    tracing::info!(
        account = session.account(),
        fingerprint = %session.key().fingerprint(),
        "derived encryption key"
    );
    Ok(session)
}

fn report(err: OperationError) -> eyre::Report {
    match err.trace() {
        Some(trace) => eyre!("{err}: {trace}"),
        None => eyre!("{err}"),
    }
}
