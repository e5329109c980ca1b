//! `WalletSeal` turns a wallet signature into a symmetric key and encrypts short
//! text payloads with it.
//!
//! The private key never leaves the wallet. The account signs a fixed message,
//! the signature is hashed with SHA-256 into an AES-256 key, and payloads are
//! encrypted with AES-CTR under a fresh random nonce into a
//! `<nonce-hex>:<ciphertext-hex>` envelope.
//!
//! ```rust,no_run
//! # async fn run(signer: &dyn walletseal_core::PersonalSigner) -> Result<(), walletseal_core::OperationError> {
//! use walletseal_core::{cipher, KeyDeriver};
//!
//! let key = KeyDeriver::default().derive("0xabc", signer).await?;
//! let envelope = cipher::encrypt(&key, "hello world")?;
//! assert_eq!(cipher::decrypt(&key, &envelope)?, "hello world");
//! # Ok(())
//! # }
//! ```
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod cipher;

mod config;
pub use config::*;

mod deriver;
pub use deriver::KeyDeriver;

mod envelope;
pub use envelope::*;

mod error;
pub use error::*;

mod key;
pub use key::*;

pub mod logger;

mod session;
pub use session::EncryptionSession;

mod signer;
pub use signer::*;

#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!("walletseal_core");
