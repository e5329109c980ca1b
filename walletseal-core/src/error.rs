use thiserror::Error;

/// Category of the failure behind an [`OperationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The wallet rejected, failed to produce or returned an unusable signature.
    Signing,
    /// The cryptographic primitive is missing or rejected its parameters.
    CryptoUnavailable,
    /// Malformed envelope, or recovered bytes that are not UTF-8.
    Decode,
}

/// Error outputs from `WalletSeal` operations.
///
/// The `Display` output is the user-facing message. The underlying diagnostic
/// is kept apart in [`OperationError::trace`] so hosts can log it without
/// showing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error))]
#[cfg_attr(feature = "ffi", uniffi(flat_error))]
pub enum OperationError {
    /// Deriving the symmetric key from a wallet signature failed.
    #[error("Error generating the key")]
    KeyGeneration {
        /// Failure category.
        kind: ErrorKind,
        /// Diagnostic detail of the underlying failure.
        trace: Option<String>,
    },
    /// Encrypting a payload failed.
    #[error("Error encrypting the data")]
    Encryption {
        /// Failure category.
        kind: ErrorKind,
        /// Diagnostic detail of the underlying failure.
        trace: Option<String>,
    },
    /// Decrypting an envelope failed.
    #[error("Error decrypting the data")]
    Decryption {
        /// Failure category.
        kind: ErrorKind,
        /// Diagnostic detail of the underlying failure.
        trace: Option<String>,
    },
}

impl OperationError {
    pub(crate) fn key_generation(err: &ProtocolError) -> Self {
        let error = Self::KeyGeneration {
            kind: err.kind(),
            trace: Some(err.to_string()),
        };
        error.report();
        error
    }

    pub(crate) fn encryption(err: &ProtocolError) -> Self {
        let error = Self::Encryption {
            kind: err.kind(),
            trace: Some(err.to_string()),
        };
        error.report();
        error
    }

    pub(crate) fn decryption(err: &ProtocolError) -> Self {
        let error = Self::Decryption {
            kind: err.kind(),
            trace: Some(err.to_string()),
        };
        error.report();
        error
    }

    /// Human-readable message meant to be shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyGeneration { kind, .. }
            | Self::Encryption { kind, .. }
            | Self::Decryption { kind, .. } => *kind,
        }
    }

    /// Diagnostic detail of the underlying failure, if any.
    #[must_use]
    pub fn trace(&self) -> Option<&str> {
        match self {
            Self::KeyGeneration { trace, .. }
            | Self::Encryption { trace, .. }
            | Self::Decryption { trace, .. } => trace.as_deref(),
        }
    }

    fn report(&self) {
        log::error!(
            "{self} ({}): {}",
            self.kind(),
            self.trace().unwrap_or("no diagnostic available")
        );
    }
}

/// Errors surfaced by wallet collaborators (signers and account providers).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error))]
#[cfg_attr(feature = "ffi", uniffi(flat_error))]
pub enum WalletError {
    /// The user declined the request in the wallet UI.
    #[error("user rejected the request: {0}")]
    Rejected(String),
    /// No wallet is reachable.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
    /// The wallet does not control the requested account.
    #[error("account mismatch: {0}")]
    AccountMismatch(String),
    /// Any other wallet failure.
    #[error("wallet error: {0}")]
    Other(String),
}

/// Errors raised while parsing a `<nonce-hex>:<ciphertext-hex>` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The `:` separator between nonce and ciphertext is absent.
    #[error("missing ':' separator between nonce and ciphertext")]
    MissingSeparator,
    /// One half of the envelope is not valid hex.
    #[error("invalid hex in {part}: {reason}")]
    InvalidHex {
        /// Which half failed (`nonce` or `ciphertext`).
        part: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },
    /// The decoded nonce does not have the fixed nonce length.
    #[error("nonce must be {expected} bytes, got {actual}")]
    InvalidNonceLength {
        /// Required nonce length in bytes.
        expected: usize,
        /// Decoded nonce length in bytes.
        actual: usize,
    },
}

/// Errors raised while loading a [`crate::DerivationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The message to sign is empty.
    #[error("invalid configuration: message to sign must not be empty")]
    EmptyMessage,
}

/// Internal failures, converted to an [`OperationError`] at the operation boundary.
#[derive(Debug, Error)]
pub(crate) enum ProtocolError {
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("no wallet account available")]
    NoAccount,
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
    #[error("random number generator unavailable: {0}")]
    Rng(String),
    #[error("cipher rejected parameters: {0}")]
    Cipher(String),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    #[error("decrypted data is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

impl ProtocolError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::Wallet(_) | Self::NoAccount | Self::MalformedSignature(_) => ErrorKind::Signing,
            Self::Rng(_) | Self::Cipher(_) => ErrorKind::CryptoUnavailable,
            Self::Envelope(_) | Self::InvalidUtf8(_) => ErrorKind::Decode,
        }
    }
}
