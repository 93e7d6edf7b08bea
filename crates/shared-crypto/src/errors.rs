//! Error types for cryptographic primitives.

/// Errors raised by hashing, digest, and recovery operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("malformed signature")]
    MalformedSignature,

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("signature recovery failed")]
    RecoveryFailed,
}
