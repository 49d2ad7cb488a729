//! Cryptographic error types.

use thiserror::Error;

/// Failures reported by the envelope cipher and key pair generator.
///
/// None of these are retried internally; retry policy belongs to the
/// transport layer. Callers relaying failures over a network should
/// collapse them to a binary success/failure signal so the error kind
/// cannot be used as a decryption oracle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// A key was not exactly 32 bytes.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// The peer public key is a low-order or otherwise invalid point.
    #[error("peer public key rejected")]
    InvalidPeerPoint,

    /// A caller-supplied output buffer cannot hold the result.
    #[error("output buffer too small: need {needed}, got {available}")]
    BufferTooSmall {
        /// Bytes required
        needed: usize,
        /// Bytes available
        available: usize,
    },

    /// The envelope is too short to contain its fixed fields.
    #[error("malformed envelope")]
    MalformedEnvelope,

    /// AEAD tag verification failed. Covers both corruption and
    /// tampering, deliberately not distinguished.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// AEAD sealing failed.
    #[error("encryption failed")]
    EncryptionFailed,

    /// The OS CSPRNG failed. Fatal, not recoverable locally.
    #[error("random number generation failed")]
    RandomSourceFailure,
}
