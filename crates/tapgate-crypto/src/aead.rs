//! AES-256-GCM authenticated encryption.
//!
//! The AEAD half of the envelope cipher:
//! - 256-bit keys (always KDF output, never raw ECDH secrets)
//! - 96-bit random nonces
//! - 128-bit authentication tags appended to the ciphertext
//! - No associated data; frame-level integrity is the checksum codec's job
//!
//! Ciphertext length always equals plaintext length plus [`TAG_SIZE`].

use crate::error::CryptoError;
use crate::random;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key};
use zeroize::ZeroizeOnDrop;

/// AEAD key size (32 bytes / 256 bits).
pub const KEY_SIZE: usize = 32;

/// GCM nonce size (12 bytes / 96 bits).
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size (16 bytes / 128 bits).
pub const TAG_SIZE: usize = 16;

/// AES-GCM nonce (12 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Create a nonce from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a nonce from a slice.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != NONCE_SIZE {
            return None;
        }
        let mut bytes = [0u8; NONCE_SIZE];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Generate a random nonce from the OS CSPRNG.
    ///
    /// A fresh ephemeral key is derived per message, so random 96-bit
    /// nonces never repeat under the same key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomSourceFailure`] if the CSPRNG fails.
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(random::random_12()?))
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// Derived AES-256 encryption key.
///
/// Exists only for the duration of one encrypt/decrypt call and is
/// zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct AeadKey([u8; KEY_SIZE]);

impl AeadKey {
    /// Wrap raw key material.
    #[must_use]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Encrypt and authenticate, returning `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncryptionFailed`] if the cipher rejects
    /// the input (plaintext beyond the GCM length bound).
    pub fn seal(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0));
        cipher
            .encrypt(aes_gcm::Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|_| CryptoError::EncryptionFailed)
    }

    /// Decrypt and verify `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::AuthenticationFailed`] on tag mismatch.
    /// No partial plaintext is ever returned; corruption and tampering
    /// are deliberately indistinguishable.
    pub fn open(&self, nonce: &Nonce, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0));
        cipher
            .decrypt(aes_gcm::Nonce::from_slice(&nonce.0), sealed)
            .map_err(|_| CryptoError::AuthenticationFailed)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}
