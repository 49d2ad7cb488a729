//! The ECIES envelope: wire layout, sealing and opening.
//!
//! Every envelope is a single byte string:
//!
//! ```text
//! [ ephemeral_public(32) | nonce(12) | ciphertext(N) | tag(16) ]
//! ```
//!
//! Total length is always plaintext length + [`ENVELOPE_OVERHEAD`].
//! Each call is an independent transaction; no session state exists.
//! All intermediate key material (ephemeral private key, raw shared
//! secret, derived AES key) lives in zeroize-on-drop types, so it is
//! wiped on success and on every early-return failure path alike.

use crate::aead::{self, Nonce};
use crate::error::CryptoError;
use crate::kdf;
use crate::x25519::{self, KeyPair, PrivateKey, PublicKey};
use tracing::{debug, trace};

/// Bytes added to a plaintext by encryption: ephemeral public key,
/// nonce and authentication tag.
pub const ENVELOPE_OVERHEAD: usize = x25519::KEY_SIZE + aead::NONCE_SIZE + aead::TAG_SIZE;

/// Offset of the nonce field.
const NONCE_OFFSET: usize = x25519::KEY_SIZE;

/// Offset of the ciphertext field.
const CIPHERTEXT_OFFSET: usize = NONCE_OFFSET + aead::NONCE_SIZE;

/// A parsed view over envelope bytes.
///
/// Borrow-only: parsing copies the two small fixed fields and keeps the
/// variable-length tail in place. Useful for transport code that wants
/// to log or route on the ephemeral key without decrypting.
#[derive(Clone, Copy)]
pub struct Envelope<'a> {
    ephemeral_public: [u8; x25519::KEY_SIZE],
    nonce: [u8; aead::NONCE_SIZE],
    sealed: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Parse an envelope from wire bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedEnvelope`] if the input is
    /// shorter than [`ENVELOPE_OVERHEAD`]. No cryptographic work is
    /// performed.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, CryptoError> {
        if bytes.len() < ENVELOPE_OVERHEAD {
            return Err(CryptoError::MalformedEnvelope);
        }

        let mut ephemeral_public = [0u8; x25519::KEY_SIZE];
        ephemeral_public.copy_from_slice(&bytes[..NONCE_OFFSET]);
        let mut nonce = [0u8; aead::NONCE_SIZE];
        nonce.copy_from_slice(&bytes[NONCE_OFFSET..CIPHERTEXT_OFFSET]);

        Ok(Self {
            ephemeral_public,
            nonce,
            sealed: &bytes[CIPHERTEXT_OFFSET..],
        })
    }

    /// The sender's ephemeral public key.
    #[must_use]
    pub fn ephemeral_public(&self) -> &[u8; x25519::KEY_SIZE] {
        &self.ephemeral_public
    }

    /// The AES-GCM nonce.
    #[must_use]
    pub fn nonce(&self) -> &[u8; aead::NONCE_SIZE] {
        &self.nonce
    }

    /// The ciphertext, excluding the tag. Same length as the plaintext.
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.sealed[..self.sealed.len() - aead::TAG_SIZE]
    }

    /// The 16-byte authentication tag.
    #[must_use]
    pub fn tag(&self) -> &[u8] {
        &self.sealed[self.sealed.len() - aead::TAG_SIZE..]
    }

    /// Ciphertext and tag as the single slice the AEAD consumes.
    #[must_use]
    pub fn sealed(&self) -> &[u8] {
        self.sealed
    }
}

/// Encrypt a payload for a recipient, returning the envelope bytes.
///
/// Generates a fresh ephemeral key pair, agrees on a shared secret with
/// the recipient's public key, derives the AES-256 key via HKDF-SHA256
/// and seals the plaintext under a random nonce.
///
/// # Errors
///
/// - [`CryptoError::InvalidPeerPoint`] if `recipient` is a low-order point
/// - [`CryptoError::RandomSourceFailure`] if the OS CSPRNG fails
/// - [`CryptoError::EncryptionFailed`] if the AEAD rejects the input
pub fn encrypt(plaintext: &[u8], recipient: &PublicKey) -> Result<Vec<u8>, CryptoError> {
    let ephemeral = KeyPair::generate()?;
    let shared = ephemeral.private().exchange(recipient)?;
    let key = kdf::derive_envelope_key(&shared);
    let nonce = Nonce::generate()?;

    let sealed = key.seal(&nonce, plaintext)?;

    let mut envelope = Vec::with_capacity(plaintext.len() + ENVELOPE_OVERHEAD);
    envelope.extend_from_slice(ephemeral.public().as_bytes());
    envelope.extend_from_slice(nonce.as_bytes());
    envelope.extend_from_slice(&sealed);

    debug!(plaintext_len = plaintext.len(), "sealed envelope");
    Ok(envelope)
}

/// Encrypt into a caller-provided buffer, returning the bytes written.
///
/// Firmware-facing variant of [`encrypt`] for callers that manage their
/// own frame buffers.
///
/// # Errors
///
/// Returns [`CryptoError::BufferTooSmall`] if `out` cannot hold
/// `plaintext.len() + ENVELOPE_OVERHEAD` bytes, plus everything
/// [`encrypt`] can fail with.
pub fn encrypt_into(
    plaintext: &[u8],
    recipient: &PublicKey,
    out: &mut [u8],
) -> Result<usize, CryptoError> {
    let needed = plaintext.len() + ENVELOPE_OVERHEAD;
    if out.len() < needed {
        return Err(CryptoError::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let envelope = encrypt(plaintext, recipient)?;
    out[..needed].copy_from_slice(&envelope);
    Ok(needed)
}

/// Decrypt an envelope with the recipient's private key.
///
/// The private key is held in its clamped form by construction, so keys
/// persisted without pre-clamping decrypt correctly.
///
/// # Errors
///
/// - [`CryptoError::MalformedEnvelope`] if shorter than the fixed fields
/// - [`CryptoError::InvalidPeerPoint`] if the ephemeral key is low-order
/// - [`CryptoError::AuthenticationFailed`] on tag mismatch; no partial
///   plaintext is returned
pub fn decrypt(envelope: &[u8], recipient: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
    let parsed = Envelope::parse(envelope)?;

    let ephemeral = PublicKey::from_bytes(*parsed.ephemeral_public());
    let shared = recipient.exchange(&ephemeral)?;
    let key = kdf::derive_envelope_key(&shared);
    let nonce = Nonce::from_bytes(*parsed.nonce());

    let plaintext = key.open(&nonce, parsed.sealed())?;
    trace!(plaintext_len = plaintext.len(), "opened envelope");
    Ok(plaintext)
}
