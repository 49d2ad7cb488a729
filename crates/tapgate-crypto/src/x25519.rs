//! X25519 key pairs and Diffie-Hellman key agreement (RFC 7748).
//!
//! Provides curve25519-based key agreement with:
//! - Explicit RFC 7748 clamping, applied exactly once when a private
//!   key is constructed
//! - Low-order point rejection
//! - Zeroization of all secret material on drop
//!
//! Keys use the little-endian wire representation of RFC 7748, which is
//! also what the gateway firmware stores and transmits.

use crate::error::CryptoError;
use crate::random;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key size for both private scalars and public points (32 bytes).
pub const KEY_SIZE: usize = 32;

/// Apply RFC 7748 clamping to a private scalar.
///
/// Clears bits 0, 1 and 2 of the first byte, clears bit 255 and sets
/// bit 254. Idempotent: clamping an already-clamped scalar is a no-op.
#[must_use]
pub const fn clamp_scalar(mut scalar: [u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    scalar[0] &= 0xF8;
    scalar[31] &= 0x7F;
    scalar[31] |= 0x40;
    scalar
}

/// X25519 private key (32 bytes, little-endian, always clamped).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; KEY_SIZE]);

/// X25519 public key (32 bytes, little-endian).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey([u8; KEY_SIZE]);

/// Raw X25519 shared secret (32 bytes).
///
/// Must be passed through the envelope KDF before use as an encryption
/// key; never used directly.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; KEY_SIZE]);

impl PrivateKey {
    /// Generate a new private key from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomSourceFailure`] if the CSPRNG fails.
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(clamp_scalar(random::random_32()?)))
    }

    /// Import a private key, clamping a copy of the supplied bytes.
    ///
    /// The caller's buffer is never mutated. Supports keys persisted
    /// without pre-clamping.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(clamp_scalar(bytes))
    }

    /// Import a private key from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the slice is not
    /// exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; KEY_SIZE] =
            slice.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Derive the public key via scalar multiplication against the
    /// X25519 base point.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        let secret = x25519_dalek::StaticSecret::from(self.0);
        PublicKey(*x25519_dalek::PublicKey::from(&secret).as_bytes())
    }

    /// Perform Diffie-Hellman key agreement with a peer public key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPeerPoint`] if the peer key is a
    /// low-order point. Such points force the shared secret to zero and
    /// must be rejected rather than silently producing a weak key.
    pub fn exchange(&self, peer_public: &PublicKey) -> Result<SharedSecret, CryptoError> {
        let secret = x25519_dalek::StaticSecret::from(self.0);
        let shared = secret.diffie_hellman(&x25519_dalek::PublicKey::from(peer_public.0));
        if shared.as_bytes() == &[0u8; KEY_SIZE] {
            return Err(CryptoError::InvalidPeerPoint);
        }
        Ok(SharedSecret(*shared.as_bytes()))
    }

    /// Export as bytes (for persistence in a secure key store).
    ///
    /// # Security
    ///
    /// The returned bytes contain the raw private key. Handle with care
    /// and zeroize after use.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0
    }
}

impl PublicKey {
    /// Import a public key from bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Import a public key from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the slice is not
    /// exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; KEY_SIZE] =
            slice.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Export public key as bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0
    }

    /// Get bytes as a reference.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl SharedSecret {
    /// Get the raw shared secret bytes.
    #[must_use]
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// A long-term or ephemeral X25519 identity.
#[derive(Clone)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomSourceFailure`] if the CSPRNG fails.
    pub fn generate() -> Result<Self, CryptoError> {
        let private = PrivateKey::generate()?;
        let public = private.public_key();
        Ok(Self { private, public })
    }

    /// Reconstruct a key pair from a stored private key.
    #[must_use]
    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    /// The private half.
    #[must_use]
    pub fn private(&self) -> &PrivateKey {
        &self.private
    }

    /// The public half.
    #[must_use]
    pub fn public(&self) -> &PublicKey {
        &self.public
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_private_key_is_clamped() {
        let private = PrivateKey::generate().unwrap();
        let bytes = private.to_bytes();
        assert_eq!(bytes[0] & 0x07, 0);
        assert_eq!(bytes[31] & 0x80, 0);
        assert_eq!(bytes[31] & 0x40, 0x40);
    }

    #[test]
    fn clamping_is_idempotent() {
        let raw = [0xFFu8; 32];
        assert_eq!(clamp_scalar(clamp_scalar(raw)), clamp_scalar(raw));
    }

    #[test]
    fn clamped_keys_derive_identical_public_keys() {
        let raw = [0xA7u8; 32];
        let once = PrivateKey::from_bytes(clamp_scalar(raw));
        let twice = PrivateKey::from_bytes(clamp_scalar(clamp_scalar(raw)));
        assert_eq!(once.public_key(), twice.public_key());
    }

    #[test]
    fn key_exchange_agrees() {
        let alice = KeyPair::generate().unwrap();
        let bob = KeyPair::generate().unwrap();

        let alice_shared = alice.private().exchange(bob.public()).unwrap();
        let bob_shared = bob.private().exchange(alice.public()).unwrap();
        assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
    }

    #[test]
    fn rejects_low_order_point() {
        let private = PrivateKey::generate().unwrap();
        let zero_point = PublicKey::from_bytes([0u8; 32]);
        assert!(matches!(
            private.exchange(&zero_point),
            Err(CryptoError::InvalidPeerPoint)
        ));
    }

    #[test]
    fn rejects_wrong_length_slices() {
        assert!(matches!(
            PrivateKey::from_slice(&[0u8; 31]),
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        ));
        assert!(PublicKey::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn keypair_from_private_matches_generate() {
        let pair = KeyPair::generate().unwrap();
        let rebuilt = KeyPair::from_private(pair.private().clone());
        assert_eq!(pair.public(), rebuilt.public());
    }

    // RFC 7748 section 6.1 test keys: Alice and Bob's published key
    // pairs and shared secret.
    #[test]
    fn rfc7748_section_6_1_vectors() {
        let alice_private = PrivateKey::from_slice(
            &hex::decode("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a")
                .unwrap(),
        )
        .unwrap();
        let alice_public = PublicKey::from_slice(
            &hex::decode("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a")
                .unwrap(),
        )
        .unwrap();
        assert_eq!(alice_private.public_key(), alice_public);

        let bob_public = PublicKey::from_slice(
            &hex::decode("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f")
                .unwrap(),
        )
        .unwrap();
        let shared = alice_private.exchange(&bob_public).unwrap();
        assert_eq!(
            shared.as_bytes().as_slice(),
            hex::decode("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742")
                .unwrap()
        );
    }
}
