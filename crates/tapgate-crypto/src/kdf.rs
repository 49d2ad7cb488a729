//! Per-message symmetric key derivation.
//!
//! Stretches the raw X25519 shared secret into an AES-256 key with
//! HKDF-SHA256 (RFC 5869): empty salt, fixed info label. Both endpoints
//! must use the label byte-for-byte or derived keys diverge.

use crate::aead::AeadKey;
use crate::x25519::SharedSecret;
use hkdf::Hkdf;
use sha2::Sha256;

/// Domain-separation label binding derived keys to this protocol.
pub const HKDF_INFO: &[u8] = b"ECIES-AES256-GCM";

/// Derive the envelope AES-256 key from an ECDH shared secret.
///
/// Deterministic: the same shared secret always yields the same key,
/// which is what lets two independently built endpoints interoperate.
/// The returned key zeroizes itself on drop.
#[must_use]
pub fn derive_envelope_key(shared: &SharedSecret) -> AeadKey {
    let hkdf = Hkdf::<Sha256>::new(None, shared.as_bytes());
    let mut okm = [0u8; 32];
    let Ok(()) = hkdf.expand(HKDF_INFO, &mut okm) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };
    AeadKey::new(okm)
}
