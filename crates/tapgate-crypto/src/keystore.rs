//! Key store seam for long-term identities.
//!
//! Long-term key pairs outlive sessions and live in whatever secure
//! storage the platform offers (keychain on the client, NVS on the
//! gateway). This core only sees the seam: a named-slot byte store.
//! [`MemoryKeyStore`] backs tests and simulations.

use crate::error::CryptoError;
use crate::x25519::{KeyPair, PrivateKey};
use std::collections::HashMap;
use thiserror::Error;
use zeroize::Zeroize;

/// A named-slot byte store holding secret material.
///
/// Implementors are trusted with raw private keys and are expected to
/// store them encrypted at rest.
pub trait KeyStore {
    /// Storage backend failure type.
    type Error: std::error::Error + 'static;

    /// Store a value under a slot name, replacing any previous value.
    fn put(&mut self, slot: &str, value: &[u8]) -> Result<(), Self::Error>;

    /// Fetch the value stored under a slot name, if any.
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Remove a slot. Removing an absent slot is not an error.
    fn delete(&mut self, slot: &str) -> Result<(), Self::Error>;
}

/// Failure while loading or creating a persistent identity.
#[derive(Debug, Error)]
pub enum IdentityError<E: std::error::Error + 'static> {
    /// The storage backend failed.
    #[error("key store operation failed")]
    Store(#[source] E),

    /// Key generation or stored key material was unusable.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Load the identity stored under `slot`, or generate and persist one.
///
/// The stored value is the 32-byte private key; the public key is
/// re-derived on load, so a store slot never goes stale against its
/// public half.
///
/// # Errors
///
/// Returns [`IdentityError::Store`] on backend failure and
/// [`IdentityError::Crypto`] if a stored value has the wrong length or
/// key generation fails.
pub fn load_or_generate_identity<S: KeyStore>(
    store: &mut S,
    slot: &str,
) -> Result<KeyPair, IdentityError<S::Error>> {
    if let Some(mut stored) = store.get(slot).map_err(IdentityError::Store)? {
        let private = PrivateKey::from_slice(&stored);
        stored.zeroize();
        return Ok(KeyPair::from_private(private?));
    }

    let pair = KeyPair::generate()?;
    let mut secret = pair.private().to_bytes();
    let result = store.put(slot, &secret).map_err(IdentityError::Store);
    secret.zeroize();
    result?;
    Ok(pair)
}

/// In-memory key store for tests and protocol simulations.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryKeyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryKeyStore {
    // The in-memory store cannot fail.
    type Error = std::convert::Infallible;

    fn put(&mut self, slot: &str, value: &[u8]) -> Result<(), Self::Error> {
        if let Some(mut previous) = self.slots.insert(slot.to_owned(), value.to_vec()) {
            previous.zeroize();
        }
        Ok(())
    }

    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.slots.get(slot).cloned())
    }

    fn delete(&mut self, slot: &str) -> Result<(), Self::Error> {
        if let Some(mut removed) = self.slots.remove(slot) {
            removed.zeroize();
        }
        Ok(())
    }
}

impl Drop for MemoryKeyStore {
    fn drop(&mut self) {
        for value in self.slots.values_mut() {
            value.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_then_reloads_same_identity() {
        let mut store = MemoryKeyStore::new();

        let first = load_or_generate_identity(&mut store, "device-identity").unwrap();
        let second = load_or_generate_identity(&mut store, "device-identity").unwrap();
        assert_eq!(first.public(), second.public());
    }

    #[test]
    fn distinct_slots_hold_distinct_identities() {
        let mut store = MemoryKeyStore::new();

        let device = load_or_generate_identity(&mut store, "device").unwrap();
        let client = load_or_generate_identity(&mut store, "client").unwrap();
        assert_ne!(device.public(), client.public());
    }

    #[test]
    fn delete_forces_regeneration() {
        let mut store = MemoryKeyStore::new();

        let first = load_or_generate_identity(&mut store, "identity").unwrap();
        store.delete("identity").unwrap();
        let second = load_or_generate_identity(&mut store, "identity").unwrap();
        assert_ne!(first.public(), second.public());
    }

    #[test]
    fn corrupt_slot_is_rejected() {
        let mut store = MemoryKeyStore::new();
        store.put("identity", &[0u8; 16]).unwrap();

        assert!(matches!(
            load_or_generate_identity(&mut store, "identity"),
            Err(IdentityError::Crypto(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 16
            }))
        ));
    }
}
