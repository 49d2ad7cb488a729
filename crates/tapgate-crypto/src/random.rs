//! Secure random number generation.
//!
//! All randomness comes from the operating system CSPRNG. Entropy reads
//! may block briefly at boot but never suspend a cooperative scheduler.

use crate::CryptoError;

/// Fill a buffer with random bytes from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::RandomSourceFailure`] if the underlying OS
/// CSPRNG fails.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    getrandom::getrandom(buf).map_err(|_| CryptoError::RandomSourceFailure)
}

/// Generate a random 32-byte array (key-sized).
///
/// # Errors
///
/// Returns [`CryptoError::RandomSourceFailure`] if the underlying OS
/// CSPRNG fails.
pub fn random_32() -> Result<[u8; 32], CryptoError> {
    let mut buf = [0u8; 32];
    fill_random(&mut buf)?;
    Ok(buf)
}

/// Generate a random 12-byte array (GCM nonce-sized).
///
/// # Errors
///
/// Returns [`CryptoError::RandomSourceFailure`] if the underlying OS
/// CSPRNG fails.
pub fn random_12() -> Result<[u8; 12], CryptoError> {
    let mut buf = [0u8; 12];
    fill_random(&mut buf)?;
    Ok(buf)
}
