//! # TapGate Crypto
//!
//! ECIES envelope cipher for the TapGate gateway protocol.
//!
//! This crate provides:
//! - X25519 key pair generation with RFC 7748 clamping
//! - Ephemeral ECDH + HKDF-SHA256 key derivation
//! - AES-256-GCM authenticated encryption
//! - A fixed-layout byte envelope interoperable with the gateway firmware
//! - A key store seam for persisting long-term identities
//!
//! ## Cryptographic Suite
//!
//! | Function | Algorithm | Reference |
//! |----------|-----------|-----------|
//! | Key Exchange | X25519 | RFC 7748 |
//! | KDF | HKDF-SHA256 | RFC 5869 |
//! | AEAD | AES-256-GCM | RFC 5116 |
//!
//! ## Wire Format
//!
//! ```text
//! Envelope := ephemeral_public_key[32] || nonce[12] || ciphertext[N] || auth_tag[16]
//! ```
//!
//! All key material is little-endian per RFC 7748; no byte-order
//! conversion happens anywhere between the client and the firmware.
//! Every operation is stateless and safe to call from multiple threads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod aead;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod keystore;
pub mod random;
pub mod x25519;

pub use envelope::{Envelope, ENVELOPE_OVERHEAD, decrypt, encrypt, encrypt_into};
pub use error::CryptoError;
pub use keystore::{KeyStore, MemoryKeyStore};
pub use x25519::{KeyPair, PrivateKey, PublicKey};

/// X25519 public key size in bytes.
pub const X25519_PUBLIC_KEY_SIZE: usize = 32;

/// X25519 private key size in bytes.
pub const X25519_PRIVATE_KEY_SIZE: usize = 32;

/// AES-256 key size in bytes.
pub const AES_KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes (96 bits).
pub const GCM_NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes (128 bits).
pub const GCM_TAG_SIZE: usize = 16;
