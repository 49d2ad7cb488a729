//! # TapGate Frame
//!
//! Transport frame integrity for the TapGate gateway protocol.
//!
//! Frames crossing the untrusted transport (Bluetooth, MQTT) carry a
//! CRC-32 trailer so bit errors are caught before any cryptographic
//! work happens. The checksum is the reflected IEEE 802.3 CRC-32, which
//! is what the gateway firmware computes on its end; both sides must
//! agree bit-for-bit.
//!
//! The codec has no hidden state: streaming callers own their
//! accumulator explicitly, so independent frames can be checksummed in
//! parallel without contaminating each other.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod crc32;

use thiserror::Error;

/// Size of the CRC-32 trailer appended to each frame.
pub const TRAILER_SIZE: usize = 4;

/// Frame integrity failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The frame is shorter than the checksum trailer itself.
    #[error("frame too short for checksum trailer")]
    TruncatedTrailer,

    /// The trailer checksum does not match the frame contents.
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        /// Checksum carried in the trailer
        expected: u32,
        /// Checksum recomputed over the payload
        actual: u32,
    },
}

/// Append a little-endian CRC-32 trailer over the frame's current
/// contents.
pub fn append_trailer(frame: &mut Vec<u8>) {
    let checksum = crc32::compute(frame);
    frame.extend_from_slice(&checksum.to_le_bytes());
}

/// Verify a frame's CRC-32 trailer, returning the payload without it.
///
/// # Errors
///
/// Returns [`FrameError::TruncatedTrailer`] if the frame cannot contain
/// a trailer and [`FrameError::ChecksumMismatch`] if the stored and
/// recomputed checksums disagree.
pub fn verify_trailer(frame: &[u8]) -> Result<&[u8], FrameError> {
    if frame.len() < TRAILER_SIZE {
        return Err(FrameError::TruncatedTrailer);
    }

    let (payload, trailer) = frame.split_at(frame.len() - TRAILER_SIZE);
    let mut stored = [0u8; TRAILER_SIZE];
    stored.copy_from_slice(trailer);
    let expected = u32::from_le_bytes(stored);

    let actual = crc32::compute(payload);
    if actual != expected {
        return Err(FrameError::ChecksumMismatch { expected, actual });
    }
    Ok(payload)
}
