//! Reflected IEEE 802.3 CRC-32.
//!
//! Parameters, fixed by the firmware's implementation:
//! - Polynomial `0x04C11DB7`, reflected form [`POLYNOMIAL`]
//! - Initial state [`INIT`] (`0xFFFFFFFF`)
//! - Final XOR `0xFFFFFFFF`
//! - Input and output reflected (LSB-first)
//!
//! Processing is table-driven, one byte at a time, over a 256-entry
//! table built at compile time. The in-progress state is not a valid
//! checksum until [`finalize`] applies the final XOR.
//!
//! Reference vector: `compute(b"123456789") == 0xCBF43926`.

/// Reflected CRC-32 polynomial.
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Initial accumulator state.
pub const INIT: u32 = 0xFFFF_FFFF;

/// Final XOR applied by [`finalize`].
const FINAL_XOR: u32 = 0xFFFF_FFFF;

/// Byte-indexed lookup table derived from [`POLYNOMIAL`].
static TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut index = 0;
    while index < 256 {
        let mut crc = index as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[index] = crc;
        index += 1;
    }
    table
}

/// One-shot CRC-32 of a complete buffer.
///
/// Pure function of the input bytes; equivalent to
/// `finalize(update(INIT, data))`.
#[must_use]
pub fn compute(data: &[u8]) -> u32 {
    finalize(update(INIT, data))
}

/// Advance an in-progress accumulator by one chunk.
///
/// Start from [`INIT`] and feed chunks in order; the result is
/// identical to a one-shot [`compute`] over the concatenation. The
/// returned state is not a checksum until passed to [`finalize`].
#[must_use]
pub fn update(state: u32, chunk: &[u8]) -> u32 {
    let mut crc = state;
    for &byte in chunk {
        let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = (crc >> 8) ^ TABLE[index];
    }
    crc
}

/// Apply the final XOR, producing the checksum value.
#[must_use]
pub fn finalize(state: u32) -> u32 {
    state ^ FINAL_XOR
}

/// Streaming CRC-32 accumulator.
///
/// Value-typed wrapper over [`update`]/[`finalize`] for callers that
/// prefer a digest-style API. Each frame owns its own accumulator;
/// there is no shared or global state.
#[derive(Clone, Copy, Debug)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Create an accumulator in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self { state: INIT }
    }

    /// Feed a chunk of bytes.
    pub fn update(&mut self, chunk: &[u8]) {
        self.state = update(self.state, chunk);
    }

    /// Consume the accumulator and produce the checksum.
    #[must_use]
    pub fn finalize(self) -> u32 {
        finalize(self.state)
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
