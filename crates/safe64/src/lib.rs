//! URL- and filename-safe base64 transcoding without padding.
//!
//! This crate provides:
//! - One-shot encoding/decoding between bytes and the safe alphabet
//!   (standard base64 ordering with `-` and `_` in place of `+` and `/`,
//!   no `=` padding emitted or accepted)
//! - A chunk-driven block transform for stream pipelines, correct for
//!   arbitrary chunk boundaries
//! - `std::io` reader/writer adapters built on that transform
//!
//! # Example
//!
//! ```
//! use safe64::{from_safe64, to_safe64};
//!
//! let encoded = to_safe64(b"hello world");
//! assert_eq!(encoded, "aGVsbG8gd29ybGQ");
//!
//! let decoded = from_safe64(&encoded).unwrap();
//! assert_eq!(decoded.as_slice(), b"hello world");
//! ```

use thiserror::Error;

mod constants;
mod decode;
mod encode;
mod stream;
mod transform;

pub use constants::{ALPHABET, ALPHABET_BYTES, DECODED_BLOCK, ENCODED_BLOCK};
pub use decode::{decode_into, decoded_len, from_safe64};
pub use encode::{encode_into, encoded_len, to_safe64};
pub use stream::{Safe64Reader, Safe64Writer};
pub use transform::{Direction, Safe64Transform};

/// Error type for safe-base64 operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Safe64Error {
    /// Decode input contained a byte outside the 64-symbol alphabet.
    #[error("invalid character {byte:#04x} at offset {position}")]
    InvalidCharacter {
        /// The offending input byte.
        byte: u8,
        /// Offset of the byte within the input slice.
        position: usize,
    },
    /// Decode input ends on a lone trailing character, which cannot hold a
    /// whole byte.
    #[error("truncated input: {length} characters do not form a whole number of bytes")]
    TruncatedInput {
        /// Total number of input characters.
        length: usize,
    },
    /// A transform operation was invoked after finalization.
    #[error("transform already finalized")]
    TransformFinalized,
}
