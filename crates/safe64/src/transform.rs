//! Chunk-driven block transform over the safe-alphabet codec.

use crate::constants::{DECODED_BLOCK, ENCODED_BLOCK};
use crate::decode::{decode_into, decoded_len};
use crate::encode::{encode_into, encoded_len};
use crate::Safe64Error;

/// Direction a [`Safe64Transform`] is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Bytes in, safe-alphabet characters out (3 units → 4 units).
    Encode,
    /// Safe-alphabet characters in, bytes out (4 units → 3 units).
    Decode,
}

/// A transform that a stream pipeline can drive one chunk at a time.
///
/// Chunk boundaries need not align with the nominal block size: the
/// unaligned tail of each call (at most 2 bytes encoding, 3 characters
/// decoding) is carried into the next call. [`transform_final_block`]
/// must be invoked exactly once, after the last chunk, to emit the final
/// partial block at its exact computed size.
///
/// [`transform_final_block`]: Safe64Transform::transform_final_block
///
/// # Example
///
/// ```
/// use safe64::Safe64Transform;
///
/// let mut transform = Safe64Transform::encoder();
/// let mut out = vec![0u8; transform.output_capacity(7)];
/// let n = transform.transform_block(b"any car", &mut out).unwrap();
/// let tail = transform.transform_final_block(b"nal pleas").unwrap();
///
/// let mut encoded = out[..n].to_vec();
/// encoded.extend_from_slice(&tail);
/// assert_eq!(encoded, b"YW55IGNhcm5hbCBwbGVhcw");
/// ```
#[derive(Debug, Clone)]
pub struct Safe64Transform {
    direction: Direction,
    /// Unaligned tail of the previous call, always shorter than one input block.
    carry: [u8; 3],
    carry_len: usize,
    finalized: bool,
}

impl Safe64Transform {
    /// Creates a transform for the given direction.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            carry: [0; 3],
            carry_len: 0,
            finalized: false,
        }
    }

    /// Shorthand for `Safe64Transform::new(Direction::Encode)`.
    pub fn encoder() -> Self {
        Self::new(Direction::Encode)
    }

    /// Shorthand for `Safe64Transform::new(Direction::Decode)`.
    pub fn decoder() -> Self {
        Self::new(Direction::Decode)
    }

    /// The direction this transform was configured for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Nominal number of input units consumed per whole block: 3 when
    /// encoding, 4 when decoding.
    pub fn input_block_size(&self) -> usize {
        match self.direction {
            Direction::Encode => DECODED_BLOCK,
            Direction::Decode => ENCODED_BLOCK,
        }
    }

    /// Nominal number of output units produced per whole block: 4 when
    /// encoding, 3 when decoding.
    pub fn output_block_size(&self) -> usize {
        match self.direction {
            Direction::Encode => ENCODED_BLOCK,
            Direction::Decode => DECODED_BLOCK,
        }
    }

    /// Whole blocks are independent of each other, so a host may batch any
    /// number of them into a single call.
    pub fn can_process_multiple_blocks(&self) -> bool {
        true
    }

    /// Output capacity [`transform_block`] needs for `input_len` further
    /// input units, given what is already carried.
    ///
    /// [`transform_block`]: Safe64Transform::transform_block
    pub fn output_capacity(&self, input_len: usize) -> usize {
        (self.carry_len + input_len) / self.input_block_size() * self.output_block_size()
    }

    /// Transforms every whole block available in carried-over plus fresh
    /// input, writing into `output` and returning the number of units
    /// written. The unaligned tail is retained for the next call.
    ///
    /// # Errors
    ///
    /// Returns [`Safe64Error::InvalidCharacter`] when decoding hits a byte
    /// outside the alphabet (position relative to `input`), and
    /// [`Safe64Error::TransformFinalized`] once
    /// [`transform_final_block`](Safe64Transform::transform_final_block)
    /// has run.
    ///
    /// # Panics
    ///
    /// Panics if `output` is shorter than
    /// [`output_capacity`](Safe64Transform::output_capacity)`(input.len())`.
    pub fn transform_block(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize, Safe64Error> {
        if self.finalized {
            return Err(Safe64Error::TransformFinalized);
        }
        let in_block = self.input_block_size();
        let total = self.carry_len + input.len();
        if total < in_block {
            self.carry[self.carry_len..total].copy_from_slice(input);
            self.carry_len = total;
            return Ok(0);
        }

        let mut consumed = 0;
        let mut written = 0;
        if self.carry_len > 0 {
            let carried = self.carry_len;
            let mut block = [0u8; ENCODED_BLOCK];
            block[..carried].copy_from_slice(&self.carry[..carried]);
            consumed = in_block - carried;
            block[carried..in_block].copy_from_slice(&input[..consumed]);
            self.carry_len = 0;
            written += self
                .run(&block[..in_block], output)
                .map_err(|err| reanchor(err, |p| p.saturating_sub(carried)))?;
        }

        let remaining = &input[consumed..];
        let tail = remaining.len() % in_block;
        let aligned = remaining.len() - tail;
        written += self
            .run(&remaining[..aligned], &mut output[written..])
            .map_err(|err| reanchor(err, |p| p + consumed))?;

        self.carry[..tail].copy_from_slice(&remaining[aligned..]);
        self.carry_len = tail;
        Ok(written)
    }

    /// Drains the carry plus `input` as the last, possibly partial, block
    /// and returns the output at its exact computed size: `ceil(n * 8 / 6)`
    /// characters when encoding, `floor(n * 6 / 8)` bytes when decoding.
    ///
    /// Must be called exactly once, after the last
    /// [`transform_block`](Safe64Transform::transform_block) call.
    ///
    /// # Errors
    ///
    /// Returns [`Safe64Error::TransformFinalized`] on a second call,
    /// [`Safe64Error::TruncatedInput`] when a decode stream ends on a lone
    /// trailing character, and [`Safe64Error::InvalidCharacter`] as in
    /// [`transform_block`](Safe64Transform::transform_block).
    pub fn transform_final_block(&mut self, input: &[u8]) -> Result<Vec<u8>, Safe64Error> {
        if self.finalized {
            return Err(Safe64Error::TransformFinalized);
        }
        self.finalized = true;
        let in_block = self.input_block_size();
        let total = self.carry_len + input.len();
        let exact = match self.direction {
            Direction::Encode => encoded_len(total),
            Direction::Decode => {
                if total % ENCODED_BLOCK == 1 {
                    return Err(Safe64Error::TruncatedInput { length: total });
                }
                decoded_len(total)
            }
        };

        let mut out = vec![0u8; exact];
        let carried = self.carry_len;
        self.carry_len = 0;
        let written = if carried == 0 {
            self.run(input, &mut out)?
        } else {
            let take = (in_block - carried).min(input.len());
            let mut block = [0u8; ENCODED_BLOCK];
            block[..carried].copy_from_slice(&self.carry[..carried]);
            block[carried..carried + take].copy_from_slice(&input[..take]);
            let head = self
                .run(&block[..carried + take], &mut out)
                .map_err(|err| reanchor(err, |p| p.saturating_sub(carried)))?;
            let tail = self
                .run(&input[take..], &mut out[head..])
                .map_err(|err| reanchor(err, |p| p + take))?;
            head + tail
        };
        debug_assert_eq!(written, exact, "final size formula disagrees with units written");
        Ok(out)
    }

    fn run(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, Safe64Error> {
        match self.direction {
            Direction::Encode => Ok(encode_into(src, dst)),
            Direction::Decode => decode_into(src, dst),
        }
    }
}

/// Re-anchors a decode error position from an internal subslice to the
/// caller's input slice. Positions inside a carried partial block clamp
/// to 0.
fn reanchor(err: Safe64Error, map: impl Fn(usize) -> usize) -> Safe64Error {
    match err {
        Safe64Error::InvalidCharacter { byte, position } => Safe64Error::InvalidCharacter {
            byte,
            position: map(position),
        },
        other => other,
    }
}
