//! Peeling the frames of a multi-pass artifact off again.

use alloc::vec::Vec;

use super::errors::{DecodePassError, DecompressError};
use super::unpack::unpack;
use crate::frame::{Frame, FrameHeader};
use crate::huffman::HuffmanTree;

/// Decode the data of a single frame. Nested frames inside the result are not touched.
pub fn decode_pass(frame: &Frame<'_>) -> Result<Vec<u8>, DecodePassError> {
    let data_size = frame.data_size()?;
    // Only an empty input produces a frame without a tree
    if frame.tree.is_empty() && data_size == 0 {
        return Ok(Vec::new());
    }
    let tree = HuffmanTree::deserialize(frame.tree)?;
    tracing::trace!(
        leaves = tree.leaf_count(),
        tree_size = frame.tree.len(),
        payload_size = frame.payload.len(),
        data_size,
        "read pass"
    );
    Ok(unpack(frame.payload, &tree, data_size)?)
}

/// Low level decompression interface. Reverses every pass of a compressed buffer.
///
/// # Examples
/// ```
/// use huffpass::decoding::MultiPassDecoder;
/// let compressed = huffpass::compress(&[0x41; 64]).unwrap();
///
/// let mut decoder = MultiPassDecoder::new();
/// let decompressed = decoder.decode_all(&compressed).unwrap();
/// assert_eq!(decompressed, [0x41; 64]);
/// assert!(decoder.passes_decoded() >= 1);
/// ```
#[derive(Debug, Default)]
pub struct MultiPassDecoder {
    passes_decoded: usize,
}

impl MultiPassDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount of frames the last call to [MultiPassDecoder::decode_all] unpacked
    pub fn passes_decoded(&self) -> usize {
        self.passes_decoded
    }

    /// Decode `source` until the frame with a pass depth of zero has been unpacked.
    pub fn decode_all(&mut self, source: &[u8]) -> Result<Vec<u8>, DecompressError> {
        self.passes_decoded = 0;

        let (mut decoded, mut header) = self.decode_frame(source, None)?;
        while !header.is_terminal() {
            let outer = header.pass_depth;
            (decoded, header) = self.decode_frame(&decoded, Some(outer))?;
        }
        Ok(decoded)
    }

    /// Decode all of `source` and append the result to `target`.
    ///
    /// `target` is only extended once every pass has been decoded successfully, a failing
    /// pass leaves it unchanged.
    pub fn decode_all_to_vec(
        &mut self,
        source: &[u8],
        target: &mut Vec<u8>,
    ) -> Result<(), DecompressError> {
        let decoded = self.decode_all(source)?;
        target.extend_from_slice(&decoded);
        Ok(())
    }

    fn decode_frame(
        &mut self,
        source: &[u8],
        outer_depth: Option<i8>,
    ) -> Result<(Vec<u8>, FrameHeader), DecompressError> {
        use DecompressError as err;

        let frame = Frame::parse(source).map_err(err::FailedToReadFrame)?;
        let pass_depth = frame.header.pass_depth;
        if pass_depth < 0 {
            return Err(err::NegativePassDepth { got: pass_depth });
        }
        if let Some(outer) = outer_depth {
            if pass_depth != outer - 1 {
                return Err(err::PassDepthMismatch {
                    outer,
                    got: pass_depth,
                });
            }
        }

        let decoded = decode_pass(&frame)
            .map_err(|source| err::FailedToDecodePass { pass_depth, source })?;
        self.passes_decoded += 1;
        tracing::debug!(
            pass_depth,
            frame_size = source.len(),
            decoded_size = decoded.len(),
            "decoded pass"
        );
        Ok((decoded, frame.header))
    }
}

/// Convenience function to decompress a whole buffer into a new vec.
pub fn decompress_to_vec(source: &[u8]) -> Result<Vec<u8>, DecompressError> {
    MultiPassDecoder::new().decode_all(source)
}
