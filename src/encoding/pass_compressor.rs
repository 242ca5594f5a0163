//! Utilities and interfaces for running the compression passes. Every pass wraps
//! the frame produced by the previous one.

use alloc::vec::Vec;
use core::num::NonZeroU8;

use super::{pack, PackError};
use crate::common::{MAX_PASSES, TERMINAL_PASS_DEPTH};
use crate::frame::{Frame, FrameHeader};
use crate::huffman::{FrequencyTable, HuffmanTree};

/// How many passes the compressor may apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PassLimit {
    /// Keep going as long as every new pass makes the output smaller.
    ///
    /// The pass depth is stored in a signed byte, so this still stops after 128 passes.
    #[default]
    UntilNoGain,
    /// Same as [PassLimit::UntilNoGain] but stop after the given amount of passes.
    AtMost(NonZeroU8),
}

impl PassLimit {
    fn max_passes(self) -> usize {
        match self {
            PassLimit::UntilNoGain => MAX_PASSES,
            PassLimit::AtMost(passes) => usize::from(passes.get()).min(MAX_PASSES),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error(transparent)]
    PackError(#[from] PackError),
}

/// The result of [MultiPassCompressor::compress]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedOutput {
    /// The outermost frame, containing all other passes
    pub data: Vec<u8>,
    /// Amount of frames nested in `data`, at least one
    pub passes: usize,
}

/// Run a single pass over `input` and return the resulting frame.
///
/// An empty input results in a frame without a tree and without payload.
pub fn compress_pass(input: &[u8], pass_depth: i8) -> Result<Vec<u8>, CompressError> {
    let frequencies = FrequencyTable::count(input);
    let mut tree = Vec::new();
    let payload = match HuffmanTree::build(&frequencies) {
        Some(huffman_tree) => {
            huffman_tree.serialize(&mut tree);
            pack(input, &huffman_tree.code_table())?
        }
        None => Vec::new(),
    };
    tracing::trace!(
        symbols = frequencies.distinct_symbols(),
        tree_size = tree.len(),
        payload_size = payload.len(),
        "built pass"
    );

    let header = FrameHeader {
        tree_size: tree.len() as u64,
        data_size: input.len() as u64,
        pass_depth,
    };
    let mut output = Vec::new();
    Frame::write(&header, &tree, &payload, &mut output);
    Ok(output)
}

/// An interface for compressing data with repeated Huffman passes.
///
/// # Examples
/// ```
/// use huffpass::encoding::{MultiPassCompressor, PassLimit};
/// let compressor = MultiPassCompressor::new(PassLimit::UntilNoGain);
/// let output = compressor.compress(&[b'A'; 1000]).unwrap();
/// assert!(output.passes > 1);
/// assert!(output.data.len() < 1000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiPassCompressor {
    pass_limit: PassLimit,
}

impl MultiPassCompressor {
    /// Create a new `MultiPassCompressor`
    pub fn new(pass_limit: PassLimit) -> Self {
        Self { pass_limit }
    }

    /// Replace the pass limit, returning the previous one
    pub fn set_pass_limit(&mut self, pass_limit: PassLimit) -> PassLimit {
        core::mem::replace(&mut self.pass_limit, pass_limit)
    }

    /// Get the current pass limit
    pub fn pass_limit(&self) -> PassLimit {
        self.pass_limit
    }

    /// Compress `input`.
    ///
    /// The first pass is always kept, even if its frame is larger than the input, because
    /// the decoder needs at least one frame. Every further pass is kept only if its frame
    /// is strictly smaller than the one it wraps.
    pub fn compress(&self, input: &[u8]) -> Result<CompressedOutput, CompressError> {
        let max_passes = self.pass_limit.max_passes();

        let mut current = compress_pass(input, TERMINAL_PASS_DEPTH)?;
        let mut passes = 1;
        tracing::debug!(
            input_size = input.len(),
            frame_size = current.len(),
            "first pass done"
        );

        while passes < max_passes {
            // The new frame wraps `passes` frames, which is how many rounds the decoder
            // has left after unpacking it
            let Ok(pass_depth) = i8::try_from(passes) else {
                break;
            };
            let candidate = compress_pass(&current, pass_depth)?;
            if candidate.len() >= current.len() {
                tracing::debug!(
                    pass_depth,
                    previous_size = current.len(),
                    frame_size = candidate.len(),
                    "pass did not shrink the data, dropping it"
                );
                break;
            }
            tracing::debug!(
                pass_depth,
                previous_size = current.len(),
                frame_size = candidate.len(),
                "pass shrank the data"
            );
            current = candidate;
            passes += 1;
        }

        Ok(CompressedOutput {
            data: current,
            passes,
        })
    }
}

/// Convenience function to compress some source into a new vec.
///
/// ```
/// use huffpass::encoding::{compress_to_vec, PassLimit};
/// let compressed = compress_to_vec(b"hello hello hello", PassLimit::UntilNoGain).unwrap();
/// # let _ = compressed;
/// ```
pub fn compress_to_vec(source: &[u8], pass_limit: PassLimit) -> Result<Vec<u8>, CompressError> {
    Ok(MultiPassCompressor::new(pass_limit).compress(source)?.data)
}

#[cfg(test)]
mod tests {
    use super::{compress_pass, MultiPassCompressor, PassLimit};
    use crate::common::FRAME_HEADER_SIZE;
    use crate::frame::Frame;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::num::NonZeroU8;

    #[test]
    fn empty_pass_has_no_tree() {
        let frame = compress_pass(&[], 0).unwrap();
        assert_eq!(frame.len(), FRAME_HEADER_SIZE);
        let parsed = Frame::parse(&frame).unwrap();
        assert_eq!(parsed.header.tree_size, 0);
        assert_eq!(parsed.header.data_size, 0);
        assert!(parsed.payload.is_empty());
    }

    #[test]
    fn pass_frame_layout() {
        let frame = compress_pass(b"abbcccc", 3).unwrap();
        let parsed = Frame::parse(&frame).unwrap();
        assert_eq!(parsed.header.tree_size, 8);
        assert_eq!(parsed.header.data_size, 7);
        assert_eq!(parsed.header.pass_depth, 3);
        assert_eq!(parsed.payload, &[0b0001_0111, 0b1100_0000]);
    }

    #[test]
    fn incompressible_input_keeps_first_pass() {
        let input: Vec<u8> = (0..=255u8).collect();
        let output = MultiPassCompressor::default().compress(&input).unwrap();
        assert_eq!(output.passes, 1);
        assert_eq!(output.data, compress_pass(&input, 0).unwrap());
        assert!(output.data.len() > input.len());
    }

    #[test]
    fn repeated_passes_are_nested() {
        let input = vec![0u8; 10_000];
        let output = MultiPassCompressor::default().compress(&input).unwrap();
        assert!(output.passes > 1);
        let outer = Frame::parse(&output.data).unwrap();
        assert_eq!(outer.header.pass_depth as usize, output.passes - 1);
    }

    #[test]
    fn pass_limit_is_respected() {
        let input = vec![7u8; 10_000];
        let mut compressor = MultiPassCompressor::new(PassLimit::AtMost(NonZeroU8::MIN));
        let output = compressor.compress(&input).unwrap();
        assert_eq!(output.passes, 1);
        assert_eq!(Frame::parse(&output.data).unwrap().header.pass_depth, 0);

        let old = compressor.set_pass_limit(PassLimit::UntilNoGain);
        assert_eq!(old, PassLimit::AtMost(NonZeroU8::MIN));
        assert_eq!(compressor.pass_limit(), PassLimit::UntilNoGain);
        assert!(compressor.compress(&input).unwrap().passes > 1);
    }
}
