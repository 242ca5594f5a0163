//! Errors that might occur while decompressing data.

use crate::frame::ReadFrameError;
use crate::huffman::TreeDeserializeError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UnpackError {
    #[error("Bitstream ended after {decoded} of {expected} symbols")]
    UnexpectedEndOfStream { decoded: usize, expected: usize },
    #[error("Bit {bit_idx} leads to a branch the tree does not have")]
    MissingChild { bit_idx: usize },
    #[error("{expected} symbols need at least as many bits, but the payload only has {available}")]
    NotEnoughBits { expected: usize, available: usize },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodePassError {
    #[error(transparent)]
    ReadFrameError(#[from] ReadFrameError),
    #[error(transparent)]
    TreeDeserializeError(#[from] TreeDeserializeError),
    #[error(transparent)]
    UnpackError(#[from] UnpackError),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error("Failed to decode the frame with pass depth {pass_depth}: {source}")]
    FailedToDecodePass {
        pass_depth: i8,
        #[source]
        source: DecodePassError,
    },
    #[error("Failed to read frame: {0}")]
    FailedToReadFrame(#[source] ReadFrameError),
    #[error("Pass depth must not be negative, got: {got}")]
    NegativePassDepth { got: i8 },
    #[error("Frame nested in a frame with pass depth {outer} has pass depth {got}, should be: {}", .outer - 1)]
    PassDepthMismatch { outer: i8, got: i8 },
}
