//! Structures and utilities used for decoding multi-pass frames

pub mod bit_reader;
pub mod errors;
mod pass_decoder;
mod unpack;

pub use errors::{DecodePassError, DecompressError, UnpackError};
pub use pass_decoder::*;
pub use unpack::unpack;
