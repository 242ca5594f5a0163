//! A multi-pass Huffman compressor.
//!
//! Every pass builds a Huffman tree over its input, packs the input through the derived
//! code table and wraps the result in a [frame](crate::frame). The compressor keeps feeding
//! the last frame back in as long as doing so makes the output strictly smaller; the
//! decoder peels the frames off again until it reaches the one with a pass depth of zero.
//!
//! ```
//! let data = b"abracadabra abracadabra abracadabra";
//! let compressed = huffpass::compress(data).unwrap();
//! let decompressed = huffpass::decompress(&compressed).unwrap();
//! assert_eq!(&data[..], decompressed.as_slice());
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod frame;
pub mod huffman;
#[cfg(test)]
mod tests;

pub use decoding::{decompress_to_vec, DecompressError, MultiPassDecoder};
pub use encoding::{compress_to_vec, CompressError, MultiPassCompressor, PassLimit};

use alloc::vec::Vec;

/// Compress `data` with as many shrinking passes as possible.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    compress_to_vec(data, PassLimit::UntilNoGain)
}

/// Reverse every pass that [compress] applied to `data`.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, DecompressError> {
    decompress_to_vec(data)
}

/// Compress and decompress `data`, panicking if anything goes wrong or the result differs.
#[cfg(feature = "fuzz_exports")]
pub fn round_trip(data: &[u8]) {
    let compressed = compress(data).unwrap();
    let decompressed = decompress(&compressed).unwrap();
    assert!(
        decompressed == data,
        "Decoded data did not match the original input"
    );
}
