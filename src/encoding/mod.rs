//! Modules used for compressing/encoding data into the multi-pass frame format.
pub mod bit_writer;
mod pass_compressor;
pub use pass_compressor::*;

use alloc::vec::Vec;

use crate::huffman::CodeTable;
use bit_writer::BitWriter;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PackError {
    #[error("Symbol 0x{symbol:02X} at offset {offset} has no code in the table. The table was not built from this input")]
    MissingCode { symbol: u8, offset: usize },
}

/// Replace every byte of `input` by its code and pack the resulting bitstream into bytes,
/// most significant bit first. The last byte is padded with zeros.
pub fn pack(input: &[u8], codes: &CodeTable) -> Result<Vec<u8>, PackError> {
    let mut writer = BitWriter::with_capacity(input.len() / 2);
    for (offset, symbol) in input.iter().copied().enumerate() {
        let code = codes
            .get(symbol)
            .ok_or(PackError::MissingCode { symbol, offset })?;
        for (bits, num_bits) in code.chunks() {
            writer.write_bits(bits, num_bits);
        }
    }
    Ok(writer.finish())
}
