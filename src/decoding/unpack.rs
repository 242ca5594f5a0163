use alloc::vec::Vec;

use super::bit_reader::BitReader;
use super::errors::UnpackError;
use crate::huffman::{HuffmanNode, HuffmanTree};

/// Decode `symbols` symbols from `payload` by walking `tree` bit by bit.
///
/// Bits left over after the last symbol are padding and are never looked at, even if they
/// would form more codes.
pub fn unpack(payload: &[u8], tree: &HuffmanTree, symbols: usize) -> Result<Vec<u8>, UnpackError> {
    use UnpackError as err;

    // every symbol takes at least one bit, checking this first keeps a corrupted
    // data size from turning into a huge allocation
    let available = payload.len().saturating_mul(8);
    if symbols > available {
        return Err(err::NotEnoughBits {
            expected: symbols,
            available,
        });
    }

    let mut output = Vec::with_capacity(symbols);
    let mut reader = BitReader::new(payload);
    let root = tree.root();

    // A tree that is only a leaf encodes its symbol as a single zero bit
    if let HuffmanNode::Leaf { symbol } = root {
        while output.len() < symbols {
            match reader.get_bit() {
                Some(false) => output.push(*symbol),
                Some(true) => {
                    return Err(err::MissingChild {
                        bit_idx: reader.bits_read() - 1,
                    })
                }
                None => {
                    return Err(err::UnexpectedEndOfStream {
                        decoded: output.len(),
                        expected: symbols,
                    })
                }
            }
        }
        return Ok(output);
    }

    let mut node = root;
    while output.len() < symbols {
        let bit = reader.get_bit().ok_or(err::UnexpectedEndOfStream {
            decoded: output.len(),
            expected: symbols,
        })?;
        node = node.child(bit).ok_or(err::MissingChild {
            bit_idx: reader.bits_read() - 1,
        })?;
        if let HuffmanNode::Leaf { symbol } = node {
            output.push(*symbol);
            node = root;
        }
    }

    Ok(output)
}
