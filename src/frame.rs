//! Reading and writing single frames.
//!
//! A frame is a fixed size [FrameHeader] followed by `tree_size` bytes of serialized
//! [HuffmanTree](crate::huffman::HuffmanTree) and the packed payload, which takes up the
//! rest of the buffer. All header fields are little-endian.

use alloc::vec::Vec;

use crate::common::{FRAME_HEADER_SIZE, TERMINAL_PASS_DEPTH};

/// The fixed size part at the start of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Byte length of the serialized tree following the header
    pub tree_size: u64,
    /// Byte length of the data this frame decodes to, which is also the amount of
    /// symbols that are stored in the payload
    pub data_size: u64,
    /// How many more frames are nested inside the decoded data of this frame
    pub pass_depth: i8,
}

impl FrameHeader {
    /// Serialize the frame header into a buffer
    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.extend_from_slice(&self.tree_size.to_le_bytes());
        output.extend_from_slice(&self.data_size.to_le_bytes());
        output.extend_from_slice(&self.pass_depth.to_le_bytes());
    }

    /// True if no other frame is hidden in the decoded data of this one
    pub fn is_terminal(&self) -> bool {
        self.pass_depth == TERMINAL_PASS_DEPTH
    }
}

/// A frame split into its three sections. The slices borrow from the parsed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub header: FrameHeader,
    pub tree: &'a [u8],
    pub payload: &'a [u8],
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReadFrameError {
    #[error("Frame header needs {} bytes but only {got} are available", FRAME_HEADER_SIZE)]
    HeaderTooShort { got: usize },
    #[error("Header declares a tree of {tree_size} bytes but only {available} bytes follow the header")]
    TreeSizeTooLarge { tree_size: u64, available: usize },
    #[error("Header declares {data_size} bytes of data, which does not fit into memory on this platform")]
    SizeOverflow { data_size: u64 },
}

/// Parse the header at the start of `source` and return it together with the amount of bytes it occupied.
pub fn read_frame_header(source: &[u8]) -> Result<(FrameHeader, usize), ReadFrameError> {
    use ReadFrameError as err;

    if source.len() < FRAME_HEADER_SIZE {
        return Err(err::HeaderTooShort { got: source.len() });
    }
    let (tree_size, rest) = source.split_at(8);
    let (data_size, rest) = rest.split_at(8);

    let header = FrameHeader {
        tree_size: u64::from_le_bytes(to_array(tree_size)),
        data_size: u64::from_le_bytes(to_array(data_size)),
        pass_depth: i8::from_le_bytes([rest[0]]),
    };
    Ok((header, FRAME_HEADER_SIZE))
}

fn to_array(bytes: &[u8]) -> [u8; 8] {
    let mut array = [0; 8];
    array.copy_from_slice(bytes);
    array
}

impl<'a> Frame<'a> {
    /// Split `source` into header, tree and payload. The payload is everything after the tree.
    pub fn parse(source: &'a [u8]) -> Result<Self, ReadFrameError> {
        let (header, header_len) = read_frame_header(source)?;
        let rest = &source[header_len..];

        let tree_size = header
            .tree_size
            .try_into()
            .ok()
            .filter(|tree_size: &usize| *tree_size <= rest.len())
            .ok_or(ReadFrameError::TreeSizeTooLarge {
                tree_size: header.tree_size,
                available: rest.len(),
            })?;
        let (tree, payload) = rest.split_at(tree_size);

        Ok(Frame {
            header,
            tree,
            payload,
        })
    }

    /// Amount of bytes this frame decodes to
    pub fn data_size(&self) -> Result<usize, ReadFrameError> {
        self.header
            .data_size
            .try_into()
            .map_err(|_| ReadFrameError::SizeOverflow {
                data_size: self.header.data_size,
            })
    }

    /// Assemble a frame from its parts
    pub fn write(header: &FrameHeader, tree: &[u8], payload: &[u8], output: &mut Vec<u8>) {
        output.reserve(FRAME_HEADER_SIZE + tree.len() + payload.len());
        header.serialize(output);
        output.extend_from_slice(tree);
        output.extend_from_slice(payload);
    }
}
