//! Storing a [HuffmanTree] inside a frame.
//!
//! The tree is written in pre-order. Every node starts with a tag byte,
//! [TREE_TAG_INTERNAL] is followed by the left and then the right subtree,
//! [TREE_TAG_LEAF] is followed by the symbol of the leaf.

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::{HuffmanNode, HuffmanTree};
use crate::common::{MAX_SYMBOLS, MAX_TREE_DEPTH, TREE_TAG_INTERNAL, TREE_TAG_LEAF};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeDeserializeError {
    #[error("Unknown node tag 0x{tag:02X} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("Tree description ended after {got} bytes while a node was still being read")]
    Truncated { got: usize },
    #[error("Tree description is {available} bytes long but the tree only used {used}")]
    TrailingBytes { used: usize, available: usize },
    #[error("Tree is nested deeper than {} levels", MAX_TREE_DEPTH)]
    TooDeep,
    #[error("Tree has more than {} leaves", MAX_SYMBOLS)]
    TooManyLeaves,
    #[error("Symbol 0x{symbol:02X} appears in more than one leaf")]
    DuplicateSymbol { symbol: u8 },
}

impl HuffmanTree {
    /// Append the pre-order description of this tree to `output`
    pub fn serialize(&self, output: &mut Vec<u8>) {
        fn write_node(node: &HuffmanNode, output: &mut Vec<u8>) {
            match node {
                HuffmanNode::Leaf { symbol } => {
                    output.push(TREE_TAG_LEAF);
                    output.push(*symbol);
                }
                HuffmanNode::Internal { left, right } => {
                    output.push(TREE_TAG_INTERNAL);
                    write_node(left, output);
                    write_node(right, output);
                }
            }
        }
        write_node(self.root(), output);
    }

    /// Amount of bytes [HuffmanTree::serialize] will produce: two per leaf, one per internal node
    pub fn serialized_len(&self) -> usize {
        self.leaf_count() * 3 - 1
    }

    /// Rebuild a tree from exactly the bytes in `source`
    pub fn deserialize(source: &[u8]) -> Result<HuffmanTree, TreeDeserializeError> {
        let mut reader = TreeReader {
            source,
            offset: 0,
            leaf_count: 0,
            seen: [false; MAX_SYMBOLS],
        };
        let root = reader.read_node(0)?;
        if reader.offset != source.len() {
            return Err(TreeDeserializeError::TrailingBytes {
                used: reader.offset,
                available: source.len(),
            });
        }
        Ok(HuffmanTree::from_root(root, reader.leaf_count))
    }
}

struct TreeReader<'s> {
    source: &'s [u8],
    offset: usize,
    leaf_count: usize,
    seen: [bool; MAX_SYMBOLS],
}

impl TreeReader<'_> {
    fn next_byte(&mut self) -> Result<u8, TreeDeserializeError> {
        let byte = *self
            .source
            .get(self.offset)
            .ok_or(TreeDeserializeError::Truncated { got: self.offset })?;
        self.offset += 1;
        Ok(byte)
    }

    fn read_node(&mut self, depth: usize) -> Result<HuffmanNode, TreeDeserializeError> {
        use TreeDeserializeError as err;

        let offset = self.offset;
        match self.next_byte()? {
            TREE_TAG_LEAF => {
                let symbol = self.next_byte()?;
                if self.leaf_count == MAX_SYMBOLS {
                    return Err(err::TooManyLeaves);
                }
                if self.seen[symbol as usize] {
                    return Err(err::DuplicateSymbol { symbol });
                }
                self.seen[symbol as usize] = true;
                self.leaf_count += 1;
                Ok(HuffmanNode::Leaf { symbol })
            }
            TREE_TAG_INTERNAL => {
                if depth >= MAX_TREE_DEPTH {
                    return Err(err::TooDeep);
                }
                let left = self.read_node(depth + 1)?;
                let right = self.read_node(depth + 1)?;
                Ok(HuffmanNode::Internal {
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            tag => Err(err::UnknownTag { tag, offset }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TreeDeserializeError;
    use crate::huffman::{FrequencyTable, HuffmanTree};
    use alloc::vec;
    use alloc::vec::Vec;

    fn serialized(tree: &HuffmanTree) -> Vec<u8> {
        let mut output = Vec::new();
        tree.serialize(&mut output);
        output
    }

    #[test]
    fn layout_is_pre_order() {
        let tree = HuffmanTree::build(&FrequencyTable::count(b"abbcccc")).unwrap();
        assert_eq!(
            serialized(&tree),
            vec![0x00, 0x00, 0x01, b'a', 0x01, b'b', 0x01, b'c']
        );
        assert_eq!(tree.serialized_len(), 8);
    }

    #[test]
    fn single_leaf() {
        let tree = HuffmanTree::build(&FrequencyTable::count(b"AAA")).unwrap();
        let bytes = serialized(&tree);
        assert_eq!(bytes, vec![0x01, b'A']);
        assert_eq!(HuffmanTree::deserialize(&bytes).unwrap(), tree);
    }

    #[test]
    fn round_trip_keeps_codes() {
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|symbol| core::iter::repeat(symbol).take(symbol as usize / 3 + 1))
            .collect();
        let tree = HuffmanTree::build(&FrequencyTable::count(&data)).unwrap();
        let bytes = serialized(&tree);
        assert_eq!(bytes.len(), tree.serialized_len());

        let read = HuffmanTree::deserialize(&bytes).unwrap();
        assert_eq!(read.leaf_count(), 256);
        assert_eq!(read.code_table(), tree.code_table());
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!(matches!(
            HuffmanTree::deserialize(&[0x00, 0x01, b'a', 0x07]),
            Err(TreeDeserializeError::UnknownTag { tag: 0x07, offset: 3 })
        ));
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(matches!(
            HuffmanTree::deserialize(&[]),
            Err(TreeDeserializeError::Truncated { got: 0 })
        ));
        assert!(matches!(
            HuffmanTree::deserialize(&[0x00, 0x01, b'a']),
            Err(TreeDeserializeError::Truncated { got: 3 })
        ));
        assert!(matches!(
            HuffmanTree::deserialize(&[0x01]),
            Err(TreeDeserializeError::Truncated { got: 1 })
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert!(matches!(
            HuffmanTree::deserialize(&[0x01, b'a', 0x01, b'b']),
            Err(TreeDeserializeError::TrailingBytes {
                used: 2,
                available: 4
            })
        ));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        assert!(matches!(
            HuffmanTree::deserialize(&[0x00, 0x01, b'a', 0x01, b'a']),
            Err(TreeDeserializeError::DuplicateSymbol { symbol: b'a' })
        ));
    }

    #[test]
    fn rejects_more_leaves_than_symbols() {
        let data: Vec<u8> = (0..=255u8).collect();
        let tree = HuffmanTree::build(&FrequencyTable::count(&data)).unwrap();
        let mut bytes = serialized(&tree);
        // split the last leaf into two, the second one repeating its symbol
        let last_symbol = bytes.pop().unwrap();
        assert_eq!(bytes.pop(), Some(0x01));
        bytes.extend_from_slice(&[0x00, 0x01, last_symbol, 0x01, last_symbol]);

        // the leaf limit is hit before the repeated symbol is noticed
        assert!(matches!(
            HuffmanTree::deserialize(&bytes),
            Err(TreeDeserializeError::TooManyLeaves)
        ));
    }

    #[test]
    fn rejects_deep_nesting() {
        let bytes = vec![0x00; 10_000];
        assert!(matches!(
            HuffmanTree::deserialize(&bytes),
            Err(TreeDeserializeError::TooDeep)
        ));
    }
}
