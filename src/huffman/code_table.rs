use alloc::vec;
use alloc::vec::Vec;

use super::{HuffmanNode, HuffmanTree};
use crate::common::{MAX_SYMBOLS, MAX_TREE_DEPTH};

const WORD_BITS: usize = u64::BITS as usize;
const CODE_WORDS: usize = MAX_TREE_DEPTH.div_ceil(WORD_BITS);

/// The bitstring assigned to one symbol.
///
/// A tree over 256 symbols can be up to 255 levels deep, so the bits are kept in four
/// words, the first bit of the code in the most significant bit of the first word.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Code {
    words: [u64; CODE_WORDS],
    len: u8,
}

impl Code {
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bit at position `idx`, counted from the root of the tree.
    ///
    /// # Panics
    /// If `idx` is not smaller than [Code::len]
    pub fn bit(&self, idx: usize) -> bool {
        assert!(idx < self.len(), "bit {idx} of a {} bit code", self.len);
        (self.words[idx / WORD_BITS] >> (WORD_BITS - 1 - idx % WORD_BITS)) & 1 == 1
    }

    /// A copy of this code with `bit` appended
    fn with_bit(mut self, bit: bool) -> Code {
        let idx = self.len();
        debug_assert!(idx < MAX_TREE_DEPTH, "code longer than the deepest possible tree");
        if bit {
            self.words[idx / WORD_BITS] |= 1 << (WORD_BITS - 1 - idx % WORD_BITS);
        }
        self.len += 1;
        self
    }

    /// The code split into chunks of at most 64 bits. Each chunk is returned as
    /// `(bits, num_bits)` with the bits in the lower `num_bits` of the value, which is the
    /// shape [BitWriter::write_bits](crate::encoding::bit_writer::BitWriter::write_bits) expects.
    pub fn chunks(&self) -> impl Iterator<Item = (u64, u8)> + '_ {
        let len = self.len();
        self.words
            .iter()
            .enumerate()
            .take_while(move |(word_idx, _)| word_idx * WORD_BITS < len)
            .map(move |(word_idx, word)| {
                let num_bits = (len - word_idx * WORD_BITS).min(WORD_BITS);
                (word >> (WORD_BITS - num_bits), num_bits as u8)
            })
    }

    /// True if every bit of `self` matches the start of `other`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len()).all(|idx| self.bit(idx) == other.bit(idx))
    }
}

impl core::fmt::Debug for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Code(")?;
        for idx in 0..self.len() {
            f.write_str(if self.bit(idx) { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}

/// Maps every symbol of a [HuffmanTree] to its [Code].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Index is the symbol, symbols missing from the tree have no code
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walk the tree and record the path to every leaf, left being `0` and right being `1`.
    ///
    /// A tree that is just a single leaf assigns the one bit code `0` to its symbol, a code
    /// without any bits could not be told apart from padding.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; MAX_SYMBOLS];

        if let HuffmanNode::Leaf { symbol } = tree.root() {
            codes[*symbol as usize] = Some(Code::default().with_bit(false));
            return CodeTable { codes };
        }

        let mut pending: Vec<(&HuffmanNode, Code)> = Vec::with_capacity(MAX_TREE_DEPTH);
        pending.push((tree.root(), Code::default()));
        while let Some((node, code)) = pending.pop() {
            match node {
                HuffmanNode::Leaf { symbol } => codes[*symbol as usize] = Some(code),
                HuffmanNode::Internal { left, right } => {
                    pending.push((&**right, code.with_bit(true)));
                    pending.push((&**left, code.with_bit(false)));
                }
            }
        }

        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// All symbols that have a code, in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    /// Amount of symbols that have a code
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that no code is the prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        self.iter().all(|(symbol, code)| {
            self.iter()
                .all(|(other_symbol, other)| symbol == other_symbol || !code.is_prefix_of(other))
        })
    }
}
