use alloc::boxed::Box;
use alloc::collections::BinaryHeap;
use core::cmp::Ordering;

use super::{CodeTable, FrequencyTable};

/// A node of a [HuffmanTree]. Children are owned by their parent, there are no back references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
    },
    Internal {
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// The child reached by following `bit` (`false` is left, `true` is right).
    /// Leaves have no children.
    pub fn child(&self, bit: bool) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Leaf { .. } => None,
            HuffmanNode::Internal { left, right } => Some(if bit { &**right } else { &**left }),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// A binary prefix tree built for one pass, or read back from a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
    leaf_count: usize,
}

/// A partial tree waiting in the build queue. `sequence` orders entries with equal
/// frequency: leaves get their rank in symbol order, merged nodes the next free number.
struct QueueEntry {
    frequency: usize,
    sequence: usize,
    node: HuffmanNode,
}

impl QueueEntry {
    fn key(&self) -> (usize, usize) {
        (self.frequency, self.sequence)
    }
}

// BinaryHeap is a max-heap, so the ordering is reversed to pop the smallest entry first
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl HuffmanTree {
    /// Build a tree by repeatedly merging the two lowest frequency nodes.
    ///
    /// Returns `None` if the table is empty. A table with a single symbol results in a tree
    /// that only consists of one leaf.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut queue = BinaryHeap::with_capacity(frequencies.distinct_symbols());
        for (sequence, (symbol, frequency)) in frequencies.symbols().enumerate() {
            queue.push(QueueEntry {
                frequency,
                sequence,
                node: HuffmanNode::Leaf { symbol },
            });
        }
        let leaf_count = queue.len();
        let mut next_sequence = leaf_count;

        loop {
            let first = queue.pop()?;
            let Some(second) = queue.pop() else {
                return Some(HuffmanTree {
                    root: first.node,
                    leaf_count,
                });
            };
            queue.push(QueueEntry {
                frequency: first.frequency + second.frequency,
                sequence: next_sequence,
                node: HuffmanNode::Internal {
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            });
            next_sequence += 1;
        }
    }

    /// Wrap an already complete node structure. Used when reading a tree back from a frame.
    pub(crate) fn from_root(root: HuffmanNode, leaf_count: usize) -> Self {
        HuffmanTree { root, leaf_count }
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Amount of distinct symbols this tree can encode
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Derive the code of every symbol in this tree
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }
}
