//! Values and interfaces shared between the encoding side
//! and the decoding side.

// --- FRAMES ---
/// Size of the fixed part of every frame: `tree_size` (8 bytes), `data_size` (8 bytes)
/// and `pass_depth` (1 byte).
pub const FRAME_HEADER_SIZE: usize = 8 + 8 + 1;
/// A frame with this pass depth is the innermost one. Decoding stops after it.
pub const TERMINAL_PASS_DEPTH: i8 = 0;
/// The pass depth is stored in a single signed byte, which caps the amount of passes.
pub const MAX_PASSES: usize = i8::MAX as usize + 1;

// --- TREES ---
/// Tag in front of an internal node of a serialized tree
pub const TREE_TAG_INTERNAL: u8 = 0x00;
/// Tag in front of a leaf of a serialized tree, followed by the symbol
pub const TREE_TAG_LEAF: u8 = 0x01;
/// Amount of distinct byte values, and therefore the maximum amount of leaves in a tree.
pub const MAX_SYMBOLS: usize = 256;
/// A full tree over 256 leaves can be at most 255 internal nodes deep.
pub const MAX_TREE_DEPTH: usize = MAX_SYMBOLS - 1;
