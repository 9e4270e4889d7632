//! Huffman tree construction and code derivation.
//!
//! The tree is built once from a frequency table with the classic greedy
//! forest-merge and is immutable afterwards. A reserved pseudo-EOF symbol
//! always participates with weight 1, so every tree can mark the logical
//! end of its own bitstream.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::freq::FrequencyTable;

/// A symbol: a byte value (0-255) or [`PSEUDO_EOF`].
pub type Symbol = u16;

/// The reserved end-of-stream symbol. Present as a leaf in every tree.
pub const PSEUDO_EOF: Symbol = 256;

/// Number of distinct symbols, pseudo-EOF included.
pub const SYMBOL_COUNT: usize = 257;

/// A tree node. A leaf holds a symbol; an internal node holds children.
///
/// Children are optional so the same shape serves the deserializer, which
/// grows a tree one path at a time. Trees produced by the builder are
/// strictly binary except for the degenerate single-leaf case (see
/// [`HuffmanTree::from_frequencies`]).
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) symbol: Option<Symbol>,
    pub(crate) left: Option<Box<Node>>,
    pub(crate) right: Option<Box<Node>>,
}

impl Node {
    pub(crate) fn leaf(symbol: Symbol) -> Self {
        Self {
            symbol: Some(symbol),
            left: None,
            right: None,
        }
    }

    pub(crate) fn internal(left: Node, right: Node) -> Self {
        Self {
            symbol: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Placeholder created while parsing a code table.
    pub(crate) fn placeholder() -> Self {
        Self {
            symbol: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Heap entry used only during construction. The weight is the aggregate
/// frequency; the sequence number makes tie-breaking among equal weights
/// deterministic. Neither survives into the finished tree.
struct HeapNode {
    weight: u64,
    seq: u32,
    node: Node,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapNode {}

/// An immutable optimal prefix-code tree over byte symbols plus pseudo-EOF.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub(crate) root: Node,
}

impl HuffmanTree {
    /// Build an optimal tree from byte frequencies.
    ///
    /// One leaf is seeded per positive-count byte, plus the pseudo-EOF
    /// leaf with weight 1. The two lightest nodes are merged repeatedly
    /// (first popped becomes the left child) until one root remains.
    ///
    /// An empty source leaves only the pseudo-EOF leaf in the forest; that
    /// leaf is wrapped under an internal root so it still gets a one-bit
    /// code, since a zero-length code cannot be decoded.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let mut forest: BinaryHeap<Reverse<HeapNode>> = BinaryHeap::new();
        let mut seq = 0u32;
        for (byte, count) in frequencies.positive_counts() {
            forest.push(Reverse(HeapNode {
                weight: count,
                seq,
                node: Node::leaf(byte as Symbol),
            }));
            seq += 1;
        }
        forest.push(Reverse(HeapNode {
            weight: 1,
            seq,
            node: Node::leaf(PSEUDO_EOF),
        }));
        seq += 1;

        while forest.len() > 1 {
            let Reverse(first) = forest.pop().unwrap();
            let Reverse(second) = forest.pop().unwrap();
            forest.push(Reverse(HeapNode {
                weight: first.weight + second.weight,
                seq,
                node: Node::internal(first.node, second.node),
            }));
            seq += 1;
        }

        let mut root = forest.pop().unwrap().0.node;
        if root.is_leaf() {
            root = Node {
                symbol: None,
                left: Some(Box::new(root)),
                right: None,
            };
        }
        Self { root }
    }

    /// Derive the symbol-to-code mapping by a full depth-first traversal.
    pub fn code_book(&self) -> CodeBook {
        let mut codes = vec![None; SYMBOL_COUNT];
        let mut path = String::new();
        collect_codes(&self.root, &mut path, &mut codes);
        CodeBook { codes }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        count_nodes(&self.root).0
    }

    /// Number of internal nodes in the tree.
    pub fn internal_count(&self) -> usize {
        count_nodes(&self.root).1
    }
}

/// Record the root-to-leaf path of every leaf (0 = left, 1 = right).
fn collect_codes(node: &Node, path: &mut String, codes: &mut [Option<String>]) {
    if let Some(symbol) = node.symbol {
        codes[symbol as usize] = Some(path.clone());
        return;
    }
    if let Some(ref left) = node.left {
        path.push('0');
        collect_codes(left, path, codes);
        path.pop();
    }
    if let Some(ref right) = node.right {
        path.push('1');
        collect_codes(right, path, codes);
        path.pop();
    }
}

fn count_nodes(node: &Node) -> (usize, usize) {
    if node.is_leaf() {
        return (1, 0);
    }
    let mut leaves = 0;
    let mut internals = 1;
    for child in [&node.left, &node.right].into_iter().flatten() {
        let (l, i) = count_nodes(child);
        leaves += l;
        internals += i;
    }
    (leaves, internals)
}

/// The symbol-to-code mapping derived from a tree.
///
/// Codes are stored as `'0'`/`'1'` strings, the same shape they take in
/// the textual code table.
#[derive(Debug, Clone)]
pub struct CodeBook {
    codes: Vec<Option<String>>,
}

impl CodeBook {
    /// The code for a symbol, if that symbol has a leaf in the tree.
    pub fn get(&self, symbol: Symbol) -> Option<&str> {
        self.codes
            .get(symbol as usize)
            .and_then(|c| c.as_deref())
    }

    /// Iterate over all `(symbol, code)` pairs, in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(sym, code)| code.as_deref().map(|c| (sym as Symbol, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a code. Never the case for a built tree.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_none())
    }
}
