//! Frequency counting and tree construction for the huffman coder.
//!
//! Every node lives in a fixed arena of 513 slots and refers to other nodes by index:
//! - 0..=255 are the leaves for each byte value,
//! - 256 is the end of stream leaf,
//! - 257.. are internal nodes, handed out in order as merges happen.
//!
//! 257 leaves never need more than 256 merges, so the last internal node can be no higher
//! than 512. Nothing is allocated or moved once the arena exists.

use std::io::{self, Read};

use log::{debug, trace};

use crate::tools::freq_count::freqs;

/// Symbol written once after the data to mark the end of the stream.
pub const EOF_SYMBOL: u16 = 256;
/// First arena slot used for merges.
pub const FIRST_INTERNAL: u16 = 257;
/// Highest index a node can have.
pub const MAX_NODE: u16 = 512;
/// Number of slots in the arena.
pub const ARENA_SLOTS: usize = MAX_NODE as usize + 1;

/// One arena slot. A leaf has no children, an internal node has both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub weight: u64,
    pub left: Option<u16>,
    pub right: Option<u16>,
    pub parent: Option<u16>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A finished huffman tree: the arena plus the index of its root.
#[derive(Clone, Debug)]
pub struct HuffTree {
    nodes: Vec<Node>,
    root: u16,
}

impl HuffTree {
    /// Wrap an arena whose child links are set, filling in the parent links from them.
    pub(crate) fn from_children(mut nodes: Vec<Node>, root: u16) -> Self {
        debug_assert_eq!(nodes.len(), ARENA_SLOTS);
        for x in FIRST_INTERNAL..=root {
            let node = nodes[x as usize];
            for child in [node.left, node.right].into_iter().flatten() {
                nodes[child as usize].parent = Some(x);
            }
        }
        Self { nodes, root }
    }

    pub fn root(&self) -> u16 {
        self.root
    }

    pub fn node(&self, idx: u16) -> &Node {
        &self.nodes[idx as usize]
    }

    /// Child of internal node `idx` taken for `bit`: 0 goes left, anything else right.
    ///
    /// Panics if `idx` is a leaf. Both build() and read_header() give every internal node two
    /// children, so only a caller that skips the is_leaf() check can get here.
    pub fn child(&self, idx: u16, bit: u8) -> u16 {
        let node = &self.nodes[idx as usize];
        let child = if bit == 0 { node.left } else { node.right };
        child.unwrap_or_else(|| panic!("node {} is a leaf and has no children", idx))
    }

    /// Number of merges the tree holds. Zero for the single leaf tree.
    pub fn internal_nodes(&self) -> usize {
        self.root.saturating_sub(EOF_SYMBOL) as usize
    }

    /// A full binary tree always has one more leaf than it has internal nodes.
    pub fn leaves(&self) -> usize {
        self.internal_nodes() + 1
    }

    /// True if `symbol` is a leaf reachable from the root.
    pub fn contains(&self, symbol: u16) -> bool {
        symbol == self.root || self.nodes[symbol as usize].parent.is_some()
    }
}

/// Builds the tree weights and shape from the input bytes.
pub struct SymbolTable {
    nodes: Vec<Node>,
    /// Links of the sorted list of subtrees still waiting to be merged. Only used by build().
    free_list: Vec<Option<u16>>,
    head: Option<u16>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default(); ARENA_SLOTS],
            free_list: vec![None; ARENA_SLOTS],
            head: None,
        }
    }

    /// Count every byte of `source` until it is exhausted, plus the single end of stream
    /// symbol. Returns the number of bytes read.
    pub fn count<R: Read>(&mut self, source: R) -> io::Result<u64> {
        let counts = freqs(source)?;
        for (symbol, &n) in counts.iter().enumerate() {
            self.nodes[symbol].weight += n;
        }
        self.nodes[EOF_SYMBOL as usize].weight += 1;
        Ok(counts.iter().sum())
    }

    /// Add `weight` occurrences of a leaf symbol (0..=256).
    pub fn add(&mut self, symbol: u16, weight: u64) {
        assert!(symbol <= EOF_SYMBOL, "{} is not a leaf symbol", symbol);
        self.nodes[symbol as usize].weight += weight;
    }

    #[cfg(test)]
    fn weight(&self, symbol: u16) -> u64 {
        self.nodes[symbol as usize].weight
    }

    /// Splice `idx` into the waiting list, ahead of the first entry that weighs at least as much.
    fn insert(&mut self, idx: u16) {
        let weight = self.nodes[idx as usize].weight;
        let mut prev: Option<u16> = None;
        let mut cursor = self.head;
        while let Some(c) = cursor {
            if self.nodes[c as usize].weight >= weight {
                break;
            }
            prev = cursor;
            cursor = self.free_list[c as usize];
        }
        self.free_list[idx as usize] = cursor;
        match prev {
            None => self.head = Some(idx),
            Some(p) => self.free_list[p as usize] = Some(idx),
        }
    }

    /// Join two subtrees under the internal node `parent`.
    fn merge(&mut self, left: u16, right: u16, parent: u16) {
        let weight = self.nodes[left as usize].weight + self.nodes[right as usize].weight;
        self.nodes[parent as usize] = Node {
            weight,
            left: Some(left),
            right: Some(right),
            parent: None,
        };
        self.nodes[left as usize].parent = Some(parent);
        self.nodes[right as usize].parent = Some(parent);
        trace!("Merged {} and {} into {} (weight {})", left, right, parent, weight);
    }

    /// Run the huffman merges: keep taking the two lightest subtrees off the front of the
    /// sorted list and putting their parent back in, until one subtree is left.
    ///
    /// Panics if no symbol has been counted. Counting any input, even an empty one, always
    /// counts the end of stream symbol.
    pub fn build(mut self) -> HuffTree {
        for symbol in 0..=EOF_SYMBOL {
            if self.nodes[symbol as usize].weight != 0 {
                self.insert(symbol);
            }
        }
        let Some(mut first) = self.head else {
            panic!("cannot build a huffman tree when every weight is zero");
        };

        let mut next_internal = FIRST_INTERNAL;
        while let Some(second) = self.free_list[first as usize] {
            self.head = self.free_list[second as usize];
            self.merge(first, second, next_internal);
            self.insert(next_internal);
            first = self.head.unwrap_or(next_internal);
            next_internal += 1;
        }

        let tree = HuffTree {
            nodes: self.nodes,
            root: first,
        };
        debug!(
            "Built huffman tree: {} leaves, root at {}, total weight {}.",
            tree.leaves(),
            tree.root(),
            tree.node(tree.root()).weight
        );
        tree
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
