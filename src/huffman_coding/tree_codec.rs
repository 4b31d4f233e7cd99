//! Huffman codes and the tree header.
//!
//! Header layout, bit packed through a BitWriter:
//! - root index, 10 bits
//! - for every internal node from 257 up to the root: left child, right child, 9 bits each
//!
//! Leaves are never written. Any index of 256 or below is a leaf when the header is read back.

use std::io::{Read, Write};

use log::trace;

use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{Error, HeaderError, Result};

use super::symbol_table::{HuffTree, Node, ARENA_SLOTS, EOF_SYMBOL, FIRST_INTERNAL, MAX_NODE};

/// Width of the root field.
pub const ROOT_BITS: u8 = 10;
/// Width of each child field.
pub const CHILD_BITS: u8 = 9;

/// Code for `leaf`, root first: 0 for each step to a left child, 1 for each step to a right
/// child. The code is empty when the leaf is the root, or is not in the tree at all.
pub fn encode_code(tree: &HuffTree, leaf: u16) -> Vec<u8> {
    let mut code = Vec::new();
    let mut x = leaf;
    while let Some(parent) = tree.node(x).parent {
        if tree.node(parent).left == Some(x) {
            code.push(0);
        } else {
            code.push(1);
        }
        x = parent;
    }
    code.reverse();
    code
}

/// Codes for every leaf symbol (0..=256), worked out once so the encoder does not walk the
/// tree for every byte. Symbols missing from the tree get an empty code.
pub fn code_table(tree: &HuffTree) -> Vec<Vec<u8>> {
    (0..=EOF_SYMBOL).map(|leaf| encode_code(tree, leaf)).collect()
}

/// Write the tree shape to the bitstream.
pub fn write_header<W: Write>(tree: &HuffTree, bw: &mut BitWriter<W>) -> Result<()> {
    let root = tree.root();
    bw.put_int(root as u32, ROOT_BITS)?;
    trace!("Header root is {}.", root);
    for x in FIRST_INTERNAL..=root {
        let node = tree.node(x);
        let (left, right) = (node.left.unwrap_or_default(), node.right.unwrap_or_default());
        bw.put_int(left as u32, CHILD_BITS)?;
        bw.put_int(right as u32, CHILD_BITS)?;
        trace!("Header node {}: {} {}", x, left, right);
    }
    Ok(())
}

/// Read a tree shape written by write_header. Node weights are not stored, so they read back
/// as zero.
pub fn read_header<R: Read>(br: &mut BitReader<R>) -> Result<HuffTree> {
    let root = br
        .get_int(ROOT_BITS)?
        .ok_or(Error::Truncated { section: "header" })?;
    if !(EOF_SYMBOL as u32..=MAX_NODE as u32).contains(&root) {
        return Err(HeaderError::RootOutOfRange(root).into());
    }
    let root = root as u16;
    trace!("Header root is {}.", root);

    let mut nodes = vec![Node::default(); ARENA_SLOTS];
    for x in FIRST_INTERNAL..=root {
        let left = read_child(br, x)?;
        let right = read_child(br, x)?;
        trace!("Header node {}: {} {}", x, left, right);
        nodes[x as usize].left = Some(left);
        nodes[x as usize].right = Some(right);
    }
    Ok(HuffTree::from_children(nodes, root))
}

fn read_child<R: Read>(br: &mut BitReader<R>, node: u16) -> Result<u16> {
    let child = br
        .get_int(CHILD_BITS)?
        .ok_or(Error::Truncated { section: "header" })? as u16;
    if child >= node {
        return Err(HeaderError::ChildOutOfOrder { node, child }.into());
    }
    Ok(child)
}
