//! Error types for huffpack.
//!
//! End of input is not an error: the bit readers report it with `None`. The
//! variants here are what is left once a caller decides that running out of
//! bits (or anything else) cannot be recovered from.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// File system or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compressed stream ran out of bits part way through a structure.
    #[error("compressed stream is truncated (ran out of bits in the {section})")]
    Truncated { section: &'static str },

    /// The tree header does not describe a tree this format can produce.
    #[error("invalid header: {0}")]
    Header(#[from] HeaderError),

    /// The input did not read back the same way on the second encode pass.
    #[error("input changed between the counting pass and the encoding pass")]
    InputChanged,

    /// Output file exists and overwriting was not requested.
    #[error("output file {} already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),
}

/// Ways a tree header can be malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("root index {0} is outside 256..=512")]
    RootOutOfRange(u32),

    /// Every child must be a leaf or an internal node defined earlier.
    #[error("node {node} names child {child}, which is not below it")]
    ChildOutOfOrder { node: u16, child: u16 },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
