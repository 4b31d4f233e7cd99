//! huffpack: a static, whole-file huffman compressor.
//!
//! Version 0.1.0
//!
//! Each file is compressed with one huffman tree built from the byte counts of the entire
//! file. The tree shape goes at the front of the output as a small bit-packed header, so the
//! compressed file is all a decompressor needs. A dedicated end of stream symbol marks where
//! the data stops.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpack -z test.txt`
//!
//! This will compress the file and create the file test.txt.huf.
//! The original file will be deleted unless `-k` is given.
//!
//! Compressed layout (all fields bit packed, least significant bit of each byte first):
//!
//! | Field | Width |
//! |---|---|
//! | root index | 10 bits |
//! | left, right child for each internal node 257..=root | 9 + 9 bits |
//! | one code per input byte, then the end of stream code | variable |
//! | zero padding | 0-7 bits |
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{Error, Result};
