//! BitReader: reads a packed bitstream for huffpack.
//!
//! Bits come out of each byte starting at the least significant bit, mirroring BitWriter.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

/// Reads a bitstream one bit at a time.
///
/// Running out of input is reported as `Ok(None)`. Errors from the source are passed on as
/// `Err`, so end of data can never be confused with a failing device.
#[derive(Debug)]
pub struct BitReader<R> {
    source: R,
    /// The byte currently being taken apart.
    buffer: u8,
    /// Position (0-7) of the next bit within `buffer`. 0 means a new byte is needed.
    bit_pos: u8,
    bits_read: u64,
}

impl BitReader<BufReader<File>> {
    /// Open the file at `path` for bit reading through a buffer.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader on top of any byte source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: 0,
            bit_pos: 0,
            bits_read: 0,
        }
    }

    /// Read the next byte from the source, or None if there is no more.
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0_u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Return the next bit (1 or 0), or None if there is no more data to read.
    pub fn get_bit(&mut self) -> io::Result<Option<u8>> {
        if self.bit_pos == 0 {
            match self.next_byte()? {
                Some(byte) => self.buffer = byte,
                None => return Ok(None),
            }
        }
        let bit = (self.buffer >> self.bit_pos) & 1;
        self.bit_pos = (self.bit_pos + 1) % 8;
        self.bits_read += 1;
        Ok(Some(bit))
    }

    /// Return the next `width` bits as an integer (first bit read is bit 0), or None if the
    /// data runs out first. Bits read before running out are lost.
    pub fn get_int(&mut self, width: u8) -> io::Result<Option<u32>> {
        assert!(width <= 32, "get_int width {} is wider than 32 bits", width);
        let mut n = 0_u32;
        for i in 0..width {
            match self.get_bit()? {
                Some(bit) => n |= (bit as u32) << i,
                None => return Ok(None),
            }
        }
        Ok(Some(n))
    }

    /// Number of bits handed out so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Release the source.
    pub fn close(self) {}
}
