use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::warn;

/// Writes a bitstream for output, one bit at a time, least significant bit of each byte first.
///
/// The last partial byte is padded with zeros in its high bits when the writer is closed.
/// A writer that is dropped without being closed pads and flushes the same way, so output is
/// never left half written on an early return.
pub struct BitWriter<W: Write> {
    /// Handle to the output stream. Taken (set to None) once the stream is finished.
    writer: Option<W>,
    /// The byte currently being filled.
    buffer: u8,
    /// Position (0-7) of the next bit within `buffer`.
    bit_pos: u8,
    /// Count of every bit put on the stream, padding excluded.
    bits_written: u64,
}

impl BitWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write to it through a buffer.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter on top of any byte sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            buffer: 0,
            bit_pos: 0,
            bits_written: 0,
        }
    }

    /// Put a single bit (0 or 1) on the stream. Any non-zero value counts as 1.
    pub fn put_bit(&mut self, bit: u8) -> io::Result<()> {
        if bit != 0 {
            self.buffer |= 1 << self.bit_pos;
        } else {
            self.buffer &= !(1 << self.bit_pos);
        }
        self.bit_pos += 1;
        self.bits_written += 1;
        if self.bit_pos > 7 {
            let byte = self.buffer;
            self.buffer = 0;
            self.bit_pos = 0;
            if let Some(writer) = self.writer.as_mut() {
                writer.write_all(&[byte])?;
            }
        }
        Ok(())
    }

    /// Put the low `width` bits of `n` on the stream, least significant bit first.
    pub fn put_int(&mut self, n: u32, width: u8) -> io::Result<()> {
        assert!(width <= 32, "put_int width {} is wider than 32 bits", width);
        for i in 0..width {
            self.put_bit(((n >> i) & 1) as u8)?;
        }
        Ok(())
    }

    /// Put a sequence of bits, such as a huffman code, on the stream in order.
    pub fn put_bits(&mut self, bits: &[u8]) -> io::Result<()> {
        bits.iter().try_for_each(|&bit| self.put_bit(bit))
    }

    /// Number of bits put on the stream so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Number of bytes the stream occupies once the final byte is padded out.
    pub fn bytes_written(&self) -> u64 {
        (self.bits_written + 7) / 8
    }

    /// Pad the last byte with zeros if it holds any bits, write it, and flush the sink.
    pub fn close(mut self) -> io::Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> io::Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        if self.bit_pos > 0 {
            // Zero the bits above the last one written
            let byte = self.buffer & (0xff >> (8 - self.bit_pos));
            self.buffer = 0;
            self.bit_pos = 0;
            writer.write_all(&[byte])?;
        }
        writer.flush()
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if self.writer.is_some() {
            if let Err(e) = self.finish() {
                warn!("Could not flush the bitstream on drop: {}", e);
            }
        }
    }
}
