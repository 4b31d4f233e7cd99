use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{Error, Result};
use crate::huffman_coding::symbol_table::{SymbolTable, EOF_SYMBOL};
use crate::huffman_coding::tree_codec::{code_table, write_header};
use crate::tools::cli::{HuffOpts, Output};

use super::{compressed_name, has_suffix, logged, percent, write_output};

/// What a single encode produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// Data bytes read (the end of stream symbol is not counted).
    pub bytes_in: u64,
    /// Bytes written, header and padding included.
    pub bytes_out: u64,
    /// Leaves in the tree, end of stream leaf included.
    pub leaves: usize,
    pub root: u16,
}

/*
    The input is read twice: once to count the bytes, then (after a rewind) once more to
    write their codes. That is why the input must be Seek. Anything that can't seek (like
    standard input) is collected in memory first.
*/

/// Compress everything in `input` to `output`.
pub fn encode<R: Read + Seek, W: Write>(input: &mut R, output: W) -> Result<EncodeStats> {
    // Count and build
    let mut table = SymbolTable::new();
    let bytes_in = table.count(&mut *input)?;
    let tree = table.build();
    input.rewind()?;

    let mut bw = BitWriter::new(output);
    write_header(&tree, &mut bw)?;
    let header_bits = bw.bits_written();
    let codes = code_table(&tree);

    // Now the body. Every byte we meet must have been counted on the first pass.
    let mut br = BitReader::new(&mut *input);
    let mut seen = 0_u64;
    while let Some(byte) = br.get_int(8)? {
        if !tree.contains(byte as u16) {
            return Err(Error::InputChanged);
        }
        bw.put_bits(&codes[byte as usize])?;
        seen += 1;
    }
    if seen != bytes_in {
        return Err(Error::InputChanged);
    }
    bw.put_bits(&codes[EOF_SYMBOL as usize])?;

    debug!(
        "Header used {} bits, body used {} bits.",
        header_bits,
        bw.bits_written() - header_bits
    );
    let bytes_out = bw.bytes_written();
    bw.close()?;

    Ok(EncodeStats {
        bytes_in,
        bytes_out,
        leaves: tree.leaves(),
        root: tree.root(),
    })
}

/// Compress a byte slice in memory.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Compress every file named in opts, or standard input if there are none.
/// Keeps going after a failure; each failure is logged as it happens and the last error is
/// returned once all files are tried.
pub fn compress(opts: &HuffOpts) -> Result<()> {
    if opts.files.is_empty() {
        return logged(Path::new("(stdin)"), compress_stdin());
    }
    let mut result = Ok(());
    for path in &opts.files {
        if let Err(e) = logged(path, compress_file(opts, path)) {
            result = Err(e);
        }
    }
    result
}

/// Compress one file, to a sibling `.huf` file or to standard output.
pub fn compress_file(opts: &HuffOpts, path: &Path) -> Result<()> {
    if has_suffix(path) {
        warn!("{} already has a .huf suffix, skipping.", path.display());
        return Ok(());
    }
    let mut input = BufReader::new(File::open(path)?);

    let stats = match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let lock = stdout.lock();
            encode(&mut input, BufWriter::new(lock))?
        }
        Output::File => {
            let out_path = compressed_name(path);
            let stats = write_output(&out_path, opts.force_overwrite, |out| {
                encode(&mut input, out)
            })?;
            info!("Wrote {}.", out_path.display());
            stats
        }
    };
    report(path, &stats);

    if opts.output == Output::File && !opts.keep_input_files {
        drop(input);
        fs::remove_file(path)?;
        debug!("Removed {}.", path.display());
    }
    Ok(())
}

/// Standard input can't be rewound, so it is read into memory before encoding.
fn compress_stdin() -> Result<()> {
    let mut data = Vec::new();
    io::stdin().lock().read_to_end(&mut data)?;
    let stdout = io::stdout();
    let stats = encode(&mut Cursor::new(data), BufWriter::new(stdout.lock()))?;
    report(Path::new("(stdin)"), &stats);
    Ok(())
}

fn report(path: &Path, stats: &EncodeStats) {
    info!(
        "{}: {} -> {} bytes ({:.1}%), {} symbols.",
        path.display(),
        stats.bytes_in,
        stats.bytes_out,
        percent(stats.bytes_out, stats.bytes_in),
        stats.leaves
    );
}
