use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{Error, Result};
use crate::huffman_coding::symbol_table::EOF_SYMBOL;
use crate::huffman_coding::tree_codec::read_header;
use crate::tools::cli::{HuffOpts, Mode, Output};

use super::{decompressed_name, has_suffix, logged, percent, write_output};

/// What a single decode produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Compressed bytes consumed, up to and including the one holding the end of stream code.
    pub bytes_in: u64,
    /// Data bytes written.
    pub bytes_out: u64,
    pub leaves: usize,
}

/// Decompress `input` to `output`, stopping at the end of stream code.
pub fn decode<R: Read, W: Write>(input: R, output: W) -> Result<DecodeStats> {
    let mut br = BitReader::new(input);
    let tree = read_header(&mut br)?;
    let root = tree.root();
    debug!("Read header: {} leaves, root at {}.", tree.leaves(), root);

    let mut bw = BitWriter::new(output);
    let mut bytes_out = 0_u64;
    loop {
        // Walk down from the root until we land on a leaf
        let mut x = root;
        while !tree.node(x).is_leaf() {
            let bit = br
                .get_bit()?
                .ok_or(Error::Truncated { section: "data" })?;
            x = tree.child(x, bit);
        }
        if x == EOF_SYMBOL {
            break;
        }
        bw.put_int(x as u32, 8)?;
        bytes_out += 1;
    }
    bw.close()?;

    let bytes_in = (br.bits_read() + 7) / 8;
    // Skip the padding in the last byte; anything after that should not be there
    while br.bits_read() % 8 != 0 && br.get_bit()?.is_some() {}
    if br.get_bit()?.is_some() {
        warn!("Ignoring data after the end of the compressed stream.");
    }
    br.close();

    Ok(DecodeStats {
        bytes_in,
        bytes_out,
        leaves: tree.leaves(),
    })
}

/// Decompress a byte slice in memory.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decode(data, &mut out)?;
    Ok(out)
}

/// Decompress (or with Mode::Test, just check) every file named in opts, or standard input if
/// there are none. Keeps going after a failure; each failure is logged as it happens and the
/// last error is returned once all files are tried.
pub fn decompress(opts: &HuffOpts) -> Result<()> {
    if opts.files.is_empty() {
        return logged(Path::new("(stdin)"), decompress_stdin(opts));
    }
    let mut result = Ok(());
    for path in &opts.files {
        if let Err(e) = logged(path, decompress_file(opts, path)) {
            result = Err(e);
        }
    }
    result
}

/// Decompress one file to its original name or to standard output, or test it.
pub fn decompress_file(opts: &HuffOpts, path: &Path) -> Result<()> {
    let input = BufReader::new(File::open(path)?);

    if opts.op_mode == Mode::Test {
        let stats = decode(input, io::sink())?;
        info!("{}: ok ({} bytes).", path.display(), stats.bytes_out);
        return Ok(());
    }

    if !has_suffix(path) {
        warn!(
            "{} does not end in .huf; writing to {}.",
            path.display(),
            decompressed_name(path).display()
        );
    }

    let stats = match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let lock = stdout.lock();
            decode(input, BufWriter::new(lock))?
        }
        Output::File => {
            let out_path = decompressed_name(path);
            let stats = write_output(&out_path, opts.force_overwrite, |out| decode(input, out))?;
            info!("Wrote {}.", out_path.display());
            stats
        }
    };
    report(path, &stats);

    if opts.output == Output::File && !opts.keep_input_files {
        fs::remove_file(path)?;
        debug!("Removed {}.", path.display());
    }
    Ok(())
}

fn decompress_stdin(opts: &HuffOpts) -> Result<()> {
    let stdin = io::stdin();
    let input = stdin.lock();
    let stats = if opts.op_mode == Mode::Test {
        decode(input, io::sink())?
    } else {
        let stdout = io::stdout();
        let output = BufWriter::new(stdout.lock());
        decode(input, output)?
    };
    report(Path::new("(stdin)"), &stats);
    Ok(())
}

fn report(path: &Path, stats: &DecodeStats) {
    info!(
        "{}: {} -> {} bytes ({:.1}%), {} symbols.",
        path.display(),
        stats.bytes_in,
        stats.bytes_out,
        percent(stats.bytes_in, stats.bytes_out),
        stats.leaves
    );
}
