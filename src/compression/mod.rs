//! The compression module drives whole files through huffpack.
//!
//! Compression happens in the following steps:
//! - Count: tally every byte of the input, plus one end of stream symbol.
//! - Build: merge the counts into a single huffman tree.
//! - Header: write the tree shape at the front of the output.
//! - Body: read the input again and write the code for every byte, then the end of stream code.
//!
//! Decompression reads the header back, then walks the tree one bit at a time, writing a byte
//! every time it lands on a leaf, until it lands on the end of stream leaf.
//!
//! Everything is single threaded and sequential; each stage finishes before the next begins.
//!

pub mod compress;
pub mod decompress;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{error, warn};

use crate::error::{Error, Result};

/// File name extension of compressed files.
pub const SUFFIX: &str = "huf";

/// Output name for compressing `path`: the same name with `.huf` added.
pub fn compressed_name(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(SUFFIX);
    PathBuf::from(name)
}

/// Output name for decompressing `path`: strips `.huf`, or adds `.out` if it is missing.
pub fn decompressed_name(path: &Path) -> PathBuf {
    if has_suffix(path) {
        path.with_extension("")
    } else {
        let mut name: OsString = path.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

/// True if the file name ends in `.huf`.
pub fn has_suffix(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == SUFFIX)
}

/// Create `path` and hand it to `work`. If the work fails, the partial output file is removed.
pub(crate) fn write_output<T, F>(path: &Path, force: bool, work: F) -> Result<T>
where
    F: FnOnce(BufWriter<File>) -> Result<T>,
{
    if !force && path.exists() {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    let file = File::create(path)?;
    match work(BufWriter::new(file)) {
        Ok(result) => Ok(result),
        Err(e) => {
            if let Err(rm) = fs::remove_file(path) {
                warn!("Could not remove partial output {}: {}", path.display(), rm);
            }
            Err(e)
        }
    }
}

/// Log a failure against the file (or stream) it came from and pass the result on unchanged.
/// The drivers report every failure here, so callers only need the result for the exit code.
pub(crate) fn logged<T>(name: &Path, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("{}: {}", name.display(), e);
    }
    result
}

/// Ratio of output to input as a percentage, for reporting.
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
