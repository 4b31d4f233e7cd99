//! End to end tests of the file level compress / decompress drivers.

use std::fs;
use std::path::PathBuf;

use huffpack::bitstream::bitreader::BitReader;
use huffpack::compression::compress::compress;
use huffpack::compression::decompress::decompress;
use huffpack::compression::{compressed_name, decompressed_name};
use huffpack::error::Error;
use huffpack::tools::cli::{HuffOpts, Mode};
use tempfile::tempdir;

fn opts(mode: Mode, files: Vec<PathBuf>) -> HuffOpts {
    let mut opts = HuffOpts::new();
    opts.op_mode = mode;
    opts.files = files;
    opts
}

#[test]
fn compress_then_decompress_files() {
    let dir = tempdir().unwrap();
    let samples: Vec<(&str, Vec<u8>)> = vec![
        ("empty.bin", vec![]),
        ("single.bin", vec![0x41; 1000]),
        ("alphabet.bin", (0..=255).collect()),
        ("text.txt", b"The quick brown fox jumps over the lazy dog. ".repeat(100)),
    ];

    let mut paths = Vec::new();
    for (name, data) in &samples {
        let path = dir.path().join(name);
        fs::write(&path, data).unwrap();
        paths.push(path);
    }

    compress(&opts(Mode::Zip, paths.clone())).unwrap();
    for path in &paths {
        assert!(!path.exists(), "{} should be removed", path.display());
        assert!(compressed_name(path).exists());
    }

    let packed: Vec<PathBuf> = paths.iter().map(|p| compressed_name(p)).collect();
    decompress(&opts(Mode::Test, packed.clone())).unwrap();
    decompress(&opts(Mode::Unzip, packed.clone())).unwrap();

    for ((_, data), path) in samples.iter().zip(&paths) {
        assert_eq!(&fs::read(path).unwrap(), data);
    }
    for path in &packed {
        assert!(!path.exists());
    }
}

#[test]
fn keep_and_force() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "to be or not to be").unwrap();

    let mut zip = opts(Mode::Zip, vec![path.clone()]);
    zip.keep_input_files = true;
    compress(&zip).unwrap();
    assert!(path.exists());

    // A second run refuses to overwrite the output
    match compress(&zip) {
        Err(Error::OutputExists(existing)) => assert_eq!(existing, compressed_name(&path)),
        other => panic!("expected OutputExists, got {:?}", other),
    }
    assert!(path.exists());

    zip.force_overwrite = true;
    compress(&zip).unwrap();

    // Decompressing next to the kept original needs force too
    let mut unzip = opts(Mode::Unzip, vec![compressed_name(&path)]);
    unzip.keep_input_files = true;
    assert!(decompress(&unzip).is_err());
    unzip.force_overwrite = true;
    decompress(&unzip).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "to be or not to be");
    assert!(compressed_name(&path).exists());
}

#[test]
fn corrupt_file_leaves_no_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.huf");
    // A root of 300 promises 44 internal nodes (257..=300), but the file ends after two bytes
    let header = [0x2c_u8, 0x01];
    let mut br = BitReader::new(header.as_slice());
    assert_eq!(br.get_int(10).unwrap(), Some(300));
    fs::write(&path, header).unwrap();

    let unzip = opts(Mode::Unzip, vec![path.clone()]);
    assert!(matches!(
        decompress(&unzip),
        Err(Error::Truncated { section: "header" })
    ));
    assert!(!decompressed_name(&path).exists());
    assert!(path.exists());
}

#[test]
fn failure_does_not_stop_the_other_files() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let present = dir.path().join("present.txt");
    fs::write(&present, "still gets compressed").unwrap();

    let zip = opts(Mode::Zip, vec![missing, present.clone()]);
    assert!(matches!(compress(&zip), Err(Error::Io(_))));
    assert!(compressed_name(&present).exists());
    assert!(!present.exists());
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nowhere.txt");
    assert!(matches!(
        compress(&opts(Mode::Zip, vec![path])),
        Err(Error::Io(_))
    ));
}
