use std::io::{self, ErrorKind, Read};

const CHUNK_SIZE: usize = 64 * 1024;

/// Adds the byte frequencies of `data` into `freqs`, which must hold at least 256 counters.
pub fn tally(freqs: &mut [u64], data: &[u8]) {
    data.iter().for_each(|&el| freqs[el as usize] += 1);
}

/// Returns a frequency count of every byte value in the source, read until it is exhausted.
pub fn freqs<R: Read>(mut source: R) -> io::Result<[u64; 256]> {
    let mut freqs = [0_u64; 256];
    let mut buf = vec![0_u8; CHUNK_SIZE];
    loop {
        match source.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => tally(&mut freqs, &buf[..size]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(freqs)
}

#[test]
fn freqs_test() {
    let counts = freqs("abracadabra".as_bytes()).unwrap();
    assert_eq!(counts[b'a' as usize], 5);
    assert_eq!(counts[b'b' as usize], 2);
    assert_eq!(counts[b'r' as usize], 2);
    assert_eq!(counts[b'c' as usize], 1);
    assert_eq!(counts[b'd' as usize], 1);
    assert_eq!(counts.iter().sum::<u64>(), 11);
}

#[test]
fn freqs_empty_test() {
    assert_eq!(freqs(io::empty()).unwrap(), [0_u64; 256]);
}
