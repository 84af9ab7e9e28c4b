//! Sequence input handling.
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Upper-case `sequence` and drop every character outside `A..=Z`.
///
/// Letters outside the standard alphabet (`X`, `B`, `Z`, ...) are kept.
pub fn clean_sequence(sequence: &str) -> String {
    sequence
        .chars()
        .flat_map(char::to_uppercase)
        .filter(char::is_ascii_uppercase)
        .collect()
}

/// Read a FASTA stream into a single sequence string.
///
/// Header lines (`>`) are skipped and every other line is trimmed and
/// appended, so multi-record files are concatenated. Invalid UTF-8 is
/// replaced rather than rejected; cleaning discards it later.
pub fn read_fasta<R: Read>(mut reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text
        .lines()
        .filter(|line| !line.starts_with('>'))
        .map(str::trim)
        .collect())
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let file = File::open(path)?;
    read_fasta(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_sequence() {
        assert_eq!(clean_sequence("mkv ll\nA-12*"), "MKVLLA");
        assert_eq!(clean_sequence("  \t"), "");
        assert_eq!(clean_sequence("XBZ"), "XBZ");
    }

    #[test]
    fn test_read_fasta_skips_headers() {
        let input = b">sp|P0DTC2|test protein\nMKV\n  LLA  \n>second\nGGS\n";
        let seq = read_fasta(&input[..]).unwrap();
        assert_eq!(seq, "MKVLLAGGS");
    }

    #[test]
    fn test_read_fasta_without_header() {
        let seq = read_fasta(&b"MHHHHHH\r\nSSG"[..]).unwrap();
        assert_eq!(seq, "MHHHHHHSSG");
    }
}
