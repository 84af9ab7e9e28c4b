use anyhow::Result;
use protexpress_core::{read_fasta_file, FeatureVector};
use std::io::Write;

#[test]
fn test_read_fasta_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".fasta").tempfile()?;
    writeln!(file, ">his6-tev construct")?;
    writeln!(file, "MHHHHHHSSGVDLG")?;
    writeln!(file, "TENLYFQSMAS")?;
    file.flush()?;

    let seq = read_fasta_file(file.path())?;
    assert_eq!(seq, "MHHHHHHSSGVDLGTENLYFQSMAS");
    assert!(FeatureVector::from_sequence(&seq).is_ok());
    Ok(())
}

#[test]
fn test_missing_fasta_file() {
    assert!(read_fasta_file("/definitely/not/here.fasta").is_err());
}
