use anyhow::{bail, Context, Result};
use needletail::parse_fastx_file;

/// Strips all whitespace from a raw sequence. Pasted input often carries
/// line breaks and stray spaces.
pub fn clean_sequence(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Reads a sequence from `path`.
///
/// Files whose first non-whitespace character is `>` or `@` are parsed as
/// FASTA/FASTQ and the first record's sequence is used. Anything else is
/// treated as plain text and cleaned of whitespace.
///
/// # Errors
/// Fails if the file cannot be read, or if a FASTA/FASTQ file contains no
/// valid record.
pub fn read_sequence_file(path: &str) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read sequence file {path}"))?;

    match raw.trim_start().chars().next() {
        Some('>') | Some('@') => read_fastx_record(path),
        _ => Ok(clean_sequence(&raw)),
    }
}

/// Pulls the first record out of a FASTA/FASTQ file. Extra records are
/// ignored with a warning.
fn read_fastx_record(path: &str) -> Result<String> {
    let mut reader = parse_fastx_file(path)
        .with_context(|| format!("unable to parse sequence file {path}"))?;

    let Some(record) = reader.next() else {
        bail!("no records found in {path}");
    };
    let record = record.with_context(|| format!("invalid record in {path}"))?;
    let sequence = String::from_utf8_lossy(&record.seq()).into_owned();
    let id = String::from_utf8_lossy(record.id()).into_owned();

    if reader.next().is_some() {
        warn!("{path} contains more than one record; using the first ({id})");
    }

    Ok(sequence)
}
