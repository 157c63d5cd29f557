use seq_io::fasta::{Reader, Record};
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

use crate::alphabet::{
    is_nucleotide, NUCLEOTIDE_ALPHABET_SIZE, NUCLEOTIDE_INVERSE_MAP, UTF8_SPACE,
    UTF8_TO_DIGITAL_NUCLEOTIDE,
};
use anyhow::{Context, Result};
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid sequence symbol: {byte:#04x} at position {position}")]
pub struct InvalidSymbolError {
    pub byte: u8,
    pub position: usize,
}

/// This holds the both the "digital" data and string data of a nucleotide sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The name of the sequence
    pub name: String,
    /// The sequence details. If the sequence comes from a fasta, this
    /// is the information following the sequence name in the header
    pub details: Option<String>,
    /// The length of the sequence
    pub length: usize,
    /// The "digital" data of the sequence. These are
    /// the string bytes, but mapped to [0u8..3u8]
    pub digital_bytes: Vec<u8>,
    /// The string data of the sequence. These are the upper
    /// case UTF8 bytes of the sequence in the ACGT alphabet
    pub utf8_bytes: Vec<u8>,
}

/// Map UTF8 bytes to digital bytes, failing on the first byte outside the alphabet.
pub fn digitize(utf8_bytes: &[u8]) -> Result<Vec<u8>, InvalidSymbolError> {
    utf8_bytes
        .iter()
        .enumerate()
        .map(|(position, byte)| match UTF8_TO_DIGITAL_NUCLEOTIDE.get(byte) {
            Some(digital_byte) => Ok(*digital_byte),
            None => Err(InvalidSymbolError {
                byte: *byte,
                position,
            }),
        })
        .collect()
}

/// Checks that every byte of a digital sequence is one of the four nucleotides.
pub fn check_digital(digital_bytes: &[u8]) -> Result<(), InvalidSymbolError> {
    match digital_bytes.iter().position(|&b| !is_nucleotide(b)) {
        Some(position) => Err(InvalidSymbolError {
            byte: digital_bytes[position],
            position,
        }),
        None => Ok(()),
    }
}

fn to_utf8(digital_bytes: &[u8]) -> Vec<u8> {
    digital_bytes
        .iter()
        .map(|b| NUCLEOTIDE_INVERSE_MAP[b])
        .collect()
}

impl Sequence {
    pub fn nucleotide_from_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let mut seqs: Vec<Self> = vec![];

        let mut reader = Reader::from_path(&path).with_context(|| {
            format!(
                "failed to open fasta file: {}",
                path.as_ref().to_string_lossy()
            )
        })?;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "failed to read fasta record")?;
            let mut header_bytes = record.head().to_vec();
            let first_space_idx = header_bytes.iter().position(|&b| b == UTF8_SPACE);

            let error_context: fn() -> &'static str =
                || "failed to create String from fasta header bytes";

            let (name, details) = match first_space_idx {
                Some(idx) => {
                    let details_bytes = header_bytes.split_off(idx + 1);
                    header_bytes.pop();
                    (
                        String::from_utf8(header_bytes).with_context(error_context)?,
                        Some(String::from_utf8(details_bytes).with_context(error_context)?),
                    )
                }
                None => (
                    String::from_utf8(header_bytes).with_context(error_context)?,
                    None,
                ),
            };

            let raw_bytes: Vec<u8> = record.seq_lines().flatten().copied().collect();
            let mut seq = Self::from_utf8(&raw_bytes)
                .with_context(|| format!("failed to parse fasta record: {name}"))?;

            seq.name = name;
            seq.details = details;
            seqs.push(seq);
        }
        Ok(seqs)
    }

    pub fn from_digital(bytes: &[u8]) -> Result<Self> {
        check_digital(bytes)?;

        Ok(Sequence {
            name: "".to_string(),
            details: None,
            length: bytes.len(),
            digital_bytes: bytes.to_vec(),
            utf8_bytes: to_utf8(bytes),
        })
    }

    pub fn from_utf8(bytes: &[u8]) -> Result<Self> {
        let digital_bytes = digitize(bytes)?;

        Ok(Sequence {
            name: "".to_string(),
            details: None,
            length: digital_bytes.len(),
            utf8_bytes: to_utf8(&digital_bytes),
            digital_bytes,
        })
    }

    /// Draw a uniformly random nucleotide sequence.
    pub fn random(length: usize, rng: &mut impl Rng) -> Self {
        let digital_bytes: Vec<u8> = (0..length)
            .map(|_| rng.gen_range(0..NUCLEOTIDE_ALPHABET_SIZE as u8))
            .collect();

        Sequence {
            name: "".to_string(),
            details: None,
            length,
            utf8_bytes: to_utf8(&digital_bytes),
            digital_bytes,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn as_str(&self) -> &str {
        // the utf8 bytes only ever hold A, C, G or T
        std::str::from_utf8(&self.utf8_bytes).unwrap_or_default()
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ">{}", self.name)?;

        if let Some(ref details) = self.details {
            write!(f, " {details}")?
        };

        writeln!(f)?;

        let mut iter = self.utf8_bytes.chunks(80).peekable();

        while let Some(byte_chunk) = iter.next() {
            match std::str::from_utf8(byte_chunk) {
                Ok(seq_line) => {
                    write!(f, "{}", seq_line)?;
                    if iter.peek().is_some() {
                        // if we're not on the last
                        // line, add a linebreak
                        writeln!(f)?;
                    }
                }
                Err(_) => return Err(std::fmt::Error),
            }
        }
        Ok(())
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_from_utf8() {
        let seq = Sequence::from_utf8(b"ACgt").unwrap();
        check!(seq.length == 4);
        check!(seq.digital_bytes == vec![0, 1, 2, 3]);
        check!(seq.as_str() == "ACGT");
    }

    #[test]
    fn test_from_utf8_empty() {
        let seq = Sequence::from_utf8(b"").unwrap();
        check!(seq.is_empty());
        check!(seq.digital_bytes.is_empty());
    }

    #[test]
    fn test_from_utf8_invalid_symbol() {
        let_assert!(Err(err) = Sequence::from_utf8(b"ACNT"));
        let_assert!(Some(invalid) = err.downcast_ref::<InvalidSymbolError>());
        check!(invalid.byte == b'N');
        check!(invalid.position == 2);
    }

    #[test]
    fn test_gap_symbol_is_not_input() {
        let_assert!(Err(err) = Sequence::from_utf8(b"AC_T"));
        check!(err.downcast_ref::<InvalidSymbolError>().is_some());
    }

    #[test]
    fn test_from_digital() {
        let seq = Sequence::from_digital(&[3, 2, 1, 0]).unwrap();
        check!(seq.as_str() == "TGCA");

        let_assert!(Err(err) = Sequence::from_digital(&[0, 4]));
        let_assert!(Some(invalid) = err.downcast_ref::<InvalidSymbolError>());
        check!(invalid.position == 1);
    }

    #[test]
    fn test_random_is_valid() {
        let mut rng = Pcg64::seed_from_u64(7);
        let seq = Sequence::random(500, &mut rng);
        check!(seq.length == 500);
        check!(check_digital(&seq.digital_bytes).is_ok());
        check!(Sequence::from_utf8(&seq.utf8_bytes).unwrap() == seq);
    }

    #[test]
    fn test_display_wraps_lines() {
        let seq = Sequence::from_utf8(&[b'A'; 100]).unwrap().with_name("seq1");
        let text = format!("{seq}");
        let lines: Vec<&str> = text.lines().collect();
        let full_line = "A".repeat(80);
        let last_line = "A".repeat(20);
        check!(lines == vec![">seq1", full_line.as_str(), last_line.as_str()]);
    }
}
