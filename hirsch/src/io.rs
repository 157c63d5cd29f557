use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use libhirsch::structs::{digitize, Sequence};
use thiserror::Error;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Generator,
    #[default]
    Unset,
}

impl Display for FileFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Fasta => write!(f, "Fasta"),
            FileFormat::Generator => write!(f, "Generator"),
            FileFormat::Unset => write!(f, "Unset"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("input file holds no sequences: {path}")]
pub struct EmptyInputError {
    path: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("line {line} is not a valid integer: {text}")]
pub struct InvalidIndexError {
    pub line: usize,
    pub text: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("index {index} on line {line} is out of range for a string of length {length}")]
pub struct IndexOutOfRangeError {
    pub line: usize,
    pub index: i64,
    pub length: usize,
}

pub fn guess_input_format(input_path: &impl AsRef<Path>) -> anyhow::Result<FileFormat> {
    let file = File::open(input_path).context(format!(
        "failed to open input file: {}",
        input_path.as_ref().to_string_lossy()
    ))?;

    let reader = BufReader::new(file);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        } else if line.starts_with('>') {
            return Ok(FileFormat::Fasta);
        } else {
            return Ok(FileFormat::Generator);
        }
    }

    Err(EmptyInputError {
        path: input_path.as_ref().to_string_lossy().to_string(),
    }
    .into())
}

/// The longest sequence the generator will build.
pub const MAX_GENERATED_LENGTH: usize = 1 << 26;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("index on line {line} would grow the sequence to {length}, past the limit of {limit}")]
pub struct GeneratedLengthError {
    pub line: usize,
    pub length: usize,
    pub limit: usize,
}

/// Insert the whole sequence into itself just after position `index`, once per index.
fn expand(base: &[u8], indices: &[(usize, i64)], limit: usize) -> anyhow::Result<Vec<u8>> {
    let mut current = base.to_vec();

    for &(line, index) in indices {
        if index < 0 || index as usize >= current.len() {
            return Err(IndexOutOfRangeError {
                line,
                index,
                length: current.len(),
            }
            .into());
        }

        let length = current.len() * 2;
        if length > limit {
            return Err(GeneratedLengthError {
                line,
                length,
                limit,
            }
            .into());
        }

        let split = index as usize + 1;
        let mut next = Vec::with_capacity(length);
        next.extend_from_slice(&current[..split]);
        next.extend_from_slice(&current);
        next.extend_from_slice(&current[split..]);
        current = next;
    }

    Ok(current)
}

/// Digitize a base line, naming the line if it holds a foreign symbol.
fn digitize_base(line: usize, text: &str) -> anyhow::Result<Vec<u8>> {
    digitize(text.as_bytes()).context(format!("invalid symbol on line {line}"))
}

type NumberedLines<'a, 'b> = std::iter::Peekable<std::slice::Iter<'b, (usize, &'a str)>>;

/// Consume the run of integer lines that follows a base string.
fn take_indices(iter: &mut NumberedLines) -> Vec<(usize, i64)> {
    let mut indices: Vec<(usize, i64)> = vec![];
    while let Some(&&(line, text)) = iter.peek() {
        match text.parse::<i64>() {
            Ok(index) => indices.push((line, index)),
            Err(_) => break,
        }
        iter.next();
    }
    indices
}

/// Build the two input sequences from an insert-at-index description.
///
/// The description is a base string followed by zero or more index
/// lines, then a second base string followed by its index lines.
/// Blank lines are skipped; if the second block is missing, the
/// second sequence is empty. Base strings are checked against the
/// alphabet before any index is applied.
pub fn generate_from_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> anyhow::Result<(Sequence, Sequence)> {
    // (1-based line number, trimmed text)
    let lines: Vec<(usize, &str)> = lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let mut iter = lines.iter().peekable();

    let s_base = match iter.next() {
        Some(&(line, text)) => digitize_base(line, text)?,
        None => {
            return Err(EmptyInputError {
                path: "<lines>".to_string(),
            }
            .into())
        }
    };
    let s_indices = take_indices(&mut iter);

    let (t_base, t_indices) = match iter.next() {
        Some(&(line, text)) => (digitize_base(line, text)?, take_indices(&mut iter)),
        None => (vec![], vec![]),
    };

    if let Some(&&(line, text)) = iter.peek() {
        return Err(InvalidIndexError {
            line,
            text: text.to_string(),
        }
        .into());
    }

    let s_bytes = expand(&s_base, &s_indices, MAX_GENERATED_LENGTH)?;
    let t_bytes = expand(&t_base, &t_indices, MAX_GENERATED_LENGTH)?;

    let s = Sequence::from_digital(&s_bytes)?.with_name("S");
    let t = Sequence::from_digital(&t_bytes)?.with_name("T");

    Ok((s, t))
}

/// Read the pair of sequences to align from either a fasta file
/// or an insert-at-index description.
pub fn read_sequences(input_path: &impl AsRef<Path>) -> anyhow::Result<(Sequence, Sequence)> {
    let path_string = input_path.as_ref().to_string_lossy().to_string();
    let format = guess_input_format(input_path)?;
    log::debug!("input format of {path_string}: {format}");

    match format {
        FileFormat::Fasta => {
            let mut seqs = Sequence::nucleotide_from_fasta(input_path)?.into_iter();

            let s = match seqs.next() {
                Some(seq) => seq,
                None => return Err(EmptyInputError { path: path_string }.into()),
            };
            let t = match seqs.next() {
                Some(seq) => seq,
                None => Sequence::from_digital(&[])?.with_name("T"),
            };

            if seqs.next().is_some() {
                log::warn!("only the first two records of {path_string} are aligned");
            }
            Ok((s, t))
        }
        _ => {
            let text = std::fs::read_to_string(input_path)
                .context(format!("failed to read input file: {path_string}"))?;

            generate_from_lines(text.lines())
                .context(format!("failed to generate sequences from: {path_string}"))
        }
    }
}
