use crate::align::{Cost, CostModel};
use crate::alphabet::{DIGITAL_GAP, NUCLEOTIDE_INVERSE_MAP, UTF8_PIPE, UTF8_SPACE};

use anyhow::Result;
use thiserror::Error;

use super::{Trace, TraceStep};

#[derive(Clone, PartialEq, Eq)]
pub struct Alignment {
    /// The optimal cost reported by the aligner that produced this alignment
    pub cost: Cost,
    /// The length of the alignment, including gaps
    pub length: usize,
    /// The digital bytes of S, with DIGITAL_GAP wherever S pairs with a gap
    pub s_aligned: Vec<u8>,
    /// The digital bytes of T, with DIGITAL_GAP wherever T pairs with a gap
    pub t_aligned: Vec<u8>,
}

fn render(digital_bytes: &[u8]) -> String {
    digital_bytes
        .iter()
        .map(|b| char::from(NUCLEOTIDE_INVERSE_MAP[b]))
        .collect()
}

fn ungapped(digital_bytes: &[u8]) -> Vec<u8> {
    digital_bytes
        .iter()
        .copied()
        .filter(|&b| b != DIGITAL_GAP)
        .collect()
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("trace consumes {s_consumed} x {t_consumed} residues, sequences are {s_length} x {t_length}")]
pub struct TraceMismatchError {
    pub s_consumed: usize,
    pub t_consumed: usize,
    pub s_length: usize,
    pub t_length: usize,
}

impl Alignment {
    /// Lay the residues of S and T out along a trace.
    ///
    /// The trace must consume exactly every residue of S and of T.
    pub fn from_trace(trace: &Trace, s: &[u8], t: &[u8], cost: Cost) -> Result<Self> {
        if trace.s_consumed() != s.len() || trace.t_consumed() != t.len() {
            return Err(TraceMismatchError {
                s_consumed: trace.s_consumed(),
                t_consumed: trace.t_consumed(),
                s_length: s.len(),
                t_length: t.len(),
            }
            .into());
        }

        let mut s_aligned = Vec::with_capacity(trace.len());
        let mut t_aligned = Vec::with_capacity(trace.len());
        let mut s_idx = 0;
        let mut t_idx = 0;

        for step in trace.iter() {
            match step {
                TraceStep::Diagonal => {
                    s_aligned.push(s[s_idx]);
                    t_aligned.push(t[t_idx]);
                    s_idx += 1;
                    t_idx += 1;
                }
                TraceStep::Up => {
                    s_aligned.push(s[s_idx]);
                    t_aligned.push(DIGITAL_GAP);
                    s_idx += 1;
                }
                TraceStep::Left => {
                    s_aligned.push(DIGITAL_GAP);
                    t_aligned.push(t[t_idx]);
                    t_idx += 1;
                }
            }
        }

        Ok(Self {
            cost,
            length: trace.len(),
            s_aligned,
            t_aligned,
        })
    }

    /// Sum the cost of every aligned column under the given model.
    pub fn rescore(&self, model: &CostModel) -> Cost {
        self.s_aligned
            .iter()
            .zip(&self.t_aligned)
            .map(|(&s, &t)| {
                if s == DIGITAL_GAP || t == DIGITAL_GAP {
                    model.gap()
                } else {
                    model.substitution(s, t)
                }
            })
            .sum()
    }

    pub fn gap_count(&self) -> usize {
        self.s_aligned
            .iter()
            .chain(&self.t_aligned)
            .filter(|&&b| b == DIGITAL_GAP)
            .count()
    }

    /// The residues of S, with the gaps removed.
    pub fn s_ungapped(&self) -> Vec<u8> {
        ungapped(&self.s_aligned)
    }

    /// The residues of T, with the gaps removed.
    pub fn t_ungapped(&self) -> Vec<u8> {
        ungapped(&self.t_aligned)
    }

    pub fn s_string(&self) -> String {
        render(&self.s_aligned)
    }

    pub fn t_string(&self) -> String {
        render(&self.t_aligned)
    }

    /// The display in between S and T: a pipe for identical residues.
    pub fn middle_string(&self) -> String {
        self.s_aligned
            .iter()
            .zip(&self.t_aligned)
            .map(|(&s, &t)| {
                if s == t && s != DIGITAL_GAP {
                    char::from(UTF8_PIPE)
                } else {
                    char::from(UTF8_SPACE)
                }
            })
            .collect()
    }

    /// A three line view of the alignment, wrapped at `width` columns.
    pub fn ali_string(&self, width: usize) -> String {
        let width = width.max(1);
        let s_string = self.s_string();
        let middle_string = self.middle_string();
        let t_string = self.t_string();

        let mut out = format!("cost: {}\n", self.cost);

        for start in (0..self.length).step_by(width) {
            let end = (start + width).min(self.length);
            out.push('\n');
            out.push_str(&s_string[start..end]);
            out.push('\n');
            out.push_str(&middle_string[start..end]);
            out.push('\n');
            out.push_str(&t_string[start..end]);
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.s_string(), self.t_string(), self.cost)
    }
}
