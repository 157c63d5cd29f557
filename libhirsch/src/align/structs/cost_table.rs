use std::io::Write;

use anyhow::Result;

use crate::align::{Cost, CostModel};
use crate::alphabet::NUCLEOTIDE_INVERSE_MAP;

#[derive(Default, Clone, PartialEq, Eq)]
pub struct CostTable {
    pub s_length: usize,
    pub t_length: usize,
    /// The table cells as a flat vector.
    //
    // It's stored in row-major order:
    //     [
    //
    //         c_(0, 0), c_(0, 1), ..., c_(0, T),
    //         c_(1, 0), c_(1, 1), ..., c_(1, T),
    //         ...
    //         c_(S, 0), c_(S, 1), ..., c_(S, T)
    //
    //     ]
    //
    // where:
    //
    //     S:        <s_length>
    //     T:        <t_length>
    //     c_(i, j): the optimal cost of aligning the first i
    //               residues of S with the first j residues of T
    //
    pub data: Vec<Cost>,
}

impl CostTable {
    pub fn new(s_length: usize, t_length: usize) -> Self {
        CostTable {
            s_length,
            t_length,
            data: vec![0; (s_length + 1) * (t_length + 1)],
        }
    }

    /// Fill row 0 and column 0 with runs of gaps.
    pub fn init_borders(&mut self, model: &CostModel) {
        for t_idx in 0..=self.t_length {
            self.set(0, t_idx, model.gap_run(t_idx));
        }
        for s_idx in 0..=self.s_length {
            self.set(s_idx, 0, model.gap_run(s_idx));
        }
    }

    #[inline]
    pub fn get(&self, s_idx: usize, t_idx: usize) -> Cost {
        debug_assert!(s_idx <= self.s_length);
        debug_assert!(t_idx <= self.t_length);
        self.data[s_idx * (self.t_length + 1) + t_idx]
    }

    #[inline]
    pub fn set(&mut self, s_idx: usize, t_idx: usize, value: Cost) {
        debug_assert!(s_idx <= self.s_length);
        debug_assert!(t_idx <= self.t_length);
        self.data[s_idx * (self.t_length + 1) + t_idx] = value;
    }

    pub fn row(&self, s_idx: usize) -> &[Cost] {
        let start = s_idx * (self.t_length + 1);
        &self.data[start..start + self.t_length + 1]
    }

    /// The optimal cost of the full alignment, c_(S, T).
    pub fn last(&self) -> Cost {
        self.get(self.s_length, self.t_length)
    }

    pub fn dump(&self, out: &mut impl Write, s: &[u8], t: &[u8]) -> Result<()> {
        let column_width = self.last().to_string().len().max(3) + 1;

        write!(out, "{}", " ".repeat(2 * column_width))?;
        for t_residue in t {
            write!(
                out,
                "{:>w$}",
                char::from(NUCLEOTIDE_INVERSE_MAP[t_residue]),
                w = column_width
            )?;
        }
        writeln!(out)?;

        for s_idx in 0..=self.s_length {
            let label = match s_idx {
                0 => ' ',
                _ => char::from(NUCLEOTIDE_INVERSE_MAP[&s[s_idx - 1]]),
            };
            write!(out, "{:>w$}", label, w = column_width)?;

            for cost in self.row(s_idx) {
                write!(out, "{:>w$}", cost, w = column_width)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for CostTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for s_idx in 0..=self.s_length {
            writeln!(f, "{:?}", self.row(s_idx))?;
        }
        Ok(())
    }
}
