use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alphabet::NUCLEOTIDE_ALPHABET_SIZE;

/// The integer type of every alignment cost.
///
/// Costs are sums of non-negative integers, so they compare exactly.
pub type Cost = u32;

pub const DEFAULT_GAP_COST: Cost = 30;

/// Substitution costs in A, C, G, T order.
pub const DEFAULT_SUBSTITUTION_COSTS: [[Cost; NUCLEOTIDE_ALPHABET_SIZE]; NUCLEOTIDE_ALPHABET_SIZE] = [
    [0, 110, 48, 94],
    [110, 0, 118, 48],
    [48, 118, 0, 110],
    [94, 48, 110, 0],
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidCostModelError {
    #[error("substitution cost of identical residues must be zero: [{idx}][{idx}] = {cost}")]
    NonZeroDiagonal { idx: usize, cost: Cost },
    #[error("substitution costs must be symmetric: [{a}][{b}] = {ab}, [{b}][{a}] = {ba}")]
    Asymmetric { a: usize, b: usize, ab: Cost, ba: Cost },
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("alignment costs of sequences with lengths {s_length} and {t_length} would overflow")]
pub struct CostOverflowError {
    pub s_length: usize,
    pub t_length: usize,
}

#[derive(Deserialize)]
struct CostModelConfig {
    substitution: [[Cost; NUCLEOTIDE_ALPHABET_SIZE]; NUCLEOTIDE_ALPHABET_SIZE],
    gap: Cost,
}

impl TryFrom<CostModelConfig> for CostModel {
    type Error = InvalidCostModelError;

    fn try_from(config: CostModelConfig) -> Result<Self, Self::Error> {
        CostModel::new(config.substitution, config.gap)
    }
}

/// The substitution cost matrix and the linear gap cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CostModelConfig")]
pub struct CostModel {
    substitution: [[Cost; NUCLEOTIDE_ALPHABET_SIZE]; NUCLEOTIDE_ALPHABET_SIZE],
    gap: Cost,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            substitution: DEFAULT_SUBSTITUTION_COSTS,
            gap: DEFAULT_GAP_COST,
        }
    }
}

impl CostModel {
    pub fn new(
        substitution: [[Cost; NUCLEOTIDE_ALPHABET_SIZE]; NUCLEOTIDE_ALPHABET_SIZE],
        gap: Cost,
    ) -> Result<Self, InvalidCostModelError> {
        for a in 0..NUCLEOTIDE_ALPHABET_SIZE {
            if substitution[a][a] != 0 {
                return Err(InvalidCostModelError::NonZeroDiagonal {
                    idx: a,
                    cost: substitution[a][a],
                });
            }
            for b in (a + 1)..NUCLEOTIDE_ALPHABET_SIZE {
                if substitution[a][b] != substitution[b][a] {
                    return Err(InvalidCostModelError::Asymmetric {
                        a,
                        b,
                        ab: substitution[a][b],
                        ba: substitution[b][a],
                    });
                }
            }
        }

        Ok(Self { substitution, gap })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse cost model json")
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "failed to read cost model file: {}",
                path.as_ref().to_string_lossy()
            )
        })?;
        Self::from_json_str(&json)
    }

    /// The cost of pairing two digital residues.
    #[inline(always)]
    pub fn substitution(&self, a: u8, b: u8) -> Cost {
        self.substitution[a as usize][b as usize]
    }

    /// The cost of pairing one residue with a gap.
    #[inline(always)]
    pub fn gap(&self) -> Cost {
        self.gap
    }

    /// The cost of aligning `length` residues against nothing.
    #[inline(always)]
    pub fn gap_run(&self, length: usize) -> Cost {
        length as Cost * self.gap
    }

    pub fn max_substitution(&self) -> Cost {
        self.substitution
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or_default()
    }

    /// Checks that no cell or candidate of a table for sequences
    /// of the given lengths can exceed the range of `Cost`.
    ///
    /// Every cell (i, j) is bounded by `gap * (i + j)`, and every
    /// candidate by that plus one substitution.
    pub fn ensure_capacity(&self, s_length: usize, t_length: usize) -> Result<()> {
        let bound = (s_length as u64)
            .checked_add(t_length as u64)
            .and_then(|steps| steps.checked_mul(self.gap as u64))
            .and_then(|cost| cost.checked_add(self.max_substitution() as u64));

        match bound {
            Some(bound)
                if bound <= Cost::MAX as u64
                    && (s_length.max(t_length) as u64) <= Cost::MAX as u64 =>
            {
                Ok(())
            }
            _ => Err(CostOverflowError { s_length, t_length }.into()),
        }
    }
}
