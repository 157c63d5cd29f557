use anyhow::Result;
use thiserror::Error;

use crate::align::structs::{Alignment, CostTable, Trace, TraceStep};
use crate::align::CostModel;
use crate::structs::check_digital;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("no predecessor of cost table cell ({s_idx}, {t_idx}) reproduces its cost")]
pub struct InconsistentTableError {
    pub s_idx: usize,
    pub t_idx: usize,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("cost table for lengths {table_s_length} x {table_t_length} does not fit sequences of lengths {s_length} x {t_length}")]
pub struct TableShapeError {
    pub table_s_length: usize,
    pub table_t_length: usize,
    pub s_length: usize,
    pub t_length: usize,
}

/// Walk a filled cost table from (S, T) back to (0, 0).
///
/// At each cell the predecessors are tested in a fixed order:
/// diagonal, then up (S residue against a gap), then left (gap
/// against a T residue). The first one that reproduces the cost
/// of the current cell is taken, so that among several optimal
/// alignments the same one is always returned.
pub(crate) fn traceback(
    table: &CostTable,
    s: &[u8],
    t: &[u8],
    model: &CostModel,
) -> Result<Trace> {
    if table.s_length != s.len() || table.t_length != t.len() {
        return Err(TableShapeError {
            table_s_length: table.s_length,
            table_t_length: table.t_length,
            s_length: s.len(),
            t_length: t.len(),
        }
        .into());
    }

    let mut trace = Trace::with_capacity(s.len() + t.len());
    let mut s_idx = s.len();
    let mut t_idx = t.len();

    while s_idx > 0 || t_idx > 0 {
        let current_cost = table.get(s_idx, t_idx);

        // checked sums so that a corrupted table is
        // reported instead of overflowing
        let diag_matches = s_idx > 0
            && t_idx > 0
            && table
                .get(s_idx - 1, t_idx - 1)
                .checked_add(model.substitution(s[s_idx - 1], t[t_idx - 1]))
                == Some(current_cost);

        let up_matches = s_idx > 0
            && table.get(s_idx - 1, t_idx).checked_add(model.gap()) == Some(current_cost);

        let left_matches = t_idx > 0
            && table.get(s_idx, t_idx - 1).checked_add(model.gap()) == Some(current_cost);

        if diag_matches {
            s_idx -= 1;
            t_idx -= 1;
            trace.push(TraceStep::Diagonal);
        } else if up_matches {
            s_idx -= 1;
            trace.push(TraceStep::Up);
        } else if left_matches {
            t_idx -= 1;
            trace.push(TraceStep::Left);
        } else {
            return Err(InconsistentTableError { s_idx, t_idx }.into());
        }
    }

    trace.reverse();
    Ok(trace)
}

/// Recover one optimal alignment from a table filled by `align_quadratic`.
pub fn backtrack(table: &CostTable, s: &[u8], t: &[u8], model: &CostModel) -> Result<Alignment> {
    check_digital(s)?;
    check_digital(t)?;

    let trace = traceback(table, s, t, model)?;
    Alignment::from_trace(&trace, s, t, table.last())
}
