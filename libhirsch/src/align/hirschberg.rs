use std::ops::Range;

use anyhow::Result;

use crate::align::linear::fill_last_row;
use crate::align::quadratic::fill_table;
use crate::align::structs::{Alignment, Trace};
use crate::align::{traceback, Cost, CostModel};
use crate::structs::check_digital;
use crate::util::SliceMath;

/// Sub-problems where either sequence is at most this long
/// are solved directly with a full cost table.
pub const BASE_CASE_LENGTH: usize = 2;

/// The forward and reverse cost rows of one divide step.
///
/// `prefix[j]` is the cost of aligning the left half of S with
/// the first j residues of T. `suffix[k]` is the cost of aligning
/// the reversed right half of S with the first k residues of the
/// reversed T, which is the cost of aligning the right half of S
/// with the last k residues of T.
pub struct SplitRows {
    pub prefix: Vec<Cost>,
    pub suffix: Vec<Cost>,
}

impl SplitRows {
    pub fn new(s_left: &[u8], s_right: &[u8], t: &[u8], model: &CostModel) -> Self {
        Self {
            prefix: fill_last_row(s_left.iter().copied(), t.iter().copied(), model),
            suffix: fill_last_row(
                s_right.iter().rev().copied(),
                t.iter().rev().copied(),
                model,
            ),
        }
    }

    pub fn t_length(&self) -> usize {
        self.prefix.len() - 1
    }

    /// The cost of aligning the left half of S with T[..t_idx].
    pub fn cost_from_prefix(&self, t_idx: usize) -> Cost {
        self.prefix[t_idx]
    }

    /// The cost of aligning the right half of S with T[t_idx..].
    pub fn cost_from_suffix(&self, t_idx: usize) -> Cost {
        self.suffix[self.t_length() - t_idx]
    }

    /// The column of T where an optimal alignment crosses from the left
    /// half of S to the right half, along with the total cost through it.
    ///
    /// Ties resolve to the smallest column.
    pub fn best_split(&self) -> (usize, Cost) {
        let totals: Vec<Cost> = (0..=self.t_length())
            .map(|t_idx| self.cost_from_prefix(t_idx) + self.cost_from_suffix(t_idx))
            .collect();

        // there is always at least the column 0
        let split = totals.argmin().unwrap_or_default();
        (split, totals[split])
    }
}

struct SubProblem {
    s_range: Range<usize>,
    t_range: Range<usize>,
}

fn hirschberg_trace(s: &[u8], t: &[u8], model: &CostModel) -> Result<(Cost, Trace)> {
    let mut trace = Trace::with_capacity(s.len() + t.len());
    let mut cost: Cost = 0;

    let mut pending = vec![SubProblem {
        s_range: 0..s.len(),
        t_range: 0..t.len(),
    }];

    while let Some(SubProblem { s_range, t_range }) = pending.pop() {
        let s_part = &s[s_range.clone()];
        let t_part = &t[t_range.clone()];

        if s_part.len() <= BASE_CASE_LENGTH || t_part.len() <= BASE_CASE_LENGTH {
            let table = fill_table(s_part, t_part, model);
            let mut part_trace = traceback(&table, s_part, t_part, model)?;

            cost += table.last();
            trace.append(&mut part_trace);
            continue;
        }

        let mid = s_part.len() / 2;
        let (split, split_cost) =
            SplitRows::new(&s_part[..mid], &s_part[mid..], t_part, model).best_split();

        log::trace!(
            "split S[{}..{}] x T[{}..{}] at ({}, {}) with cost {}",
            s_range.start,
            s_range.end,
            t_range.start,
            t_range.end,
            s_range.start + mid,
            t_range.start + split,
            split_cost
        );

        let s_mid = s_range.start + mid;
        let t_mid = t_range.start + split;

        // the right half goes on the stack first so that
        // the halves are solved, and traced, left to right
        pending.push(SubProblem {
            s_range: s_mid..s_range.end,
            t_range: t_mid..t_range.end,
        });
        pending.push(SubProblem {
            s_range: s_range.start..s_mid,
            t_range: t_range.start..t_mid,
        });
    }

    Ok((cost, trace))
}

/// Compute an optimal global alignment using Hirschberg's divide and conquer algorithm.
///
/// The work is quadratic, but only two cost rows along the shorter
/// sequence are live at any time, plus the stack of pending sub-problems.
pub fn align_hirschberg(s: &[u8], t: &[u8], model: &CostModel) -> Result<Alignment> {
    check_digital(s)?;
    check_digital(t)?;
    model.ensure_capacity(s.len(), t.len())?;

    log::debug!("hirschberg alignment of {} x {}", s.len(), t.len());

    if t.len() > s.len() {
        let (cost, trace) = hirschberg_trace(t, s, model)?;
        Alignment::from_trace(&trace.transposed(), s, t, cost)
    } else {
        let (cost, trace) = hirschberg_trace(s, t, model)?;
        Alignment::from_trace(&trace, s, t, cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align_linear_cost, align_quadratic, DEFAULT_SUBSTITUTION_COSTS};
    use crate::structs::{InvalidSymbolError, Sequence};
    use assert2::{check, let_assert};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn digital(text: &str) -> Vec<u8> {
        Sequence::from_utf8(text.as_bytes()).unwrap().digital_bytes
    }

    fn quadratic_cost(s: &[u8], t: &[u8], model: &CostModel) -> Cost {
        align_quadratic(s, t, model).unwrap().0
    }

    fn check_alignment(alignment: &Alignment, s: &[u8], t: &[u8], model: &CostModel) {
        check!(alignment.s_ungapped() == s);
        check!(alignment.t_ungapped() == t);
        check!(alignment.s_aligned.len() == alignment.t_aligned.len());
        check!(alignment.rescore(model) == alignment.cost);
    }

    #[test]
    fn test_regression_oracle() {
        let model = CostModel::default();
        let (s, t) = (digital("AAAC"), digital("AGC"));

        let alignment = align_hirschberg(&s, &t, &model).unwrap();
        check!(alignment.cost == 78);
        check_alignment(&alignment, &s, &t, &model);
    }

    #[test]
    fn test_tie_order_follows_longer_sequence() {
        // with free gaps every path is optimal; when T is the longer
        // sequence the ties are broken with T in the row role
        let model = CostModel::new(DEFAULT_SUBSTITUTION_COSTS, 0).unwrap();
        let (s, t) = (digital("A"), digital("CG"));

        let alignment = align_hirschberg(&s, &t, &model).unwrap();
        check!(alignment.cost == 0);
        check!(alignment.s_string() == "A__");
        check!(alignment.t_string() == "_CG");

        let swapped = align_hirschberg(&t, &s, &model).unwrap();
        check!(swapped.s_string() == "_CG");
        check!(swapped.t_string() == "A__");

        // the full table keeps S in the row role
        let (_, table) = align_quadratic(&s, &t, &model).unwrap();
        let quadratic = crate::align::backtrack(&table, &s, &t, &model).unwrap();
        check!(quadratic.s_string() == "__A");
        check!(quadratic.t_string() == "CG_");
    }

    #[test]
    fn test_empty_s() {
        let alignment = align_hirschberg(&[], &digital("ACGT"), &CostModel::default()).unwrap();
        check!(alignment.cost == 120);
        check!(alignment.s_string() == "____");
        check!(alignment.t_string() == "ACGT");
    }

    #[test]
    fn test_empty_t() {
        let s = digital("ACGTACGTAC");
        let alignment = align_hirschberg(&s, &[], &CostModel::default()).unwrap();
        check!(alignment.cost == 300);
        check!(alignment.s_string() == "ACGTACGTAC");
        check!(alignment.t_string() == "__________");
    }

    #[test]
    fn test_identity() {
        let model = CostModel::default();
        let mut rng = Pcg64::seed_from_u64(3);
        let s = Sequence::random(257, &mut rng);

        let alignment = align_hirschberg(&s.digital_bytes, &s.digital_bytes, &model).unwrap();
        check!(alignment.cost == 0);
        check!(alignment.gap_count() == 0);
    }

    #[test]
    fn test_split_matches_brute_force() {
        let model = CostModel::default();
        let mut rng = Pcg64::seed_from_u64(19);

        for _ in 0..50 {
            let s_length = rng.gen_range(2..12);
            let t_length = rng.gen_range(0..12);
            let s = Sequence::random(s_length, &mut rng).digital_bytes;
            let t = Sequence::random(t_length, &mut rng).digital_bytes;

            let mid = s.len() / 2;
            let (s_left, s_right) = s.split_at(mid);
            let rows = SplitRows::new(s_left, s_right, &t, &model);

            let mut brute_force: Vec<Cost> = vec![];
            for t_idx in 0..=t.len() {
                let left = quadratic_cost(s_left, &t[..t_idx], &model);
                let right = quadratic_cost(s_right, &t[t_idx..], &model);

                check!(rows.cost_from_prefix(t_idx) == left);
                check!(rows.cost_from_suffix(t_idx) == right);
                brute_force.push(left + right);
            }

            let brute_force_split = brute_force.argmin().unwrap();
            let (split, split_cost) = rows.best_split();
            check!(split == brute_force_split);
            check!(split_cost == brute_force[brute_force_split]);
            check!(split_cost == quadratic_cost(&s, &t, &model));
        }
    }

    #[test]
    fn test_split_tie_takes_smallest_column() {
        // with free gaps every column is an optimal crossing
        let model = CostModel::new(crate::align::DEFAULT_SUBSTITUTION_COSTS, 0).unwrap();
        let rows = SplitRows::new(&digital("AC"), &digital("GT"), &digital("TTTT"), &model);
        check!(rows.best_split() == (0, 0));
    }

    #[test]
    fn test_around_base_case() {
        // every pair of sequences up to one residue past the base case
        let model = CostModel::default();
        let max_length = BASE_CASE_LENGTH + 1;

        let mut sequences: Vec<Vec<u8>> = vec![vec![]];
        let mut frontier: Vec<Vec<u8>> = vec![vec![]];
        for _ in 0..max_length {
            frontier = frontier
                .iter()
                .flat_map(|seq| {
                    (0..4u8).map(move |residue| {
                        let mut extended = seq.clone();
                        extended.push(residue);
                        extended
                    })
                })
                .collect();
            sequences.extend(frontier.iter().cloned());
        }

        for s in &sequences {
            for t in &sequences {
                let alignment = align_hirschberg(s, t, &model).unwrap();
                check!(alignment.cost == quadratic_cost(s, t, &model));
                check_alignment(&alignment, s, t, &model);
            }
        }
    }

    #[test]
    fn test_random_agreement() {
        let model = CostModel::default();
        let mut rng = Pcg64::seed_from_u64(42);

        for _ in 0..100 {
            let s_length = rng.gen_range(0..60);
            let t_length = rng.gen_range(0..60);
            let s = Sequence::random(s_length, &mut rng).digital_bytes;
            let t = Sequence::random(t_length, &mut rng).digital_bytes;

            let alignment = align_hirschberg(&s, &t, &model).unwrap();
            check!(alignment.cost == quadratic_cost(&s, &t, &model));
            check_alignment(&alignment, &s, &t, &model);
        }
    }

    #[test]
    fn test_skewed_lengths() {
        let model = CostModel::default();
        let mut rng = Pcg64::seed_from_u64(5);
        let s = Sequence::random(3000, &mut rng).digital_bytes;
        let t = Sequence::random(4, &mut rng).digital_bytes;

        for (s, t) in [(&s, &t), (&t, &s)] {
            let alignment = align_hirschberg(s, t, &model).unwrap();
            check!(alignment.cost == align_linear_cost(s, t, &model).unwrap());
            check_alignment(&alignment, s, t, &model);
        }
    }

    #[test]
    fn test_scale() {
        let model = CostModel::default();
        let mut rng = Pcg64::seed_from_u64(1000);
        let s = Sequence::random(1000, &mut rng).digital_bytes;
        let t = Sequence::random(1100, &mut rng).digital_bytes;

        let alignment = align_hirschberg(&s, &t, &model).unwrap();
        check!(alignment.cost == align_linear_cost(&s, &t, &model).unwrap());
        check_alignment(&alignment, &s, &t, &model);
    }

    #[test]
    fn test_invalid_digital_byte() {
        let_assert!(Err(err) = align_hirschberg(&[0, 1], &[2, 200], &CostModel::default()));
        let_assert!(Some(invalid) = err.downcast_ref::<InvalidSymbolError>());
        check!(invalid.byte == 200);
    }
}
