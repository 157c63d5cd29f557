use anyhow::Result;

use crate::align::structs::RollingRows;
use crate::align::{Cost, CostModel};
use crate::structs::check_digital;

/// Compute the last row of the cost table of S against T,
/// holding only two rows of the table at any time.
///
/// Both sequences are taken as iterators so that the reversed
/// halves used by Hirschberg's algorithm never need to be copied.
pub(crate) fn fill_last_row<S, T>(s: S, t: T, model: &CostModel) -> Vec<Cost>
where
    S: IntoIterator<Item = u8>,
    T: ExactSizeIterator<Item = u8> + Clone,
{
    let mut rows = RollingRows::new(t.len(), model);

    for (s_idx, s_residue) in s.into_iter().enumerate() {
        rows.current[0] = model.gap_run(s_idx + 1);

        for (t_idx, t_residue) in t.clone().enumerate() {
            let diag_cost = rows.previous[t_idx] + model.substitution(s_residue, t_residue);
            let up_cost = rows.previous[t_idx + 1] + model.gap();
            let left_cost = rows.current[t_idx] + model.gap();

            rows.current[t_idx + 1] = diag_cost.min(up_cost.min(left_cost));
        }

        rows.roll();
    }

    rows.into_last()
}

/// Compute the final row of the cost table of S against T in linear space.
///
/// Entry j is the optimal cost of aligning all of S with the first j residues of T.
pub fn last_row(s: &[u8], t: &[u8], model: &CostModel) -> Result<Vec<Cost>> {
    check_digital(s)?;
    check_digital(t)?;
    model.ensure_capacity(s.len(), t.len())?;

    Ok(fill_last_row(s.iter().copied(), t.iter().copied(), model))
}

/// Compute only the optimal global alignment cost of S against T.
///
/// The rows run along the shorter of the two sequences,
/// which is valid because the cost model is symmetric.
pub fn align_linear_cost(s: &[u8], t: &[u8], model: &CostModel) -> Result<Cost> {
    check_digital(s)?;
    check_digital(t)?;
    model.ensure_capacity(s.len(), t.len())?;

    let (long, short) = if s.len() >= t.len() { (s, t) } else { (t, s) };

    let row = fill_last_row(long.iter().copied(), short.iter().copied(), model);
    Ok(row[short.len()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align_quadratic;
    use crate::structs::{InvalidSymbolError, Sequence};
    use assert2::{check, let_assert};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn digital(text: &str) -> Vec<u8> {
        Sequence::from_utf8(text.as_bytes()).unwrap().digital_bytes
    }

    #[test]
    fn test_regression_oracle() {
        let cost = align_linear_cost(&digital("AAAC"), &digital("AGC"), &CostModel::default()).unwrap();
        check!(cost == 78);
    }

    #[test]
    fn test_last_row_matches_table() {
        let model = CostModel::default();
        let mut rng = Pcg64::seed_from_u64(11);

        for _ in 0..20 {
            let s_length = rng.gen_range(0..30);
            let t_length = rng.gen_range(0..30);
            let s = Sequence::random(s_length, &mut rng);
            let t = Sequence::random(t_length, &mut rng);

            let (_, table) = align_quadratic(&s.digital_bytes, &t.digital_bytes, &model).unwrap();
            let row = last_row(&s.digital_bytes, &t.digital_bytes, &model).unwrap();

            check!(row.as_slice() == table.row(s.length));
        }
    }

    #[test]
    fn test_reversed_iterators() {
        let model = CostModel::default();
        let s = digital("ACCGT");
        let t = digital("GGTAC");

        let s_reversed: Vec<u8> = s.iter().rev().copied().collect();
        let t_reversed: Vec<u8> = t.iter().rev().copied().collect();

        let from_iterators = fill_last_row(
            s.iter().rev().copied(),
            t.iter().rev().copied(),
            &model,
        );
        check!(from_iterators == last_row(&s_reversed, &t_reversed, &model).unwrap());
    }

    #[test]
    fn test_empty_sides() {
        let model = CostModel::default();
        check!(last_row(&[], &digital("ACG"), &model).unwrap() == vec![0, 30, 60, 90]);
        check!(last_row(&digital("AC"), &[], &model).unwrap() == vec![60]);
        check!(align_linear_cost(&[], &digital("ACGT"), &model).unwrap() == 120);
        check!(align_linear_cost(&digital("ACGT"), &[], &model).unwrap() == 120);
        check!(align_linear_cost(&[], &[], &model).unwrap() == 0);
    }

    #[test]
    fn test_invalid_digital_byte() {
        let_assert!(Err(err) = align_linear_cost(&[0], &[9], &CostModel::default()));
        check!(err.downcast_ref::<InvalidSymbolError>().is_some());
    }
}
