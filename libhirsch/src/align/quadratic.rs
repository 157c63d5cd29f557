use anyhow::Result;

use crate::align::structs::CostTable;
use crate::align::{Cost, CostModel};
use crate::structs::check_digital;

/// Fill the full (S + 1) x (T + 1) cost table.
///
/// Every cell takes the minimum of the diagonal (substitution),
/// the cell above (S residue against a gap) and the cell to the
/// left (gap against a T residue).
pub(crate) fn fill_table(s: &[u8], t: &[u8], model: &CostModel) -> CostTable {
    let mut table = CostTable::new(s.len(), t.len());
    table.init_borders(model);

    for s_idx in 1..=s.len() {
        let s_residue = s[s_idx - 1];

        for t_idx in 1..=t.len() {
            let t_residue = t[t_idx - 1];

            let diag_cost = table.get(s_idx - 1, t_idx - 1) + model.substitution(s_residue, t_residue);
            let up_cost = table.get(s_idx - 1, t_idx) + model.gap();
            let left_cost = table.get(s_idx, t_idx - 1) + model.gap();

            table.set(s_idx, t_idx, diag_cost.min(up_cost.min(left_cost)));
        }
    }

    table
}

/// Compute the optimal global alignment cost of two digital
/// sequences, along with the full cost table it was read from.
pub fn align_quadratic(s: &[u8], t: &[u8], model: &CostModel) -> Result<(Cost, CostTable)> {
    check_digital(s)?;
    check_digital(t)?;
    model.ensure_capacity(s.len(), t.len())?;

    log::debug!(
        "filling {} x {} cost table",
        s.len() + 1,
        t.len() + 1
    );

    let table = fill_table(s, t, model);
    Ok((table.last(), table))
}
