use crate::align::{Cost, CostModel};

/// The two live rows of a linear-space cost table.
///
/// `previous` holds row i - 1 and `current` is filled as row i.
/// After each row is complete, `roll()` swaps the buffers so
/// that no row is ever copied.
#[derive(Clone, Debug)]
pub struct RollingRows {
    pub previous: Vec<Cost>,
    pub current: Vec<Cost>,
}

impl RollingRows {
    /// Create the rows for a table with `t_length` + 1 columns,
    /// with `previous` initialized to row 0 of the table.
    pub fn new(t_length: usize, model: &CostModel) -> Self {
        Self {
            previous: (0..=t_length).map(|t_idx| model.gap_run(t_idx)).collect(),
            current: vec![0; t_length + 1],
        }
    }

    pub fn roll(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
    }

    /// Consume the rows, returning the last completed row.
    pub fn into_last(self) -> Vec<Cost> {
        self.previous
    }
}
