pub mod structs;

mod cost_model;
pub use cost_model::{
    Cost, CostModel, CostOverflowError, InvalidCostModelError, DEFAULT_GAP_COST,
    DEFAULT_SUBSTITUTION_COSTS,
};

mod quadratic;
pub use quadratic::align_quadratic;

mod traceback;
pub use traceback::{backtrack, InconsistentTableError, TableShapeError};
pub(crate) use traceback::traceback;

mod linear;
pub use linear::{align_linear_cost, last_row};

mod hirschberg;
pub use hirschberg::{align_hirschberg, SplitRows, BASE_CASE_LENGTH};
