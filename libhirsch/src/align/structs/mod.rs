mod alignment;
pub use alignment::{Alignment, TraceMismatchError};

mod cost_table;
pub use cost_table::CostTable;

mod rolling_rows;
pub use rolling_rows::RollingRows;

mod trace;
pub use trace::{Trace, TraceStep};
