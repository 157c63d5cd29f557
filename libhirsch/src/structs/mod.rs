pub mod sequence;
pub use sequence::{check_digital, digitize, InvalidSymbolError, Sequence};
