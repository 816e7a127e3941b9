pub mod row;
pub use row::*;

pub mod eval;
pub use eval::*;
