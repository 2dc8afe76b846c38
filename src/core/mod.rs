mod cell;
pub mod counter;
pub mod factory;

pub use crate::domain::model::{Bounds, CellSnapshot, CounterSpec};
pub use crate::domain::ports::Counter;
pub use crate::utils::error::Result;
