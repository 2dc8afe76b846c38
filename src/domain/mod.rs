// Domain layer: cell models and the counter capability trait. No dependencies beyond std/serde.

pub mod model;
pub mod ports;
