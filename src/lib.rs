//! Encapsulated counter cells.
//!
//! A [`CounterHandle`] owns one hidden integer cell and exposes a fixed set
//! of operations over it. No code outside the handle can read or write the
//! cell except through those operations.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::scenario::{ScenarioReport, ScenarioRunner};
pub use config::toml_config::ScenarioConfig;
pub use core::{
    counter::{create_counter, create_counter_default, CounterBuilder, CounterHandle},
    factory::CellFactory,
};
pub use domain::{
    model::{Bounds, CellSnapshot, CounterSpec},
    ports::Counter,
};
pub use utils::error::{CellError, Result};
