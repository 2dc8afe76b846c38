use crate::core::counter::CounterHandle;
use crate::domain::model::CounterSpec;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::atomic::{AtomicU64, Ordering};

/// A validated recipe that stamps out independent counters.
///
/// Validation happens once in [`CellFactory::new`]; `create` cannot fail.
#[derive(Debug)]
pub struct CellFactory {
    spec: CounterSpec,
    created: AtomicU64,
}

impl CellFactory {
    pub fn new(spec: CounterSpec) -> Result<Self> {
        spec.validate()?;
        tracing::debug!(
            initial = spec.initial,
            step = spec.step,
            bounds = %spec.bounds,
            "cell factory ready"
        );
        Ok(Self {
            spec,
            created: AtomicU64::new(0),
        })
    }

    /// Each call allocates a fresh cell.
    pub fn create(&self) -> CounterHandle {
        let n = self.created.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(handle = n, "factory created handle");
        CounterHandle::from_spec(&self.spec)
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }
}
