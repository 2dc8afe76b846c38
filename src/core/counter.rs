use crate::core::cell::{Cell, Direction};
use crate::domain::model::{Bounds, CellSnapshot, CounterSpec};
use crate::domain::ports::Counter;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_bounds, validate_non_zero_step, validate_within_bounds, Validate,
};
use std::fmt;

/// An opaque handle owning exactly one hidden cell.
///
/// Handles are not `Clone`: two handles never share a cell.
pub struct CounterHandle {
    cell: Cell,
}

impl CounterHandle {
    pub(crate) fn from_spec(spec: &CounterSpec) -> Self {
        Self {
            cell: Cell::new(spec.initial, spec.step, spec.bounds),
        }
    }

    pub fn increment(&self) -> i64 {
        self.cell.apply_saturating(Direction::Up)
    }

    pub fn decrement(&self) -> i64 {
        self.cell.apply_saturating(Direction::Down)
    }

    /// Fails with `BoundExceeded`, leaving the value unchanged, when the
    /// next value would fall outside the bounds.
    pub fn try_increment(&self) -> Result<i64> {
        self.cell.apply_checked(Direction::Up)
    }

    pub fn try_decrement(&self) -> Result<i64> {
        self.cell.apply_checked(Direction::Down)
    }

    pub fn get(&self) -> i64 {
        self.cell.load()
    }

    pub fn reset(&self) -> i64 {
        self.cell.reset()
    }

    pub fn snapshot(&self) -> CellSnapshot {
        self.cell.snapshot()
    }
}

impl Counter for CounterHandle {
    fn increment(&self) -> i64 {
        CounterHandle::increment(self)
    }

    fn decrement(&self) -> i64 {
        CounterHandle::decrement(self)
    }

    fn get(&self) -> i64 {
        CounterHandle::get(self)
    }

    fn reset(&self) -> i64 {
        CounterHandle::reset(self)
    }

    fn snapshot(&self) -> CellSnapshot {
        CounterHandle::snapshot(self)
    }
}

impl fmt::Debug for CounterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("CounterHandle")
            .field("value", &snapshot.value)
            .field("step", &snapshot.step)
            .field("bounds", &snapshot.bounds)
            .finish()
    }
}

impl Validate for CounterSpec {
    fn validate(&self) -> Result<()> {
        validate_non_zero_step("step", self.step)?;
        validate_bounds("bounds", self.bounds.lower, self.bounds.upper)?;
        validate_within_bounds("initial", self.initial, self.bounds.lower, self.bounds.upper)?;
        Ok(())
    }
}

/// Creates a counter starting at `initial` that moves by `step`.
///
/// `step == 0` is rejected with `CellError::InvalidArgument`.
///
/// ```
/// let counter = cell_factory::create_counter(10, 5)?;
/// assert_eq!(counter.increment(), 15);
/// assert_eq!(counter.increment(), 20);
/// assert_eq!(counter.get(), 20);
/// # Ok::<(), cell_factory::CellError>(())
/// ```
pub fn create_counter(initial: i64, step: i64) -> Result<CounterHandle> {
    CounterBuilder::new().initial(initial).step(step).build()
}

/// `create_counter(0, 1)`.
pub fn create_counter_default() -> CounterHandle {
    CounterHandle::from_spec(&CounterSpec::default())
}

#[derive(Debug, Clone, Default)]
pub struct CounterBuilder {
    spec: CounterSpec,
}

impl CounterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial(mut self, initial: i64) -> Self {
        self.spec.initial = initial;
        self
    }

    pub fn step(mut self, step: i64) -> Self {
        self.spec.step = step;
        self
    }

    pub fn lower(mut self, lower: i64) -> Self {
        self.spec.bounds.lower = Some(lower);
        self
    }

    pub fn upper(mut self, upper: i64) -> Self {
        self.spec.bounds.upper = Some(upper);
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.spec.bounds = bounds;
        self
    }

    pub fn build(self) -> Result<CounterHandle> {
        self.spec.validate()?;
        Ok(CounterHandle::from_spec(&self.spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CellError;

    #[test]
    fn test_create_counter_scenario() {
        let h = create_counter(10, 5).unwrap();
        assert_eq!(h.increment(), 15);
        assert_eq!(h.increment(), 20);
        assert_eq!(h.get(), 20);
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = create_counter(0, 0).unwrap_err();
        assert!(matches!(
            err,
            CellError::InvalidArgument { ref field, .. } if field == "step"
        ));
    }

    #[test]
    fn test_default_counter_starts_at_zero() {
        let h = create_counter_default();
        assert_eq!(h.get(), 0);
        assert_eq!(h.increment(), 1);
    }

    #[test]
    fn test_get_is_idempotent() {
        let h = create_counter(3, 2).unwrap();
        h.increment();
        let first = h.get();
        assert_eq!(h.get(), first);
        assert_eq!(h.get(), first);
    }

    #[test]
    fn test_builder_rejects_inverted_bounds() {
        let err = CounterBuilder::new().lower(10).upper(0).build().unwrap_err();
        assert!(matches!(
            err,
            CellError::InvalidArgument { ref field, .. } if field == "bounds"
        ));
    }

    #[test]
    fn test_builder_rejects_initial_outside_bounds() {
        let err = CounterBuilder::new()
            .initial(50)
            .lower(0)
            .upper(10)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            CellError::InvalidArgument { ref field, .. } if field == "initial"
        ));
    }

    #[test]
    fn test_bounded_increment_saturates_and_try_fails() {
        let h = CounterBuilder::new()
            .initial(0)
            .step(4)
            .upper(10)
            .build()
            .unwrap();
        assert_eq!(h.increment(), 4);
        assert_eq!(h.increment(), 8);
        assert!(h.try_increment().is_err());
        assert_eq!(h.get(), 8);
        assert_eq!(h.increment(), 10);
    }

    #[test]
    fn test_decrement_with_min_step() {
        let h = create_counter(-5, i64::MIN).unwrap();
        assert_eq!(h.try_decrement().unwrap(), 9_223_372_036_854_775_803);

        let h = create_counter(0, i64::MIN).unwrap();
        assert!(matches!(
            h.try_decrement(),
            Err(CellError::BoundExceeded { value: 0, .. })
        ));
        assert_eq!(h.get(), 0);

        let h = create_counter(-5, i64::MIN).unwrap();
        assert_eq!(h.decrement(), 9_223_372_036_854_775_803);
    }

    #[test]
    fn test_decrement_and_reset() {
        let h = create_counter(5, 2).unwrap();
        assert_eq!(h.decrement(), 3);
        assert_eq!(h.try_decrement().unwrap(), 1);
        assert_eq!(h.reset(), 5);
        assert_eq!(h.get(), 5);
    }

    #[test]
    fn test_handle_through_trait_object() {
        let h: Box<dyn Counter> = Box::new(create_counter(0, -1).unwrap());
        assert_eq!(h.increment(), -1);
        assert_eq!(h.decrement(), 0);
        assert_eq!(h.snapshot().increments, 2);
    }

    #[test]
    fn test_debug_shows_value() {
        let h = create_counter(7, 1).unwrap();
        let debug = format!("{:?}", h);
        assert!(debug.contains("value: 7"));
    }
}
