//! The hidden state behind a counter handle.
//!
//! Nothing outside `crate::core` can name [`Cell`], so its value is only
//! reachable through the handle that owns it.

use crate::domain::model::{Bounds, CellSnapshot};
use crate::utils::error::{CellError, Result};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
}

#[derive(Debug)]
pub(crate) struct Cell {
    value: AtomicI64,
    increments: AtomicU64,
    initial: i64,
    step: i64,
    bounds: Bounds,
}

impl Cell {
    /// Callers validate `step` and `initial` before constructing.
    pub(crate) fn new(initial: i64, step: i64, bounds: Bounds) -> Self {
        tracing::debug!(initial, step, bounds = %bounds, "creating cell");
        Self {
            value: AtomicI64::new(initial),
            increments: AtomicU64::new(0),
            initial,
            step,
            bounds,
        }
    }

    pub(crate) fn load(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// `Down` subtracts the step directly; negating `i64::MIN` would overflow.
    fn saturating_next(&self, value: i64, direction: Direction) -> i64 {
        match direction {
            Direction::Up => value.saturating_add(self.step),
            Direction::Down => value.saturating_sub(self.step),
        }
    }

    fn checked_next(&self, value: i64, direction: Direction) -> Option<i64> {
        match direction {
            Direction::Up => value.checked_add(self.step),
            Direction::Down => value.checked_sub(self.step),
        }
    }

    fn moves_up(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.step > 0,
            Direction::Down => self.step < 0,
        }
    }

    /// Applies one step, saturating at the bounds (or at the `i64` range).
    pub(crate) fn apply_saturating(&self, direction: Direction) -> i64 {
        let bounds = self.bounds;
        let previous = match self.value.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
            Some(bounds.clamp(self.saturating_next(v, direction)))
        }) {
            Ok(prev) | Err(prev) => prev,
        };
        let current = bounds.clamp(self.saturating_next(previous, direction));
        self.increments.fetch_add(1, Ordering::Relaxed);

        if self.checked_next(previous, direction) != Some(current) {
            tracing::warn!(
                previous,
                step = self.step,
                ?direction,
                current,
                bounds = %bounds,
                "⚠️ counter saturated"
            );
        } else {
            tracing::trace!(previous, current, "cell stepped");
        }
        current
    }

    /// Applies one step only if the result stays within bounds and `i64`.
    pub(crate) fn apply_checked(&self, direction: Direction) -> Result<i64> {
        let bounds = self.bounds;
        match self.value.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
            self.checked_next(v, direction)
                .filter(|next| bounds.contains(*next))
        }) {
            Ok(previous) => {
                self.increments.fetch_add(1, Ordering::Relaxed);
                // fetch_update 已確認不會溢位
                let current = self.saturating_next(previous, direction);
                tracing::trace!(previous, current, "cell stepped");
                Ok(current)
            }
            Err(value) => {
                let bound = if self.moves_up(direction) {
                    format!("upper {}", bounds.effective_upper())
                } else {
                    format!("lower {}", bounds.effective_lower())
                };
                tracing::debug!(value, step = self.step, ?direction, %bound, "rejected step outside bounds");
                Err(CellError::BoundExceeded {
                    value,
                    step: self.step,
                    bound,
                })
            }
        }
    }

    pub(crate) fn reset(&self) -> i64 {
        self.value.store(self.initial, Ordering::SeqCst);
        self.increments.store(0, Ordering::Relaxed);
        tracing::trace!(initial = self.initial, "cell reset");
        self.initial
    }

    pub(crate) fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            value: self.load(),
            initial: self.initial,
            step: self.step,
            bounds: self.bounds,
            increments: self.increments.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturates_at_upper_bound() {
        let cell = Cell::new(8, 3, Bounds::new(None, Some(10)));
        assert_eq!(cell.apply_saturating(Direction::Up), 10);
        assert_eq!(cell.apply_saturating(Direction::Up), 10);
        assert_eq!(cell.load(), 10);
    }

    #[test]
    fn test_saturates_at_i64_range() {
        let cell = Cell::new(i64::MAX - 1, 5, Bounds::unbounded());
        assert_eq!(cell.apply_saturating(Direction::Up), i64::MAX);

        let cell = Cell::new(i64::MIN + 1, 5, Bounds::unbounded());
        assert_eq!(cell.apply_saturating(Direction::Down), i64::MIN);
    }

    #[test]
    fn test_down_with_min_step_is_exact() {
        let cell = Cell::new(-5, i64::MIN, Bounds::unbounded());
        assert_eq!(cell.apply_checked(Direction::Down).unwrap(), i64::MAX - 4);

        let cell = Cell::new(-5, i64::MIN, Bounds::unbounded());
        assert_eq!(cell.apply_saturating(Direction::Down), i64::MAX - 4);
    }

    #[test]
    fn test_down_with_min_step_overflow_is_rejected() {
        let cell = Cell::new(0, i64::MIN, Bounds::unbounded());
        let err = cell.apply_checked(Direction::Down).unwrap_err();
        match err {
            CellError::BoundExceeded { value, step, bound } => {
                assert_eq!(value, 0);
                assert_eq!(step, i64::MIN);
                assert_eq!(bound, format!("upper {}", i64::MAX));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(cell.load(), 0);

        assert_eq!(cell.apply_saturating(Direction::Down), i64::MAX);
    }

    #[test]
    fn test_checked_step_leaves_value_untouched() {
        let cell = Cell::new(9, 2, Bounds::new(Some(0), Some(10)));
        let err = cell.apply_checked(Direction::Up).unwrap_err();
        match err {
            CellError::BoundExceeded { value, step, bound } => {
                assert_eq!(value, 9);
                assert_eq!(step, 2);
                assert_eq!(bound, "upper 10");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(cell.load(), 9);
        assert_eq!(cell.snapshot().increments, 0);
    }

    #[test]
    fn test_checked_step_with_negative_step() {
        let cell = Cell::new(1, -2, Bounds::new(Some(0), None));
        let err = cell.apply_checked(Direction::Up).unwrap_err();
        assert!(err.to_string().contains("lower 0"));
        assert_eq!(cell.apply_checked(Direction::Down).unwrap(), 3);
    }

    #[test]
    fn test_reset_restores_initial() {
        let cell = Cell::new(4, 1, Bounds::unbounded());
        cell.apply_saturating(Direction::Up);
        cell.apply_saturating(Direction::Up);
        assert_eq!(cell.snapshot().increments, 2);
        assert_eq!(cell.reset(), 4);
        assert_eq!(cell.load(), 4);
        assert_eq!(cell.snapshot().increments, 0);
    }
}
