use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional inclusive bounds for a cell's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl Bounds {
    pub fn new(lower: Option<i64>, upper: Option<i64>) -> Self {
        Self { lower, upper }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_bounded(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lower.map_or(true, |lo| value >= lo) && self.upper.map_or(true, |hi| value <= hi)
    }

    /// 超出範圍時夾回最近的邊界
    pub fn clamp(&self, value: i64) -> i64 {
        let value = self.lower.map_or(value, |lo| value.max(lo));
        self.upper.map_or(value, |hi| value.min(hi))
    }

    pub(crate) fn effective_lower(&self) -> i64 {
        self.lower.unwrap_or(i64::MIN)
    }

    pub(crate) fn effective_upper(&self) -> i64 {
        self.upper.unwrap_or(i64::MAX)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (Some(lo), Some(hi)) => write!(f, "[{}, {}]", lo, hi),
            (Some(lo), None) => write!(f, "[{}, +inf)", lo),
            (None, Some(hi)) => write!(f, "(-inf, {}]", hi),
            (None, None) => write!(f, "(-inf, +inf)"),
        }
    }
}

/// Description of a counter before any cell exists.
///
/// A spec is only a recipe: it can be cloned and shared freely, while every
/// handle built from it owns a separate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub initial: i64,
    pub step: i64,
    #[serde(default)]
    pub bounds: Bounds,
}

impl CounterSpec {
    pub fn new(initial: i64, step: i64) -> Self {
        Self {
            initial,
            step,
            bounds: Bounds::unbounded(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
}

impl Default for CounterSpec {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// Read-only view of a handle's state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub value: i64,
    pub initial: i64,
    pub step: i64,
    pub bounds: Bounds,
    pub increments: u64,
}
