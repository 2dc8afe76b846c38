use crate::domain::model::CellSnapshot;

/// The capability set exposed over one hidden cell.
///
/// Implementors mutate their state only through these methods. There is no
/// setter.
pub trait Counter: Send + Sync {
    /// Adds the configured step and returns the new value.
    fn increment(&self) -> i64;

    /// Subtracts the configured step and returns the new value.
    fn decrement(&self) -> i64;

    /// Current value, without mutation.
    fn get(&self) -> i64;

    /// Restores the initial value and returns it.
    fn reset(&self) -> i64;

    fn snapshot(&self) -> CellSnapshot;
}
