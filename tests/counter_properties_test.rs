use cell_factory::{create_counter, create_counter_default, CellError, CounterBuilder};
use proptest::prelude::*;

proptest! {
    #[test]
    fn increments_accumulate_step(
        v0 in -1_000_000i64..1_000_000,
        step in prop_oneof![-1_000i64..0, 1i64..1_000],
        n in 0usize..200,
    ) {
        let h = create_counter(v0, step).unwrap();
        for _ in 0..n {
            h.increment();
        }
        prop_assert_eq!(h.get(), v0 + n as i64 * step);
    }

    #[test]
    fn handles_never_share_state(
        a0 in -1_000i64..1_000,
        b0 in -1_000i64..1_000,
        n in 1usize..50,
    ) {
        let h1 = create_counter(a0, 3).unwrap();
        let h2 = create_counter(b0, 3).unwrap();
        for _ in 0..n {
            h1.increment();
        }
        h1.decrement();
        h1.reset();
        h1.increment();
        prop_assert_eq!(h2.get(), b0);
    }

    #[test]
    fn get_is_idempotent(v0 in any::<i32>(), reads in 1usize..20) {
        let h = create_counter(v0 as i64, 1).unwrap();
        h.increment();
        let first = h.get();
        for _ in 0..reads {
            prop_assert_eq!(h.get(), first);
        }
    }

    #[test]
    fn successive_reads_differ_by_step(v0 in any::<i32>(), step in 1i64..10_000) {
        let h = create_counter(v0 as i64, step).unwrap();
        h.increment();
        let first = h.get();
        h.increment();
        let second = h.get();
        prop_assert_eq!(second, first + step);
    }

    #[test]
    fn bounded_counter_stays_in_bounds(
        step in prop_oneof![-20i64..0, 1i64..20],
        ops in proptest::collection::vec(any::<bool>(), 0..100),
    ) {
        let h = CounterBuilder::new().initial(0).step(step).lower(-50).upper(50).build().unwrap();
        for up in ops {
            let value = if up { h.increment() } else { h.decrement() };
            prop_assert!((-50..=50).contains(&value));
        }
    }
}

#[test]
fn test_zero_step_is_invalid_argument() {
    let err = create_counter(0, 0).unwrap_err();
    assert!(matches!(err, CellError::InvalidArgument { .. }));
}

#[test]
fn test_defaults_start_at_zero() {
    let h = create_counter_default();
    assert_eq!(h.get(), 0);
}

#[test]
fn test_ten_by_five_scenario() {
    let h = create_counter(10, 5).unwrap();
    assert_eq!(h.increment(), 15);
    assert_eq!(h.increment(), 20);
    assert_eq!(h.get(), 20);
}

#[test]
fn test_try_increment_preserves_value_on_failure() {
    let h = CounterBuilder::new().initial(9).step(5).upper(10).build().unwrap();
    assert!(matches!(
        h.try_increment(),
        Err(CellError::BoundExceeded { value: 9, .. })
    ));
    assert_eq!(h.get(), 9);
    assert_eq!(h.snapshot().increments, 0);
}
