//! Execution Engine Tests
//!
//! Ordering, empty-input handling, and concurrency-ceiling behavior of
//! the executor across all three concurrency modes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use multirun::compile::{from_fn, Invocation, Workload};
use multirun::engine::{ConcurrencyMode, Executor};
use multirun::input::Input;
use serde_json::json;

fn doubling_workload() -> Arc<dyn Workload> {
    from_fn(|context: Input| async move {
        let x = context.get("x").and_then(|v| v.as_i64()).unwrap_or(0);
        Ok(Invocation::value(x * 2))
    })
}

fn inputs_of(values: &[i64]) -> Vec<Input> {
    values
        .iter()
        .map(|v| Input::new().with_var("x", *v))
        .collect()
}

#[tokio::test]
async fn test_series_preserves_input_order() {
    let inputs = inputs_of(&[1, 2, 3]);
    let outcomes = Executor::new(doubling_workload())
        .run(&inputs, ConcurrencyMode::Series)
        .await
        .expect("series run should succeed");

    assert_eq!(outcomes.len(), 3);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.index, i, "outcome {} should keep its index", i);
        assert!(outcome.succeeded);
        assert_eq!(outcome.value, Some(json!((i as i64 + 1) * 2)));
        assert_eq!(outcome.input.as_ref(), Some(&inputs[i]));
    }
}

#[tokio::test]
async fn test_empty_inputs_yield_single_default_outcome() {
    let outcomes = Executor::new(doubling_workload())
        .run(&[], ConcurrencyMode::Series)
        .await
        .expect("empty run should succeed");

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].index, 0);
    assert!(outcomes[0].input.is_none());
    assert!(outcomes[0].succeeded);
    assert_eq!(outcomes[0].value, Some(json!(0)));
}

#[tokio::test]
async fn test_parallel_order_independent_of_completion_order() {
    // The middle input sleeps long enough to finish last.
    let unit = from_fn(|context: Input| async move {
        let x = context.get("x").and_then(|v| v.as_i64()).unwrap_or(0);
        if x == 2 {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Ok(Invocation::value(x * 2))
    });

    let inputs = inputs_of(&[1, 2, 3]);
    for mode in [
        ConcurrencyMode::ParallelUnbounded,
        ConcurrencyMode::ParallelBounded(2),
    ] {
        let outcomes = Executor::new(Arc::clone(&unit))
            .run(&inputs, mode)
            .await
            .expect("parallel run should succeed");

        let values: Vec<_> = outcomes.iter().map(|o| o.value.clone()).collect();
        assert_eq!(
            values,
            vec![Some(json!(2)), Some(json!(4)), Some(json!(6))],
            "{:?} should return outcomes in input order",
            mode
        );
    }
}

#[tokio::test]
async fn test_unbounded_waits_for_every_invocation() {
    let completed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completed);
    let unit = from_fn(move |context: Input| {
        let counter = Arc::clone(&counter);
        async move {
            let x = context.get("x").and_then(|v| v.as_i64()).unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(10 + (x as u64 % 5) * 10)).await;
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Invocation::value(x))
        }
    });

    let inputs = inputs_of(&(0..16).collect::<Vec<i64>>());
    let outcomes = Executor::new(unit)
        .run(&inputs, ConcurrencyMode::ParallelUnbounded)
        .await
        .expect("unbounded run should succeed");

    // Returning before every invocation completed would drop results.
    assert_eq!(completed.load(Ordering::SeqCst), 16);
    assert_eq!(outcomes.len(), 16);
    assert!(outcomes.iter().all(|o| o.succeeded));
}

#[tokio::test]
async fn test_bounded_mode_respects_concurrency_ceiling() {
    let live = Arc::new(AtomicUsize::new(0));
    let high_water = Arc::new(AtomicUsize::new(0));

    let live_ref = Arc::clone(&live);
    let high_ref = Arc::clone(&high_water);
    let unit = from_fn(move |_context: Input| {
        let live = Arc::clone(&live_ref);
        let high_water = Arc::clone(&high_ref);
        async move {
            let now_live = live.fetch_add(1, Ordering::SeqCst) + 1;
            high_water.fetch_max(now_live, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            live.fetch_sub(1, Ordering::SeqCst);
            Ok(Invocation::value("done"))
        }
    });

    let inputs = inputs_of(&(0..8).collect::<Vec<i64>>());
    let outcomes = Executor::new(unit)
        .run(&inputs, ConcurrencyMode::ParallelBounded(2))
        .await
        .expect("bounded run should succeed");

    assert_eq!(outcomes.len(), 8);
    assert!(outcomes.iter().all(|o| o.succeeded));
    assert!(
        high_water.load(Ordering::SeqCst) <= 2,
        "never more than 2 invocations in flight, saw {}",
        high_water.load(Ordering::SeqCst)
    );
    assert_eq!(live.load(Ordering::SeqCst), 0, "all permits released");
}

#[tokio::test]
async fn test_same_inputs_yield_identical_values_across_modes() {
    let inputs = inputs_of(&[5, 9, 13, 2]);
    let mut per_mode = Vec::new();

    for mode in [
        ConcurrencyMode::Series,
        ConcurrencyMode::ParallelUnbounded,
        ConcurrencyMode::ParallelBounded(2),
    ] {
        let outcomes = Executor::new(doubling_workload())
            .run(&inputs, mode)
            .await
            .expect("run should succeed");
        per_mode.push(outcomes.iter().map(|o| o.value.clone()).collect::<Vec<_>>());
    }

    assert_eq!(per_mode[0], per_mode[1]);
    assert_eq!(per_mode[1], per_mode[2]);
}
