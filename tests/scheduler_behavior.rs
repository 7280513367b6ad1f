//! Behavior-driven tests for the rate-limited scheduler
//!
//! These tests verify HOW submitted work is admitted, paced and isolated.

use ratingtick_core::{RateLimitedScheduler, SchedulerConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Default)]
struct Gauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl Gauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Scheduler: Concurrency Ceiling
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_more_tasks_than_slots_are_submitted_ceiling_is_never_exceeded() {
    // Given: A scheduler allowing three concurrent tasks
    let scheduler = RateLimitedScheduler::new(SchedulerConfig::new(3, Duration::from_millis(20)));
    let gauge = Arc::new(Gauge::default());

    // When: Twenty tasks of varying length are submitted at once
    let handles: Vec<_> = (0..20_u64)
        .map(|index| {
            let gauge = Arc::clone(&gauge);
            scheduler.submit(async move {
                gauge.enter();
                tokio::time::sleep(Duration::from_millis(50 + (index % 4) * 30)).await;
                gauge.leave();
                index
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await);
    }

    // Then: At most three ran together and every task completed
    assert_eq!(gauge.peak(), 3);
    assert_eq!(results, (0..20).collect::<Vec<_>>());
    assert_eq!(scheduler.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn when_slots_are_free_tasks_start_immediately() {
    // Given: A scheduler with the default five slots
    let scheduler = RateLimitedScheduler::default();
    let origin = Instant::now();
    let starts = Arc::new(Mutex::new(Vec::new()));

    // When: Five tasks are submitted
    let handles: Vec<_> = (0..5)
        .map(|_| {
            let starts = Arc::clone(&starts);
            scheduler.submit(async move {
                starts.lock().expect("lock").push(Instant::now());
            })
        })
        .collect();
    for handle in handles {
        handle.await;
    }

    // Then: None of them waited for spacing
    for start in starts.lock().expect("lock").iter() {
        assert_eq!(start.duration_since(origin), Duration::ZERO);
    }
}

// =============================================================================
// Scheduler: Ordering and Spacing
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_single_slot_tasks_start_in_submission_order_spaced_apart() {
    // Given: A single-slot scheduler with 200ms spacing
    let scheduler = RateLimitedScheduler::new(SchedulerConfig::new(1, Duration::from_millis(200)));
    let starts = Arc::new(Mutex::new(Vec::new()));

    // When: Four instant tasks are submitted
    let handles: Vec<_> = (0..4)
        .map(|index| {
            let starts = Arc::clone(&starts);
            scheduler.submit(async move {
                starts.lock().expect("lock").push((index, Instant::now()));
            })
        })
        .collect();
    for handle in handles {
        handle.await;
    }

    // Then: They started FIFO, each at least the spacing after the previous
    let starts = starts.lock().expect("lock").clone();
    let order: Vec<_> = starts.iter().map(|(index, _)| *index).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    for pair in starts.windows(2) {
        assert!(pair[1].1.duration_since(pair[0].1) >= Duration::from_millis(200));
    }
}

#[tokio::test(start_paused = true)]
async fn when_a_task_finishes_next_start_waits_for_spacing_after_completion() {
    // Given: A single-slot scheduler with 100ms spacing
    let scheduler = RateLimitedScheduler::new(SchedulerConfig::new(1, Duration::from_millis(100)));
    let origin = Instant::now();

    // When: A 300ms task is followed by another task
    let slow = scheduler.submit(async {
        tokio::time::sleep(Duration::from_millis(300)).await;
    });
    let next = scheduler.submit(async { Instant::now() });
    slow.await;
    let started = next.await;

    // Then: The second task started spacing after the first completed
    assert_eq!(started.duration_since(origin), Duration::from_millis(400));
}

// =============================================================================
// Scheduler: Failure Isolation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_one_task_fails_others_still_deliver_their_results() {
    // Given: A scheduler and a mix of failing and succeeding tasks
    let scheduler = RateLimitedScheduler::new(SchedulerConfig::new(2, Duration::from_millis(10)));

    // When: Every other task returns an error
    let handles: Vec<_> = (0..6_u32)
        .map(|index| {
            scheduler.submit(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                if index % 2 == 0 {
                    Err(format!("task {index} failed"))
                } else {
                    Ok(index * 10)
                }
            })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await);
    }

    // Then: Each caller sees exactly its own outcome
    assert_eq!(
        outcomes,
        vec![
            Err(String::from("task 0 failed")),
            Ok(10),
            Err(String::from("task 2 failed")),
            Ok(30),
            Err(String::from("task 4 failed")),
            Ok(50),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn when_handle_is_dropped_task_still_runs() {
    // Given: A single-slot scheduler and a side-effecting task whose handle is discarded
    let scheduler = RateLimitedScheduler::new(SchedulerConfig::new(1, Duration::from_millis(10)));
    let ran = Arc::new(AtomicUsize::new(0));

    // When: The handle is dropped before the task finishes
    {
        let ran = Arc::clone(&ran);
        drop(scheduler.submit(async move {
            ran.fetch_add(1, Ordering::SeqCst);
        }));
    }
    let marker = scheduler.submit(async {});
    marker.await;

    // Then: The dropped task still executed
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}
