//! ThrottleGate timing properties under a paused tokio clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use go_navigator::app::throttle::{GatePhase, RunDisposition, ThrottleGate};
use tokio::time::Instant;

const DELAY: Duration = Duration::from_millis(250);

fn recording_gate() -> (ThrottleGate, Arc<Mutex<Vec<Instant>>>) {
    let starts: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&starts);
    let gate = ThrottleGate::new("refresh", DELAY, move || -> Result<()> {
        recorded.lock().unwrap().push(Instant::now());
        Ok(())
    })
    .unwrap();
    (gate, starts)
}

#[tokio::test(start_paused = true)]
async fn test_runs_start_at_least_delay_apart() {
    let (gate, starts) = recording_gate();

    // Irregular request pattern spanning several windows.
    let gaps = [0, 10, 40, 100, 300, 5, 5, 600, 20, 240, 10];
    for gap in gaps {
        tokio::time::sleep(Duration::from_millis(gap)).await;
        gate.request_run();
    }
    tokio::time::sleep(DELAY * 4).await;

    let starts = starts.lock().unwrap();
    assert!(starts.len() >= 2);
    for pair in starts.windows(2) {
        assert!(
            pair[1].duration_since(pair[0]) >= DELAY,
            "runs {:?} apart",
            pair[1].duration_since(pair[0])
        );
    }
    assert_eq!(gate.phase(), GatePhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_burst_coalesces_into_one_deferred_run() {
    let (gate, starts) = recording_gate();

    assert_eq!(gate.request_run(), RunDisposition::RanImmediately);
    let mut dispositions = Vec::new();
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        dispositions.push(gate.request_run());
    }
    assert!(matches!(dispositions[0], RunDisposition::Scheduled(_)));
    assert!(dispositions[1..].iter().all(|d| *d == RunDisposition::Absorbed));

    tokio::time::sleep(DELAY).await;
    assert_eq!(starts.lock().unwrap().len(), 2);
    assert_eq!(gate.runs(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_deferred_wait_is_remaining_window() {
    let (gate, _starts) = recording_gate();
    gate.request_run();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        gate.request_run(),
        RunDisposition::Scheduled(DELAY - Duration::from_millis(100))
    );
}

#[tokio::test(start_paused = true)]
async fn test_every_accepted_request_is_served() {
    let (gate, starts) = recording_gate();
    gate.request_run();
    gate.request_run();
    assert!(gate.is_pending());

    tokio::time::sleep(DELAY * 2).await;
    assert!(!gate.is_pending());
    let runs = starts.lock().unwrap().len();
    assert_eq!(runs, 2);
}

#[tokio::test(start_paused = true)]
async fn test_gates_are_independent() {
    let (first, first_starts) = recording_gate();
    let (second, second_starts) = recording_gate();

    first.request_run();
    first.request_run();
    assert_eq!(second.request_run(), RunDisposition::RanImmediately);
    assert_eq!(second.phase(), GatePhase::Idle);

    tokio::time::sleep(DELAY * 2).await;
    assert_eq!(first_starts.lock().unwrap().len(), 2);
    assert_eq!(second_starts.lock().unwrap().len(), 1);
}
