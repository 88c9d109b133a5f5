//! Concurrency integration tests
//!
//! These tests hammer a shared engine from many OS threads and check the
//! properties that must hold under any interleaving:
//! - no deadlock for opposite-direction and circular transfers
//! - the total balance across all accounts never changes
//! - no balance ever goes negative
//! - every applied transfer produces exactly two notifications

use rust_decimal::Decimal;
use rust_transfer_engine::{
    Account, InMemoryAccountStore, Notifier, TransferEngine, TransferError, TransferOutcome,
    TransferRequest,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;

const DEADLOCK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
struct CountingNotifier {
    count: AtomicUsize,
}

impl Notifier for CountingNotifier {
    fn notify(&self, _account: &Account, _message: &str) -> Result<(), TransferError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn engine_with(accounts: &[(&str, i64)]) -> (TransferEngine, Arc<CountingNotifier>) {
    let notifier = Arc::new(CountingNotifier::default());
    let engine = TransferEngine::new(
        Arc::new(InMemoryAccountStore::new()),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    for (id, balance) in accounts {
        engine
            .create_account(Account::new(*id, Decimal::new(*balance, 0)).unwrap())
            .unwrap();
    }
    (engine, notifier)
}

fn total(engine: &TransferEngine) -> Decimal {
    engine.accounts().iter().map(|a| a.balance()).sum()
}

/// Run `threads` workers, each executing `transfers_per_thread` transfers
/// chosen by `pick`, and fail if they do not all finish in time.
///
/// Returns the number of applied transfers.
fn run_workers<F>(
    engine: &TransferEngine,
    threads: usize,
    transfers_per_thread: usize,
    pick: F,
) -> usize
where
    F: Fn(usize, usize) -> TransferRequest + Send + Sync + 'static,
{
    let pick = Arc::new(pick);
    let barrier = Arc::new(Barrier::new(threads));
    let (done_tx, done_rx) = mpsc::channel();

    for worker in 0..threads {
        let engine = engine.clone();
        let pick = Arc::clone(&pick);
        let barrier = Arc::clone(&barrier);
        let done_tx = done_tx.clone();

        thread::spawn(move || {
            barrier.wait();
            let mut applied = 0;
            for i in 0..transfers_per_thread {
                let outcome = engine.execute_transfer(&pick(worker, i)).unwrap();
                if outcome == TransferOutcome::Applied {
                    applied += 1;
                }
            }
            done_tx.send(applied).unwrap();
        });
    }
    drop(done_tx);

    (0..threads)
        .map(|_| {
            done_rx
                .recv_timeout(DEADLOCK_TIMEOUT)
                .expect("workers did not finish: possible deadlock")
        })
        .sum()
}

#[test]
fn test_opposite_direction_transfers_do_not_deadlock() {
    let (engine, _) = engine_with(&[("A", 10_000), ("B", 10_000)]);

    run_workers(&engine, 8, 2_000, |worker, _| {
        if worker % 2 == 0 {
            TransferRequest::new("A", "B", Decimal::ONE)
        } else {
            TransferRequest::new("B", "A", Decimal::ONE)
        }
    });

    // Equal traffic in both directions with ample funds: every transfer applied
    assert_eq!(total(&engine), Decimal::new(20_000, 0));
    assert_eq!(
        engine.get_account("A").unwrap().balance(),
        Decimal::new(10_000, 0)
    );
}

#[test]
fn test_circular_transfers_do_not_deadlock() {
    let (engine, notifier) = engine_with(&[("A", 1_000), ("B", 1_000), ("C", 1_000)]);

    let applied = run_workers(&engine, 12, 1_000, |worker, _| match worker % 3 {
        0 => TransferRequest::new("A", "B", Decimal::new(7, 0)),
        1 => TransferRequest::new("B", "C", Decimal::new(7, 0)),
        _ => TransferRequest::new("C", "A", Decimal::new(7, 0)),
    });

    assert_eq!(total(&engine), Decimal::new(3_000, 0));
    assert!(engine.accounts().iter().all(|a| a.balance() >= Decimal::ZERO));
    assert_eq!(notifier.count.load(Ordering::SeqCst), applied * 2);
}

#[test]
fn test_competing_withdrawals_never_overdraw() {
    let (engine, notifier) = engine_with(&[("Source", 100), ("X", 0), ("Y", 0), ("Z", 0)]);

    let applied = run_workers(&engine, 9, 50, |worker, _| {
        let to = ["X", "Y", "Z"][worker % 3];
        TransferRequest::new("Source", to, Decimal::new(3, 0))
    });

    // 100 covers exactly 33 transfers of 3
    assert_eq!(applied, 33);
    assert_eq!(
        engine.get_account("Source").unwrap().balance(),
        Decimal::ONE
    );
    assert_eq!(total(&engine), Decimal::new(100, 0));
    assert_eq!(notifier.count.load(Ordering::SeqCst), 66);
}

#[test]
fn test_random_mesh_conserves_total() {
    let ids = ["a", "b", "c", "d", "e", "f"];
    let (engine, _) = engine_with(&ids.map(|id| (id, 500)));

    run_workers(&engine, 16, 500, move |worker, i| {
        // Deterministic pseudo-random pair selection
        let from = (worker * 7 + i * 13) % ids.len();
        let mut to = (worker * 3 + i * 5 + 1) % ids.len();
        if to == from {
            to = (to + 1) % ids.len();
        }
        TransferRequest::new(ids[from], ids[to], Decimal::new(((i % 9) + 1) as i64, 0))
    });

    assert_eq!(total(&engine), Decimal::new(3_000, 0));
    assert!(engine.accounts().iter().all(|a| a.balance() >= Decimal::ZERO));
}

#[test]
fn test_disjoint_pairs_proceed_while_account_locked() {
    let (engine, _) = engine_with(&[("A", 10), ("B", 10), ("C", 10), ("D", 10)]);

    // Hold A's lock; a transfer between C and D must still complete
    let a = engine.get_account("A").unwrap();
    let _held = a.lock();

    let worker_engine = engine.clone();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = worker_engine
            .execute_transfer(&TransferRequest::new("C", "D", Decimal::new(5, 0)))
            .unwrap();
        tx.send(outcome).unwrap();
    });

    assert_eq!(
        rx.recv_timeout(DEADLOCK_TIMEOUT).unwrap(),
        TransferOutcome::Applied
    );
}
