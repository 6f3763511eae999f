// Licensed under the Apache-2.0 license

use crate::digest::{HashAlgo, HashError};
use crate::tests::mock::{open_session, reference_digest, Probe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

#[test]
fn test_lock_blocks_second_caller() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);
    let released = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel();

    thread::scope(|s| {
        let guard = session.lock().unwrap();

        let session = &session;
        let released = &released;
        let waiter = s.spawn(move || {
            tx.send(()).unwrap();
            let guard = session.lock().unwrap();
            let saw_release = released.load(Ordering::SeqCst);
            guard.unlock();
            saw_release
        });

        rx.recv().unwrap();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(session.try_lock().err(), Some(HashError::LockUnavailable));

        released.store(true, Ordering::SeqCst);
        guard.unlock();

        assert!(waiter.join().unwrap());
    });

    let stats = session.stats();
    assert_eq!(stats.acquisitions, 2);
    assert_eq!(stats.releases, 2);
}

#[test]
fn test_dispatches_never_overlap() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 5;

    let probe = Arc::new(Probe::default());
    probe.compute_delay(Duration::from_millis(2));
    let session = open_session(&probe);

    thread::scope(|s| {
        for t in 0..THREADS {
            let session = &session;
            s.spawn(move || {
                for round in 0..ROUNDS {
                    let msg = vec![(t * ROUNDS + round) as u8; 100 + t];
                    let mut ctx = session.context(HashAlgo::SHA256).unwrap();
                    for piece in msg.chunks(7) {
                        ctx.append(piece).unwrap();
                    }
                    let digest = ctx.finalize().unwrap();
                    assert_eq!(
                        digest.as_ref(),
                        reference_digest(HashAlgo::SHA256, &msg).as_slice()
                    );
                }
            });
        }
    });

    assert_eq!(probe.overlaps(), 0);
    assert_eq!(probe.computes(), THREADS * ROUNDS);

    let stats = session.stats();
    assert_eq!(stats.dispatches as usize, THREADS * ROUNDS);
    assert_eq!(stats.acquisitions, stats.releases);
    assert!(!session.is_locked());
}

#[test]
fn test_close_waits_for_holder() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);
    let closed = AtomicBool::new(false);

    thread::scope(|s| {
        let guard = session.lock().unwrap();

        let session = &session;
        let closed = &closed;
        let closer = s.spawn(move || {
            session.close();
            closed.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(20));
        assert!(!closed.load(Ordering::SeqCst));
        assert_eq!(probe.shutdowns(), 0);

        guard.unlock();
        closer.join().unwrap();
    });

    assert!(closed.load(Ordering::SeqCst));
    assert_eq!(probe.shutdowns(), 1);
    assert_eq!(
        session.digest(HashAlgo::SHA256, b"abc"),
        Err(HashError::SessionNotOpen)
    );
}
