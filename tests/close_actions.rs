use numstream::DoubleStream;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let fired = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&fired);
    (fired, move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn single_action_fires_exactly_once() {
    let (fired, action) = counter();
    let n = DoubleStream::of([1.0]).on_close(action).count();
    assert_eq!(n, 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn multiple_actions_fire_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut stream = DoubleStream::of([1.0, 2.0]);
    for i in 0..3 {
        let log = Arc::clone(&log);
        stream = stream.on_close(move || log.lock().unwrap().push(i));
    }
    let _ = stream.to_vec();
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn actions_survive_transformations_and_mode_changes() {
    let (fired, action) = counter();
    let out = DoubleStream::of([1.0, 2.0, 3.0])
        .on_close(action)
        .map(|x| x * 2.0)
        .filter(|x| x > 2.0)
        .parallel()
        .sorted()
        .to_vec();
    assert_eq!(out, vec![4.0, 6.0]);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn identity_passthrough_does_not_duplicate_actions() {
    let (fired, action) = counter();
    let stream = DoubleStream::of([1.0]).on_close(action);
    let same = DoubleStream::of_stream(stream);
    let _ = same.count();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn actions_fire_when_a_user_closure_panics_mid_terminal() {
    let (fired, action) = counter();
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        DoubleStream::of([1.0, 2.0])
            .on_close(action)
            .map(|_| panic!("user transform failed"))
            .to_vec()
    }));
    assert!(result.is_err());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn actions_fire_when_an_unconsumed_stream_is_dropped() {
    let (fired, action) = counter();
    let stream = DoubleStream::of([1.0]).on_close(action);
    drop(stream);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn actions_fire_when_the_draining_iterator_is_dropped() {
    let (fired, action) = counter();
    let mut iter = DoubleStream::of([1.0, 2.0]).on_close(action).into_iter();
    assert_eq!(iter.next(), Some(1.0));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    drop(iter);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}
