//! Close-action bookkeeping for streams.
//!
//! Actions registered via [`NumStream::on_close`](crate::NumStream::on_close)
//! accumulate here and are released exactly once, in registration
//! order, when the owning stream reaches the end of its life — normally
//! right after a terminal operation finishes, but also when a stream is
//! dropped unconsumed or when a user closure panics mid-terminal
//! (unwinding drops the stream's locals, which releases the actions).

/// Ordered list of close actions with drop-based release.
#[derive(Default)]
pub(crate) struct CloseActions {
    actions: Vec<Box<dyn FnOnce() + Send>>,
}

impl CloseActions {
    pub(crate) fn push(&mut self, action: Box<dyn FnOnce() + Send>) {
        self.actions.push(action);
    }
}

impl Drop for CloseActions {
    fn drop(&mut self) {
        for action in self.actions.drain(..) {
            action();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn actions_fire_once_in_registration_order() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut close = CloseActions::default();
        for i in 0..3 {
            let log = Arc::clone(&log);
            close.push(Box::new(move || log.lock().unwrap().push(i)));
        }
        drop(close);
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn actions_fire_during_unwind() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired2 = Arc::clone(&fired);
        let result = std::panic::catch_unwind(move || {
            let mut close = CloseActions::default();
            close.push(Box::new(move || {
                fired2.fetch_add(1, Ordering::SeqCst);
            }));
            panic!("terminal failed");
        });
        assert!(result.is_err());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
