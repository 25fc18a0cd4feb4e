use std::fmt::Display;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::OperationError;
use crate::operations::Operation;

/// Delay between two status queries of a wait loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Observer notified once per poll iteration.
pub trait ProgressObserver: Send + Sync {
    fn in_progress(&self, name: &str, status: &dyn Display);

    fn completed(&self, name: &str, status: &dyn Display);
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn in_progress(&self, name: &str, status: &dyn Display) {
        log::info!("{name} in progress! Status : {status}");
    }

    fn completed(&self, name: &str, status: &dyn Display) {
        log::info!("{name} completed! Status : {status}");
    }
}

/// Blocking poll loop shared by every operation kind.
///
/// The status is queried, reported to the observer and tested against the
/// terminal predicate. Once the predicate holds the operation resolves to its
/// entity, otherwise the loop sleeps for the poll interval until the optional
/// timeout, measured from the start of the wait, has elapsed.
#[derive(Clone)]
pub struct Poller {
    interval: Duration,
    observer: Arc<dyn ProgressObserver>,
}

impl Poller {
    /// Create a poller with the default 500ms interval.
    pub fn new() -> Self {
        Self::with_interval(POLL_INTERVAL)
    }

    /// Create a poller with a custom poll interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            observer: Arc::new(LogProgress),
        }
    }

    /// Replace the progress observer.
    pub fn with_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll `operation` until `reached` accepts its status, then return its data.
    pub fn poll<O, P>(
        &self,
        operation: &O,
        timeout: Option<Duration>,
        mut reached: P,
    ) -> Result<O::Entity, OperationError>
    where
        O: Operation + ?Sized,
        P: FnMut(O::Status) -> bool,
    {
        let start = Instant::now();
        let mut status = operation.status()?;
        loop {
            self.observer.in_progress(operation.name(), &status);
            if reached(status) {
                self.observer.completed(operation.name(), &status);
                return operation.data();
            }

            if let Some(timeout) = timeout {
                if start.elapsed() > timeout {
                    return Err(OperationError::Timeout {
                        timeout,
                        status: status.to_string(),
                    });
                }
            }

            thread::sleep(self.interval);
            status = operation.status()?;
        }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::sync::Mutex;

    struct Scripted {
        statuses: RefCell<Vec<u8>>,
        queries: Cell<usize>,
    }

    impl Scripted {
        fn new(statuses: Vec<u8>) -> Self {
            Self {
                statuses: RefCell::new(statuses),
                queries: Cell::new(0),
            }
        }
    }

    impl Operation for Scripted {
        type Status = u8;
        type Entity = &'static str;

        fn id(&self) -> &str {
            "scripted"
        }

        fn name(&self) -> &'static str {
            "Scripted"
        }

        fn status(&self) -> Result<u8, OperationError> {
            self.queries.set(self.queries.get() + 1);
            let mut statuses = self.statuses.borrow_mut();
            if statuses.len() > 1 {
                Ok(statuses.remove(0))
            } else {
                Ok(statuses[0])
            }
        }

        fn data(&self) -> Result<&'static str, OperationError> {
            Ok("entity")
        }

        fn cancel(&self) -> Result<(), OperationError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ProgressObserver for Arc<Recorder> {
        fn in_progress(&self, name: &str, status: &dyn Display) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{name} progress {status}"));
        }

        fn completed(&self, name: &str, status: &dyn Display) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{name} completed {status}"));
        }
    }

    #[test]
    fn default_interval() {
        assert_eq!(Poller::default().interval(), Duration::from_millis(500));
    }

    #[test]
    fn polls_until_predicate_holds() {
        let op = Scripted::new(vec![1, 1, 2]);
        let poller = Poller::with_interval(Duration::from_millis(1));

        let entity = poller.poll(&op, None, |s| s == 2).unwrap();

        assert_eq!(entity, "entity");
        assert_eq!(op.queries.get(), 3);
    }

    #[test]
    fn reports_each_iteration() {
        let recorder = Arc::new(Recorder::default());
        let op = Scripted::new(vec![1, 2]);
        let poller = Poller::with_interval(Duration::from_millis(1)).with_observer(recorder.clone());

        poller.poll(&op, None, |s| s == 2).unwrap();

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "Scripted progress 1".to_string(),
                "Scripted progress 2".to_string(),
                "Scripted completed 2".to_string(),
            ]
        );
    }

    #[test]
    fn times_out_with_last_status() {
        let op = Scripted::new(vec![7]);
        let poller = Poller::with_interval(Duration::from_millis(1));

        let err = poller
            .poll(&op, Some(Duration::from_millis(20)), |s| s == 2)
            .unwrap_err();

        match err {
            OperationError::Timeout { timeout, status } => {
                assert_eq!(timeout, Duration::from_millis(20));
                assert_eq!(status, "7");
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_timeout_gives_up_without_waiting() {
        let op = Scripted::new(vec![1]);
        let poller = Poller::with_interval(Duration::from_millis(1));

        let err = poller
            .poll(&op, Some(Duration::ZERO), |s| s == 2)
            .unwrap_err();

        assert!(matches!(err, OperationError::Timeout { timeout, .. } if timeout.is_zero()));
        assert!(op.queries.get() <= 2);
    }

    #[test]
    fn reached_status_wins_over_elapsed_timeout() {
        let op = Scripted::new(vec![2]);
        let poller = Poller::new();

        let entity = poller.poll(&op, Some(Duration::ZERO), |s| s == 2).unwrap();

        assert_eq!(entity, "entity");
        assert_eq!(op.queries.get(), 1);
    }
}
