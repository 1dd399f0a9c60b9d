use crate::{LogSignal, Logger};
use parking_lot::Mutex;
use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::mem;

/// Keeps signals until the host polls them.
/// An optional waker is invoked after every buffered signal, for example
/// to signal a semaphore the host is waiting on.
pub struct BufferedLogger {
    signals: Mutex<Vec<LogSignal>>,
    waker: Option<Box<dyn Fn() + Send + Sync>>,
}

impl BufferedLogger {
    pub fn new() -> Self {
        Self {
            signals: Mutex::new(vec![]),
            waker: None,
        }
    }

    pub fn with_waker(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            signals: Mutex::new(vec![]),
            waker: Some(Box::new(waker)),
        }
    }

    pub fn poll_all(&self) -> Vec<LogSignal> {
        mem::take(&mut *self.signals.lock())
    }

    pub fn len(&self) -> usize {
        self.signals.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.lock().is_empty()
    }
}

impl Default for BufferedLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for BufferedLogger {
    fn log(&self, signal: LogSignal) {
        self.signals.lock().push(signal);
        if let Some(ref waker) = self.waker {
            waker();
        }
    }

    fn any(&self) -> &dyn Any {
        self
    }
}

impl Debug for BufferedLogger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedLogger")
            .field("signals", &self.len())
            .field("waker", &self.waker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Origin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn signal(message: &str) -> LogSignal {
        LogSignal::new(
            "INFO",
            Origin::new("sqVirtualMachine.c", "ioProcessEvents", 42),
            message.to_string(),
        )
    }

    #[test]
    fn poll_drains_buffer() {
        let logger = BufferedLogger::new();
        logger.log(signal("first"));
        logger.log(signal("second"));
        assert_eq!(logger.len(), 2);

        let polled = logger.poll_all();
        assert_eq!(
            polled
                .iter()
                .map(|each| each.message.as_str())
                .collect::<Vec<&str>>(),
            vec!["first", "second"]
        );
        assert!(logger.is_empty());
        assert!(logger.poll_all().is_empty());
    }

    #[test]
    fn waker_is_notified_for_every_signal() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let logger = BufferedLogger::with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        logger.log(signal("one"));
        logger.log(signal("two"));
        logger.log(signal("three"));

        assert_eq!(wakes.load(Ordering::SeqCst), 3);
        assert_eq!(logger.len(), 3);
    }
}
