use std::time::Duration;

use tokio::sync::mpsc;

/// Quiet period applied to free-text search input.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Coalesces bursts of values and emits only the last one once the input has
/// been quiet for the configured period.
///
/// Values are emitted on the receiver returned by [`Debouncer::new`]. Dropping
/// the debouncer flushes a pending value and closes the receiver.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debouncing task on the current tokio runtime.
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut pending) = mpsc::unbounded_channel::<T>();
        let (settled, output) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            while let Some(mut latest) = pending.recv().await {
                loop {
                    tokio::select! {
                        next = pending.recv() => match next {
                            Some(value) => latest = value,
                            None => {
                                let _ = settled.send(latest);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(quiet) => {
                            if settled.send(latest).is_err() {
                                return;
                            }
                            break;
                        }
                    }
                }
            }
        });

        (Self { input }, output)
    }

    /// Records a new value, restarting the quiet period.
    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            log::warn!("Debouncer task has stopped; dropping input");
        }
    }
}
