use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread::{self, JoinHandle, ThreadId};

type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Errors raised by the dispatcher itself (not by the jobs it runs).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to spawn dispatcher thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("dispatcher thread is no longer running")]
    Closed,

    #[error("dispatched job panicked")]
    JobPanicked,

    /// Blocking on the worker from the worker would deadlock.
    #[error("dispatcher job submitted from its own worker thread")]
    Reentrant,
}

/// Owns a worker thread and the state `S` living on it.
///
/// `S` is constructed on the worker and never leaves it; only closures and
/// their results cross threads.
pub struct Dispatcher<S> {
    sender: Option<mpsc::Sender<Job<S>>>,
    worker: Option<JoinHandle<()>>,
    worker_id: ThreadId,
}

impl<S: 'static> Dispatcher<S> {
    /// Spawns the worker thread and builds its state with `init`.
    pub fn spawn<F>(name: impl Into<String>, init: F) -> Result<Self, DispatchError>
    where
        F: FnOnce() -> S + Send + 'static,
    {
        let name = name.into();
        let (sender, receiver) = mpsc::channel::<Job<S>>();

        let worker = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let mut state = init();
                for job in receiver {
                    job(&mut state);
                }
                log::debug!("dispatcher worker exiting");
            })
            .map_err(DispatchError::Spawn)?;

        let worker_id = worker.thread().id();
        log::debug!("dispatcher worker '{name}' started");

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            worker_id,
        })
    }

    /// Runs `job` on the worker and blocks until it returns.
    ///
    /// A panic inside `job` is contained on the worker and reported as
    /// [`DispatchError::JobPanicked`]; later jobs still run.
    pub fn run<R, F>(&self, job: F) -> Result<R, DispatchError>
    where
        F: FnOnce(&mut S) -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_worker_thread() {
            return Err(DispatchError::Reentrant);
        }

        let sender = self.sender.as_ref().ok_or(DispatchError::Closed)?;
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);

        let wrapped: Job<S> = Box::new(move |state: &mut S| {
            let result = panic::catch_unwind(AssertUnwindSafe(|| job(state)));
            // The caller may have gone away; nothing to report to then.
            let _ = reply_tx.send(result);
        });

        sender.send(wrapped).map_err(|_| DispatchError::Closed)?;

        match reply_rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(DispatchError::JobPanicked),
            Err(_) => Err(DispatchError::Closed),
        }
    }

    /// Returns true when called from the worker thread.
    pub fn is_worker_thread(&self) -> bool {
        thread::current().id() == self.worker_id
    }
}

impl<S> Drop for Dispatcher<S> {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop; state drops on the worker.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("dispatcher worker panicked during shutdown");
            }
        }
    }
}
