use crate::error::{Result, ViewfinderError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// A unit of work run on the UI context with exclusive access to its state
pub type UiJob<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

/// Handle to the serial UI scheduling context.
///
/// Jobs run one at a time, in the order they were dispatched, on a single
/// task that owns the state `S`. The task ends once every strong handle is
/// dropped and the queue is drained.
pub struct UiContext<S> {
    sender: mpsc::UnboundedSender<UiJob<S>>,
    timers: CancellationToken,
}

/// Non-owning handle; does not keep the UI context alive
pub struct WeakUiContext<S> {
    sender: mpsc::WeakUnboundedSender<UiJob<S>>,
    timers: CancellationToken,
}

impl<S: Send + 'static> UiContext<S> {
    /// Start the UI loop with `state`. The join handle yields the state back once the loop ends.
    pub fn spawn(state: S) -> (Self, JoinHandle<S>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<UiJob<S>>();
        let timers = CancellationToken::new();

        let handle = tokio::spawn(async move {
            let mut state = state;
            while let Some(job) = receiver.recv().await {
                job(&mut state);
            }
            debug!("UI context drained");
            state
        });

        (Self { sender, timers }, handle)
    }

    /// Queue `job` behind everything already dispatched. Returns false if the loop is gone.
    pub fn dispatch<F>(&self, job: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        trace!("Dispatching UI job");
        if self.sender.send(Box::new(job)).is_err() {
            warn!("UI context closed, dropping job");
            return false;
        }
        true
    }

    /// Queue `job` once `delay` has elapsed.
    ///
    /// The timer holds only a weak handle: if the context is gone by then, or
    /// `shutdown` was called, the job is dropped.
    pub fn dispatch_after<F>(&self, delay: Duration, job: F)
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        let weak = self.downgrade();
        let cancelled = self.timers.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    trace!("Delayed UI job cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    weak.dispatch(job);
                }
            }
        });
    }

    /// Run `f` on the UI context and wait for its result
    pub async fn query<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut S) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let sent = self.dispatch(move |state| {
            let _ = reply.send(f(state));
        });
        if !sent {
            return Err(ViewfinderError::UiContextClosed);
        }
        response.await.map_err(|_| ViewfinderError::UiContextClosed)
    }

    pub fn downgrade(&self) -> WeakUiContext<S> {
        WeakUiContext {
            sender: self.sender.downgrade(),
            timers: self.timers.clone(),
        }
    }

    /// Cancel every pending delayed job
    pub fn shutdown(&self) {
        debug!("Cancelling pending UI timers");
        self.timers.cancel();
    }
}

impl<S: Send + 'static> WeakUiContext<S> {
    pub fn upgrade(&self) -> Option<UiContext<S>> {
        self.sender.upgrade().map(|sender| UiContext {
            sender,
            timers: self.timers.clone(),
        })
    }

    /// Dispatch through a temporary strong handle. Returns false if the context is gone.
    pub fn dispatch<F>(&self, job: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        match self.upgrade() {
            Some(context) => context.dispatch(job),
            None => {
                debug!("UI context released, dropping job");
                false
            }
        }
    }

    pub fn dispatch_after<F>(&self, delay: Duration, job: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        match self.upgrade() {
            Some(context) => {
                context.dispatch_after(delay, job);
                true
            }
            None => false,
        }
    }
}

impl<S> Clone for UiContext<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timers: self.timers.clone(),
        }
    }
}

impl<S> Clone for WeakUiContext<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timers: self.timers.clone(),
        }
    }
}
