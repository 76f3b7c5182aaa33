//! Single-flight background task with cooperative cancellation
//!
//! At most one task runs at a time. The spawned future races a watch
//! channel; flipping it to `true` (or dropping the guard) ends the task with
//! [`TaskOutcome::Cancelled`] without waiting for the future.

use std::future::Future;
use tokio::sync::{oneshot, watch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<T> {
    Finished(T),
    Cancelled,
}

struct InFlight<T> {
    cancel: watch::Sender<bool>,
    result: oneshot::Receiver<TaskOutcome<T>>,
}

pub struct SingleFlight<T> {
    in_flight: Option<InFlight<T>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self { in_flight: None }
    }
}

impl<T: Send + 'static> SingleFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Spawn `task` unless one is already outstanding. Returns whether it
    /// was started. Must be called inside a tokio runtime.
    pub fn start<F>(&mut self, task: F) -> bool
    where
        F: Future<Output = T> + Send + 'static,
    {
        if self.is_in_flight() {
            tracing::debug!("task already in flight, start suppressed");
            return false;
        }

        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let (result_tx, result_rx) = oneshot::channel();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                value = task => TaskOutcome::Finished(value),
                _ = cancel_rx.wait_for(|cancelled| *cancelled) => TaskOutcome::Cancelled,
            };
            // Receiver is gone when the guard was dropped
            let _ = result_tx.send(outcome);
        });

        self.in_flight = Some(InFlight {
            cancel: cancel_tx,
            result: result_rx,
        });
        true
    }

    /// Request cancellation of the outstanding task, if any
    pub fn cancel(&self) -> bool {
        match &self.in_flight {
            Some(in_flight) => {
                tracing::info!("cancelling in-flight task");
                in_flight.cancel.send_replace(true);
                true
            }
            None => false,
        }
    }

    /// Non-blocking check for the outcome. Frees the slot once it arrives.
    pub fn poll(&mut self) -> Option<TaskOutcome<T>> {
        let in_flight = self.in_flight.as_mut()?;
        let outcome = match in_flight.result.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            // The task panicked before reporting
            Err(oneshot::error::TryRecvError::Closed) => TaskOutcome::Cancelled,
        };
        self.in_flight = None;
        Some(outcome)
    }

    /// Wait for the outstanding task to finish
    pub async fn wait(&mut self) -> Option<TaskOutcome<T>> {
        let in_flight = self.in_flight.take()?;
        Some(in_flight.result.await.unwrap_or(TaskOutcome::Cancelled))
    }
}
