//! Trailing-edge debouncing on the tokio timer.
//!
//! Each [`Debouncer::call`] supersedes the pending one, so only the arguments
//! of the last call in a quiet window of `delay` reach the callback. This is
//! a scheduling aid for callers (e.g. firing a postal-code lookup once the
//! user stops typing), not a synchronisation primitive.

use std::{
  sync::{Arc, Mutex, PoisonError},
  time::Duration,
};

use tokio::{
  runtime::{Handle, TryCurrentError},
  task::JoinHandle,
};

/// Delays calls to a callback until `delay` has passed without a newer call.
///
/// The timer runs on the tokio runtime the debouncer was created in, so
/// [`call`](Self::call) works from any thread. Dropping the debouncer cancels
/// any pending invocation.
pub struct Debouncer<A> {
  delay:    Duration,
  callback: Arc<dyn Fn(A) + Send + Sync>,
  runtime:  Handle,
  pending:  Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
  /// # Panics
  ///
  /// Panics when called outside a tokio runtime. Use
  /// [`try_new`](Self::try_new) to get an error instead.
  pub fn new<F>(delay: Duration, callback: F) -> Self
  where
    F: Fn(A) + Send + Sync + 'static,
  {
    Self::on(Handle::current(), delay, callback)
  }

  /// Like [`new`](Self::new), failing when there is no current runtime.
  pub fn try_new<F>(delay: Duration, callback: F) -> Result<Self, TryCurrentError>
  where
    F: Fn(A) + Send + Sync + 'static,
  {
    Ok(Self::on(Handle::try_current()?, delay, callback))
  }

  /// Schedule on an explicit runtime.
  pub fn on<F>(runtime: Handle, delay: Duration, callback: F) -> Self
  where
    F: Fn(A) + Send + Sync + 'static,
  {
    Self {
      delay,
      callback: Arc::new(callback),
      runtime,
      pending: Mutex::new(None),
    }
  }

  /// Schedule `callback(args)` after `delay`, discarding any call that is
  /// still waiting.
  pub fn call(&self, args: A) {
    let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(previous) = pending.take() {
      previous.abort();
    }

    let callback = Arc::clone(&self.callback);
    let delay = self.delay;
    *pending = Some(self.runtime.spawn(async move {
      tokio::time::sleep(delay).await;
      callback(args);
    }));
  }

  /// Discard the pending call, if any.
  pub fn cancel(&self) {
    let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(previous) = pending.take() {
      previous.abort();
    }
  }
}

impl<A> Drop for Debouncer<A> {
  fn drop(&mut self) {
    let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
    if let Some(handle) = pending.take() {
      handle.abort();
    }
  }
}
