//! Per-operation cancellation signal.
//!
//! A [`CancelSource`] is created for each top-level operation and a
//! [`CancelSignal`] is threaded through every store call made on its behalf.
//! Dropping the source counts as cancellation, so a caller that abandons the
//! operation also aborts outstanding store calls.

use tokio::sync::watch;

/// The owning half; fires the signal.
#[derive(Debug)]
pub struct CancelSource {
  tx: watch::Sender<bool>,
}

impl CancelSource {
  pub fn new() -> Self {
    let (tx, _rx) = watch::channel(false);
    Self { tx }
  }

  /// A signal observing this source.
  pub fn signal(&self) -> CancelSignal {
    CancelSignal { rx: Some(self.tx.subscribe()) }
  }

  pub fn cancel(&self) { self.tx.send_replace(true); }
}

impl Default for CancelSource {
  fn default() -> Self { Self::new() }
}

/// The observing half; cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelSignal {
  rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
  /// A signal that never fires.
  pub fn never() -> Self { Self { rx: None } }

  /// Non-blocking check.
  pub fn is_cancelled(&self) -> bool {
    match &self.rx {
      Some(rx) => *rx.borrow() || rx.has_changed().is_err(),
      None => false,
    }
  }

  /// Resolves once the source fires or is dropped. Pending forever for
  /// [`CancelSignal::never`].
  pub async fn cancelled(&self) {
    let Some(rx) = &self.rx else {
      return std::future::pending().await;
    };
    let mut rx = rx.clone();
    // `wait_for` errors only when the sender is gone, which also cancels.
    let _ = rx.wait_for(|cancelled| *cancelled).await;
  }
}
