use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot::{self, error::TryRecvError};

/// Completion of a modal open or close.
///
/// Resolves on the first `transitionend` the modal receives after the toggle
/// started. Toggles that did nothing (missing element, unknown action) are
/// settled from the start. It never fails: if the document is dropped before
/// the transition ends, the future resolves as well.
#[derive(Debug)]
pub struct Transition {
    rx: Option<oneshot::Receiver<()>>,
}

impl Transition {
    /// An already settled transition.
    pub fn settled() -> Self {
        Self { rx: None }
    }

    pub(crate) fn pending() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { rx: Some(rx) }, tx)
    }

    /// Check for completion without awaiting.
    pub fn is_settled(&mut self) -> bool {
        let Some(rx) = self.rx.as_mut() else {
            return true;
        };
        match rx.try_recv() {
            Err(TryRecvError::Empty) => false,
            Ok(()) | Err(TryRecvError::Closed) => {
                self.rx = None;
                true
            }
        }
    }
}

impl Future for Transition {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let Some(rx) = self.rx.as_mut() else {
            return Poll::Ready(());
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(_) => {
                self.rx = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
