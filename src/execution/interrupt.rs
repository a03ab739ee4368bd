//! User interruption (Ctrl-C) as a shareable flag

use tokio::sync::watch;
use tracing::{debug, warn};

/// Read side of the interruption flag; cheap to clone
#[derive(Debug, Clone)]
pub struct Interrupt {
    rx: watch::Receiver<bool>,
}

/// Write side of the interruption flag
#[derive(Debug)]
pub struct InterruptTrigger {
    tx: watch::Sender<bool>,
}

impl InterruptTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Interrupt {
    /// A flag/trigger pair driven by the caller
    pub fn manual() -> (InterruptTrigger, Interrupt) {
        let (tx, rx) = watch::channel(false);
        (InterruptTrigger { tx }, Interrupt { rx })
    }

    /// A flag that is never raised
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Interrupt { rx }
    }

    /// Raise the flag when the process receives Ctrl-C.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_ctrl_c() -> Self {
        let (trigger, interrupt) = Self::manual();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    debug!("Received Ctrl-C");
                    trigger.trigger();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
        });
        interrupt
    }

    pub fn is_raised(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the flag is raised; pending forever if it never can be
    pub async fn raised(&self) {
        let mut rx = self.rx.clone();
        let closed = rx.wait_for(|raised| *raised).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
