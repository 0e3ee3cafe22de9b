//! Session worker thread
//!
//! Moves a [`Session`] onto its own thread and feeds it [`Msg`]s over a
//! channel, so any number of producers can deliver events while the session
//! still sees them one at a time, in arrival order.

use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::host::Host;
use crate::messages::Msg;
use crate::session::Session;

/// Sender side of a running session plus the thread that owns it
#[derive(Debug)]
pub struct SessionHandle<H: Host> {
    msg_tx: Sender<Msg>,
    worker: JoinHandle<Session<H>>,
}

impl<H: Host> SessionHandle<H> {
    /// A producer for this session's queue
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Queue one event; `false` once the worker has stopped
    pub fn send(&self, msg: Msg) -> bool {
        self.msg_tx.send(msg).is_ok()
    }

    /// Stop accepting events, drain the queue and hand the session back
    ///
    /// Returns `None` if the worker panicked. The loop only ends once every
    /// cloned sender is dropped too.
    pub fn join(self) -> Option<Session<H>> {
        drop(self.msg_tx);
        self.worker.join().ok()
    }
}

/// Run `session` on a dedicated worker thread
pub fn spawn_session<H>(mut session: Session<H>) -> SessionHandle<H>
where
    H: Host + Send + 'static,
{
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let worker = thread::spawn(move || {
        tracing::debug!("Session worker started");
        for msg in msg_rx {
            tracing::trace!(?msg, "Session event");
            if let Err(e) = session.update(msg) {
                tracing::error!(error = %e, "Session event failed");
            }
        }
        tracing::debug!("Session worker stopped");
        session
    });

    SessionHandle { msg_tx, worker }
}
