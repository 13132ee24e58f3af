// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single FIFO control bus shared by every node and the supervisor's
//! dispatch loop.

use thiserror::Error;
use tokio::sync::mpsc;
use ward_core::ControlMessage;

/// Channel capacity. Generous relative to the "hundreds per second, peak"
/// volume the supervisor is sized for; a full channel is a sign something
/// downstream has stopped draining, not normal backpressure.
const BUS_CAPACITY: usize = 4096;

#[derive(Debug, Error)]
pub enum RecvError {
    #[error("control bus closed: no producers remain")]
    Closed,
}

/// Multi-producer, single-consumer FIFO of [`ControlMessage`]s. Cloning a
/// handle gives another producer; only the owner of the original receiver
/// half may call [`ControlBus::receive`].
#[derive(Clone)]
pub struct ControlBus {
    tx: mpsc::Sender<ControlMessage>,
}

/// The consumer half, held by the supervisor's dispatch loop.
pub struct ControlBusReceiver {
    rx: mpsc::Receiver<ControlMessage>,
}

impl ControlBus {
    /// Build a fresh bus, returning the shareable producer handle and the
    /// single consumer half.
    pub fn new() -> (Self, ControlBusReceiver) {
        let (tx, rx) = mpsc::channel(BUS_CAPACITY);
        (Self { tx }, ControlBusReceiver { rx })
    }

    /// Enqueue a message. FIFO relative to every other `send` from this
    /// same handle; never blocks the caller beyond ordinary backpressure.
    pub async fn send(&self, message: ControlMessage) {
        if self.tx.send(message).await.is_err() {
            tracing::warn!("control bus send failed: receiver dropped");
        }
    }
}

impl ControlBusReceiver {
    /// Await the next message. Resolves to [`RecvError::Closed`] once every
    /// producer handle has been dropped, which the supervisor treats as a
    /// degraded bus and a trigger to shut down.
    pub async fn receive(&mut self) -> Result<ControlMessage, RecvError> {
        self.rx.recv().await.ok_or(RecvError::Closed)
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
