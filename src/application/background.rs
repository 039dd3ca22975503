//! Off-thread generation computation.
//!
//! The worker steps its own copy of the engine and sends the finished engine
//! back whole. The render thread keeps drawing the old history until it
//! swaps the new engine in, so a partially built history is never visible.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use crate::domain::LifeEngine;

/// Handle to a generation job running on the rayon pool
pub struct BackgroundCompute {
    receiver: Receiver<LifeEngine>,
    started: Instant,
}

impl BackgroundCompute {
    /// Start appending `count` generations to `engine` on a rayon worker
    pub fn spawn(mut engine: LifeEngine, count: usize) -> Self {
        let (sender, receiver) = mpsc::channel();
        rayon::spawn(move || {
            engine.compute_generations(count);
            // Receiver gone means the job was superseded
            let _ = sender.send(engine);
        });
        Self {
            receiver,
            started: Instant::now(),
        }
    }

    /// Non-blocking check for the finished engine.
    /// `Err` means the worker died without producing one.
    pub fn try_finish(&self) -> Result<Option<LifeEngine>, TryRecvError> {
        match self.receiver.try_recv() {
            Ok(engine) => Ok(Some(engine)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Block until the worker is done
    pub fn wait(self) -> Option<LifeEngine> {
        self.receiver.recv().ok()
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.started.elapsed().as_secs_f32() * 1000.0
    }
}
