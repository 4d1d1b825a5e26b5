//! Execution contexts for fetch completions.
//!
//! Network I/O runs on the Tokio runtime's worker threads. A UI host that needs
//! its callbacks on one thread creates a [`main_queue`], hands the [`MainQueue`]
//! to the fetcher, and drives the [`MainLoop`] from that thread.

use tokio::sync::mpsc;
use tracing::warn;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Deliver: Send + Sync {
    fn deliver(&self, job: Job);
}

/// Runs the completion on whichever task finished the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Deliver for Immediate {
    fn deliver(&self, job: Job) {
        job();
    }
}

#[derive(Clone)]
pub struct MainQueue {
    sender: mpsc::UnboundedSender<Job>,
}

impl Deliver for MainQueue {
    fn deliver(&self, job: Job) {
        if self.sender.send(job).is_err() {
            warn!("Main loop has shut down, dropping fetch completion");
        }
    }
}

pub struct MainLoop {
    receiver: mpsc::UnboundedReceiver<Job>,
}

pub fn main_queue() -> (MainQueue, MainLoop) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (MainQueue { sender }, MainLoop { receiver })
}

impl MainLoop {
    /// Wait for the next completion and run it on the calling thread.
    /// Returns `false` once every `MainQueue` handle has been dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run every completion already queued without waiting.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}
