//! Frame clock for animated samples.
//!
//! A background thread sends a [`Frame`] every interval until the ticker is
//! stopped. At most one frame waits in the queue; if the renderer falls
//! behind, the clock thread blocks until it catches up.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, warn};

/// One tick of the frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub index: u64,
    pub elapsed: Duration,
}

/// Sends frames from a background thread at a fixed interval.
#[derive(Debug)]
pub struct Ticker {
    frames: Receiver<Frame>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Starts ticking. The first frame is sent immediately.
    pub fn start(interval: Duration) -> Self {
        let (sender, frames) = mpsc::sync_channel(1);
        let running = Arc::new(AtomicBool::new(true));

        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut index = 0;
            while flag.load(Ordering::SeqCst) {
                let frame = Frame {
                    index,
                    elapsed: start.elapsed(),
                };
                if sender.send(frame).is_err() {
                    break;
                }
                index += 1;
                thread::sleep(interval);
            }
        });

        debug!(interval:?; "Ticker started");
        Self {
            frames,
            running,
            handle: Some(handle),
        }
    }

    /// Blocks until the next frame arrives.
    ///
    /// Returns `None` once the ticker has stopped and every queued frame
    /// has been taken.
    pub fn next_frame(&self) -> Option<Frame> {
        self.frames.recv().ok()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the clock thread and waits for it to exit.
    ///
    /// A frame still queued when the ticker stops is discarded.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            // The thread checks the flag before each send, so at most one
            // send is still pending. Emptying the queue releases it.
            while self.frames.try_recv().is_ok() {}
            if handle.join().is_err() {
                warn!("Ticker thread panicked");
            }
            debug!("Ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
