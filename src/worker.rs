//! Background render thread for the spinner.
//!
//! The worker owns the render loop. The foreground side holds a
//! [`RenderWorker`] and talks to the thread through a stop channel; the
//! only other shared state is the frame counter and the widest line drawn.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::frames::Frames;
use crate::output::Output;
use crate::render::{compose_line, line_width};

/// Poll interval while waiting for the render thread to exit.
const JOIN_POLL: Duration = Duration::from_millis(10);

/// Everything the render loop needs, moved into the thread on spawn.
pub(crate) struct RenderJob {
    pub frames: Frames,
    pub message: String,
    pub interval: Duration,
    pub started_at: Instant,
    pub output: Output,
    /// When false the loop keeps ticking but writes nothing.
    pub render: bool,
    pub frame_index: Arc<AtomicUsize>,
    pub widest_line: Arc<AtomicUsize>,
}

/// Handle to a running render thread.
#[derive(Debug)]
pub(crate) struct RenderWorker {
    handle: JoinHandle<()>,
    stop_tx: Sender<()>,
}

impl RenderWorker {
    /// Spawn the render thread. Each worker gets a fresh stop channel, so a
    /// signal left over from a previous run can never reach it.
    pub fn spawn(job: RenderJob) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("spinline-render".to_string())
            .spawn(move || render_loop(job, stop_rx))?;
        Ok(Self { handle, stop_tx })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Ask the thread to exit after its current frame.
    pub fn request_stop(&self) {
        // Send fails only if the thread already exited
        let _ = self.stop_tx.send(());
    }

    /// Wait up to `timeout` for the thread to exit.
    ///
    /// Returns true if the thread finished and was joined. On timeout the
    /// thread is detached and false is returned.
    pub fn wait(self, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if self.handle.is_finished() {
                if self.handle.join().is_err() {
                    debug!("spinner:render thread panicked");
                }
                return true;
            }
            if start.elapsed() >= timeout {
                return false;
            }
            trace!(
                elapsed_ms = start.elapsed().as_millis(),
                "spinner:waiting for render thread"
            );
            thread::sleep(JOIN_POLL.min(timeout.saturating_sub(start.elapsed())));
        }
    }
}

fn render_loop(job: RenderJob, stop_rx: Receiver<()>) {
    let mut index = 0;
    job.frame_index.store(index, Ordering::Relaxed);

    loop {
        if job.render {
            let line = compose_line(
                job.frames.glyph(index),
                &job.message,
                job.started_at.elapsed(),
            );
            job.widest_line
                .fetch_max(line_width(&line), Ordering::Relaxed);
            if let Err(e) = job.output.write_flush(&line) {
                debug!(error = %e, "spinner:write failed, ending render loop");
                return;
            }
        }

        match stop_rx.recv_timeout(job.interval) {
            Err(RecvTimeoutError::Timeout) => {}
            // Disconnected means the owner went away without signaling
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }

        index = job.frames.next_index(index);
        job.frame_index.store(index, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Capture;

    fn job(capture: &Capture, interval: Duration) -> RenderJob {
        RenderJob {
            frames: Frames::new(["a", "b", "c"]).unwrap(),
            message: "Loading".to_string(),
            interval,
            started_at: Instant::now(),
            output: capture.output(),
            render: true,
            frame_index: Arc::new(AtomicUsize::new(0)),
            widest_line: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[test]
    fn test_stop_interrupts_long_interval() {
        let capture = Capture::default();
        let worker = RenderWorker::spawn(job(&capture, Duration::from_secs(60))).unwrap();
        thread::sleep(Duration::from_millis(20));

        let start = Instant::now();
        worker.request_stop();
        assert!(worker.wait(Duration::from_secs(2)));
        assert!(start.elapsed() < Duration::from_secs(2));
        // One frame only, since the interval never elapsed
        let contents = capture.contents();
        assert_eq!(contents.matches('\r').count(), 1);
        assert!(contents.starts_with("\ra Loading... "));
    }

    #[test]
    fn test_wait_times_out_without_stop_signal() {
        let capture = Capture::default();
        let worker = RenderWorker::spawn(job(&capture, Duration::from_secs(60))).unwrap();

        let start = Instant::now();
        let stop_tx = worker.stop_tx.clone();
        assert!(!worker.wait(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));

        // Let the detached thread exit
        let _ = stop_tx.send(());
    }

    #[test]
    fn test_silent_job_ticks_without_writing() {
        let capture = Capture::default();
        let mut silent = job(&capture, Duration::from_millis(5));
        silent.render = false;
        let frame_index = silent.frame_index.clone();
        let worker = RenderWorker::spawn(silent).unwrap();
        thread::sleep(Duration::from_millis(40));
        worker.request_stop();
        assert!(worker.wait(Duration::from_secs(1)));

        assert!(capture.contents().is_empty());
        assert!(frame_index.load(Ordering::Relaxed) < 3);
    }

    #[test]
    fn test_widest_line_tracks_rendered_width() {
        let capture = Capture::default();
        let job = job(&capture, Duration::from_secs(60));
        let widest = job.widest_line.clone();
        let worker = RenderWorker::spawn(job).unwrap();
        thread::sleep(Duration::from_millis(20));
        worker.request_stop();
        assert!(worker.wait(Duration::from_secs(1)));

        // "a Loading... 0.0s"
        assert_eq!(widest.load(Ordering::Relaxed), 17);
    }
}
