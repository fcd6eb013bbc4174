//! The spinner: one animated status line driven by a background thread.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_INTERVAL_MS, DEFAULT_MESSAGE, DEFAULT_STOP_TIMEOUT_MS, SpinnerConfig};
use crate::error::{Result, SpinnerError};
use crate::frames::Frames;
use crate::output::Output;
use crate::render::{DEFAULT_CLEAR_WIDTH, blank_line};
use crate::worker::{RenderJob, RenderWorker};

/// Animated single-line status indicator.
///
/// `start` launches a render thread that redraws
/// `\r{glyph} {message}... {elapsed}` every interval; `stop` signals it,
/// waits a bounded amount of time, then blanks the line. An instance can be
/// started and stopped any number of times.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use spinline::Spinner;
///
/// let mut spinner = Spinner::new("Loading", Duration::from_millis(100))?;
/// let answer = spinner.run(|| 6 * 7);
/// assert_eq!(answer, 42);
/// # Ok::<(), spinline::SpinnerError>(())
/// ```
#[derive(Debug)]
pub struct Spinner {
    frames: Frames,
    message: String,
    interval: Duration,
    output: Output,
    clear_width: usize,
    hide_when_piped: bool,
    stop_timeout: Duration,
    frame_index: Arc<AtomicUsize>,
    widest_line: Arc<AtomicUsize>,
    started_at: Option<Instant>,
    worker: Option<RenderWorker>,
}

impl Spinner {
    /// Create a spinner with the default braille frames on stdout.
    pub fn new(message: impl Into<String>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(SpinnerError::ZeroInterval);
        }
        Ok(Self {
            frames: Frames::default(),
            message: message.into(),
            interval,
            output: Output::default(),
            clear_width: DEFAULT_CLEAR_WIDTH,
            hide_when_piped: false,
            stop_timeout: Duration::from_millis(DEFAULT_STOP_TIMEOUT_MS),
            frame_index: Arc::new(AtomicUsize::new(0)),
            widest_line: Arc::new(AtomicUsize::new(0)),
            started_at: None,
            worker: None,
        })
    }

    /// Build a spinner from loaded settings.
    pub fn from_config(config: &SpinnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.message.clone(), config.interval())?
            .with_frames(config.frames.to_frames()?)
            .with_output(config.target.output())
            .with_clear_width(config.clear_width)
            .hide_when_piped(config.hide_when_piped)
            .with_stop_timeout(config.stop_timeout()))
    }

    pub fn with_frames(mut self, frames: Frames) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Minimum number of spaces used to erase the line on stop.
    pub fn with_clear_width(mut self, width: usize) -> Self {
        self.clear_width = width;
        self
    }

    /// Draw nothing when the output is not a terminal.
    pub fn hide_when_piped(mut self, hide: bool) -> Self {
        self.hide_when_piped = hide;
        self
    }

    /// Default bound used by [`Spinner::stop`].
    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn frames(&self) -> &Frames {
        &self.frames
    }

    /// Index of the glyph currently on screen.
    pub fn frame_index(&self) -> usize {
        self.frame_index.load(Ordering::Relaxed)
    }

    /// Time since the most recent `start`, if it was ever started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|t| t.elapsed())
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    fn renders(&self) -> bool {
        !(self.hide_when_piped && !self.output.is_terminal())
    }

    /// Start the render thread. No-op if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!(message = %self.message, "spinner:already running");
            return;
        }
        // Drop the handle of a worker that ended on its own
        self.worker = None;

        let started_at = Instant::now();
        self.started_at = Some(started_at);
        self.frame_index.store(0, Ordering::Relaxed);
        self.widest_line.store(0, Ordering::Relaxed);

        let render = self.renders();
        let job = RenderJob {
            frames: self.frames.clone(),
            message: self.message.clone(),
            interval: self.interval,
            started_at,
            output: self.output.clone(),
            render,
            frame_index: Arc::clone(&self.frame_index),
            widest_line: Arc::clone(&self.widest_line),
        };

        match RenderWorker::spawn(job) {
            Ok(worker) => {
                info!(
                    message = %self.message,
                    interval_ms = self.interval.as_millis(),
                    render,
                    "spinner:start"
                );
                self.worker = Some(worker);
            }
            Err(e) => warn!(error = %e, "spinner:failed to spawn render thread"),
        }
    }

    /// Stop using the configured timeout (1s unless overridden).
    pub fn stop(&mut self) {
        self.stop_within(self.stop_timeout);
    }

    /// Signal the render thread, wait at most `timeout` for it, then erase
    /// the line. Safe to call when not running and safe to repeat.
    ///
    /// A render thread that misses the timeout is stuck in a write and holds
    /// the sink, so the erase is then only attempted without blocking: a
    /// locked shared writer and stdout/stderr are left as they are.
    pub fn stop_within(&mut self, timeout: Duration) {
        let had_worker = self.worker.is_some();
        let timed_out = match self.worker.take() {
            Some(worker) => {
                worker.request_stop();
                !worker.wait(timeout)
            }
            None => false,
        };

        let erased = if self.renders() {
            let blank = blank_line(
                self.clear_width
                    .max(self.widest_line.load(Ordering::Relaxed)),
            );
            let written = if timed_out {
                self.output.try_write_flush(&blank)
            } else {
                self.output.write_flush(&blank).map(|()| true)
            };
            written.unwrap_or_else(|e| {
                debug!(error = %e, "spinner:failed to clear line");
                false
            })
        } else {
            false
        };

        if timed_out {
            warn!(
                message = %self.message,
                timeout_ms = timeout.as_millis(),
                erased,
                "spinner:stop timeout, render thread detached"
            );
        } else if had_worker {
            info!(
                message = %self.message,
                elapsed_ms = self.elapsed().unwrap_or_default().as_millis(),
                "spinner:stop"
            );
        }
    }

    /// Start now and stop when the returned guard is dropped.
    pub fn scope(&mut self) -> SpinnerScope<'_> {
        self.start();
        SpinnerScope { spinner: self }
    }

    /// Run `f` with the spinner active. The line is cleared even if `f`
    /// returns an error or panics.
    pub fn run<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let _scope = self.scope();
        f()
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            frames: Frames::default(),
            message: DEFAULT_MESSAGE.to_string(),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            output: Output::default(),
            clear_width: DEFAULT_CLEAR_WIDTH,
            hide_when_piped: false,
            stop_timeout: Duration::from_millis(DEFAULT_STOP_TIMEOUT_MS),
            frame_index: Arc::new(AtomicUsize::new(0)),
            widest_line: Arc::new(AtomicUsize::new(0)),
            started_at: None,
            worker: None,
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}

/// Guard returned by [`Spinner::scope`]; stops the spinner on drop.
pub struct SpinnerScope<'a> {
    spinner: &'a mut Spinner,
}

impl Deref for SpinnerScope<'_> {
    type Target = Spinner;

    fn deref(&self) -> &Spinner {
        &*self.spinner
    }
}

impl DerefMut for SpinnerScope<'_> {
    fn deref_mut(&mut self) -> &mut Spinner {
        &mut *self.spinner
    }
}

impl Drop for SpinnerScope<'_> {
    fn drop(&mut self) {
        self.spinner.stop();
    }
}

/// Run `f` under a default spinner showing `message`.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let mut spinner = Spinner::default();
    spinner.message = message.to_string();
    spinner.run(f)
}
