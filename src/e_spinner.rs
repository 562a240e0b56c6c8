//! A one-line "Checking" spinner animated from a background thread.

use crate::e_style::Palette;
use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
    tty::IsTty,
};
use log::{debug, trace};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Something that signals "work in progress" while a round is being checked.
pub trait Indicator {
    /// Starts the indicator. Starting a running indicator does nothing.
    fn start(&mut self) -> io::Result<()>;
    /// Stops the indicator and erases it. Stopping a stopped indicator does nothing.
    fn stop(&mut self) -> io::Result<()>;
    fn is_spinning(&self) -> bool;
}

pub const DOTS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(80);
pub const DEFAULT_LABEL: &str = "Checking";

pub struct Spinner<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
    label: String,
    interval: Duration,
    palette: Palette,
    enabled: bool,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner<io::Stderr> {
    /// A spinner on stderr, enabled only when stderr is a terminal.
    pub fn stderr(label: &str, palette: Palette) -> Self {
        let enabled = io::stderr().is_tty();
        Spinner::new(io::stderr(), label, palette).enabled(enabled)
    }
}

impl<W: Write + Send + 'static> Spinner<W> {
    pub fn new(out: W, label: &str, palette: Palette) -> Self {
        Spinner {
            out: Arc::new(Mutex::new(out)),
            label: label.to_string(),
            interval: DEFAULT_INTERVAL,
            palette,
            enabled: true,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// A disabled spinner accepts start/stop but never draws.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

fn lock<W>(out: &Mutex<W>) -> MutexGuard<'_, W> {
    out.lock().unwrap_or_else(PoisonError::into_inner)
}

fn draw_frame<W: Write>(out: &mut W, frame: &str, label: &str, palette: &Palette) -> io::Result<()> {
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(out, "{} {}", palette.cyan(frame), label)?;
    out.flush()
}

impl<W: Write + Send + 'static> Indicator for Spinner<W> {
    fn start(&mut self) -> io::Result<()> {
        if !self.enabled || self.handle.is_some() {
            return Ok(());
        }
        debug!("spinner: start ({})", self.label);
        {
            let mut out = lock(&self.out);
            queue!(*out, cursor::Hide)?;
            draw_frame(&mut *out, DOTS[0], &self.label, &self.palette)?;
        }
        self.running.store(true, Ordering::SeqCst);

        let out = Arc::clone(&self.out);
        let running = Arc::clone(&self.running);
        let label = self.label.clone();
        let palette = self.palette;
        let interval = self.interval;
        self.handle = Some(thread::spawn(move || {
            let mut index = 1;
            loop {
                thread::park_timeout(interval);
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                let frame = DOTS[index % DOTS.len()];
                let mut out = lock(&out);
                if let Err(e) = draw_frame(&mut *out, frame, &label, &palette) {
                    trace!("spinner: draw failed, giving up: {}", e);
                    break;
                }
                index += 1;
            }
        }));
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        debug!("spinner: stop");
        self.running.store(false, Ordering::SeqCst);
        handle.thread().unpark();
        if handle.join().is_err() {
            trace!("spinner: animation thread panicked");
        }
        let mut out = lock(&self.out);
        queue!(
            *out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            cursor::Show
        )?;
        out.flush()
    }

    fn is_spinning(&self) -> bool {
        self.handle.is_some()
    }
}

impl<W: Write + Send + 'static> Drop for Spinner<W> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
