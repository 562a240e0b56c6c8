//! The round state machine that sits between stdin and the terminal.
//!
//! Watch-mode compilers print a start phrase, some diagnostics and an end
//! phrase for every round; single-shot runs print diagnostics and close the
//! stream. Both are handled by one buffer: reset on a start phrase, rendered
//! on an end phrase or at end of input.

use crate::e_parser::classify_chunk;
use crate::e_redraw::Redraw;
use crate::e_reports::report;
use crate::e_spinner::Indicator;
use crate::e_style::Palette;
use crate::e_types::{Chunk, Marker, Outcome, ProcessorState};
use log::{debug, trace};
use std::io::{self, BufRead};

pub struct StreamProcessor<R: Redraw, I: Indicator> {
    sink: R,
    spinner: I,
    palette: Palette,
    buffer: Vec<String>,
    state: ProcessorState,
}

impl<R: Redraw, I: Indicator> StreamProcessor<R, I> {
    pub fn new(sink: R, spinner: I, palette: Palette) -> Self {
        StreamProcessor {
            sink,
            spinner,
            palette,
            buffer: Vec::new(),
            state: ProcessorState::Idle,
        }
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    /// Raw diagnostic lines accumulated in the current round.
    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn spinner(&self) -> &I {
        &self.spinner
    }

    /// Handles one logical chunk (a line of input).
    pub fn feed(&mut self, chunk: &str) -> io::Result<()> {
        match classify_chunk(chunk) {
            Chunk::Blank => Ok(()),
            Chunk::Marker(marker) if marker.starts_round() => self.start_round(marker),
            Chunk::Marker(_) => self.end_round(),
            Chunk::Diagnostic(line) => {
                trace!("buffering: {}", line);
                self.buffer.push(line);
                Ok(())
            }
        }
    }

    fn start_round(&mut self, marker: Marker) -> io::Result<()> {
        if !self.buffer.is_empty() {
            debug!(
                "discarding {} unrendered line(s) from the previous round",
                self.buffer.len()
            );
        }
        // the report slot is released before the spinner takes the terminal
        self.sink.clear()?;
        self.spinner.start()?;
        self.buffer.clear();
        self.transition(ProcessorState::Checking, marker);
        Ok(())
    }

    fn end_round(&mut self) -> io::Result<()> {
        self.spinner.stop()?;
        self.render(true)?;
        self.transition(ProcessorState::Idle, Marker::EndWatch);
        Ok(())
    }

    fn render(&mut self, watch: bool) -> io::Result<()> {
        self.state = ProcessorState::Reporting;
        report(&mut self.sink, &self.buffer, watch, &self.palette)
    }

    fn transition(&mut self, next: ProcessorState, marker: Marker) {
        debug!("{:?} -> {:?} on {:?}", self.state, next, marker);
        self.state = next;
    }

    /// Handles end of input: renders the last round and commits it.
    pub fn finish(&mut self) -> io::Result<Outcome> {
        self.spinner.stop()?;
        self.render(false)?;
        let outcome = Outcome::from_count(self.buffer.len());
        debug!("end of input: {:?}", outcome);
        Ok(outcome)
    }

    /// Feeds every line of `input` and finishes at end of stream.
    ///
    /// Bytes are decoded as UTF-8 with invalid sequences replaced; a final
    /// line without a newline is processed like any other.
    pub fn run<B: BufRead>(&mut self, mut input: B) -> io::Result<Outcome> {
        let mut raw = Vec::new();
        loop {
            raw.clear();
            let read = match input.read_until(b'\n', &mut raw) {
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if read == 0 {
                break;
            }
            let chunk = String::from_utf8_lossy(&raw);
            self.feed(&chunk)?;
        }
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared event log so ordering between sink and spinner is observable.
    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeSink {
        log: Log,
        frames: Vec<String>,
    }

    impl Redraw for FakeSink {
        fn update(&mut self, frame: &str) -> io::Result<()> {
            self.log.borrow_mut().push("update".into());
            self.frames.push(frame.to_string());
            Ok(())
        }
        fn commit(&mut self) -> io::Result<()> {
            self.log.borrow_mut().push("commit".into());
            Ok(())
        }
        fn clear(&mut self) -> io::Result<()> {
            self.log.borrow_mut().push("clear".into());
            Ok(())
        }
    }

    struct FakeSpinner {
        log: Log,
        spinning: bool,
    }

    impl Indicator for FakeSpinner {
        fn start(&mut self) -> io::Result<()> {
            if !self.spinning {
                self.log.borrow_mut().push("start".into());
                self.spinning = true;
            }
            Ok(())
        }
        fn stop(&mut self) -> io::Result<()> {
            if self.spinning {
                self.log.borrow_mut().push("stop".into());
                self.spinning = false;
            }
            Ok(())
        }
        fn is_spinning(&self) -> bool {
            self.spinning
        }
    }

    fn processor() -> (StreamProcessor<FakeSink, FakeSpinner>, Log) {
        let log: Log = Rc::default();
        let sink = FakeSink {
            log: Rc::clone(&log),
            frames: Vec::new(),
        };
        let spinner = FakeSpinner {
            log: Rc::clone(&log),
            spinning: false,
        };
        (StreamProcessor::new(sink, spinner, Palette::plain()), log)
    }

    fn feed_all(p: &mut StreamProcessor<FakeSink, FakeSpinner>, chunks: &[&str]) {
        for chunk in chunks {
            p.feed(chunk).unwrap();
        }
    }

    const START_INCR: &str = "[10:00:00 AM] Starting incremental compilation...";
    const START_WATCH: &str = "[10:00:00 AM] Starting compilation in watch mode...";
    const END_WATCH: &str = "[10:00:01 AM] Found 0 errors. Watching for file changes.";
    const ERR_A: &str = "src/a.ts(3,7): error TS2304: Cannot find name 'foo'.";

    #[test]
    fn clean_watch_round() {
        let (mut p, log) = processor();
        feed_all(&mut p, &[START_WATCH, END_WATCH]);
        assert_eq!(p.state(), ProcessorState::Idle);
        assert!(p.sink().frames.last().unwrap().contains("No problems"));
        assert_eq!(*log.borrow(), vec!["clear", "start", "stop", "update"]);
    }

    #[test]
    fn start_marker_enters_checking_with_empty_buffer() {
        let (mut p, _log) = processor();
        feed_all(&mut p, &[ERR_A, ERR_A]);
        assert_eq!(p.buffer().len(), 2);
        p.feed(START_INCR).unwrap();
        assert_eq!(p.state(), ProcessorState::Checking);
        assert!(p.buffer().is_empty());
        assert!(p.spinner().is_spinning());
        // nothing was rendered for the discarded round
        assert!(p.sink().frames.is_empty());
    }

    #[test]
    fn markers_are_never_buffered() {
        let (mut p, _log) = processor();
        feed_all(&mut p, &[START_INCR, ERR_A, "   ", "Starting incremental compilation..."]);
        assert!(p.buffer().is_empty());
        feed_all(&mut p, &[ERR_A]);
        assert_eq!(p.buffer(), &[ERR_A.to_string()]);
    }

    #[test]
    fn repeated_start_is_the_same_as_one() {
        let (mut p, log) = processor();
        feed_all(&mut p, &[START_INCR, START_INCR]);
        assert_eq!(p.state(), ProcessorState::Checking);
        assert!(p.buffer().is_empty());
        assert_eq!(
            log.borrow().iter().filter(|e| e.as_str() == "start").count(),
            1
        );
    }

    #[test]
    fn error_round_then_clean_round_redraws_in_place() {
        let (mut p, log) = processor();
        feed_all(&mut p, &[START_INCR, ERR_A, END_WATCH]);
        assert!(p.sink().frames[0].ends_with(" 1 error\n"));
        feed_all(&mut p, &[START_INCR, END_WATCH]);
        assert!(p.sink().frames[1].contains("No problems"));
        assert!(!log.borrow().iter().any(|e| e == "commit"));
        assert_eq!(p.state(), ProcessorState::Idle);
    }

    #[test]
    fn spinner_stops_before_every_render() {
        let (mut p, log) = processor();
        feed_all(&mut p, &[START_WATCH, ERR_A, END_WATCH, START_INCR, ERR_A]);
        p.finish().unwrap();
        let log = log.borrow();
        for (i, event) in log.iter().enumerate() {
            if event == "update" {
                assert_eq!(log[i - 1], "stop", "render without stopping: {:?}", log);
            }
            if event == "start" {
                assert_eq!(log[i - 1], "clear", "spinner over a live report: {:?}", log);
            }
        }
    }

    #[test]
    fn finish_commits_and_decides_outcome() {
        let (mut p, log) = processor();
        feed_all(&mut p, &[ERR_A, "src/a.ts(10,1): error TS1005: ';' expected."]);
        assert_eq!(p.finish().unwrap(), Outcome::Errors(2));
        assert_eq!(*log.borrow(), vec!["update", "commit"]);
        assert!(p.sink().frames[0].ends_with(" 2 errors\n"));

        let (mut p, _log) = processor();
        feed_all(&mut p, &[START_WATCH, ERR_A, END_WATCH, START_INCR, END_WATCH]);
        assert_eq!(p.finish().unwrap(), Outcome::Clean);
    }

    #[test]
    fn body_lines_match_buffered_chunks() {
        let (mut p, _log) = processor();
        feed_all(
            &mut p,
            &[
                START_INCR,
                "src/b.ts(1,1): error TS1005: ',' expected.",
                "src/a.ts(2,2): error TS2304: Cannot find name 'x'.",
                "src/b.ts(9,9): error TS1005: ',' expected.",
                END_WATCH,
            ],
        );
        let frame = p.sink().frames.last().unwrap();
        let symbol = Palette::plain().symbols.error;
        assert_eq!(frame.matches(symbol).count(), 3);
        assert!(frame.find("./src/b.ts").unwrap() < frame.find("./src/a.ts").unwrap());
    }

    #[test]
    fn run_reads_lines_until_eof() {
        let (mut p, _log) = processor();
        let input = format!("\n  {}  \r\n{}", ERR_A, "lib/bar.ts(1,1): error TS1005: ',' expected.");
        let outcome = p.run(input.as_bytes()).unwrap();
        assert_eq!(outcome, Outcome::Errors(2));
        assert_eq!(p.buffer()[0], ERR_A);
        assert_eq!(p.buffer()[1], "lib/bar.ts(1,1): error TS1005: ',' expected.");
    }

    #[test]
    fn run_replaces_invalid_utf8() {
        let (mut p, _log) = processor();
        let mut input = b"src/\xffa.ts(1,1): error TS1: bad bytes\n".to_vec();
        input.extend_from_slice(START_INCR.as_bytes());
        let outcome = p.run(&input[..]).unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[test]
    fn empty_input_is_clean() {
        let (mut p, _log) = processor();
        assert_eq!(p.run(&b""[..]).unwrap(), Outcome::Clean);
        assert!(p.sink().frames[0].contains("No problems"));
    }
}
