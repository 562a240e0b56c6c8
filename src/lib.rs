#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::io;
    pub use std::io::{BufRead, Write};
    pub use std::process::exit;
    pub use log::{debug, error, info, log_enabled, trace, Level};
}

pub mod e_cli;
pub use e_cli::Cli;
pub mod e_features;
pub mod e_fmt;
pub mod e_parser;
pub use e_parser::{classify_chunk, parse_diagnostic, parse_marker};
pub mod e_processor;
pub use e_processor::StreamProcessor;
pub mod e_redraw;
pub use e_redraw::{Redraw, TerminalRedraw};
pub mod e_reports;
pub use e_reports::{render_frame, report};
pub mod e_spinner;
pub use e_spinner::{Indicator, Spinner};
pub mod e_style;
pub use e_style::{Palette, Symbols};
pub mod e_types;
pub use e_types::{Chunk, Diagnostic, FileGroup, Marker, Outcome, ProcessorState};
