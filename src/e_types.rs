/// One error record extracted from a line of compiler output.
///
/// `line` and `col` stay as text so the renderer can align them exactly as
/// they appeared in the input. Malformed input lines produce a `Diagnostic`
/// whose fields may be empty.
///
/// # Example
/// ```
/// use tsc_e::e_parser::parse_diagnostic;
///
/// let diag = parse_diagnostic("src/foo.ts(10,5): error TS2322: Type 'number' is not assignable to type 'string'.");
/// assert_eq!(diag.file, "src/foo.ts");
/// assert_eq!(diag.line, "10");
/// assert_eq!(diag.col, "5");
/// assert_eq!(diag.message, "Type 'number' is not assignable to type 'string'.");
/// ```
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub line: String,
    pub col: String,
    pub message: String,
}

impl Diagnostic {
    /// The `line:col` reference used in the clickable header.
    pub fn lineref(&self) -> String {
        format!("{}:{}", self.line, self.col)
    }
}

/// All diagnostics reported against a single file, in accumulation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileGroup {
    /// The first diagnostic of the group; groups are never empty.
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }
}

/// Round boundary phrases emitted by the compiler in watch mode.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Marker {
    /// `Starting incremental compilation...`
    StartIncremental,
    /// `Starting compilation in watch mode...`
    StartWatch,
    /// `Watching for file changes.`
    EndWatch,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::StartIncremental, Marker::StartWatch, Marker::EndWatch];

    /// The trailing phrase that identifies this marker.
    pub fn phrase(self) -> &'static str {
        match self {
            Marker::StartIncremental => "Starting incremental compilation...",
            Marker::StartWatch => "Starting compilation in watch mode...",
            Marker::EndWatch => "Watching for file changes.",
        }
    }

    pub fn starts_round(self) -> bool {
        matches!(self, Marker::StartIncremental | Marker::StartWatch)
    }
}

/// A classified logical chunk of input (one trimmed line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Marker(Marker),
    Diagnostic(String),
    Blank,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ProcessorState {
    /// No round in flight; the last report (if any) is on screen.
    Idle,
    /// A round has started and the spinner owns the terminal.
    Checking,
    /// A frame is being written to the report slot.
    Reporting,
}

/// Result of the final round, decided at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Errors(usize),
}

impl Outcome {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Outcome::Clean
        } else {
            Outcome::Errors(count)
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::Errors(_) => 1,
        }
    }
}
