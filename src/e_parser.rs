use crate::e_types::{Chunk, Diagnostic, Marker};

/// Parses one line of compiler output of the form
/// `<file>(<line>,<col>): <severity> <code>: <message>` into a [`Diagnostic`].
///
/// The severity and code are dropped; everything is reported as an error.
/// Lines that do not follow the grammar are parsed best-effort and may yield
/// empty fields, they never fail.
///
/// # Example
/// ```
/// use tsc_e::e_parser::parse_diagnostic;
///
/// let diag = parse_diagnostic("lib/bar.ts(1,1): error TS1005: ',' expected.");
/// assert_eq!(diag.file, "lib/bar.ts");
/// assert_eq!((diag.line.as_str(), diag.col.as_str()), ("1", "1"));
/// assert_eq!(diag.message, "',' expected.");
/// ```
pub fn parse_diagnostic(input: &str) -> Diagnostic {
    let input = input.trim();
    let (loc, message) = split_segments(input);

    let mut tokens = loc
        .split(|c: char| matches!(c, '(' | ')' | ','))
        .filter(|token| !token.is_empty());
    let file = tokens.next().unwrap_or_default().to_string();
    let line = tokens.next().unwrap_or_default().to_string();
    let col = tokens.next().unwrap_or_default().to_string();

    Diagnostic {
        file,
        line,
        col,
        message: message.trim().to_string(),
    }
}

/// Splits a line into its location and message segments, dropping the
/// `<severity> <code>` segment in between.
///
/// The separators are the two `:` following the location's closing `)`, so a
/// drive letter such as `C:\` stays part of the path. Without a location the
/// first two `:` of the line are used.
fn split_segments(input: &str) -> (&str, &str) {
    if let Some(close) = input.find("):") {
        let loc = &input[..=close];
        let rest = &input[close + 2..];
        let message = rest.split_once(':').map(|(_kind, msg)| msg).unwrap_or("");
        return (loc, message);
    }
    let mut segments = input.splitn(3, ':');
    let loc = segments.next().unwrap_or_default();
    let _kind = segments.next();
    let message = segments.next().unwrap_or("");
    (loc, message)
}

/// Returns the marker whose phrase terminates `chunk`, if any.
///
/// Watch-mode compilers prefix the phrases with a timestamp and sometimes an
/// error count, so only the tail of the line is compared.
///
/// # Example
/// ```
/// use tsc_e::e_parser::parse_marker;
/// use tsc_e::e_types::Marker;
///
/// let line = "[10:02:11 AM] Found 0 errors. Watching for file changes.";
/// assert_eq!(parse_marker(line), Some(Marker::EndWatch));
/// assert_eq!(parse_marker("src/a.ts(1,1): error TS1005: ';' expected."), None);
/// ```
pub fn parse_marker(chunk: &str) -> Option<Marker> {
    let chunk = chunk.trim();
    Marker::ALL
        .into_iter()
        .find(|marker| chunk.ends_with(marker.phrase()))
}

/// Classifies a raw input line as a round marker, a diagnostic payload or a
/// blank line. Payloads are returned trimmed.
pub fn classify_chunk(chunk: &str) -> Chunk {
    let trimmed = chunk.trim();
    if trimmed.is_empty() {
        return Chunk::Blank;
    }
    match parse_marker(trimmed) {
        Some(marker) => Chunk::Marker(marker),
        None => Chunk::Diagnostic(trimmed.to_string()),
    }
}
