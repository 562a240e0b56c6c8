//! Turns a round's accumulated lines into the per-file error report.

use crate::e_fmt::{pad_end, pad_start};
use crate::e_parser::parse_diagnostic;
use crate::e_redraw::Redraw;
use crate::e_style::Palette;
use crate::e_types::{Diagnostic, FileGroup};
use log::debug;
use std::io;

/// Groups diagnostics by file, keeping the order in which files were first
/// seen and the input order within each file.
pub fn group_by_file(diagnostics: Vec<Diagnostic>) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();
    for diag in diagnostics {
        match groups.iter_mut().find(|group| group.file == diag.file) {
            Some(group) => group.diagnostics.push(diag),
            None => groups.push(FileGroup {
                file: diag.file.clone(),
                diagnostics: vec![diag],
            }),
        }
    }
    groups
}

/// `line` right-aligned in 3 columns, a dim `:`, then `col` left-aligned in 4.
pub fn format_position(diag: &Diagnostic, palette: &Palette) -> String {
    format!(
        "{}{}{}",
        palette.gray(&pad_start(&diag.line, 3)),
        palette.dim_gray(":"),
        palette.gray(&pad_end(&diag.col, 4))
    )
}

pub fn format_line(diag: &Diagnostic, palette: &Palette) -> String {
    format!(
        "  {} {} {}",
        palette.error_symbol(),
        format_position(diag, palette),
        diag.message
    )
}

/// The group header: the file path, with a hidden `./` prefix and a hidden
/// `:line:col` suffix of the first diagnostic so a copied header opens the
/// file at the right spot.
pub fn format_header(group: &FileGroup, palette: &Palette) -> String {
    let suffix = group
        .first()
        .map(|diag| format!(":{}", diag.lineref()))
        .unwrap_or_default();
    format!(
        "{}{}{}",
        palette.hidden("./"),
        palette.dim_underline(&group.file),
        palette.hidden(&suffix)
    )
}

pub fn format_group(group: &FileGroup, palette: &Palette) -> String {
    let mut out = format_header(group, palette);
    for diag in &group.diagnostics {
        out.push('\n');
        out.push_str(&format_line(diag, palette));
    }
    out
}

pub fn format_summary(count: usize, palette: &Palette) -> String {
    let noun = if count == 1 { "error" } else { "errors" };
    format!(" {}", palette.red_bright(&format!("{} {}", count, noun)))
}

pub fn format_success(palette: &Palette) -> String {
    format!("{} No problems\n", palette.success_symbol())
}

/// Renders the frame for a round's raw lines.
///
/// # Example
/// ```
/// use tsc_e::e_reports::render_frame;
/// use tsc_e::e_style::Palette;
///
/// let lines = vec!["src/a.ts(3,7): error TS2304: Cannot find name 'foo'.".to_string()];
/// let frame = render_frame(&lines, &Palette::plain());
/// assert!(frame.starts_with("./src/a.ts:3:7\n"));
/// assert!(frame.ends_with("\n\n 1 error\n"));
/// ```
pub fn render_frame(lines: &[String], palette: &Palette) -> String {
    if lines.is_empty() {
        return format_success(palette);
    }
    let diagnostics = lines.iter().map(|line| parse_diagnostic(line)).collect();
    let groups = group_by_file(diagnostics);
    let body = groups
        .iter()
        .map(|group| format_group(group, palette))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}\n\n{}\n", body, format_summary(lines.len(), palette))
}

/// Writes the frame for `lines` to the report slot. Outside watch mode the
/// frame is committed to the scrollback.
pub fn report<R: Redraw + ?Sized>(
    sink: &mut R,
    lines: &[String],
    watch: bool,
    palette: &Palette,
) -> io::Result<()> {
    debug!(
        "report: {} diagnostic line(s), watch = {}",
        lines.len(),
        watch
    );
    sink.update(&render_frame(lines, palette))?;
    if !watch {
        sink.commit()?;
    }
    Ok(())
}
