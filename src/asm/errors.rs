//! Unbound-label reporting for [`crate::asm::Assembler::finish`]

use core::{fmt, panic};

#[cfg(feature = "fancy-diagnostics")]
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};

/// Bookkeeping for a label that has been referenced by an emitted
/// instruction but not yet bound.
#[derive(Debug)]
pub(crate) struct PendingLabelInfo {
    pub(crate) caller_loc: &'static panic::Location<'static>,
}

/// One referenced-but-never-bound label, pointing at the emit call that
/// first referenced it.
#[derive(Copy, Clone)]
pub struct UnboundLabel {
    pub(crate) caller_loc: &'static panic::Location<'static>,
}

impl UnboundLabel {
    /// Source location of the emit call that first referenced the label.
    #[must_use]
    #[inline(always)]
    pub fn caller_location(&self) -> &'static panic::Location<'static> {
        self.caller_loc
    }
}

/// Returned by [`crate::asm::Assembler::finish`] when labels referenced
/// by emitted branches were never bound: their placeholder
/// displacements still read zero, so executing the buffer would branch
/// to the referencing instruction itself.
pub struct FinishError {
    pub(crate) unbound: Vec<UnboundLabel>,
}

debug_from_display!(FinishError, newline);

impl FinishError {
    /// The offending labels, in first-reference order.
    #[must_use]
    #[inline(always)]
    pub fn unbound_labels(&self) -> &[UnboundLabel] {
        &self.unbound
    }
}

impl fmt::Display for FinishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reports = self
            .unbound
            .iter()
            .map(render_unbound_label)
            .collect::<Vec<_>>();

        // multiple diagnostics separated by a blank line
        write!(f, "{}", reports.join("\n\n"))
    }
}

impl std::error::Error for FinishError {}

#[cfg(not(feature = "fancy-diagnostics"))]
fn render_unbound_label(label: &UnboundLabel) -> String {
    let loc = label.caller_loc;
    format!(
        "error: label referenced at {file}:{line}:{col} was never bound",
        file = loc.file(),
        line = loc.line(),
        col = loc.column(),
    )
}

#[cfg(feature = "fancy-diagnostics")]
fn render_unbound_label(label: &UnboundLabel) -> String {
    const RENDERED_PREALLOCATION_SIZE: usize = 512;

    let loc = label.caller_loc;
    let source = std::fs::read_to_string(loc.file()).unwrap_or_default();
    if source.is_empty() {
        // no source to excerpt; fall back to a bare location line
        return format!(
            "error: label referenced at {file}:{line}:{col} was never bound",
            file = loc.file(),
            line = loc.line(),
            col = loc.column(),
        );
    }
    let offset = byte_offset_of(&source, loc.line() as usize, loc.column() as usize);

    let diag = UnboundLabelDiagnostic {
        src: NamedSource::new(loc.file(), source),
        span: SourceSpan::from(offset..offset + 1),
    };

    let mut rendered = String::with_capacity(RENDERED_PREALLOCATION_SIZE);
    GraphicalReportHandler::new()
        .render_report(&mut rendered, &diag)
        .expect("render_report should not fail");

    rendered
}

#[cfg(feature = "fancy-diagnostics")]
#[derive(Debug, Diagnostic)]
#[diagnostic(code(mortar::unbound_label))]
struct UnboundLabelDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("label first referenced here was never bound")]
    span: SourceSpan,
}

#[cfg(feature = "fancy-diagnostics")]
impl fmt::Display for UnboundLabelDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label referenced by an emitted branch was never bound")
    }
}

#[cfg(feature = "fancy-diagnostics")]
impl std::error::Error for UnboundLabelDiagnostic {}

/// Byte offset of a 1-based line/column pair, clamped into `text`.
#[cfg(feature = "fancy-diagnostics")]
fn byte_offset_of(text: &str, line: usize, column: usize) -> usize {
    let line_start = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();

    (line_start + column.saturating_sub(1)).min(text.len().saturating_sub(1))
}
