//! Recoverable parse diagnostics
//!
//! Records that were dropped without failing the file. Every diagnostic is
//! logged as a warning when it is reported and kept so callers can inspect
//! what was skipped.

use std::fmt;

/// What went wrong with a dropped record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `v` line without exactly three floats
    InvalidVertex,
    /// `f` line without exactly three or four integers
    InvalidIndexFormat,
    /// `f` line referencing a vertex that does not exist (yet)
    InvalidIndex,
    /// `end_header` not followed by a newline
    MissingHeaderNewline,
    /// Bytes left over after the last face
    ExtraBytes(usize),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::InvalidVertex => f.write_str("not a recognized vertex format"),
            DiagnosticKind::InvalidIndexFormat => f.write_str("not a valid index format"),
            DiagnosticKind::InvalidIndex => f.write_str("invalid index"),
            DiagnosticKind::MissingHeaderNewline => {
                f.write_str("missing newline after end_header")
            }
            DiagnosticKind::ExtraBytes(n) => write!(f, "extra {n} bytes at end of file"),
        }
    }
}

/// One dropped record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File name the record came from
    pub source: String,
    /// 1-based line number, when the format has lines
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.source, line, self.kind),
            None => write!(f, "{}: {}", self.source, self.kind),
        }
    }
}

/// Side channel collecting the diagnostics of one or more parses
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a dropped line
    pub fn report_line(&mut self, source: &str, line: usize, kind: DiagnosticKind) {
        self.push(Diagnostic {
            source: source.to_owned(),
            line: Some(line),
            kind,
        });
    }

    /// Report a file-level problem
    pub fn report(&mut self, source: &str, kind: DiagnosticKind) {
        self.push(Diagnostic {
            source: source.to_owned(),
            line: None,
            kind,
        });
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Kinds in report order
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.entries.iter().map(|d| d.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report_line("a.obj", 7, DiagnosticKind::InvalidIndex);
        diagnostics.report("b.ply", DiagnosticKind::ExtraBytes(3));

        let lines: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(lines[0], "a.obj:7: invalid index");
        assert_eq!(lines[1], "b.ply: extra 3 bytes at end of file");
        assert_eq!(diagnostics.len(), 2);
    }
}
