//! Diagnostics module for answer sheet validation
//!
//! Checks produce structured marks (severity, kind, block, line) that the
//! editing surface can highlight. `validate` folds them into the flat
//! error/warning lists stored in document metadata.

pub mod document;

use serde::{Deserialize, Serialize};

use crate::models::{AnswerSheetDocument, LineNumber};

pub use document::diagnose;

/// Severity level for diagnostic marks
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Structural violation; makes the document invalid
    Error,
    /// Soft inconsistency; never affects validity
    Warning,
}

/// A single finding about the document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticMark {
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "block_overlap", "line_overflow")
    pub kind: String,
    /// Block the finding is about, if any
    pub block_id: Option<String>,
    /// Grid line the finding points at, if any
    pub line: Option<LineNumber>,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticMark {
    pub fn new(
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind: kind.into(),
            block_id: None,
            line: None,
            message: message.into(),
        }
    }

    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, kind, message)
    }

    pub fn warning(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, kind, message)
    }

    pub fn for_block(mut self, id: impl Into<String>) -> Self {
        self.block_id = Some(id.into());
        self
    }

    pub fn at_line(mut self, line: LineNumber) -> Self {
        self.line = Some(line);
        self
    }
}

/// Collection of diagnostic marks for an entire document
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub marks: Vec<DiagnosticMark>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn add(&mut self, mark: DiagnosticMark) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = DiagnosticMark>) {
        self.marks.extend(marks);
    }

    pub fn has_errors(&self) -> bool {
        self.marks
            .iter()
            .any(|m| m.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Marks of one severity, in the order they were found
    pub fn with_severity(&self, severity: DiagnosticSeverity) -> impl Iterator<Item = &DiagnosticMark> {
        self.marks.iter().filter(move |m| m.severity == severity)
    }
}

/// Outcome of validating a document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<&Diagnostics> for ValidationResult {
    fn from(diagnostics: &Diagnostics) -> Self {
        let messages = |severity| {
            diagnostics
                .with_severity(severity)
                .map(|m| m.message.clone())
                .collect::<Vec<_>>()
        };
        let errors = messages(DiagnosticSeverity::Error);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: messages(DiagnosticSeverity::Warning),
        }
    }
}

/// Validate a document without touching its cached metadata
pub fn validate(doc: &AnswerSheetDocument) -> ValidationResult {
    ValidationResult::from(&diagnose(doc))
}
