//! Diagnostics and fatal checker faults.
//!
//! # Design
//!
//! - `CompileError`: one user-facing diagnostic with a primary span, optional
//!   secondary labels and notes. Diagnostics are accumulated, never thrown.
//! - `ErrorKind`: what went wrong, grouped by the check that found it
//! - `InternalError`: a checker bug (pass run out of order, missing
//!   elaboration). Returned as `Err` and aborts the compilation unit.
//! - `DiagnosticFormatter`: renders diagnostics with source snippets
//!
//! # Examples
//!
//! ```
//! # use cadence_sema::error::*;
//! # use cadence_ast::Span;
//! let error = CompileError::new(
//!     ErrorKind::MemberConflict,
//!     Span::new(0, 0, 1, 1),
//!     "`C` inherits conflicting function `f` from `A` and `B`".to_string(),
//! );
//! assert!(error.is_error());
//! ```

use cadence_ast::{DeclId, SourceMap, Span};
use std::fmt;
use thiserror::Error;

/// Checker diagnostic with source location and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub severity: Severity,
    /// Primary source location
    pub span: Span,
    pub message: String,
    /// Related locations, e.g. the conflicting declaration
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

/// Category of a diagnostic.
///
/// # Invariant
///
/// The discriminant values must match the ERROR_KIND_NAMES array indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    // Name resolution
    /// Type, entitlement or value name not in scope
    UndefinedName = 0,
    /// Name declared twice in the same scope
    Redeclaration = 1,

    // Conformance
    /// Conforming kind differs from the interface kind
    KindMismatch = 2,
    /// Same-named members that are ambiguous or incompatible
    MemberConflict = 3,
    /// Same-named nested type requirements
    NestedTypeConflict = 4,
    /// Conformance that is not an interface, or refers to itself
    InvalidConformance = 5,
    /// Composite does not satisfy an interface it conforms to
    ConformanceMismatch = 6,
    /// Several conformances supply a default for the same function
    DefaultFunctionConflict = 7,

    // Declarations
    /// Interface function with an empty body and no conditions
    InvalidImplementation = 8,
    /// Interface of a kind that cannot have interfaces
    InvalidInterfaceDeclaration = 9,
    /// Nested declaration inside a container that cannot nest it
    InvalidNestedDeclaration = 10,
    /// Composite function without a body
    MissingFunctionBody = 11,

    // Access control
    /// Access modifier not valid for this declaration
    InvalidAccessModifier = 12,
    /// Strict access checking requires an explicit modifier
    MissingAccessModifier = 13,
    /// Access names something that is not an entitlement
    InvalidEntitlement = 14,

    // Members
    /// Contract field type cannot be stored
    FieldTypeNotStorable = 15,
    /// Resource-typed field in a kind that cannot hold resources
    InvalidResourceField = 16,
    /// Invalid or repeated initializer
    InvalidInitializer = 17,
    /// Special function with an unknown name
    UnknownSpecialFunction = 18,
    /// Interface special function with an implementation
    SpecialFunctionImplementation = 19,
    /// Invalid, repeated or misplaced destructor
    InvalidDestructor = 20,

    // Function bodies
    /// Body may complete without returning
    MissingReturn = 21,
    /// Resource local neither moved nor destroyed
    ResourceLoss = 22,

    // Generic
    /// Internal checker error (bug in the checker)
    Internal = 23,
}

/// Human-readable names for error kinds.
///
/// Index matches ErrorKind discriminant.
const ERROR_KIND_NAMES: &[&str] = &[
    "undefined name",                  // 0: UndefinedName
    "redeclaration",                   // 1: Redeclaration
    "kind mismatch",                   // 2: KindMismatch
    "member conflict",                 // 3: MemberConflict
    "nested type conflict",            // 4: NestedTypeConflict
    "invalid conformance",             // 5: InvalidConformance
    "conformance mismatch",            // 6: ConformanceMismatch
    "default function conflict",       // 7: DefaultFunctionConflict
    "invalid implementation",          // 8: InvalidImplementation
    "invalid interface declaration",   // 9: InvalidInterfaceDeclaration
    "invalid nested declaration",      // 10: InvalidNestedDeclaration
    "missing function body",           // 11: MissingFunctionBody
    "invalid access modifier",         // 12: InvalidAccessModifier
    "missing access modifier",         // 13: MissingAccessModifier
    "invalid entitlement",             // 14: InvalidEntitlement
    "field type not storable",         // 15: FieldTypeNotStorable
    "invalid resource field",          // 16: InvalidResourceField
    "invalid initializer",             // 17: InvalidInitializer
    "unknown special function",        // 18: UnknownSpecialFunction
    "special function implementation", // 19: SpecialFunctionImplementation
    "invalid destructor",              // 20: InvalidDestructor
    "missing return",                  // 21: MissingReturn
    "resource loss",                   // 22: ResourceLoss
    "internal checker error",          // 23: Internal
];

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

/// Secondary labeled span, e.g. "conflicting declaration here".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl CompileError {
    /// Creates an error-severity diagnostic.
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self::with_severity(kind, Severity::Error, span, message)
    }

    pub fn warning(kind: ErrorKind, span: Span, message: String) -> Self {
        Self::with_severity(kind, Severity::Warning, span, message)
    }

    fn with_severity(kind: ErrorKind, severity: Severity, span: Span, message: String) -> Self {
        Self {
            kind,
            severity,
            span,
            message,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Adds a secondary labeled span.
    pub fn with_label(mut self, span: Span, message: String) -> Self {
        self.labels.push(Label { span, message });
        self
    }

    /// Adds a note or hint.
    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl ErrorKind {
    /// Human-readable name of this error kind.
    pub fn name(self) -> &'static str {
        ERROR_KIND_NAMES[self as usize]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.severity,
            self.kind.name(),
            self.message
        )
    }
}

impl std::error::Error for CompileError {}

/// Checker pass a declaration has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassState {
    TypeDeclared,
    MembersDeclared,
    Checked,
}

impl fmt::Display for PassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PassState::TypeDeclared => "type declared",
            PassState::MembersDeclared => "members declared",
            PassState::Checked => "checked",
        };
        f.write_str(name)
    }
}

/// Checker invariant violation.
///
/// Never caused by user input: any occurrence is a bug in the checker or in
/// the driver calling it. Aborts checking of the compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("{declaration} is in state {found:?}, expected {expected}")]
    PassOutOfOrder {
        declaration: DeclId,
        expected: PassState,
        found: Option<PassState>,
    },

    #[error("{declaration} was already declared")]
    AlreadyDeclared { declaration: DeclId },

    #[error("no elaborated type for {declaration}")]
    MissingElaboration { declaration: DeclId },

    #[error("nested declaration `{name}` of {container} has no elaborated type")]
    MissingNestedDeclaration { container: DeclId, name: String },
}

impl InternalError {
    /// Diagnostic form, for drivers that report the fault alongside user errors.
    pub fn into_diagnostic(self) -> CompileError {
        CompileError::new(ErrorKind::Internal, Span::synthetic(), self.to_string())
            .with_note("this is a bug in the checker".to_string())
    }
}

/// Result of a checker pass.
pub type CheckResult<T> = Result<T, InternalError>;

/// Formats diagnostics with source code context.
pub struct DiagnosticFormatter<'a> {
    sources: &'a SourceMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(sources: &'a SourceMap) -> Self {
        Self { sources }
    }

    /// Formats a diagnostic with location, source line, underline, labels and notes.
    pub fn format(&self, error: &CompileError) -> String {
        let mut output = format!(
            "{}: {}: {}\n",
            error.severity,
            error.kind.name(),
            error.message
        );

        let (line, col) = self.sources.line_col(&error.span);
        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            self.sources.file_path(&error.span).display(),
            line,
            col
        ));

        if let Some(source_line) = self
            .sources
            .get(&error.span)
            .and_then(|file| file.line_text(line))
        {
            let width = (error.span.end.saturating_sub(error.span.start) as usize).max(1);
            output.push_str("   |\n");
            output.push_str(&format!("{:3} | {}\n", line, source_line));
            output.push_str(&format!(
                "   | {}{}\n",
                " ".repeat(col.saturating_sub(1) as usize),
                "^".repeat(width)
            ));
        }

        for label in &error.labels {
            let (label_line, label_col) = self.sources.line_col(&label.span);
            output.push_str(&format!("   = note: {}\n", label.message));
            output.push_str(&format!(
                "     at {}:{}:{}\n",
                self.sources.file_path(&label.span).display(),
                label_line,
                label_col
            ));
        }

        for note in &error.notes {
            output.push_str(&format!("   = help: {}\n", note));
        }

        output
    }

    /// Formats several diagnostics separated by blank lines.
    pub fn format_all(&self, errors: &[CompileError]) -> String {
        errors
            .iter()
            .map(|e| self.format(e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
