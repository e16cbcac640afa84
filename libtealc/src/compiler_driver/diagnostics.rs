//! The `diagnostics` module defines the errors emitted by the compiler.

pub mod error;

use crate::core::SourceLocation;

/// The kind of a semantic diagnostic.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SemErrorKind {
    DeclaredIdent,
    UndeclaredIdent,
    IncompatibleAssignment,
    IncompatibleParameter,
    IncompatibleReturn,
    IncompatibleOperator,
    NonReferenceableLeftExpr,
    NonReferenceableExpression,
    BooleanRequired,
    ReadWriteRequireBasic,
    NonIntegerIndexInArrayAccess,
    NonArrayInArrayAccess,
    IsNotCallable,
    IsNotFunction,
    NumberOfParameters,
    NoMainProperlyDeclared,
}

/// A diagnostic emitted by the compiler.
///
/// Lexical and syntax errors carry no `SemErrorKind`; every semantic error carries the kind it was emitted for,
/// so that tests and tools can match on the category rather than the message text.
#[derive(Debug)]
pub struct Diagnostic {
    sem_kind: Option<SemErrorKind>,
    message: String,
    loc: SourceLocation,
}

impl Diagnostic {
    /// Creates an error diagnostic with the given error message and source code location.
    pub fn error_at_location(message: String, loc: SourceLocation) -> Self {
        Self { sem_kind: None, message, loc }
    }

    /// Creates a semantic error diagnostic.
    pub fn semantic(kind: SemErrorKind, message: String, loc: SourceLocation) -> Self {
        Self { sem_kind: Some(kind), message, loc }
    }

    /// The kind of semantic error, or `None` for lexical and syntax errors.
    pub fn sem_kind(&self) -> Option<SemErrorKind> {
        self.sem_kind
    }

    /// The diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The source location the diagnostic refers to.
    pub fn location(&self) -> SourceLocation {
        self.loc
    }
}
