//! The `source_ident` module defines the `SourceIdentifier` type.

use super::SourceLocation;

/// An identifier's name together with the source location where it appears.
#[derive(Debug, Copy, Clone)]
pub struct SourceIdentifier<'a>(pub &'a str, pub SourceLocation);
