//! The `core` module defines small types shared by every compilation stage.

mod internal_error;
mod source_ident;
mod source_location;

pub use source_ident::SourceIdentifier;
pub use source_location::SourceLocation;
