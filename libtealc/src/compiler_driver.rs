//! The `compiler_driver` module defines the functions and types which orchestrate the different compilation stages.

pub mod args;
pub mod options;

mod diagnostics;
mod driver;

pub use diagnostics::error::Error;
pub use diagnostics::{Diagnostic, SemErrorKind};
pub use driver::Driver;

use std::fs;

use crate::ir;
use crate::ir::TtProgram;
use crate::lexer;
use crate::parser;
use crate::sema;

/// An error returned by the compiler driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverError {
    SourceUnreadable,
    CompilerFailed,
}

/// Runs the compiler pipeline for the driver's source file.
///
/// Each stage hands its artifact to the next: tokens, then the parse tree, then the decorated tree together with
/// the semantic context, and finally the TealTac program. Diagnostics are recorded on the Driver itself, and not
/// returned as errors in the `Result<>` type.
///
/// Returns `Ok(None)` when a stop-early option halted the pipeline before code generation.
fn compile(driver: &mut Driver) -> Result<Option<TtProgram>, DriverError> {
    let source = match fs::read_to_string(&driver.source_filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Cannot open '{}': {e}", &driver.source_filename);
            return Err(DriverError::SourceUnreadable);
        }
    };

    // Run the lexer.
    let tokens = lexer::lex(driver, &source);

    if driver.has_error_diagnostics() {
        return Err(DriverError::CompilerFailed);
    }

    if driver.options().lex {
        return Ok(None);
    }

    // Run the parser.
    let ast = parser::parse(driver, tokens);

    if driver.has_error_diagnostics() {
        return Err(DriverError::CompilerFailed);
    }

    if driver.options().parse {
        return Ok(None);
    }

    // Run the semantic passes: symbol collection, then type checking.
    let mut sema = sema::semantic_analysis(&ast, driver);

    if driver.has_error_diagnostics() {
        return Err(DriverError::CompilerFailed);
    }

    if driver.options().validate {
        return Ok(None);
    }

    // Lower the decorated parse tree to TealTac IR.
    Ok(Some(ir::translate(&ast, &mut sema)))
}
