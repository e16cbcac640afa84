//! The `ir` module lowers the decorated parse tree into the "TealTac" intermediate representation (IR).
//!
//! TealTac is a symbolic three-address code for a simple virtual machine with named addresses, compiler
//! temporaries (`%N`) and a parameter stack.

mod label_maker;
pub mod printer;
mod tealtac;
mod translator;


pub use tealtac::{TtBinaryOp, TtInstruction, TtParam, TtProgram, TtSubroutine, TtUnaryOp, TtVar};
pub use translator::RESULT_PARAM_NAME;

use crate::parser::AstProgram;
use crate::sema::SemanticContext;

/// Translates the decorated parse tree into a TealTac program, one subroutine per function.
///
/// The code pass only consumes decorations written by the earlier passes; it must not run for a program with
/// recorded diagnostics.
pub fn translate(ast: &AstProgram, sema: &mut SemanticContext) -> TtProgram {
    translator::translate_program(ast, sema)
}
