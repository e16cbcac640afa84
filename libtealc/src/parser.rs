//! The `parser` module builds the parse tree from the lexer's token stream.

mod recursive_descent;
mod syntax_tree;
mod token_stream;


pub use syntax_tree::{
    AstBasicType, AstBinaryOp, AstExpression, AstExpressionKind, AstFunction, AstIdent, AstLeftExpr,
    AstLeftExprKind, AstParameter, AstProgram, AstStatement, AstTypeSpec, AstTypeSpecKind, AstUnaryOp,
    AstVariableDecl, NodeId,
};

use crate::compiler_driver::Driver;
use crate::lexer::Token;

/// Parses the token stream into a parse tree.
///
/// Syntax errors are recorded on the driver and the parser recovers at statement boundaries, so the returned
/// tree is best-effort: the driver stops after the parse stage when any syntax error was emitted.
pub fn parse(driver: &mut Driver, tokens: Vec<Token>) -> AstProgram {
    recursive_descent::Parser::new(driver, tokens).parse_program()
}
