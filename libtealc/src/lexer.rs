//! The `lexer` module handles the lexical analysis of the source code and produces the vector of tokens that is
//! handed to the parser.

mod line_lexer;
mod tokens;


pub use tokens::{Token, TokenType};

use crate::compiler_driver::Driver;

/// Performs lexical analysis of the source text and returns the token stream.
///
/// Lexical errors are recorded on the driver; lexing continues past them so that one pass reports every
/// malformed token.
pub fn lex(driver: &mut Driver, source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line_no = 1; // Line and column numbers are 1-based

    for line in source.lines() {
        tokens.extend(lex_one_line(driver, line_no, line));
        line_no += 1;
    }

    tokens
}

fn lex_one_line(driver: &mut Driver, line_no: usize, line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line_lexer = line_lexer::LineLexer::new(driver, line_no, line);

    loop {
        match line_lexer.get_next_token() {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => break, // No more tokens in this line
            _ => (),           // Move to the next token if any error is diagnosed
        }
    }

    tokens
}
