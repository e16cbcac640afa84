//! The `token_stream` module defines a cursor over the lexer's token vector.

use crate::core::SourceLocation;
use crate::lexer::{Token, TokenType};

/// A cursor over the token vector produced by the lexer.
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Creates a new token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Is the cursor at the end of the stream?
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peeks at the next token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Peeks `n` tokens past the next one without consuming anything.
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    /// Is the next token of the given type?
    pub fn check(&self, token_type: TokenType) -> bool {
        self.peek().is_some_and(|token| token.token_type == token_type)
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes and returns the next token if it is of the given type.
    pub fn accept(&mut self, token_type: TokenType) -> Option<Token> {
        if self.check(token_type) {
            self.advance()
        } else {
            None
        }
    }

    /// The location of the most recently consumed token, for "expected X after Y" diagnostics.
    ///
    /// Before any token is consumed this is the start of the file.
    pub fn previous_loc(&self) -> SourceLocation {
        if self.pos == 0 {
            return SourceLocation::new(1, 1, 1);
        }

        match self.tokens.get(self.pos - 1) {
            Some(token) => token.loc,
            None => self.tokens.last().map(|token| token.loc).unwrap_or_default(),
        }
    }
}
