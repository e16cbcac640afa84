//! The `line_lexer` module lexes one line of source text at a time.

use crate::compiler_driver::{Diagnostic, Driver};
use crate::core::SourceLocation;

use super::tokens::{keyword_token_type, Token, TokenType};

/// Lexes the tokens of a single source line.
pub struct LineLexer<'a> {
    driver: &'a mut Driver,
    line_no: usize,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> LineLexer<'a> {
    /// Creates a lexer for one source line.
    pub fn new(driver: &'a mut Driver, line_no: usize, line: &str) -> Self {
        Self { driver, line_no, chars: line.chars().collect(), pos: 0 }
    }

    /// Gets the next token in the line.
    ///
    /// Returns `Ok(None)` when the line has no more tokens, and `Err(())` after diagnosing a malformed token,
    /// in which case the caller should keep asking for tokens.
    pub fn get_next_token(&mut self) -> Result<Option<Token>, ()> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(None);
        };

        // A '//' comment runs to the end of the line.
        if c == '/' && self.peek_ahead(1) == Some('/') {
            self.pos = self.chars.len();
            return Ok(None);
        }

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(Some(self.lex_identifier_or_keyword()));
        }

        if c.is_ascii_digit() {
            return Ok(Some(self.lex_number()));
        }

        if c == '\'' {
            return self.lex_char_literal().map(Some);
        }

        if c == '"' {
            return self.lex_string_literal().map(Some);
        }

        self.lex_operator().map(Some)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn location_from(&self, start: usize) -> SourceLocation {
        SourceLocation::new(self.line_no, start + 1, self.pos - start)
    }

    fn make_token(&self, token_type: TokenType, start: usize) -> Token {
        let lexeme = self.chars[start..self.pos].iter().collect::<String>();
        Token { token_type, lexeme, loc: self.location_from(start) }
    }

    fn lex_identifier_or_keyword(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }

        let spelling = self.chars[start..self.pos].iter().collect::<String>();
        let token_type = keyword_token_type(&spelling).unwrap_or(TokenType::Identifier);

        Token { token_type, lexeme: spelling, loc: self.location_from(start) }
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }

        // A '.' followed by a digit makes this a float literal.
        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            return self.make_token(TokenType::FloatLiteral, start);
        }

        self.make_token(TokenType::IntLiteral, start)
    }

    fn lex_char_literal(&mut self) -> Result<Token, ()> {
        let start = self.pos;
        self.pos += 1; // Opening quote

        match self.advance() {
            Some('\\') => {
                // The escaped character, whatever it is, belongs to the literal.
                _ = self.advance();
            }
            Some('\'') => {
                self.diagnose_at(start, "empty character literal".to_string());
                return Err(());
            }
            Some(_) => (),
            None => {
                self.diagnose_at(start, "unterminated character literal".to_string());
                return Err(());
            }
        }

        if self.advance() != Some('\'') {
            self.diagnose_at(start, "unterminated character literal".to_string());
            return Err(());
        }

        Ok(self.make_token(TokenType::CharLiteral, start))
    }

    fn lex_string_literal(&mut self) -> Result<Token, ()> {
        let start = self.pos;
        self.pos += 1; // Opening quote

        loop {
            match self.advance() {
                Some('\\') => _ = self.advance(),
                Some('"') => return Ok(self.make_token(TokenType::StringLiteral, start)),
                Some(_) => (),
                None => {
                    self.diagnose_at(start, "unterminated string literal".to_string());
                    return Err(());
                }
            }
        }
    }

    fn lex_operator(&mut self) -> Result<Token, ()> {
        let start = self.pos;
        let c = self.advance().expect("Caller checked a character is available");

        let token_type = match c {
            ':' if self.peek() == Some('=') => {
                self.pos += 1;
                TokenType::Assign
            }
            ':' => TokenType::Colon,
            '!' if self.peek() == Some('=') => {
                self.pos += 1;
                TokenType::NotEqual
            }
            '<' if self.peek() == Some('=') => {
                self.pos += 1;
                TokenType::LessEqual
            }
            '<' => TokenType::Less,
            '>' if self.peek() == Some('=') => {
                self.pos += 1;
                TokenType::GreaterEqual
            }
            '>' => TokenType::Greater,
            '=' => TokenType::Equal,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Star,
            '/' => TokenType::Slash,
            '%' => TokenType::Percent,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '[' => TokenType::LeftBracket,
            ']' => TokenType::RightBracket,
            ',' => TokenType::Comma,
            ';' => TokenType::Semicolon,
            _ => {
                self.diagnose_at(start, format!("unexpected character '{c}'"));
                return Err(());
            }
        };

        Ok(self.make_token(token_type, start))
    }

    fn diagnose_at(&mut self, start: usize, message: String) {
        let loc = SourceLocation::new(self.line_no, start + 1, self.pos.saturating_sub(start).max(1));
        self.driver.add_diagnostic(Diagnostic::error_at_location(message, loc));
    }
}
