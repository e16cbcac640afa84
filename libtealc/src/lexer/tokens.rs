//! The `tokens` module defines the `Token` type and the vocabulary of the Teal language.

use crate::core::SourceLocation;

/// The type of a token.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenType {
    // Keywords
    KwFunc,
    KwEndFunc,
    KwVar,
    KwInt,
    KwFloat,
    KwBool,
    KwChar,
    KwArray,
    KwIf,
    KwThen,
    KwElse,
    KwEndIf,
    KwWhile,
    KwDo,
    KwEndWhile,
    KwReturn,
    KwRead,
    KwWrite,
    KwAnd,
    KwOr,
    KwNot,

    // Literals
    IntLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    BoolLiteral,

    Identifier,

    // Operators and punctuation
    Assign, // :=
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Semicolon,
}

/// A lexed token.
///
/// The lexeme is the raw source spelling. Character and string literals keep their quotes because code
/// generation feeds the raw lexeme to the `chload` and `writes` instructions.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub loc: SourceLocation,
}

/// Returns the keyword token type for the given identifier spelling, if it is a reserved word.
///
/// The boolean literals `true` and `false` are reserved words that lex as `BoolLiteral`.
pub fn keyword_token_type(ident: &str) -> Option<TokenType> {
    let token_type = match ident {
        "func" => TokenType::KwFunc,
        "endfunc" => TokenType::KwEndFunc,
        "var" => TokenType::KwVar,
        "int" => TokenType::KwInt,
        "float" => TokenType::KwFloat,
        "bool" => TokenType::KwBool,
        "char" => TokenType::KwChar,
        "array" => TokenType::KwArray,
        "if" => TokenType::KwIf,
        "then" => TokenType::KwThen,
        "else" => TokenType::KwElse,
        "endif" => TokenType::KwEndIf,
        "while" => TokenType::KwWhile,
        "do" => TokenType::KwDo,
        "endwhile" => TokenType::KwEndWhile,
        "return" => TokenType::KwReturn,
        "read" => TokenType::KwRead,
        "write" => TokenType::KwWrite,
        "and" => TokenType::KwAnd,
        "or" => TokenType::KwOr,
        "not" => TokenType::KwNot,
        "true" | "false" => TokenType::BoolLiteral,
        _ => return None,
    };

    Some(token_type)
}
