//! The `recursive_descent` module implements the hand-written recursive-descent parser for the Teal grammar.

use crate::compiler_driver::{Diagnostic, Driver};
use crate::core::SourceLocation;
use crate::lexer::{Token, TokenType};

use super::syntax_tree::{
    AstBasicType, AstBinaryOp, AstExpression, AstExpressionKind, AstFunction, AstIdent, AstLeftExpr,
    AstLeftExprKind, AstParameter, AstProgram, AstStatement, AstTypeSpec, AstTypeSpecKind, AstUnaryOp,
    AstVariableDecl, NodeId,
};
use super::token_stream::TokenStream;

/// The result of parsing one construct. `Err` means a diagnostic has already been emitted and the caller
/// should synchronize.
type ParseResult<T> = Result<T, ()>;

/// The recursive-descent parser.
pub(super) struct Parser<'a> {
    driver: &'a mut Driver,
    stream: TokenStream,
    next_node_id: u32,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given token vector.
    pub fn new(driver: &'a mut Driver, tokens: Vec<Token>) -> Self {
        Self { driver, stream: TokenStream::new(tokens), next_node_id: 0 }
    }

    /// Parses the whole token stream into a program node.
    pub fn parse_program(mut self) -> AstProgram {
        let node_id = self.next_id();
        let loc = self.stream.peek().map(|token| token.loc).unwrap_or_else(|| SourceLocation::new(1, 1, 1));

        let mut functions = Vec::new();

        while !self.stream.at_end() {
            if self.stream.check(TokenType::KwFunc) {
                match self.parse_function() {
                    Ok(function) => functions.push(function),
                    Err(()) => self.synchronize_to_function(),
                }
            } else {
                let token = self.stream.advance().expect("Checked not at end");
                self.syntax_error(format!("expected 'func', found '{}'", token.lexeme), token.loc);
                self.synchronize_to_function();
            }
        }

        AstProgram { node_id, loc, functions }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn syntax_error(&mut self, message: String, loc: SourceLocation) {
        self.driver.add_diagnostic(Diagnostic::error_at_location(message, loc));
    }

    /// Consumes the next token if it has the expected type, or diagnoses a syntax error.
    fn expect(&mut self, token_type: TokenType, what: &str) -> ParseResult<Token> {
        if let Some(token) = self.stream.accept(token_type) {
            return Ok(token);
        }

        let (found, loc) = match self.stream.peek() {
            Some(token) => (format!("'{}'", token.lexeme), token.loc),
            None => ("end of file".to_string(), self.stream.previous_loc()),
        };
        self.syntax_error(format!("expected {what}, found {found}"), loc);
        Err(())
    }

    /// Skips forward to the next `func` keyword after a syntax error at function level.
    fn synchronize_to_function(&mut self) {
        while let Some(token) = self.stream.peek() {
            if token.token_type == TokenType::KwFunc {
                return;
            }
            _ = self.stream.advance();
        }
    }

    /// Skips forward to a statement boundary after a syntax error inside a function body.
    fn synchronize_statement(&mut self) {
        // Always make progress, even when the failing construct consumed nothing.
        _ = self.stream.advance();

        while let Some(token) = self.stream.peek() {
            match token.token_type {
                TokenType::Semicolon => {
                    _ = self.stream.advance();
                    return;
                }
                TokenType::KwIf
                | TokenType::KwWhile
                | TokenType::KwRead
                | TokenType::KwWrite
                | TokenType::KwReturn
                | TokenType::KwVar
                | TokenType::KwElse
                | TokenType::KwEndIf
                | TokenType::KwEndWhile
                | TokenType::KwEndFunc
                | TokenType::KwFunc => return,
                _ => _ = self.stream.advance(),
            }
        }
    }

    fn parse_function(&mut self) -> ParseResult<AstFunction> {
        let node_id = self.next_id();
        _ = self.expect(TokenType::KwFunc, "'func'")?;
        let name_token = self.expect(TokenType::Identifier, "a function name")?;
        _ = self.expect(TokenType::LeftParen, "'('")?;

        let mut parameters = Vec::new();
        if !self.stream.check(TokenType::RightParen) {
            loop {
                parameters.push(self.parse_parameter()?);
                if self.stream.accept(TokenType::Comma).is_none() {
                    break;
                }
            }
        }
        _ = self.expect(TokenType::RightParen, "')'")?;

        // An optional ': basic_type' return type. Functions cannot return arrays.
        let return_type = match self.stream.accept(TokenType::Colon) {
            Some(_) => Some(self.parse_basic_type_spec()?),
            None => None,
        };

        let mut declarations = Vec::new();
        while self.stream.check(TokenType::KwVar) {
            match self.parse_variable_decl() {
                Ok(decl) => declarations.push(decl),
                Err(()) => self.synchronize_statement(),
            }
        }

        let statements = self.parse_statements(&[TokenType::KwEndFunc]);
        _ = self.expect(TokenType::KwEndFunc, "'endfunc'")?;

        Ok(AstFunction {
            node_id,
            name: name_token.lexeme,
            name_loc: name_token.loc,
            parameters,
            return_type,
            declarations,
            statements,
        })
    }

    fn parse_parameter(&mut self) -> ParseResult<AstParameter> {
        let name_token = self.expect(TokenType::Identifier, "a parameter name")?;
        _ = self.expect(TokenType::Colon, "':'")?;
        let type_spec = self.parse_type_spec()?;

        Ok(AstParameter { name: name_token.lexeme, name_loc: name_token.loc, type_spec })
    }

    fn parse_variable_decl(&mut self) -> ParseResult<AstVariableDecl> {
        _ = self.expect(TokenType::KwVar, "'var'")?;

        let mut names = Vec::new();
        loop {
            names.push(self.parse_ident()?);
            if self.stream.accept(TokenType::Comma).is_none() {
                break;
            }
        }

        _ = self.expect(TokenType::Colon, "':'")?;
        let type_spec = self.parse_type_spec()?;
        _ = self.expect(TokenType::Semicolon, "';' at end of declaration")?;

        Ok(AstVariableDecl { names, type_spec })
    }

    /// Parses `basic_type` or `array '<' INTVAL ',' basic_type '>'`.
    fn parse_type_spec(&mut self) -> ParseResult<AstTypeSpec> {
        if let Some(array_token) = self.stream.accept(TokenType::KwArray) {
            _ = self.expect(TokenType::Less, "'<'")?;
            let size_token = self.expect(TokenType::IntLiteral, "an array size")?;
            _ = self.expect(TokenType::Comma, "','")?;
            let (elem, _) = self.parse_basic_type()?;
            let close = self.expect(TokenType::Greater, "'>'")?;

            let Ok(size) = size_token.lexeme.parse::<usize>() else {
                self.syntax_error(format!("array size '{}' is too large", size_token.lexeme), size_token.loc);
                return Err(());
            };
            if size == 0 {
                self.syntax_error("array size must be positive".to_string(), size_token.loc);
                return Err(());
            }

            let node_id = self.next_id();
            let loc = array_token.loc.merge_with(close.loc);
            return Ok(AstTypeSpec { node_id, loc, kind: AstTypeSpecKind::Array { size, elem } });
        }

        self.parse_basic_type_spec()
    }

    fn parse_basic_type_spec(&mut self) -> ParseResult<AstTypeSpec> {
        let (basic, loc) = self.parse_basic_type()?;
        let node_id = self.next_id();
        Ok(AstTypeSpec { node_id, loc, kind: AstTypeSpecKind::Basic(basic) })
    }

    fn parse_basic_type(&mut self) -> ParseResult<(AstBasicType, SourceLocation)> {
        let recognized = match self.stream.peek() {
            Some(token) => {
                let basic = match token.token_type {
                    TokenType::KwInt => Some(AstBasicType::Integer),
                    TokenType::KwFloat => Some(AstBasicType::Float),
                    TokenType::KwBool => Some(AstBasicType::Boolean),
                    TokenType::KwChar => Some(AstBasicType::Character),
                    _ => None,
                };

                match basic {
                    Some(basic) => Ok((basic, token.loc)),
                    None => Err((format!("'{}'", token.lexeme), token.loc)),
                }
            }
            None => Err(("end of file".to_string(), self.stream.previous_loc())),
        };

        match recognized {
            Ok((basic, loc)) => {
                _ = self.stream.advance();
                Ok((basic, loc))
            }
            Err((found, loc)) => {
                self.syntax_error(format!("expected a type name, found {found}"), loc);
                Err(())
            }
        }
    }

    fn parse_statements(&mut self, terminators: &[TokenType]) -> Vec<AstStatement> {
        let mut statements = Vec::new();

        loop {
            match self.stream.peek() {
                None => break,
                Some(token) if terminators.contains(&token.token_type) => break,
                Some(_) => (),
            }

            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(()) => self.synchronize_statement(),
            }
        }

        statements
    }

    fn parse_statement(&mut self) -> ParseResult<AstStatement> {
        match self.stream.peek().map(|token| token.token_type) {
            Some(TokenType::KwIf) => self.parse_if_statement(),
            Some(TokenType::KwWhile) => self.parse_while_statement(),
            Some(TokenType::KwReturn) => self.parse_return_statement(),
            Some(TokenType::KwRead) => self.parse_read_statement(),
            Some(TokenType::KwWrite) => self.parse_write_statement(),
            Some(TokenType::Identifier) => {
                let is_call = self.stream.peek_ahead(1).is_some_and(|token| token.token_type == TokenType::LeftParen);
                if is_call {
                    self.parse_procedure_call_statement()
                } else {
                    self.parse_assignment_statement()
                }
            }
            Some(_) => {
                let token = self.stream.peek().expect("Checked above");
                let (message, loc) = (format!("expected a statement, found '{}'", token.lexeme), token.loc);
                self.syntax_error(message, loc);
                Err(())
            }
            None => {
                self.syntax_error("expected a statement, found end of file".to_string(), self.stream.previous_loc());
                Err(())
            }
        }
    }

    fn parse_if_statement(&mut self) -> ParseResult<AstStatement> {
        _ = self.expect(TokenType::KwIf, "'if'")?;
        let condition = self.parse_expression()?;
        _ = self.expect(TokenType::KwThen, "'then'")?;

        let then_body = self.parse_statements(&[TokenType::KwElse, TokenType::KwEndIf]);

        let else_body = match self.stream.accept(TokenType::KwElse) {
            Some(_) => Some(self.parse_statements(&[TokenType::KwEndIf])),
            None => None,
        };

        _ = self.expect(TokenType::KwEndIf, "'endif'")?;

        Ok(AstStatement::If { condition, then_body, else_body })
    }

    fn parse_while_statement(&mut self) -> ParseResult<AstStatement> {
        _ = self.expect(TokenType::KwWhile, "'while'")?;
        let condition = self.parse_expression()?;
        _ = self.expect(TokenType::KwDo, "'do'")?;

        let body = self.parse_statements(&[TokenType::KwEndWhile]);
        _ = self.expect(TokenType::KwEndWhile, "'endwhile'")?;

        Ok(AstStatement::While { condition, body })
    }

    fn parse_return_statement(&mut self) -> ParseResult<AstStatement> {
        let return_token = self.expect(TokenType::KwReturn, "'return'")?;

        let expr = if self.stream.check(TokenType::Semicolon) { None } else { Some(self.parse_expression()?) };
        _ = self.expect(TokenType::Semicolon, "';' at end of statement")?;

        Ok(AstStatement::Return { loc: return_token.loc, expr })
    }

    fn parse_read_statement(&mut self) -> ParseResult<AstStatement> {
        let read_token = self.expect(TokenType::KwRead, "'read'")?;
        let target = self.parse_left_expr()?;
        _ = self.expect(TokenType::Semicolon, "';' at end of statement")?;

        Ok(AstStatement::Read { loc: read_token.loc, target })
    }

    fn parse_write_statement(&mut self) -> ParseResult<AstStatement> {
        let write_token = self.expect(TokenType::KwWrite, "'write'")?;

        if let Some(string_token) = self.stream.accept(TokenType::StringLiteral) {
            _ = self.expect(TokenType::Semicolon, "';' at end of statement")?;
            return Ok(AstStatement::WriteString { loc: write_token.loc, text: string_token.lexeme });
        }

        let expr = self.parse_expression()?;
        _ = self.expect(TokenType::Semicolon, "';' at end of statement")?;

        Ok(AstStatement::Write { loc: write_token.loc, expr })
    }

    fn parse_procedure_call_statement(&mut self) -> ParseResult<AstStatement> {
        let callee = self.parse_ident()?;
        let loc = callee.loc;
        _ = self.expect(TokenType::LeftParen, "'('")?;
        let args = self.parse_call_args()?;
        _ = self.expect(TokenType::Semicolon, "';' at end of statement")?;

        Ok(AstStatement::ProcCall { loc, callee, args })
    }

    fn parse_assignment_statement(&mut self) -> ParseResult<AstStatement> {
        let target = self.parse_left_expr()?;
        let assign_token = self.expect(TokenType::Assign, "':='")?;
        let value = self.parse_expression()?;
        _ = self.expect(TokenType::Semicolon, "';' at end of statement")?;

        Ok(AstStatement::Assign { assign_loc: assign_token.loc, target, value })
    }

    fn parse_left_expr(&mut self) -> ParseResult<AstLeftExpr> {
        let ident = self.parse_ident()?;

        if self.stream.accept(TokenType::LeftBracket).is_some() {
            let index = self.parse_expression()?;
            let close = self.expect(TokenType::RightBracket, "']'")?;

            let node_id = self.next_id();
            let loc = ident.loc.merge_with(close.loc);
            return Ok(AstLeftExpr {
                node_id,
                loc,
                kind: AstLeftExprKind::ArrayAccess { array: ident, index: Box::new(index) },
            });
        }

        let node_id = self.next_id();
        let loc = ident.loc;
        Ok(AstLeftExpr { node_id, loc, kind: AstLeftExprKind::Ident(ident) })
    }

    fn parse_ident(&mut self) -> ParseResult<AstIdent> {
        let token = self.expect(TokenType::Identifier, "an identifier")?;
        Ok(AstIdent { node_id: self.next_id(), name: token.lexeme, loc: token.loc })
    }

    fn parse_call_args(&mut self) -> ParseResult<Vec<AstExpression>> {
        let mut args = Vec::new();

        if !self.stream.check(TokenType::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.stream.accept(TokenType::Comma).is_none() {
                    break;
                }
            }
        }

        _ = self.expect(TokenType::RightParen, "')'")?;
        Ok(args)
    }

    // Expressions, lowest precedence first: or, and, relational, additive, multiplicative, unary, primary.

    fn parse_expression(&mut self) -> ParseResult<AstExpression> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> ParseResult<AstExpression> {
        let mut expr = self.parse_and_expr()?;

        while let Some(op_token) = self.stream.accept(TokenType::KwOr) {
            let rhs = self.parse_and_expr()?;
            expr = self.make_binary(AstBinaryOp::Or, op_token.loc, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_and_expr(&mut self) -> ParseResult<AstExpression> {
        let mut expr = self.parse_relational_expr()?;

        while let Some(op_token) = self.stream.accept(TokenType::KwAnd) {
            let rhs = self.parse_relational_expr()?;
            expr = self.make_binary(AstBinaryOp::And, op_token.loc, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_relational_expr(&mut self) -> ParseResult<AstExpression> {
        let mut expr = self.parse_additive_expr()?;

        loop {
            let op = match self.stream.peek().map(|token| token.token_type) {
                Some(TokenType::Equal) => AstBinaryOp::Equal,
                Some(TokenType::NotEqual) => AstBinaryOp::NotEqual,
                Some(TokenType::Less) => AstBinaryOp::LessThan,
                Some(TokenType::LessEqual) => AstBinaryOp::LessThanOrEqual,
                Some(TokenType::Greater) => AstBinaryOp::GreaterThan,
                Some(TokenType::GreaterEqual) => AstBinaryOp::GreaterThanOrEqual,
                _ => break,
            };

            let op_token = self.stream.advance().expect("Peeked");
            let rhs = self.parse_additive_expr()?;
            expr = self.make_binary(op, op_token.loc, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_additive_expr(&mut self) -> ParseResult<AstExpression> {
        let mut expr = self.parse_multiplicative_expr()?;

        loop {
            let op = match self.stream.peek().map(|token| token.token_type) {
                Some(TokenType::Plus) => AstBinaryOp::Add,
                Some(TokenType::Minus) => AstBinaryOp::Subtract,
                _ => break,
            };

            let op_token = self.stream.advance().expect("Peeked");
            let rhs = self.parse_multiplicative_expr()?;
            expr = self.make_binary(op, op_token.loc, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_multiplicative_expr(&mut self) -> ParseResult<AstExpression> {
        let mut expr = self.parse_unary_expr()?;

        loop {
            let op = match self.stream.peek().map(|token| token.token_type) {
                Some(TokenType::Star) => AstBinaryOp::Multiply,
                Some(TokenType::Slash) => AstBinaryOp::Divide,
                Some(TokenType::Percent) => AstBinaryOp::Modulo,
                _ => break,
            };

            let op_token = self.stream.advance().expect("Peeked");
            let rhs = self.parse_unary_expr()?;
            expr = self.make_binary(op, op_token.loc, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<AstExpression> {
        let op = match self.stream.peek().map(|token| token.token_type) {
            Some(TokenType::KwNot) => Some(AstUnaryOp::Not),
            Some(TokenType::Plus) => Some(AstUnaryOp::Plus),
            Some(TokenType::Minus) => Some(AstUnaryOp::Negate),
            _ => None,
        };

        let Some(op) = op else {
            return self.parse_primary_expr();
        };

        let op_token = self.stream.advance().expect("Peeked");
        let operand = self.parse_unary_expr()?;

        let node_id = self.next_id();
        let loc = op_token.loc.merge_with(operand.loc);
        Ok(AstExpression { node_id, loc, kind: AstExpressionKind::Unary { op, op_loc: op_token.loc, operand: Box::new(operand) } })
    }

    fn parse_primary_expr(&mut self) -> ParseResult<AstExpression> {
        match self.stream.peek().map(|token| token.token_type) {
            Some(TokenType::LeftParen) => {
                let open = self.stream.advance().expect("Peeked");
                let inner = self.parse_expression()?;
                let close = self.expect(TokenType::RightParen, "')'")?;

                let node_id = self.next_id();
                let loc = open.loc.merge_with(close.loc);
                Ok(AstExpression { node_id, loc, kind: AstExpressionKind::Parenthesis { inner: Box::new(inner) } })
            }

            Some(TokenType::IntLiteral) => {
                let token = self.stream.advance().expect("Peeked");
                Ok(self.make_literal(AstExpressionKind::IntLiteral { lexeme: token.lexeme }, token.loc))
            }

            Some(TokenType::FloatLiteral) => {
                let token = self.stream.advance().expect("Peeked");
                Ok(self.make_literal(AstExpressionKind::FloatLiteral { lexeme: token.lexeme }, token.loc))
            }

            Some(TokenType::CharLiteral) => {
                let token = self.stream.advance().expect("Peeked");
                Ok(self.make_literal(AstExpressionKind::CharLiteral { lexeme: token.lexeme }, token.loc))
            }

            Some(TokenType::BoolLiteral) => {
                let token = self.stream.advance().expect("Peeked");
                let value = token.lexeme == "true";
                Ok(self.make_literal(AstExpressionKind::BoolLiteral { value }, token.loc))
            }

            Some(TokenType::Identifier) => {
                let ident = self.parse_ident()?;

                if self.stream.accept(TokenType::LeftBracket).is_some() {
                    let index = self.parse_expression()?;
                    let close = self.expect(TokenType::RightBracket, "']'")?;

                    let node_id = self.next_id();
                    let loc = ident.loc.merge_with(close.loc);
                    return Ok(AstExpression {
                        node_id,
                        loc,
                        kind: AstExpressionKind::ArrayAccess { array: ident, index: Box::new(index) },
                    });
                }

                if self.stream.accept(TokenType::LeftParen).is_some() {
                    let args = self.parse_call_args()?;

                    let node_id = self.next_id();
                    let loc = ident.loc;
                    return Ok(AstExpression { node_id, loc, kind: AstExpressionKind::Call { callee: ident, args } });
                }

                let node_id = self.next_id();
                let loc = ident.loc;
                Ok(AstExpression { node_id, loc, kind: AstExpressionKind::Ident(ident) })
            }

            Some(_) => {
                let token = self.stream.peek().expect("Checked above");
                let (message, loc) = (format!("expected an expression, found '{}'", token.lexeme), token.loc);
                self.syntax_error(message, loc);
                Err(())
            }

            None => {
                self.syntax_error("expected an expression, found end of file".to_string(), self.stream.previous_loc());
                Err(())
            }
        }
    }

    fn make_literal(&mut self, kind: AstExpressionKind, loc: SourceLocation) -> AstExpression {
        AstExpression { node_id: self.next_id(), loc, kind }
    }

    fn make_binary(
        &mut self,
        op: AstBinaryOp,
        op_loc: SourceLocation,
        lhs: AstExpression,
        rhs: AstExpression,
    ) -> AstExpression {
        let node_id = self.next_id();
        let loc = lhs.loc.merge_with(rhs.loc);
        AstExpression {
            node_id,
            loc,
            kind: AstExpressionKind::Binary { op, op_loc, lhs: Box::new(lhs), rhs: Box::new(rhs) },
        }
    }
}
