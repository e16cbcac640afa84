//! The `type_check` module implements the second semantic pass: bottom-up type inference and validation.

use crate::compiler_driver::{Driver, Error};
use crate::core::{SourceIdentifier, SourceLocation};
use crate::parser::{
    AstBinaryOp, AstExpression, AstExpressionKind, AstFunction, AstIdent, AstLeftExpr, AstLeftExprKind,
    AstProgram, AstStatement, AstUnaryOp,
};
use crate::ICE;

use super::type_manager::{ComparisonKind, TypeId};
use super::SemanticContext;

/// Walks the parse tree bottom-up, infers and validates the type of every expression, marks l-values, and emits
/// semantic diagnostics. At the end of the pass, verifies that a proper `main` exists.
///
/// An operand whose type is the error type suppresses the checks it takes part in, so one diagnosed error does
/// not cascade.
pub fn type_check(ast: &AstProgram, sema: &mut SemanticContext, driver: &mut Driver) {
    let mut pass = TypeCheckPass { sema, driver, current_function_return: None };
    pass.visit_program(ast);
}

/// The type-checking pass holds the mutable state needed while walking one function: the return type of the
/// function currently being checked.
struct TypeCheckPass<'a> {
    sema: &'a mut SemanticContext,
    driver: &'a mut Driver,
    current_function_return: Option<TypeId>,
}

impl<'a> TypeCheckPass<'a> {
    fn visit_program(&mut self, ast: &AstProgram) {
        let scope = self.sema.decorations.get_scope(ast.node_id);
        self.sema.symbols.push_existing(scope);

        for function in &ast.functions {
            self.visit_function(function);
        }

        if self.sema.symbols.no_main_properly_declared(&self.sema.types) {
            Error::no_main_properly_declared(ast.loc, self.driver);
        }

        self.sema.symbols.pop();
    }

    fn visit_function(&mut self, function: &AstFunction) {
        let scope = self.sema.decorations.get_scope(function.node_id);
        self.sema.symbols.push_existing(scope);

        let return_type = match &function.return_type {
            Some(type_spec) => self.sema.decorations.get_type(type_spec.node_id),
            None => self.sema.types.create_void(),
        };
        self.current_function_return = Some(return_type);

        for statement in &function.statements {
            self.visit_statement(statement);
        }

        self.sema.symbols.pop();
    }

    fn visit_statement(&mut self, statement: &AstStatement) {
        match statement {
            AstStatement::Assign { assign_loc, target, value } => {
                self.visit_left_expr(target);
                self.visit_expression(value);

                let target_type = self.sema.decorations.get_type(target.node_id);
                let value_type = self.sema.decorations.get_type(value.node_id);

                if !self.sema.types.is_error(target_type)
                    && !self.sema.types.is_error(value_type)
                    && !self.sema.types.copyable(target_type, value_type)
                {
                    Error::incompatible_assignment(*assign_loc, self.driver);
                }

                if !self.sema.types.is_error(target_type) && !self.sema.decorations.get_is_lvalue(target.node_id) {
                    Error::non_referenceable_left_expr(target.loc, self.driver);
                }
            }

            AstStatement::If { condition, then_body, else_body } => {
                self.visit_condition(condition);

                for statement in then_body {
                    self.visit_statement(statement);
                }
                if let Some(else_body) = else_body {
                    for statement in else_body {
                        self.visit_statement(statement);
                    }
                }
            }

            AstStatement::While { condition, body } => {
                self.visit_condition(condition);

                for statement in body {
                    self.visit_statement(statement);
                }
            }

            AstStatement::ProcCall { loc, callee, args } => {
                self.visit_ident(callee);

                for arg in args {
                    self.visit_expression(arg);
                }

                let callee_type = self.sema.decorations.get_type(callee.node_id);

                if self.sema.types.is_error(callee_type) {
                    // Already diagnosed at the identifier.
                } else if !self.sema.types.is_function(callee_type) {
                    Error::is_not_callable(SourceIdentifier(&callee.name, callee.loc), self.driver);
                } else {
                    self.check_call_arguments(callee_type, callee, args, *loc);
                }
            }

            AstStatement::Read { loc, target } => {
                self.visit_left_expr(target);

                let target_type = self.sema.decorations.get_type(target.node_id);

                if !self.sema.types.is_error(target_type)
                    && !self.sema.types.is_primitive(target_type)
                    && !self.sema.types.is_function(target_type)
                {
                    Error::read_write_require_basic(*loc, self.driver);
                }

                if !self.sema.types.is_error(target_type) && !self.sema.decorations.get_is_lvalue(target.node_id) {
                    Error::non_referenceable_expression(*loc, self.driver);
                }
            }

            AstStatement::Write { loc, expr } => {
                self.visit_expression(expr);

                let expr_type = self.sema.decorations.get_type(expr.node_id);
                if !self.sema.types.is_error(expr_type) && !self.sema.types.is_primitive(expr_type) {
                    Error::read_write_require_basic(*loc, self.driver);
                }
            }

            AstStatement::WriteString { .. } => (),

            AstStatement::Return { loc, expr } => {
                let value_type = match expr {
                    Some(expr) => {
                        self.visit_expression(expr);
                        self.sema.decorations.get_type(expr.node_id)
                    }
                    None => self.sema.types.create_void(),
                };

                let Some(return_type) = self.current_function_return else {
                    ICE!("Return statement outside of a function");
                };

                if !self.sema.types.is_error(return_type) && !self.sema.types.copyable(return_type, value_type) {
                    Error::incompatible_return(*loc, self.driver);
                }
            }
        }
    }

    fn visit_condition(&mut self, condition: &AstExpression) {
        self.visit_expression(condition);

        let condition_type = self.sema.decorations.get_type(condition.node_id);
        if !self.sema.types.is_error(condition_type) && !self.sema.types.is_boolean(condition_type) {
            Error::boolean_required(condition.loc, self.driver);
        }
    }

    fn visit_left_expr(&mut self, left_expr: &AstLeftExpr) {
        match &left_expr.kind {
            AstLeftExprKind::Ident(ident) => {
                self.visit_ident(ident);

                let ident_type = self.sema.decorations.get_type(ident.node_id);
                let is_lvalue = self.sema.decorations.get_is_lvalue(ident.node_id);
                self.sema.decorations.put_type(left_expr.node_id, ident_type);
                self.sema.decorations.put_is_lvalue(left_expr.node_id, is_lvalue);
            }

            AstLeftExprKind::ArrayAccess { array, index } => {
                let elem_type = self.visit_array_access(left_expr.loc, array, index);
                self.sema.decorations.put_type(left_expr.node_id, elem_type);
                self.sema.decorations.put_is_lvalue(left_expr.node_id, true);
            }
        }
    }

    /// Checks an `arr[i]` access, used both as an expression and as a left-expression, and returns the element
    /// type (or the error type when the accessed value is not an array).
    fn visit_array_access(&mut self, access_loc: SourceLocation, array: &AstIdent, index: &AstExpression) -> TypeId {
        self.visit_ident(array);
        self.visit_expression(index);

        let index_type = self.sema.decorations.get_type(index.node_id);
        if !self.sema.types.is_error(index_type) && !self.sema.types.is_integer(index_type) {
            Error::non_integer_index_in_array_access(index.loc, self.driver);
        }

        let array_type = self.sema.decorations.get_type(array.node_id);
        if !self.sema.types.is_error(array_type) && !self.sema.types.is_array(array_type) {
            Error::non_array_in_array_access(access_loc, self.driver);
        }

        if self.sema.types.is_array(array_type) {
            self.sema.types.array_elem(array_type)
        } else {
            self.sema.types.create_error()
        }
    }

    fn visit_ident(&mut self, ident: &AstIdent) {
        if self.sema.symbols.find_in_stack(&ident.name).is_none() {
            Error::undeclared_ident(SourceIdentifier(&ident.name, ident.loc), self.driver);

            // Decorate with the error type, and as an l-value so that recovery does not also complain about
            // the identifier not being referenceable.
            let error_type = self.sema.types.create_error();
            self.sema.decorations.put_type(ident.node_id, error_type);
            self.sema.decorations.put_is_lvalue(ident.node_id, true);
            return;
        }

        let Some(ident_type) = self.sema.symbols.type_of(&ident.name) else {
            ICE!("Symbol '{}' found in stack but has no type", ident.name);
        };

        self.sema.decorations.put_type(ident.node_id, ident_type);
        self.sema.decorations.put_is_lvalue(ident.node_id, !self.sema.symbols.is_function(&ident.name));
    }

    /// Checks arity and per-argument compatibility for a call. The arguments must already be visited.
    fn check_call_arguments(
        &mut self,
        callee_type: TypeId,
        callee: &AstIdent,
        args: &[AstExpression],
        call_loc: SourceLocation,
    ) {
        let params = self.sema.types.func_params(callee_type).to_vec();

        if params.len() != args.len() {
            Error::number_of_parameters(call_loc, &callee.name, self.driver);
        }

        for (i, arg) in args.iter().enumerate().take(params.len()) {
            let arg_type = self.sema.decorations.get_type(arg.node_id);
            if !self.sema.types.copyable(params[i], arg_type) {
                Error::incompatible_parameter(arg.loc, i + 1, &callee.name, self.driver);
            }
        }
    }

    fn visit_expression(&mut self, expr: &AstExpression) {
        match &expr.kind {
            AstExpressionKind::IntLiteral { .. } => {
                let t = self.sema.types.create_integer();
                self.decorate(expr, t, false);
            }

            AstExpressionKind::FloatLiteral { .. } => {
                let t = self.sema.types.create_float();
                self.decorate(expr, t, false);
            }

            AstExpressionKind::CharLiteral { .. } => {
                let t = self.sema.types.create_character();
                self.decorate(expr, t, false);
            }

            AstExpressionKind::BoolLiteral { .. } => {
                let t = self.sema.types.create_boolean();
                self.decorate(expr, t, false);
            }

            AstExpressionKind::Ident(ident) => {
                self.visit_ident(ident);

                let ident_type = self.sema.decorations.get_type(ident.node_id);
                let is_lvalue = self.sema.decorations.get_is_lvalue(ident.node_id);
                self.decorate(expr, ident_type, is_lvalue);
            }

            AstExpressionKind::ArrayAccess { array, index } => {
                let elem_type = self.visit_array_access(expr.loc, array, index);
                self.decorate(expr, elem_type, true);
            }

            AstExpressionKind::Call { callee, args } => {
                self.visit_call_expression(expr, callee, args);
            }

            AstExpressionKind::Unary { op, op_loc, operand } => {
                self.visit_expression(operand);
                let operand_type = self.sema.decorations.get_type(operand.node_id);

                let result = match op {
                    AstUnaryOp::Not => {
                        if !self.sema.types.is_error(operand_type) && !self.sema.types.is_boolean(operand_type) {
                            Error::incompatible_operator(&op.to_string(), *op_loc, self.driver);
                        }
                        self.sema.types.create_boolean()
                    }
                    AstUnaryOp::Plus | AstUnaryOp::Negate => {
                        if !self.sema.types.is_error(operand_type) && !self.sema.types.is_numeric(operand_type) {
                            Error::incompatible_operator(&op.to_string(), *op_loc, self.driver);
                        }
                        if self.sema.types.is_float(operand_type) {
                            self.sema.types.create_float()
                        } else {
                            self.sema.types.create_integer()
                        }
                    }
                };

                self.decorate(expr, result, false);
            }

            AstExpressionKind::Binary { op, op_loc, lhs, rhs } => {
                self.visit_expression(lhs);
                self.visit_expression(rhs);

                let t1 = self.sema.decorations.get_type(lhs.node_id);
                let t2 = self.sema.decorations.get_type(rhs.node_id);

                let result = self.check_binary_operator(*op, *op_loc, t1, t2);
                self.decorate(expr, result, false);
            }

            AstExpressionKind::Parenthesis { inner } => {
                self.visit_expression(inner);

                let inner_type = self.sema.decorations.get_type(inner.node_id);
                let is_lvalue = self.sema.decorations.get_is_lvalue(inner.node_id);
                self.decorate(expr, inner_type, is_lvalue);
            }
        }
    }

    fn visit_call_expression(&mut self, expr: &AstExpression, callee: &AstIdent, args: &[AstExpression]) {
        self.visit_ident(callee);

        for arg in args {
            self.visit_expression(arg);
        }

        let callee_type = self.sema.decorations.get_type(callee.node_id);

        let result = if self.sema.types.is_error(callee_type) {
            callee_type
        } else if !self.sema.types.is_function(callee_type) {
            Error::is_not_callable(SourceIdentifier(&callee.name, callee.loc), self.driver);
            self.sema.types.create_error()
        } else {
            // In expression context the callee must return a value.
            let mut return_type = self.sema.types.func_return(callee_type);
            if self.sema.types.is_void_function(callee_type) {
                Error::is_not_function(SourceIdentifier(&callee.name, callee.loc), self.driver);
                return_type = self.sema.types.create_error();
            }

            self.check_call_arguments(callee_type, callee, args, expr.loc);

            return_type
        };

        self.decorate(expr, result, false);
    }

    /// Validates the operand types of a binary operator and returns the result type.
    fn check_binary_operator(&mut self, op: AstBinaryOp, op_loc: SourceLocation, t1: TypeId, t2: TypeId) -> TypeId {
        let types = &self.sema.types;

        match op {
            AstBinaryOp::Modulo => {
                let bad_operand = (!types.is_error(t1) && !types.is_integer(t1))
                    || (!types.is_error(t2) && !types.is_integer(t2));
                if bad_operand {
                    Error::incompatible_operator(&op.to_string(), op_loc, self.driver);
                }
                self.sema.types.create_integer()
            }

            AstBinaryOp::Add | AstBinaryOp::Subtract | AstBinaryOp::Multiply | AstBinaryOp::Divide => {
                let bad_operand = (!types.is_error(t1) && !types.is_numeric(t1))
                    || (!types.is_error(t2) && !types.is_numeric(t2));
                if bad_operand {
                    Error::incompatible_operator(&op.to_string(), op_loc, self.driver);
                }

                if self.sema.types.is_float(t1) || self.sema.types.is_float(t2) {
                    self.sema.types.create_float()
                } else {
                    self.sema.types.create_integer()
                }
            }

            AstBinaryOp::And | AstBinaryOp::Or => {
                let bad_operand = (!types.is_error(t1) && !types.is_boolean(t1))
                    || (!types.is_error(t2) && !types.is_boolean(t2));
                if bad_operand {
                    Error::incompatible_operator(&op.to_string(), op_loc, self.driver);
                }
                self.sema.types.create_boolean()
            }

            _ => {
                let kind = if op.is_equality() { ComparisonKind::Equality } else { ComparisonKind::Ordering };

                if !types.is_error(t1) && !types.is_error(t2) && !types.comparable(t1, t2, kind) {
                    Error::incompatible_operator(&op.to_string(), op_loc, self.driver);
                }
                self.sema.types.create_boolean()
            }
        }
    }

    fn decorate(&mut self, expr: &AstExpression, type_id: TypeId, is_lvalue: bool) {
        self.sema.decorations.put_type(expr.node_id, type_id);
        self.sema.decorations.put_is_lvalue(expr.node_id, is_lvalue);
    }
}
