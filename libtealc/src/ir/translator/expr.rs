//! The `expr` module defines the functions that lower expressions into TealTac instructions.
//!
//! Every lowering appends its instructions to the caller's running list and reports where its value lives:
//! either an address holding the value, or the not-yet-loaded location of an array element.

use crate::parser::{AstBinaryOp, AstExpression, AstExpressionKind, AstIdent, AstLeftExpr, AstLeftExprKind, AstUnaryOp};
use crate::ICE;

use super::super::{TtBinaryOp, TtInstruction, TtUnaryOp};
use super::TealTacTranslator;

/// The result of lowering an expression.
#[derive(Debug)]
enum EvalExpr {
    /// The value lives at this address (a name, a temporary, or a literal already loaded into a temporary).
    Value(String),

    /// The value is the array element `base[index]`, not yet loaded.
    Indexed { base: String, index: String },
}

/// Lowers an expression and returns the address holding its value, loading an array element into a fresh
/// temporary when necessary.
pub(super) fn translate_expression_to_value(
    translator: &mut TealTacTranslator,
    expr: &AstExpression,
    instructions: &mut Vec<TtInstruction>,
) -> String {
    match translate_expression(translator, expr, instructions) {
        EvalExpr::Value(addr) => addr,

        EvalExpr::Indexed { base, index } => {
            let temp = translator.make_temp();
            instructions.push(TtInstruction::LoadX { dst: temp.clone(), base, index });
            temp
        }
    }
}

/// Lowers a left-expression into its (address, offset) pair.
///
/// The offset is `Some` only for array-element targets: it holds the address of the computed index, and the
/// index computation has been appended to `instructions`.
pub(super) fn translate_left_expr(
    translator: &mut TealTacTranslator,
    left_expr: &AstLeftExpr,
    instructions: &mut Vec<TtInstruction>,
) -> (String, Option<String>) {
    match &left_expr.kind {
        AstLeftExprKind::Ident(ident) => (ident.name.clone(), None),

        AstLeftExprKind::ArrayAccess { array, index } => {
            let index_addr = translate_expression_to_value(translator, index, instructions);
            (array.name.clone(), Some(index_addr))
        }
    }
}

fn translate_expression(
    translator: &mut TealTacTranslator,
    expr: &AstExpression,
    instructions: &mut Vec<TtInstruction>,
) -> EvalExpr {
    match &expr.kind {
        AstExpressionKind::IntLiteral { lexeme } => {
            let temp = translator.make_temp();
            instructions.push(TtInstruction::ILoad { dst: temp.clone(), value: lexeme.clone() });
            EvalExpr::Value(temp)
        }

        AstExpressionKind::FloatLiteral { lexeme } => {
            let temp = translator.make_temp();
            instructions.push(TtInstruction::FLoad { dst: temp.clone(), value: lexeme.clone() });
            EvalExpr::Value(temp)
        }

        AstExpressionKind::CharLiteral { lexeme } => {
            let temp = translator.make_temp();
            instructions.push(TtInstruction::ChLoad { dst: temp.clone(), value: lexeme.clone() });
            EvalExpr::Value(temp)
        }

        AstExpressionKind::BoolLiteral { value } => {
            let temp = translator.make_temp();
            let value = if *value { "1" } else { "0" };
            instructions.push(TtInstruction::ILoad { dst: temp.clone(), value: value.to_string() });
            EvalExpr::Value(temp)
        }

        AstExpressionKind::Ident(ident) => EvalExpr::Value(ident.name.clone()),

        AstExpressionKind::ArrayAccess { array, index } => {
            let index_addr = translate_expression_to_value(translator, index, instructions);
            EvalExpr::Indexed { base: array.name.clone(), index: index_addr }
        }

        AstExpressionKind::Parenthesis { inner } => translate_expression(translator, inner, instructions),

        AstExpressionKind::Unary { op, operand, .. } => {
            let operand_addr = translate_expression_to_value(translator, operand, instructions);

            match op {
                // Unary plus is the identity.
                AstUnaryOp::Plus => EvalExpr::Value(operand_addr),

                AstUnaryOp::Negate => {
                    let opcode = if translator.sema.types.is_float(translator.node_type(expr.node_id)) {
                        TtUnaryOp::FNeg
                    } else {
                        TtUnaryOp::Neg
                    };

                    let temp = translator.make_temp();
                    instructions.push(TtInstruction::Unary { op: opcode, dst: temp.clone(), src: operand_addr });
                    EvalExpr::Value(temp)
                }

                AstUnaryOp::Not => {
                    let temp = translator.make_temp();
                    instructions.push(TtInstruction::Unary {
                        op: TtUnaryOp::Not,
                        dst: temp.clone(),
                        src: operand_addr,
                    });
                    EvalExpr::Value(temp)
                }
            }
        }

        AstExpressionKind::Binary { .. } => translate_binary_operation(translator, expr, instructions),

        AstExpressionKind::Call { callee, args } => {
            // Expression form: the return slot is always reserved and popped into a fresh temporary.
            instructions.push(TtInstruction::Push { src: None });

            push_call_arguments(translator, callee, args, instructions);

            instructions.push(TtInstruction::Call { name: callee.name.clone() });

            for _ in args {
                instructions.push(TtInstruction::Pop { dst: None });
            }

            let temp = translator.make_temp();
            instructions.push(TtInstruction::Pop { dst: Some(temp.clone()) });
            EvalExpr::Value(temp)
        }
    }
}

fn translate_binary_operation(
    translator: &mut TealTacTranslator,
    expr: &AstExpression,
    instructions: &mut Vec<TtInstruction>,
) -> EvalExpr {
    let AstExpressionKind::Binary { op, lhs, rhs, .. } = &expr.kind else {
        ICE!("Expected a binary expression");
    };

    let mut addr1 = translate_expression_to_value(translator, lhs, instructions);
    let mut addr2 = translate_expression_to_value(translator, rhs, instructions);

    let t1 = translator.node_type(lhs.node_id);
    let t2 = translator.node_type(rhs.node_id);

    match op {
        AstBinaryOp::Add | AstBinaryOp::Subtract | AstBinaryOp::Multiply | AstBinaryOp::Divide => {
            let float_result = translator.sema.types.is_float(translator.node_type(expr.node_id));

            if float_result {
                // At most one operand can be an integer here; promote it.
                if translator.sema.types.is_integer(t1) {
                    let temp = translator.make_temp();
                    instructions.push(TtInstruction::Unary { op: TtUnaryOp::Float, dst: temp.clone(), src: addr1 });
                    addr1 = temp;
                } else if translator.sema.types.is_integer(t2) {
                    let temp = translator.make_temp();
                    instructions.push(TtInstruction::Unary { op: TtUnaryOp::Float, dst: temp.clone(), src: addr2 });
                    addr2 = temp;
                }
            }

            let opcode = match (op, float_result) {
                (AstBinaryOp::Add, false) => TtBinaryOp::Add,
                (AstBinaryOp::Add, true) => TtBinaryOp::FAdd,
                (AstBinaryOp::Subtract, false) => TtBinaryOp::Sub,
                (AstBinaryOp::Subtract, true) => TtBinaryOp::FSub,
                (AstBinaryOp::Multiply, false) => TtBinaryOp::Mul,
                (AstBinaryOp::Multiply, true) => TtBinaryOp::FMul,
                (AstBinaryOp::Divide, false) => TtBinaryOp::Div,
                (AstBinaryOp::Divide, true) => TtBinaryOp::FDiv,
                _ => ICE!("Not an arithmetic operator"),
            };

            let temp = translator.make_temp();
            instructions.push(TtInstruction::Binary { op: opcode, dst: temp.clone(), src1: addr1, src2: addr2 });
            EvalExpr::Value(temp)
        }

        AstBinaryOp::Modulo => {
            // The instruction set has no modulo opcode: a % b lowers to a - (a / b) * b.
            let quotient = translator.make_temp();
            instructions.push(TtInstruction::Binary {
                op: TtBinaryOp::Div,
                dst: quotient.clone(),
                src1: addr1.clone(),
                src2: addr2.clone(),
            });

            let product = translator.make_temp();
            instructions.push(TtInstruction::Binary {
                op: TtBinaryOp::Mul,
                dst: product.clone(),
                src1: quotient,
                src2: addr2,
            });

            let temp = translator.make_temp();
            instructions.push(TtInstruction::Binary {
                op: TtBinaryOp::Sub,
                dst: temp.clone(),
                src1: addr1,
                src2: product,
            });
            EvalExpr::Value(temp)
        }

        AstBinaryOp::And | AstBinaryOp::Or => {
            // Eager evaluation: both operands are computed before the single logical opcode.
            let opcode = if *op == AstBinaryOp::And { TtBinaryOp::And } else { TtBinaryOp::Or };

            let temp = translator.make_temp();
            instructions.push(TtInstruction::Binary { op: opcode, dst: temp.clone(), src1: addr1, src2: addr2 });
            EvalExpr::Value(temp)
        }

        AstBinaryOp::Equal
        | AstBinaryOp::NotEqual
        | AstBinaryOp::LessThan
        | AstBinaryOp::LessThanOrEqual
        | AstBinaryOp::GreaterThan
        | AstBinaryOp::GreaterThanOrEqual => {
            // A comparison is a float comparison when either operand is a float; promote the integer side.
            let float_compare = translator.sema.types.is_float(t1) || translator.sema.types.is_float(t2);

            if float_compare {
                if translator.sema.types.is_integer(t1) {
                    let temp = translator.make_temp();
                    instructions.push(TtInstruction::Unary { op: TtUnaryOp::Float, dst: temp.clone(), src: addr1 });
                    addr1 = temp;
                } else if translator.sema.types.is_integer(t2) {
                    let temp = translator.make_temp();
                    instructions.push(TtInstruction::Unary { op: TtUnaryOp::Float, dst: temp.clone(), src: addr2 });
                    addr2 = temp;
                }
            }

            // Only eq/lt/le exist; !=, > and >= are the complementary comparison followed by a not.
            let (opcode, negate) = match (op, float_compare) {
                (AstBinaryOp::Equal, false) => (TtBinaryOp::Eq, false),
                (AstBinaryOp::Equal, true) => (TtBinaryOp::FEq, false),
                (AstBinaryOp::NotEqual, false) => (TtBinaryOp::Eq, true),
                (AstBinaryOp::NotEqual, true) => (TtBinaryOp::FEq, true),
                (AstBinaryOp::LessThan, false) => (TtBinaryOp::Lt, false),
                (AstBinaryOp::LessThan, true) => (TtBinaryOp::FLt, false),
                (AstBinaryOp::LessThanOrEqual, false) => (TtBinaryOp::Le, false),
                (AstBinaryOp::LessThanOrEqual, true) => (TtBinaryOp::FLe, false),
                (AstBinaryOp::GreaterThan, false) => (TtBinaryOp::Le, true),
                (AstBinaryOp::GreaterThan, true) => (TtBinaryOp::FLe, true),
                (AstBinaryOp::GreaterThanOrEqual, false) => (TtBinaryOp::Lt, true),
                (AstBinaryOp::GreaterThanOrEqual, true) => (TtBinaryOp::FLt, true),
                _ => ICE!("Not a relational operator"),
            };

            let temp = translator.make_temp();
            instructions.push(TtInstruction::Binary { op: opcode, dst: temp.clone(), src1: addr1, src2: addr2 });

            if negate {
                instructions.push(TtInstruction::Unary { op: TtUnaryOp::Not, dst: temp.clone(), src: temp.clone() });
            }

            EvalExpr::Value(temp)
        }
    }
}

/// Lowers a statement-form call. The return slot is pushed and popped only for a non-void callee.
pub(super) fn translate_procedure_call(
    translator: &mut TealTacTranslator,
    callee: &AstIdent,
    args: &[AstExpression],
    instructions: &mut Vec<TtInstruction>,
) {
    let callee_type = translator.node_type(callee.node_id);
    let returns_value = !translator.sema.types.is_void_function(callee_type);

    if returns_value {
        instructions.push(TtInstruction::Push { src: None });
    }

    push_call_arguments(translator, callee, args, instructions);

    instructions.push(TtInstruction::Call { name: callee.name.clone() });

    for _ in args {
        instructions.push(TtInstruction::Pop { dst: None });
    }

    if returns_value {
        instructions.push(TtInstruction::Pop { dst: None });
    }
}

/// Evaluates and pushes the call arguments in order, promoting an integer argument bound to a float parameter.
fn push_call_arguments(
    translator: &mut TealTacTranslator,
    callee: &AstIdent,
    args: &[AstExpression],
    instructions: &mut Vec<TtInstruction>,
) {
    let callee_type = translator.node_type(callee.node_id);
    let params = translator.sema.types.func_params(callee_type).to_vec();

    for (i, arg) in args.iter().enumerate() {
        let mut addr = translate_expression_to_value(translator, arg, instructions);

        let arg_type = translator.node_type(arg.node_id);
        let param_is_float = params.get(i).is_some_and(|param| translator.sema.types.is_float(*param));

        if translator.sema.types.is_integer(arg_type) && param_is_float {
            let temp = translator.make_temp();
            instructions.push(TtInstruction::Unary { op: TtUnaryOp::Float, dst: temp.clone(), src: addr });
            addr = temp;
        }

        instructions.push(TtInstruction::Push { src: Some(addr) });
    }
}
