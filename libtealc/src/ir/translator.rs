//! The `translator` module defines the functions that lower the decorated parse tree into TealTac instructions.

mod expr;

use crate::parser::{AstFunction, AstProgram, AstStatement, NodeId};
use crate::sema::type_manager::TypeId;
use crate::sema::SemanticContext;
use crate::ICE;

use super::label_maker::LabelMaker;
use super::{TtInstruction, TtProgram, TtSubroutine, TtUnaryOp};

/// The name of the implicit first parameter that holds a non-void function's return value.
pub const RESULT_PARAM_NAME: &str = "_result";

/// The translator manages per-function state for lowering: the temporary counter and the label maker.
///
/// Temporaries are `%N`, counted from 1 and reset for every function definition.
pub struct TealTacTranslator<'a> {
    sema: &'a mut SemanticContext,
    next_temp_index: usize,
    label_maker: LabelMaker,
}

impl<'a> TealTacTranslator<'a> {
    fn new(sema: &'a mut SemanticContext) -> Self {
        Self { sema, next_temp_index: 1, label_maker: LabelMaker::new() }
    }

    /// Creates a fresh temporary address.
    fn make_temp(&mut self) -> String {
        let temp = format!("%{}", self.next_temp_index);
        self.next_temp_index += 1;
        temp
    }

    /// Resets the temporary and label counters for a new function definition.
    fn reset_for_new_function(&mut self) {
        self.next_temp_index = 1;
        self.label_maker.reset_for_new_function();
    }

    /// The decorated type of a parse-tree node.
    fn node_type(&self, node_id: NodeId) -> TypeId {
        self.sema.decorations.get_type(node_id)
    }
}

/// Lowers the whole program, one subroutine per function.
pub(super) fn translate_program(ast: &AstProgram, sema: &mut SemanticContext) -> TtProgram {
    let scope = sema.decorations.get_scope(ast.node_id);
    let mut translator = TealTacTranslator::new(sema);
    translator.sema.symbols.push_existing(scope);

    let subroutines = ast.functions.iter().map(|function| translate_function(function, &mut translator)).collect();

    translator.sema.symbols.pop();

    TtProgram(subroutines)
}

fn translate_function(function: &AstFunction, translator: &mut TealTacTranslator) -> TtSubroutine {
    let scope = translator.sema.decorations.get_scope(function.node_id);
    translator.sema.symbols.push_existing(scope);
    translator.reset_for_new_function();

    let mut subroutine = TtSubroutine::new(&function.name);

    // Locals. An array local is listed with its element type and its declared length; primitives have size 1.
    for decl in &function.declarations {
        let decl_type = translator.node_type(decl.type_spec.node_id);
        let size = translator.sema.types.size_of(decl_type);
        let type_name = header_type_name(decl_type, translator);

        for name in &decl.names {
            subroutine.add_var(&name.name, type_name.clone(), size);
        }
    }

    // Parameters. A non-void function gets the implicit result slot prepended.
    let return_type = match &function.return_type {
        Some(type_spec) => translator.node_type(type_spec.node_id),
        None => translator.sema.types.create_void(),
    };
    if !translator.sema.types.is_void(return_type) {
        let type_name = translator.sema.types.to_string(return_type);
        subroutine.add_param(RESULT_PARAM_NAME, type_name, translator.sema.types.is_array(return_type));
    }

    for param in &function.parameters {
        let param_type = translator.node_type(param.type_spec.node_id);
        let type_name = header_type_name(param_type, translator);
        subroutine.add_param(&param.name, type_name, translator.sema.types.is_array(param_type));
    }

    let mut instructions = Vec::new();
    translate_statements(&function.statements, &mut instructions, translator);

    // Every subroutine returns to its caller, whether or not the body ends in a return statement.
    instructions.push(TtInstruction::Return);

    subroutine.set_instructions(instructions);

    translator.sema.symbols.pop();
    subroutine
}

/// The type name used in a subroutine header: arrays are listed by their element type.
fn header_type_name(type_id: TypeId, translator: &TealTacTranslator) -> String {
    if translator.sema.types.is_array(type_id) {
        translator.sema.types.to_string(translator.sema.types.array_elem(type_id))
    } else {
        translator.sema.types.to_string(type_id)
    }
}

fn translate_statements(
    statements: &[AstStatement],
    instructions: &mut Vec<TtInstruction>,
    translator: &mut TealTacTranslator,
) {
    for statement in statements {
        translate_statement(statement, instructions, translator);
    }
}

fn translate_statement(
    statement: &AstStatement,
    instructions: &mut Vec<TtInstruction>,
    translator: &mut TealTacTranslator,
) {
    match statement {
        AstStatement::Assign { target, value, .. } => {
            let (target_addr, target_offs) = expr::translate_left_expr(translator, target, instructions);
            let mut value_addr = expr::translate_expression_to_value(translator, value, instructions);

            // The single implicit coercion: an integer value stored into a float location.
            let target_type = translator.node_type(target.node_id);
            let value_type = translator.node_type(value.node_id);
            if translator.sema.types.is_float(target_type) && translator.sema.types.is_integer(value_type) {
                let temp = translator.make_temp();
                instructions.push(TtInstruction::Unary { op: TtUnaryOp::Float, dst: temp.clone(), src: value_addr });
                value_addr = temp;
            }

            match target_offs {
                None => instructions.push(TtInstruction::Load { dst: target_addr, src: value_addr }),
                Some(offs) => {
                    instructions.push(TtInstruction::XLoad { base: target_addr, index: offs, src: value_addr })
                }
            }
        }

        AstStatement::If { condition, then_body, else_body } => {
            let labels = translator.label_maker.make_if_labels();

            let condition_addr = expr::translate_expression_to_value(translator, condition, instructions);

            match else_body {
                None => {
                    instructions
                        .push(TtInstruction::FJump { condition: condition_addr, label: labels.end_if.clone() });
                    translate_statements(then_body, instructions, translator);
                    instructions.push(TtInstruction::Label { name: labels.end_if });
                }
                Some(else_body) => {
                    instructions
                        .push(TtInstruction::FJump { condition: condition_addr, label: labels.end_if.clone() });
                    translate_statements(then_body, instructions, translator);
                    instructions.push(TtInstruction::UJump { label: labels.end_else.clone() });
                    instructions.push(TtInstruction::Label { name: labels.end_if });
                    translate_statements(else_body, instructions, translator);
                    instructions.push(TtInstruction::Label { name: labels.end_else });
                }
            }
        }

        AstStatement::While { condition, body } => {
            let labels = translator.label_maker.make_while_labels();

            instructions.push(TtInstruction::Label { name: labels.head.clone() });
            let condition_addr = expr::translate_expression_to_value(translator, condition, instructions);
            instructions.push(TtInstruction::FJump { condition: condition_addr, label: labels.end.clone() });

            translate_statements(body, instructions, translator);

            instructions.push(TtInstruction::UJump { label: labels.head });
            instructions.push(TtInstruction::Label { name: labels.end });
        }

        AstStatement::ProcCall { callee, args, .. } => {
            expr::translate_procedure_call(translator, callee, args, instructions);
        }

        AstStatement::Read { target, .. } => {
            let (target_addr, target_offs) = expr::translate_left_expr(translator, target, instructions);
            let target_type = translator.node_type(target.node_id);

            // Booleans are read as integers.
            let temp = translator.make_temp();
            if translator.sema.types.is_integer(target_type) || translator.sema.types.is_boolean(target_type) {
                instructions.push(TtInstruction::ReadI { dst: temp.clone() });
            } else if translator.sema.types.is_float(target_type) {
                instructions.push(TtInstruction::ReadF { dst: temp.clone() });
            } else if translator.sema.types.is_character(target_type) {
                instructions.push(TtInstruction::ReadC { dst: temp.clone() });
            } else {
                ICE!("Read target does not have a primitive type");
            }

            // Read-then-store: the value lands in a temporary first, then moves into the target location.
            match target_offs {
                Some(offs) => instructions.push(TtInstruction::XLoad { base: target_addr, index: offs, src: temp }),
                None => instructions.push(TtInstruction::Load { dst: target_addr, src: temp }),
            }
        }

        AstStatement::Write { expr, .. } => {
            let addr = expr::translate_expression_to_value(translator, expr, instructions);
            let expr_type = translator.node_type(expr.node_id);

            // Booleans print as integers.
            if translator.sema.types.is_integer(expr_type) || translator.sema.types.is_boolean(expr_type) {
                instructions.push(TtInstruction::WriteI { src: addr });
            } else if translator.sema.types.is_float(expr_type) {
                instructions.push(TtInstruction::WriteF { src: addr });
            } else if translator.sema.types.is_character(expr_type) {
                instructions.push(TtInstruction::WriteC { src: addr });
            } else {
                ICE!("Write operand does not have a primitive type");
            }
        }

        AstStatement::WriteString { text, .. } => {
            instructions.push(TtInstruction::WriteS { value: text.clone() });
        }

        AstStatement::Return { expr, .. } => {
            if let Some(expr) = expr {
                let addr = expr::translate_expression_to_value(translator, expr, instructions);
                instructions.push(TtInstruction::Load { dst: RESULT_PARAM_NAME.to_string(), src: addr });
            }
            instructions.push(TtInstruction::Return);
        }
    }
}
