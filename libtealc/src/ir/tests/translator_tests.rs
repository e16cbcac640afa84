use crate::compiler_driver::Driver;
use crate::lexer;
use crate::parser;
use crate::sema;

use super::super::{printer, TtBinaryOp, TtInstruction, TtProgram, TtSubroutine, TtUnaryOp};
use super::compile;

fn subroutine<'a>(program: &'a TtProgram, name: &str) -> &'a TtSubroutine {
    program.0.iter().find(|s| s.name == name).unwrap_or_else(|| panic!("No subroutine named '{name}'"))
}

fn load(dst: &str, src: &str) -> TtInstruction {
    TtInstruction::Load { dst: dst.to_string(), src: src.to_string() }
}

fn iload(dst: &str, value: &str) -> TtInstruction {
    TtInstruction::ILoad { dst: dst.to_string(), value: value.to_string() }
}

fn fload(dst: &str, value: &str) -> TtInstruction {
    TtInstruction::FLoad { dst: dst.to_string(), value: value.to_string() }
}

fn chload(dst: &str, value: &str) -> TtInstruction {
    TtInstruction::ChLoad { dst: dst.to_string(), value: value.to_string() }
}

fn xload(base: &str, index: &str, src: &str) -> TtInstruction {
    TtInstruction::XLoad { base: base.to_string(), index: index.to_string(), src: src.to_string() }
}

fn unary(op: TtUnaryOp, dst: &str, src: &str) -> TtInstruction {
    TtInstruction::Unary { op, dst: dst.to_string(), src: src.to_string() }
}

fn binary(op: TtBinaryOp, dst: &str, src1: &str, src2: &str) -> TtInstruction {
    TtInstruction::Binary { op, dst: dst.to_string(), src1: src1.to_string(), src2: src2.to_string() }
}

fn label(name: &str) -> TtInstruction {
    TtInstruction::Label { name: name.to_string() }
}

fn ujump(target: &str) -> TtInstruction {
    TtInstruction::UJump { label: target.to_string() }
}

fn fjump(condition: &str, target: &str) -> TtInstruction {
    TtInstruction::FJump { condition: condition.to_string(), label: target.to_string() }
}

fn push(src: Option<&str>) -> TtInstruction {
    TtInstruction::Push { src: src.map(str::to_string) }
}

fn pop(dst: Option<&str>) -> TtInstruction {
    TtInstruction::Pop { dst: dst.map(str::to_string) }
}

fn call(name: &str) -> TtInstruction {
    TtInstruction::Call { name: name.to_string() }
}

#[test]
fn assignment_with_int_to_float_promotion() {
    let program = compile(
        "func main()\n\
         \x20 var x : float;\n\
         \x20 x := 3;\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            iload("%1", "3"),
            unary(TtUnaryOp::Float, "%2", "%1"),
            load("x", "%2"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn if_without_else() {
    let program = compile(
        "func main()\n\
         \x20 var b : bool;\n\
         \x20 b := false;\n\
         \x20 if b then\n\
         \x20   write 1;\n\
         \x20 endif\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            iload("%1", "0"),
            load("b", "%1"),
            fjump("b", "endif1"),
            iload("%2", "1"),
            TtInstruction::WriteI { src: "%2".to_string() },
            label("endif1"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn if_else_lowering() {
    let program = compile(
        "func main()\n\
         \x20 var b : bool;\n\
         \x20 b := true;\n\
         \x20 if b then\n\
         \x20   write 1;\n\
         \x20 else\n\
         \x20   write 2;\n\
         \x20 endif\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            iload("%1", "1"),
            load("b", "%1"),
            fjump("b", "endif1"),
            iload("%2", "1"),
            TtInstruction::WriteI { src: "%2".to_string() },
            ujump("endelse1"),
            label("endif1"),
            iload("%3", "2"),
            TtInstruction::WriteI { src: "%3".to_string() },
            label("endelse1"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn while_lowering() {
    let program = compile(
        "func main()\n\
         \x20 var i : int;\n\
         \x20 i := 0;\n\
         \x20 while i < 3 do\n\
         \x20   i := i + 1;\n\
         \x20 endwhile\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            iload("%1", "0"),
            load("i", "%1"),
            label("while1"),
            iload("%2", "3"),
            binary(TtBinaryOp::Lt, "%3", "i", "%2"),
            fjump("%3", "endwhile1"),
            iload("%4", "1"),
            binary(TtBinaryOp::Add, "%5", "i", "%4"),
            load("i", "%5"),
            ujump("while1"),
            label("endwhile1"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn call_expression_reserves_and_pops_the_return_slot() {
    let program = compile(
        "func f(x : float) : int\n\
         \x20 return 0;\n\
         endfunc\n\
         func main()\n\
         \x20 var r : int;\n\
         \x20 r := f(3);\n\
         endfunc",
    );

    // The integer argument bound to a float parameter is promoted into a fresh temporary before the push.
    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            push(None),
            iload("%1", "3"),
            unary(TtUnaryOp::Float, "%2", "%1"),
            push(Some("%2")),
            call("f"),
            pop(None),
            pop(Some("%3")),
            load("r", "%3"),
            TtInstruction::Return,
        ]
    );

    let f = subroutine(&program, "f");
    assert_eq!(
        f.instructions,
        vec![iload("%1", "0"), load("_result", "%1"), TtInstruction::Return, TtInstruction::Return]
    );
}

#[test]
fn void_procedure_call_has_no_return_slot() {
    let program = compile(
        "func p(x : int)\n\
         endfunc\n\
         func main()\n\
         \x20 p(7);\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![iload("%1", "7"), push(Some("%1")), call("p"), pop(None), TtInstruction::Return]
    );
}

#[test]
fn statement_call_discards_a_non_void_result() {
    let program = compile(
        "func g() : int\n\
         \x20 return 1;\n\
         endfunc\n\
         func main()\n\
         \x20 g();\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(main.instructions, vec![push(None), call("g"), pop(None), TtInstruction::Return]);
}

#[test]
fn read_into_an_array_element_stores_after_reading() {
    let program = compile(
        "func main()\n\
         \x20 var a : array<3,int>;\n\
         \x20 var i : int;\n\
         \x20 i := 1;\n\
         \x20 read a[i];\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            iload("%1", "1"),
            load("i", "%1"),
            TtInstruction::ReadI { dst: "%2".to_string() },
            xload("a", "i", "%2"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn modulo_lowers_to_div_mul_sub() {
    let program = compile(
        "func main()\n\
         \x20 var x : int;\n\
         \x20 x := 7 % 2;\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            iload("%1", "7"),
            iload("%2", "2"),
            binary(TtBinaryOp::Div, "%3", "%1", "%2"),
            binary(TtBinaryOp::Mul, "%4", "%3", "%2"),
            binary(TtBinaryOp::Sub, "%5", "%1", "%4"),
            load("x", "%5"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn greater_than_is_the_negated_complement() {
    let program = compile(
        "func main()\n\
         \x20 var b : bool;\n\
         \x20 var x, y : int;\n\
         \x20 b := x > y;\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            binary(TtBinaryOp::Le, "%1", "x", "y"),
            unary(TtUnaryOp::Not, "%1", "%1"),
            load("b", "%1"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn float_comparison_promotes_the_integer_operand() {
    let program = compile(
        "func main()\n\
         \x20 var b : bool;\n\
         \x20 var f : float;\n\
         \x20 b := 1 <= f;\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            iload("%1", "1"),
            unary(TtUnaryOp::Float, "%2", "%1"),
            binary(TtBinaryOp::FLe, "%3", "%2", "f"),
            load("b", "%3"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn unary_minus_and_plus() {
    let program = compile(
        "func main()\n\
         \x20 var f : float;\n\
         \x20 f := -2.5;\n\
         \x20 f := +f;\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            fload("%1", "2.5"),
            unary(TtUnaryOp::FNeg, "%2", "%1"),
            load("f", "%2"),
            load("f", "f"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn logical_operators_evaluate_both_sides() {
    let program = compile(
        "func main()\n\
         \x20 var b, c : bool;\n\
         \x20 b := c and not b or true;\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            unary(TtUnaryOp::Not, "%1", "b"),
            binary(TtBinaryOp::And, "%2", "c", "%1"),
            iload("%3", "1"),
            binary(TtBinaryOp::Or, "%4", "%2", "%3"),
            load("b", "%4"),
            TtInstruction::Return,
        ]
    );
}

#[test]
fn char_and_string_writes_keep_raw_lexemes() {
    let program = compile(
        "func main()\n\
         \x20 var c : char;\n\
         \x20 c := 'z';\n\
         \x20 write c;\n\
         \x20 write \"done\\n\";\n\
         endfunc",
    );

    let main = subroutine(&program, "main");
    assert_eq!(
        main.instructions,
        vec![
            chload("%1", "'z'"),
            load("c", "%1"),
            TtInstruction::WriteC { src: "c".to_string() },
            TtInstruction::WriteS { value: "\"done\\n\"".to_string() },
            TtInstruction::Return,
        ]
    );
}

#[test]
fn subroutine_headers_list_result_params_and_locals() {
    let program = compile(
        "func sum(v : array<3,int>) : int\n\
         \x20 var s : int;\n\
         \x20 s := v[0] + v[1];\n\
         \x20 return s;\n\
         endfunc\n\
         func main()\n\
         \x20 var a : array<3,int>;\n\
         \x20 var t : int;\n\
         \x20 t := sum(a);\n\
         endfunc",
    );

    let sum = subroutine(&program, "sum");

    // The implicit result slot comes first; the array parameter is listed by element type with the array flag.
    assert_eq!(sum.params.len(), 2);
    assert_eq!(sum.params[0].name, "_result");
    assert_eq!(sum.params[0].type_name, "integer");
    assert!(!sum.params[0].is_array);
    assert_eq!(sum.params[1].name, "v");
    assert_eq!(sum.params[1].type_name, "integer");
    assert!(sum.params[1].is_array);

    assert_eq!(sum.vars.len(), 1);
    assert_eq!(sum.vars[0].name, "s");
    assert_eq!(sum.vars[0].size, 1);

    // Array locals carry their declared length.
    let main = subroutine(&program, "main");
    assert!(main.params.is_empty());
    assert_eq!(main.vars.len(), 2);
    assert_eq!(main.vars[0].name, "a");
    assert_eq!(main.vars[0].type_name, "integer");
    assert_eq!(main.vars[0].size, 3);
    assert_eq!(main.vars[1].size, 1);
}

#[test]
fn temporaries_and_labels_reset_for_each_function() {
    let program = compile(
        "func f()\n\
         \x20 var b : bool;\n\
         \x20 b := true;\n\
         \x20 if b then\n\
         \x20   write 1;\n\
         \x20 endif\n\
         endfunc\n\
         func main()\n\
         \x20 var b : bool;\n\
         \x20 b := true;\n\
         \x20 if b then\n\
         \x20   write 2;\n\
         \x20 endif\n\
         endfunc",
    );

    for name in ["f", "main"] {
        let sub = subroutine(&program, name);
        assert_eq!(sub.instructions[0], iload("%1", "1"), "in '{name}'");
        assert!(sub.instructions.contains(&label("endif1")), "in '{name}'");
    }
}

#[test]
fn return_mismatch_still_lowers_the_result_store() {
    // The type pass diagnoses the incompatible return; lowering is type-agnostic and still produces the
    // result store and the return.
    let mut driver = Driver::for_testing();
    let tokens = lexer::lex(&mut driver, "func f() : int\n return 1.0;\nendfunc\nfunc main()\nendfunc");
    let ast = parser::parse(&mut driver, tokens);
    let mut sema = sema::semantic_analysis(&ast, &mut driver);

    assert_eq!(driver.error_count(), 1);

    let program = super::super::translate(&ast, &mut sema);
    let f = subroutine(&program, "f");
    assert_eq!(
        f.instructions,
        vec![fload("%1", "1.0"), load("_result", "%1"), TtInstruction::Return, TtInstruction::Return]
    );
}

#[test]
fn printed_listing() {
    let program = compile(
        "func sum(v : array<3,int>) : int\n\
         \x20 var s : int;\n\
         \x20 s := v[0] + v[1];\n\
         \x20 return s;\n\
         endfunc\n\
         func main()\n\
         \x20 var a : array<3,int>;\n\
         \x20 var t : int;\n\
         \x20 t := sum(a);\n\
         endfunc",
    );

    let mut buffer = Vec::new();
    printer::write_program(&program, &mut buffer).expect("Writing into a Vec cannot fail");

    let expected = "\
subroutine sum
  param _result : integer
  param v : integer array
  var s : integer 1
  instructions:
    iload %1 0
    loadx %2 v %1
    iload %3 1
    loadx %4 v %3
    add %5 %2 %4
    load s %5
    load _result s
    return
    return
endsubroutine

subroutine main
  var a : integer 3
  var t : integer 1
  instructions:
    push
    push a
    call sum
    pop
    pop %1
    load t %1
    return
endsubroutine

";
    assert_eq!(String::from_utf8(buffer).expect("Listing is UTF-8"), expected);
}
