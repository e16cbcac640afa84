//! The `syntax_tree` module defines the parse-tree node types.
//!
//! The tree is immutable after parsing. Nodes that receive scope, type or l-value annotations carry a [NodeId]
//! which keys the decoration side-tables; ids are assigned in increasing order while parsing.

use std::fmt;

use crate::core::SourceLocation;

/// Identifies a parse-tree node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The root of the parse tree: the list of function definitions.
#[derive(Debug)]
pub struct AstProgram {
    pub node_id: NodeId,
    pub loc: SourceLocation,
    pub functions: Vec<AstFunction>,
}

/// A function definition.
#[derive(Debug)]
pub struct AstFunction {
    pub node_id: NodeId,
    pub name: String,
    pub name_loc: SourceLocation,
    pub parameters: Vec<AstParameter>,
    pub return_type: Option<AstTypeSpec>,
    pub declarations: Vec<AstVariableDecl>,
    pub statements: Vec<AstStatement>,
}

/// One declared parameter.
#[derive(Debug)]
pub struct AstParameter {
    pub name: String,
    pub name_loc: SourceLocation,
    pub type_spec: AstTypeSpec,
}

/// One `var` declaration line, possibly declaring several names of the same type.
#[derive(Debug)]
pub struct AstVariableDecl {
    pub names: Vec<AstIdent>,
    pub type_spec: AstTypeSpec,
}

/// A written type.
#[derive(Debug)]
pub struct AstTypeSpec {
    pub node_id: NodeId,
    pub loc: SourceLocation,
    pub kind: AstTypeSpecKind,
}

/// The kind of a written type.
#[derive(Debug)]
pub enum AstTypeSpecKind {
    Basic(AstBasicType),
    Array { size: usize, elem: AstBasicType },
}

/// A basic (primitive) type name.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstBasicType {
    Integer,
    Float,
    Boolean,
    Character,
}

/// A statement.
#[derive(Debug)]
pub enum AstStatement {
    Assign {
        assign_loc: SourceLocation,
        target: AstLeftExpr,
        value: AstExpression,
    },
    If {
        condition: AstExpression,
        then_body: Vec<AstStatement>,
        else_body: Option<Vec<AstStatement>>,
    },
    While {
        condition: AstExpression,
        body: Vec<AstStatement>,
    },
    ProcCall {
        loc: SourceLocation,
        callee: AstIdent,
        args: Vec<AstExpression>,
    },
    Read {
        loc: SourceLocation,
        target: AstLeftExpr,
    },
    Write {
        loc: SourceLocation,
        expr: AstExpression,
    },
    WriteString {
        loc: SourceLocation,
        text: String,
    },
    Return {
        loc: SourceLocation,
        expr: Option<AstExpression>,
    },
}

/// An expression that denotes a storable location: a variable or an array element.
#[derive(Debug)]
pub struct AstLeftExpr {
    pub node_id: NodeId,
    pub loc: SourceLocation,
    pub kind: AstLeftExprKind,
}

/// The kind of a left-expression.
#[derive(Debug)]
pub enum AstLeftExprKind {
    Ident(AstIdent),
    ArrayAccess { array: AstIdent, index: Box<AstExpression> },
}

/// An identifier occurrence.
#[derive(Debug)]
pub struct AstIdent {
    pub node_id: NodeId,
    pub name: String,
    pub loc: SourceLocation,
}

/// An expression.
#[derive(Debug)]
pub struct AstExpression {
    pub node_id: NodeId,
    pub loc: SourceLocation,
    pub kind: AstExpressionKind,
}

/// The kind of an expression.
///
/// Literal kinds keep the raw source lexeme: code generation feeds it unchanged to the load instructions.
#[derive(Debug)]
pub enum AstExpressionKind {
    IntLiteral { lexeme: String },
    FloatLiteral { lexeme: String },
    CharLiteral { lexeme: String },
    BoolLiteral { value: bool },
    Ident(AstIdent),
    ArrayAccess { array: AstIdent, index: Box<AstExpression> },
    Call { callee: AstIdent, args: Vec<AstExpression> },
    Unary { op: AstUnaryOp, op_loc: SourceLocation, operand: Box<AstExpression> },
    Binary { op: AstBinaryOp, op_loc: SourceLocation, lhs: Box<AstExpression>, rhs: Box<AstExpression> },
    Parenthesis { inner: Box<AstExpression> },
}

/// Unary operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstUnaryOp {
    Plus,
    Negate,
    Not,
}

impl fmt::Display for AstUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstUnaryOp::Plus => write!(f, "+"),
            AstUnaryOp::Negate => write!(f, "-"),
            AstUnaryOp::Not => write!(f, "not"),
        }
    }
}

/// Binary operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstBinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl AstBinaryOp {
    /// Is this one of the arithmetic operators?
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            AstBinaryOp::Add | AstBinaryOp::Subtract | AstBinaryOp::Multiply | AstBinaryOp::Divide | AstBinaryOp::Modulo
        )
    }

    /// Is this `=` or `!=`?
    pub fn is_equality(self) -> bool {
        matches!(self, AstBinaryOp::Equal | AstBinaryOp::NotEqual)
    }

    /// Is this one of the ordering operators?
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            AstBinaryOp::LessThan
                | AstBinaryOp::LessThanOrEqual
                | AstBinaryOp::GreaterThan
                | AstBinaryOp::GreaterThanOrEqual
        )
    }

    /// Is this `and` or `or`?
    pub fn is_logical(self) -> bool {
        matches!(self, AstBinaryOp::And | AstBinaryOp::Or)
    }
}

impl fmt::Display for AstBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            AstBinaryOp::Add => "+",
            AstBinaryOp::Subtract => "-",
            AstBinaryOp::Multiply => "*",
            AstBinaryOp::Divide => "/",
            AstBinaryOp::Modulo => "%",
            AstBinaryOp::Equal => "=",
            AstBinaryOp::NotEqual => "!=",
            AstBinaryOp::LessThan => "<",
            AstBinaryOp::LessThanOrEqual => "<=",
            AstBinaryOp::GreaterThan => ">",
            AstBinaryOp::GreaterThanOrEqual => ">=",
            AstBinaryOp::And => "and",
            AstBinaryOp::Or => "or",
        };
        write!(f, "{op}")
    }
}
