//! The `type_manager` module defines the [TypeManager], the interned catalog of Teal types.

use crate::ICE;

/// An opaque handle to a type in the [TypeManager].
///
/// Types are interned, so structural equality implies handle equality and two `TypeId`s can be compared directly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TypeId(usize);

/// The relational operator group used by [TypeManager::comparable].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComparisonKind {
    /// `=` and `!=`
    Equality,

    /// `<`, `<=`, `>` and `>=`
    Ordering,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Type {
    Void,
    Error,
    Integer,
    Float,
    Character,
    Boolean,
    Array { size: usize, elem: TypeId },
    Function { params: Vec<TypeId>, ret: TypeId },
}

// The primitive types occupy fixed slots in the catalog.
const VOID: TypeId = TypeId(0);
const ERROR: TypeId = TypeId(1);
const INTEGER: TypeId = TypeId(2);
const FLOAT: TypeId = TypeId(3);
const CHARACTER: TypeId = TypeId(4);
const BOOLEAN: TypeId = TypeId(5);

/// The interned catalog of types.
///
/// The distinguished `Error` type absorbs every type-level check so that one diagnosed error does not cascade
/// into secondary diagnostics.
#[derive(Debug)]
pub struct TypeManager {
    types: Vec<Type>,
}

impl Default for TypeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeManager {
    /// Creates a new type manager with the primitive types already interned.
    pub fn new() -> Self {
        Self {
            types: vec![Type::Void, Type::Error, Type::Integer, Type::Float, Type::Character, Type::Boolean],
        }
    }

    /// The `void` type.
    pub fn create_void(&self) -> TypeId {
        VOID
    }

    /// The distinguished error type.
    pub fn create_error(&self) -> TypeId {
        ERROR
    }

    /// The integer type.
    pub fn create_integer(&self) -> TypeId {
        INTEGER
    }

    /// The float type.
    pub fn create_float(&self) -> TypeId {
        FLOAT
    }

    /// The character type.
    pub fn create_character(&self) -> TypeId {
        CHARACTER
    }

    /// The boolean type.
    pub fn create_boolean(&self) -> TypeId {
        BOOLEAN
    }

    /// Creates (or finds the existing handle of) the array type with the given element type and size.
    pub fn create_array(&mut self, size: usize, elem: TypeId) -> TypeId {
        self.intern(Type::Array { size, elem })
    }

    /// Creates (or finds the existing handle of) the function type with the given parameter and return types.
    pub fn create_function(&mut self, params: Vec<TypeId>, ret: TypeId) -> TypeId {
        self.intern(Type::Function { params, ret })
    }

    fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(index) = self.types.iter().position(|existing| *existing == ty) {
            return TypeId(index);
        }

        self.types.push(ty);
        TypeId(self.types.len() - 1)
    }

    fn get(&self, t: TypeId) -> &Type {
        match self.types.get(t.0) {
            Some(ty) => ty,
            None => ICE!("Unknown TypeId {}", t.0),
        }
    }

    /// Is this the void type?
    pub fn is_void(&self, t: TypeId) -> bool {
        t == VOID
    }

    /// Is this the error type?
    pub fn is_error(&self, t: TypeId) -> bool {
        t == ERROR
    }

    /// Is this the integer type?
    pub fn is_integer(&self, t: TypeId) -> bool {
        t == INTEGER
    }

    /// Is this the float type?
    pub fn is_float(&self, t: TypeId) -> bool {
        t == FLOAT
    }

    /// Is this the character type?
    pub fn is_character(&self, t: TypeId) -> bool {
        t == CHARACTER
    }

    /// Is this the boolean type?
    pub fn is_boolean(&self, t: TypeId) -> bool {
        t == BOOLEAN
    }

    /// Is this the integer or the float type?
    pub fn is_numeric(&self, t: TypeId) -> bool {
        self.is_integer(t) || self.is_float(t)
    }

    /// Is this one of the primitive types: integer, float, boolean or character?
    pub fn is_primitive(&self, t: TypeId) -> bool {
        self.is_integer(t) || self.is_float(t) || self.is_boolean(t) || self.is_character(t)
    }

    /// Is this an array type?
    pub fn is_array(&self, t: TypeId) -> bool {
        matches!(self.get(t), Type::Array { .. })
    }

    /// Is this a function type?
    pub fn is_function(&self, t: TypeId) -> bool {
        matches!(self.get(t), Type::Function { .. })
    }

    /// Is this a function type returning void?
    pub fn is_void_function(&self, t: TypeId) -> bool {
        matches!(self.get(t), Type::Function { ret, .. } if self.is_void(*ret))
    }

    /// The element type of an array type.
    pub fn array_elem(&self, t: TypeId) -> TypeId {
        match self.get(t) {
            Type::Array { elem, .. } => *elem,
            _ => ICE!("array_elem called on a non-array type"),
        }
    }

    /// The declared size of an array type.
    pub fn array_size(&self, t: TypeId) -> usize {
        match self.get(t) {
            Type::Array { size, .. } => *size,
            _ => ICE!("array_size called on a non-array type"),
        }
    }

    /// The parameter types of a function type, in declaration order.
    pub fn func_params(&self, t: TypeId) -> &[TypeId] {
        match self.get(t) {
            Type::Function { params, .. } => params,
            _ => ICE!("func_params called on a non-function type"),
        }
    }

    /// The return type of a function type.
    pub fn func_return(&self, t: TypeId) -> TypeId {
        match self.get(t) {
            Type::Function { ret, .. } => *ret,
            _ => ICE!("func_return called on a non-function type"),
        }
    }

    /// The storage size of a type in VM cells: 1 for primitives, the declared length for arrays.
    pub fn size_of(&self, t: TypeId) -> usize {
        match self.get(t) {
            Type::Integer | Type::Float | Type::Character | Type::Boolean => 1,
            Type::Array { size, .. } => *size,
            _ => ICE!("size_of called on a type without storage"),
        }
    }

    /// Can a value of type `src` be stored into a location of type `dst`?
    ///
    /// Holds for equal types (interning makes this a handle comparison, covering equal primitives and
    /// element- and size-equal arrays), for the single int-to-float widening, and for any pair containing the
    /// error type.
    pub fn copyable(&self, dst: TypeId, src: TypeId) -> bool {
        if self.is_error(dst) || self.is_error(src) {
            return true;
        }

        dst == src || (self.is_float(dst) && self.is_integer(src))
    }

    /// Can two values be compared with a relational operator of the given kind?
    ///
    /// Ordering operators require a numeric pair (the int/float mix is allowed). Equality operators accept equal
    /// primitive types, or a numeric pair. Any pair containing the error type is accepted.
    pub fn comparable(&self, a: TypeId, b: TypeId, kind: ComparisonKind) -> bool {
        if self.is_error(a) || self.is_error(b) {
            return true;
        }

        let numeric_pair = self.is_numeric(a) && self.is_numeric(b);

        match kind {
            ComparisonKind::Ordering => numeric_pair,
            ComparisonKind::Equality => (a == b && self.is_primitive(a)) || numeric_pair,
        }
    }

    /// The canonical textual form of a type, as used in the IR subroutine headers.
    pub fn to_string(&self, t: TypeId) -> String {
        match self.get(t) {
            Type::Void => "void".to_string(),
            Type::Error => "<error>".to_string(),
            Type::Integer => "integer".to_string(),
            Type::Float => "float".to_string(),
            Type::Character => "character".to_string(),
            Type::Boolean => "boolean".to_string(),
            Type::Array { size, elem } => format!("array<{},{}>", size, self.to_string(*elem)),
            Type::Function { params, ret } => {
                let params = params.iter().map(|p| self.to_string(*p)).collect::<Vec<_>>().join(",");
                format!("({}) -> {}", params, self.to_string(*ret))
            }
        }
    }
}
