use std::fmt;

/// The value type an expression evaluates to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Type(u32);

impl Type {
    pub const NONE: Type = Type(0);
    pub const UNREACHABLE: Type = Type(1);
    pub const I32: Type = Type(2);
    pub const I64: Type = Type(3);
    pub const F32: Type = Type(4);
    pub const F64: Type = Type(5);

    /// True for types that name an actual value (not `none`/`unreachable`).
    pub fn is_concrete(self) -> bool {
        self != Type::NONE && self != Type::UNREACHABLE
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Type::NONE => write!(f, "none"),
            Type::UNREACHABLE => write!(f, "unreachable"),
            Type::I32 => write!(f, "i32"),
            Type::I64 => write!(f, "i64"),
            Type::F32 => write!(f, "f32"),
            Type::F64 => write!(f, "f64"),
            _ => write!(f, "Type({:#x})", self.0),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A function signature, carried by indirect calls.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Signature {
    pub params: Type,
    pub results: Type,
}

impl Signature {
    pub fn new(params: Type, results: Type) -> Self {
        Self { params, results }
    }
}
