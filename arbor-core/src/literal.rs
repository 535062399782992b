use crate::Type;
use std::fmt;
use std::ops::Neg;

#[derive(Clone, Copy, PartialEq)]
pub enum Literal {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Literal {
    pub fn get_type(&self) -> Type {
        match self {
            Literal::I32(_) => Type::I32,
            Literal::I64(_) => Type::I64,
            Literal::F32(_) => Type::F32,
            Literal::F64(_) => Type::F64,
        }
    }

    pub fn get_i32(&self) -> i32 {
        if let Literal::I32(v) = self {
            *v
        } else {
            panic!("not an i32 literal");
        }
    }

    pub fn get_i64(&self) -> i64 {
        if let Literal::I64(v) = self {
            *v
        } else {
            panic!("not an i64 literal");
        }
    }

    pub fn get_f32(&self) -> f32 {
        if let Literal::F32(v) = self {
            *v
        } else {
            panic!("not an f32 literal");
        }
    }

    pub fn get_f64(&self) -> f64 {
        if let Literal::F64(v) = self {
            *v
        } else {
            panic!("not an f64 literal");
        }
    }
}

impl Neg for Literal {
    type Output = Literal;

    fn neg(self) -> Self::Output {
        match self {
            Literal::I32(v) => Literal::I32(-v),
            Literal::I64(v) => Literal::I64(-v),
            Literal::F32(v) => Literal::F32(-v),
            Literal::F64(v) => Literal::F64(-v),
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::I32(v) => write!(f, "i32.const {}", v),
            Literal::I64(v) => write!(f, "i64.const {}", v),
            Literal::F32(v) => write!(f, "f32.const {}", v),
            Literal::F64(v) => write!(f, "f64.const {}", v),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::I32(v) => write!(f, "{}", v),
            Literal::I64(v) => write!(f, "{}", v),
            Literal::F32(v) => write!(f, "{}", v),
            Literal::F64(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_types() {
        assert_eq!(Literal::I32(1).get_type(), Type::I32);
        assert_eq!(Literal::F64(1.5).get_type(), Type::F64);
    }

    #[test]
    fn test_literal_accessors() {
        assert_eq!(Literal::I32(-3).get_i32(), -3);
        assert_eq!(Literal::I64(9).get_i64(), 9);
        assert_eq!(Literal::F32(0.5).get_f32(), 0.5);
    }

    #[test]
    #[should_panic(expected = "not an i32 literal")]
    fn test_literal_accessor_mismatch() {
        Literal::F64(1.0).get_i32();
    }

    #[test]
    fn test_literal_neg() {
        assert_eq!(-Literal::I32(5), Literal::I32(-5));
        assert_eq!(-Literal::F64(2.0), Literal::F64(-2.0));
    }
}
