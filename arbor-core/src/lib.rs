mod r#type;
pub use r#type::*;

mod literal;
pub use literal::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        assert_eq!(Type::I32.to_string(), "i32");
        assert_eq!(Type::F64.to_string(), "f64");
    }

    #[test]
    fn test_type_equality() {
        assert_eq!(Type::I32, Type::I32);
        assert_ne!(Type::I32, Type::I64);
    }

    #[test]
    fn test_signature() {
        let sig = Signature::new(Type::I32, Type::F64);
        assert_eq!(sig.params, Type::I32);
        assert_eq!(sig.results, Type::F64);
    }
}
