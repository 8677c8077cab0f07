//! Estimated in-memory sizes for field types on a 64-bit platform.

use structpack_ast::TypeExpr;

/// Machine word size; also the fallback for types the table does not know.
pub const WORD_SIZE: u64 = 8;

/// Estimate the size in bytes a value of this type occupies.
///
/// Total over all type shapes; unknown and composite types fall back to one
/// word. Fixed-length arrays are approximated as a single word rather than
/// `len * element size`, which under-counts large arrays.
pub fn size_of(ty: &TypeExpr) -> u64 {
    match ty {
        TypeExpr::Named { name } => named_size(name),
        // pointer + length + capacity
        TypeExpr::Array { len: None, .. } => 24,
        TypeExpr::Array { len: Some(_), .. } => WORD_SIZE,
        // type descriptor + data pointer
        TypeExpr::Interface => 16,
        TypeExpr::Pointer { .. }
        | TypeExpr::Map { .. }
        | TypeExpr::Chan { .. }
        | TypeExpr::Func
        | TypeExpr::Struct => WORD_SIZE,
    }
}

fn named_size(name: &str) -> u64 {
    match name {
        "bool" => 1,
        "int8" | "uint8" | "byte" => 1,
        "int16" | "uint16" => 2,
        "int32" | "uint32" | "rune" | "float32" => 4,
        "int64" | "uint64" | "float64" | "complex64" => 8,
        "complex128" => 16,
        "int" | "uint" | "uintptr" => 8,
        // pointer + length header
        "string" => 16,
        _ => WORD_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    #[test]
    fn primitive_sizes() {
        assert_eq!(size_of(&named("bool")), 1);
        assert_eq!(size_of(&named("byte")), 1);
        assert_eq!(size_of(&named("int16")), 2);
        assert_eq!(size_of(&named("rune")), 4);
        assert_eq!(size_of(&named("float32")), 4);
        assert_eq!(size_of(&named("int64")), 8);
        assert_eq!(size_of(&named("complex64")), 8);
        assert_eq!(size_of(&named("complex128")), 16);
        assert_eq!(size_of(&named("uintptr")), 8);
        assert_eq!(size_of(&named("string")), 16);
    }

    #[test]
    fn unknown_names_fall_back_to_word_size() {
        assert_eq!(size_of(&named("MyStruct")), WORD_SIZE);
        assert_eq!(size_of(&named("time.Time")), WORD_SIZE);
    }

    #[test]
    fn compound_shapes() {
        let elem = Box::new(named("byte"));
        assert_eq!(
            size_of(&TypeExpr::Array {
                len: None,
                elem: elem.clone()
            }),
            24
        );
        assert_eq!(
            size_of(&TypeExpr::Array {
                len: Some("128".to_owned()),
                elem: elem.clone()
            }),
            8
        );
        assert_eq!(size_of(&TypeExpr::Pointer { elem: elem.clone() }), 8);
        assert_eq!(
            size_of(&TypeExpr::Map {
                key: Box::new(named("string")),
                value: elem.clone()
            }),
            8
        );
        assert_eq!(size_of(&TypeExpr::Chan { elem }), 8);
        assert_eq!(size_of(&TypeExpr::Interface), 16);
        assert_eq!(size_of(&TypeExpr::Func), 8);
        assert_eq!(size_of(&TypeExpr::Struct), 8);
    }
}
