//! Validation of default literals against field types.
//!
//! A default directive carries a string literal; whether it is usable depends
//! on the field's canonical type. Validation happens at generation time so a
//! bad default fails the run instead of producing uncompilable output.

use crate::error::DefaultValueError;

/// Check that `literal` is a valid default for a field of type `field_type`.
///
/// Duration types share their grammar with the runtime crate's parser, so
/// the generated constructor is guaranteed to accept what we accepted here.
pub fn check_default_value(field_type: &str, literal: &str) -> Result<(), DefaultValueError> {
    match field_type {
        // Integers are checked at the field's declared width, so an
        // out-of-range literal fails here instead of in the generated file.
        "i8" => parses_as::<i8>(literal),
        "i16" => parses_as::<i16>(literal),
        "i32" => parses_as::<i32>(literal),
        "i64" => parses_as::<i64>(literal),
        "i128" => parses_as::<i128>(literal),
        "isize" => parses_as::<i64>(literal),
        "u8" => parses_as::<u8>(literal),
        "u16" => parses_as::<u16>(literal),
        "u32" => parses_as::<u32>(literal),
        "u64" => parses_as::<u64>(literal),
        "u128" => parses_as::<u128>(literal),
        "usize" => parses_as::<u64>(literal),
        "f32" => parses_as::<f32>(literal),
        "f64" => parses_as::<f64>(literal),
        "bool" => {
            if literal == "true" || literal == "false" {
                Ok(())
            } else {
                Err(DefaultValueError::BadBool)
            }
        }
        "String" | "&str" | "str" => Ok(()),
        "Duration" | "std::time::Duration" | "core::time::Duration" => {
            options_gen::duration::parse(literal)
                .map(|_| ())
                .map_err(|e| bad(literal, e))
        }
        other => Err(DefaultValueError::Unsupported {
            ty: other.to_string(),
        }),
    }
}

fn parses_as<T>(literal: &str) -> Result<(), DefaultValueError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    literal.parse::<T>().map(|_| ()).map_err(|e| bad(literal, e))
}

fn bad(literal: &str, err: impl std::fmt::Display) -> DefaultValueError {
    DefaultValueError::BadValue {
        literal: literal.to_string(),
        message: err.to_string(),
    }
}

/// Whether the canonical type is a duration, which needs parser-based
/// initialization in the generated constructor.
pub fn is_duration_type(field_type: &str) -> bool {
    matches!(
        field_type,
        "Duration" | "std::time::Duration" | "core::time::Duration"
    )
}

/// Whether the canonical type takes string-like initialization (`.into()`).
pub fn is_string_type(field_type: &str) -> bool {
    matches!(field_type, "String" | "&str" | "str")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_defaults() {
        assert!(check_default_value("i32", "42").is_ok());
        assert!(check_default_value("i64", "-7").is_ok());
        assert!(check_default_value("u16", "65535").is_ok());
        assert!(check_default_value("u8", "-1").is_err());
        assert!(check_default_value("usize", "ten").is_err());
    }

    #[test]
    fn test_integer_defaults_respect_bit_width() {
        assert!(check_default_value("u8", "255").is_ok());
        assert!(check_default_value("u8", "300").is_err());
        assert!(check_default_value("i8", "-128").is_ok());
        assert!(check_default_value("i8", "128").is_err());
        assert!(check_default_value("u16", "65536").is_err());
        assert!(check_default_value("i32", "2147483648").is_err());
    }

    #[test]
    fn test_float_defaults() {
        assert!(check_default_value("f32", "32.32").is_ok());
        assert!(check_default_value("f64", "1e9").is_ok());
        assert!(check_default_value("f64", "fast").is_err());
    }

    #[test]
    fn test_bool_defaults() {
        assert!(check_default_value("bool", "true").is_ok());
        assert!(check_default_value("bool", "false").is_ok());
        assert!(matches!(
            check_default_value("bool", "1"),
            Err(DefaultValueError::BadBool)
        ));
    }

    #[test]
    fn test_string_defaults_accept_anything() {
        assert!(check_default_value("String", "hello").is_ok());
        assert!(check_default_value("String", "").is_ok());
        assert!(check_default_value("&str", "x").is_ok());
    }

    #[test]
    fn test_duration_defaults() {
        assert!(check_default_value("Duration", "3s").is_ok());
        assert!(check_default_value("std::time::Duration", "1h30m").is_ok());
        assert!(check_default_value("Duration", "3 parsecs").is_err());
    }

    #[test]
    fn test_unsupported_type() {
        let err = check_default_value("http::Client", "x").unwrap_err();
        assert!(err.to_string().contains("unsupported type `http::Client`"));
    }
}
