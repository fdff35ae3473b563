//! Utilidades de validación
//!
//! Funciones helper para validación de datos que comparten
//! los controllers.

use crate::utils::errors::AppError;
use serde::Serialize;
use sqlx::types::Decimal;
use validator::ValidationError;

/// Exigir un campo de texto presente y no vacío
pub fn require_string(value: Option<String>, message: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(message.to_string())),
    }
}

/// Exigir un campo presente
pub fn require_value<T>(value: Option<T>, message: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(message.to_string()))
}

/// Convertir un monto f64 a Decimal, rechazando valores no representables
pub fn decimal_from_f64(value: f64, message: &str) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value).ok_or_else(|| AppError::Validation(message.to_string()))
}

/// Variante opcional de [`decimal_from_f64`]
pub fn optional_decimal(
    value: Option<f64>,
    message: &str,
) -> Result<Option<Decimal>, AppError> {
    value.map(|v| decimal_from_f64(v, message)).transpose()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Display + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_string() {
        assert_eq!(
            require_string(Some("Amazon Trip".to_string()), "name required").unwrap(),
            "Amazon Trip"
        );
        assert!(require_string(Some("  ".to_string()), "name required").is_err());
        assert!(require_string(None, "name required").is_err());
    }

    #[test]
    fn test_require_value() {
        assert_eq!(require_value(Some(3), "missing").unwrap(), 3);
        assert!(require_value::<i32>(None, "missing").is_err());
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(
            decimal_from_f64(12.5, "bad").unwrap(),
            "12.5".parse::<Decimal>().unwrap()
        );
        assert!(decimal_from_f64(f64::NAN, "bad").is_err());
    }

    #[test]
    fn test_optional_decimal() {
        assert_eq!(optional_decimal(None, "bad").unwrap(), None);
        assert!(optional_decimal(Some(f64::INFINITY), "bad").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Amazon Trip").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_enum() {
        let allowed = vec!["draft", "confirmed"];
        assert!(validate_enum("draft", &allowed).is_ok());
        assert!(validate_enum("archived", &allowed).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0.0).is_ok());
        assert!(validate_non_negative(12.5).is_ok());
        assert!(validate_non_negative(-0.1).is_err());
    }
}
