// Validation utilities module
// Custom validation functions for actor fields

use validator::ValidationError;

/// Validates that sex is "M" or "F" (case-insensitive)
pub fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    if sex.eq_ignore_ascii_case("m") || sex.eq_ignore_ascii_case("f") {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_sex"))
    }
}

/// Validates that a string is not only whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// A rest year may not precede the birth year
pub fn validate_lifespan(birth_year: i32, rest_year: Option<i32>) -> Result<(), ValidationError> {
    match rest_year {
        Some(rest) if rest < birth_year => Err(ValidationError::new("rest_year_before_birth_year")),
        _ => Ok(()),
    }
}
