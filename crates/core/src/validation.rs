//! Field validation for patient intake.

use crate::error::CoreError;

/// Accepted values for a patient's `sex` field.
pub const SEX_VALUES: &[&str] = &["Male", "Female", "Other"];

/// Minimum number of characters for a contact phone number.
pub const MIN_PHONE_LEN: usize = 10;

/// Require a non-empty (after trimming) value for `field`.
pub fn require(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate a contact phone number. Length only; formats vary too much for
/// anything stricter.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if phone.trim().len() < MIN_PHONE_LEN {
        return Err(CoreError::Validation(format!(
            "Phone number must be at least {MIN_PHONE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate the `sex` field against the accepted values.
pub fn validate_sex(sex: &str) -> Result<(), CoreError> {
    if SEX_VALUES.contains(&sex) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "sex must be one of: {}",
            SEX_VALUES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_require_rejects_blank_values() {
        assert!(require("name", "Jane Doe").is_ok());
        let err = require("name", "   ").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "name is required");
    }

    #[test]
    fn test_phone_length() {
        assert!(validate_phone("0123456789").is_ok());
        assert!(validate_phone("+84 28 1234 5678").is_ok());
        assert_matches!(
            validate_phone("12345").unwrap_err(),
            CoreError::Validation(_)
        );
        // Surrounding whitespace does not count toward the length.
        assert_matches!(
            validate_phone("  12345   ").unwrap_err(),
            CoreError::Validation(_)
        );
    }

    #[test]
    fn test_sex_values() {
        for ok in SEX_VALUES {
            assert!(validate_sex(ok).is_ok());
        }
        for bad in ["male", "F", "unknown", ""] {
            assert_matches!(validate_sex(bad).unwrap_err(), CoreError::Validation(_));
        }
    }
}
