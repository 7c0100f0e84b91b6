//! Patient business-code generation and validation.
//!
//! Codes have the form `P-YYYYMMDD-NNN`: the registration date plus a
//! random three-digit suffix. They appear on printed QR cards and in URLs,
//! so the internal database id never leaves the system.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rand::Rng;
use regex::Regex;

use crate::error::CoreError;

/// Pattern a well-formed patient code must match.
const CODE_PATTERN: &str = r"^P-\d{8}-\d{3}$";

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(CODE_PATTERN).expect("valid regex"));

/// Generate a new patient code for the given registration date.
///
/// The suffix is drawn from `1..=999` and zero-padded. Uniqueness is
/// enforced by the `uq_patients_code` constraint, not here; a same-day
/// collision surfaces as a conflict on insert.
pub fn generate(date: NaiveDate) -> String {
    let suffix: u32 = rand::rng().random_range(1..=999);
    format!("P-{}-{suffix:03}", date.format("%Y%m%d"))
}

/// Check that `code` is a well-formed patient code.
pub fn validate(code: &str) -> Result<(), CoreError> {
    if CODE_RE.is_match(code) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid patient code '{code}': expected P-YYYYMMDD-NNN"
        )))
    }
}
