use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

lazy_static! {
    /// Shape of an allocated club code: prefix letter, 8 digits, 1-2 letter suffix
    /// - Valid: "C00000001A", "C00000027AA", "Z12345678ZZ"
    /// - Invalid: "C1A", "C00000001", "C00000001AAA", "c00000001a"
    pub static ref CLUB_CODE_REGEX: Regex = Regex::new(r"^[A-Z][0-9]{8}[A-Z]{1,2}$").unwrap();
}

/// Rejects strings that are empty once trimmed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Rejects lists with a blank entry
pub fn no_blank_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        let mut err = ValidationError::new("blank_entry");
        err.message = Some(Cow::Borrowed("entries must not be blank"));
        return Err(err);
    }
    Ok(())
}
