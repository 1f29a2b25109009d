use lazy_static::lazy_static;
use regex::Regex;
use time::macros::format_description;
use time::Date;

use crate::error::AppError;

/// The eight ABO/Rh groups accepted anywhere a blood type is user input.
pub const VALID_BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

pub fn is_valid_blood_type(blood_type: &str) -> bool {
    VALID_BLOOD_TYPES.contains(&blood_type)
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Parse a `YYYY-MM-DD` wire date.
pub fn parse_date(field: &str, value: &str) -> Result<Date, AppError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format)
        .map_err(|_| AppError::Validation(format!("{field} must be a valid date (YYYY-MM-DD)")))
}

/// Treat absent and blank strings the same way the original API does.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_eight_abo_rh_groups() {
        for bt in VALID_BLOOD_TYPES {
            assert!(is_valid_blood_type(bt), "{bt} should be valid");
        }
        assert!(!is_valid_blood_type("C+"));
        assert!(!is_valid_blood_type("o+"));
        assert!(!is_valid_blood_type(""));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ann@x.com"));
        assert!(!is_valid_email("ann@x"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn parses_wire_dates() {
        let date = parse_date("dateOfBirth", "1990-01-01").unwrap();
        assert_eq!(date.to_string(), "1990-01-01");

        let err = parse_date("dateOfBirth", "01/01/1990").unwrap_err();
        assert!(err.to_string().contains("dateOfBirth"));
    }

    #[test]
    fn blank_strings_count_as_absent() {
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some("".into())), None);
        assert_eq!(non_blank(&Some("  ".into())), None);
        assert_eq!(non_blank(&Some(" x ".into())), Some("x"));
    }
}
