//! Form field sanitizing and validation
//!
//! Values are trimmed first and checked second. Errors accumulate in the
//! order the checks run so a re-rendered form lists them top to bottom.
//! HTML escaping is not done here: stored text is kept verbatim and escaped
//! by the views when it is rendered.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use catalog_common::time::parse_form_date;

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Form field name
    pub param: String,
    /// Message shown to the user
    pub msg: String,
}

/// Trim surrounding whitespace
pub fn sanitize(value: &str) -> String {
    value.trim().to_string()
}

/// Letters and digits only (any script)
pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphanumeric)
}

/// Collects errors across the fields of one form submission
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: &str, msg: &str) {
        self.errors.push(ValidationError {
            param: param.to_string(),
            msg: msg.to_string(),
        });
    }

    /// Returns whether the value is present
    pub fn not_empty(&mut self, param: &str, value: &str, msg: &str) -> bool {
        if value.is_empty() {
            self.push(param, msg);
            return false;
        }
        true
    }

    /// Empty values are left to `not_empty`
    pub fn alphanumeric(&mut self, param: &str, value: &str, msg: &str) {
        if !value.is_empty() && !is_alphanumeric(value) {
            self.push(param, msg);
        }
    }

    /// Length in characters, not bytes
    pub fn max_length(&mut self, param: &str, value: &str, max: usize, msg: &str) {
        if value.chars().count() > max {
            self.push(param, msg);
        }
    }

    /// Empty values are left to `not_empty`
    pub fn min_length(&mut self, param: &str, value: &str, min: usize, msg: &str) {
        if !value.is_empty() && value.chars().count() < min {
            self.push(param, msg);
        }
    }

    /// An empty value is an absent date; anything else must be `YYYY-MM-DD`
    pub fn optional_date(&mut self, param: &str, value: &str) -> Option<NaiveDate> {
        if value.is_empty() {
            return None;
        }
        let parsed = parse_form_date(value);
        if parsed.is_none() {
            self.push(param, "Invalid date");
        }
        parsed
    }

    /// A reference to another entity, submitted as its id
    pub fn reference(&mut self, param: &str, value: &str, msg: &str) -> Option<Uuid> {
        if !self.not_empty(param, value, msg) {
            return None;
        }
        match Uuid::parse_str(value) {
            Ok(id) => Some(id),
            Err(_) => {
                self.push(param, msg);
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_trims() {
        assert_eq!(sanitize("  Asimov \t"), "Asimov");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_alphanumeric() {
        assert!(is_alphanumeric("Asimov"));
        assert!(is_alphanumeric("Müller2"));
        assert!(!is_alphanumeric("Le Guin"));
        assert!(!is_alphanumeric("O'Brian"));
        assert!(!is_alphanumeric(""));
    }

    #[test]
    fn test_empty_value_reports_only_required() {
        let mut v = Validator::new();
        v.not_empty("family_name", "", "Family name must be specified.");
        v.alphanumeric("family_name", "", "Family name must be alphanumeric text.");

        let errors = v.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "Family name must be specified.");
    }

    #[test]
    fn test_errors_keep_check_order() {
        let mut v = Validator::new();
        v.not_empty("first_name", "", "First name must be specified.");
        v.alphanumeric("family_name", "Le Guin", "Family name must be alphanumeric text.");
        v.optional_date("date_of_birth", "1929-13-01");

        let params: Vec<_> = v.into_errors().into_iter().map(|e| e.param).collect();
        assert_eq!(params, vec!["first_name", "family_name", "date_of_birth"]);
    }

    #[test]
    fn test_optional_date() {
        let mut v = Validator::new();
        assert_eq!(v.optional_date("d", ""), None);
        assert!(v.is_valid());

        assert_eq!(
            v.optional_date("d", "1929-10-21"),
            NaiveDate::from_ymd_opt(1929, 10, 21)
        );
        assert!(v.is_valid());

        assert_eq!(v.optional_date("d", "October"), None);
        let errors = v.into_errors();
        assert_eq!(errors[0].msg, "Invalid date");
    }

    #[test]
    fn test_length_counts_characters() {
        let mut v = Validator::new();
        v.max_length("name", &"é".repeat(100), 100, "too long");
        assert!(v.is_valid());
        v.max_length("name", &"é".repeat(101), 100, "too long");
        assert!(!v.is_valid());
    }

    #[test]
    fn test_min_length_ignores_empty() {
        let mut v = Validator::new();
        v.min_length("name", "", 3, "too short");
        assert!(v.is_valid());
        v.min_length("name", "ab", 3, "too short");
        assert!(!v.is_valid());
    }

    #[test]
    fn test_reference() {
        let mut v = Validator::new();
        let id = Uuid::new_v4();
        assert_eq!(v.reference("author", &id.to_string(), "Author must exist."), Some(id));
        assert!(v.is_valid());
        assert_eq!(v.reference("author", "42", "Author must exist."), None);
        assert_eq!(v.reference("author", "", "Author must exist."), None);
        assert_eq!(v.into_errors().len(), 2);
    }
}
