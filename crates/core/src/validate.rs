use crate::error::{ValidationError, ValidationResult};
use crate::record::{Field, Record};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw values of the single-record entry form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub address: String,
    pub mobile: String,
}

impl RecordForm {
    fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Gender => &self.gender,
            Field::Address => &self.address,
            Field::Mobile => &self.mobile,
        }
    }
}

fn name_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid regex"))
}

fn email_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

fn mobile_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("valid regex"))
}

/// Shape checks, in reporting order.
fn shape_rules() -> [(Field, &'static Regex); 4] {
    [
        (Field::FirstName, name_regex()),
        (Field::LastName, name_regex()),
        (Field::Email, email_regex()),
        (Field::Mobile, mobile_regex()),
    ]
}

/// Validate a form before it is submitted to the store.
///
/// Shape errors take precedence over empty fields. On success the returned
/// record holds the trimmed values.
///
/// # Examples
///
/// ```
/// use recordbook_core::{validate, RecordForm};
///
/// let form = RecordForm {
///     first_name: "John".into(),
///     last_name: "Doe".into(),
///     email: "j@d.com".into(),
///     gender: String::new(),
///     address: "1 Rd".into(),
///     mobile: "12345".into(),
/// };
/// let err = validate(&form).unwrap_err();
/// assert_eq!(err.to_string(), "All fields must be filled");
/// ```
pub fn validate(form: &RecordForm) -> ValidationResult<Record> {
    for (field, re) in shape_rules() {
        if !re.is_match(form.get(field).trim()) {
            return Err(ValidationError::InvalidInput { field });
        }
    }

    let mut record = Record::default();
    for field in Field::ALL {
        let value = form.get(field).trim();
        if value.is_empty() {
            return Err(ValidationError::MissingFields { field });
        }
        record.set(field, value);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RecordForm {
        RecordForm {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "j@d.com".to_string(),
            gender: "male".to_string(),
            address: "1 Rd".to_string(),
            mobile: "12345".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes_unchanged() {
        let record = validate(&valid_form()).unwrap();
        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(record.email, "j@d.com");
        assert_eq!(record.gender, "male");
        assert_eq!(record.address, "1 Rd");
        assert_eq!(record.mobile, "12345");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_values_are_trimmed() {
        let form = RecordForm {
            first_name: "  Mary Ann ".to_string(),
            address: "\t1 Rd\n".to_string(),
            ..valid_form()
        };
        let record = validate(&form).unwrap();
        assert_eq!(record.first_name, "Mary Ann");
        assert_eq!(record.address, "1 Rd");
    }

    #[test]
    fn test_digit_in_name_is_invalid() {
        let form = RecordForm {
            first_name: "John1".to_string(),
            ..valid_form()
        };
        let err = validate(&form).unwrap_err();
        assert_eq!(err, ValidationError::InvalidInput { field: Field::FirstName });
        assert_eq!(err.to_string(), "Invalid input in one or more fields");
    }

    #[test]
    fn test_blank_name_is_invalid_not_missing() {
        let form = RecordForm {
            last_name: "   ".to_string(),
            ..valid_form()
        };
        assert_eq!(
            validate(&form).unwrap_err(),
            ValidationError::InvalidInput { field: Field::LastName }
        );
    }

    #[test]
    fn test_email_shapes() {
        for bad in ["jd.com", "j@d", "j d@d.com", "j@@d.com", ""] {
            let form = RecordForm {
                email: bad.to_string(),
                ..valid_form()
            };
            assert_eq!(
                validate(&form).unwrap_err(),
                ValidationError::InvalidInput { field: Field::Email },
                "email {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_mobile_must_be_ascii_digits() {
        for bad in ["+1 555", "555-1234", "١٢٣", ""] {
            let form = RecordForm {
                mobile: bad.to_string(),
                ..valid_form()
            };
            assert_eq!(
                validate(&form).unwrap_err().field(),
                Field::Mobile,
                "mobile {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_gender_or_address_is_missing() {
        let form = RecordForm {
            gender: String::new(),
            ..valid_form()
        };
        let err = validate(&form).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields { field: Field::Gender });
        assert_eq!(err.to_string(), "All fields must be filled");

        let form = RecordForm {
            address: "  ".to_string(),
            ..valid_form()
        };
        assert_eq!(
            validate(&form).unwrap_err(),
            ValidationError::MissingFields { field: Field::Address }
        );
    }

    #[test]
    fn test_shape_error_wins_over_missing_field() {
        let form = RecordForm {
            gender: String::new(),
            mobile: "abc".to_string(),
            ..valid_form()
        };
        assert_eq!(
            validate(&form).unwrap_err(),
            ValidationError::InvalidInput { field: Field::Mobile }
        );
    }
}
