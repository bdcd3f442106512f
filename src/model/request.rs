//! Contact form input and the validated audit request.

use super::url::{domain_of, normalize_url};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex"));

/// Minimum number of digits a phone number must contain.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Raw, unvalidated submission.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub website: String,
    pub email: String,
    pub phone: String,
    pub practice_name: String,
    pub address: String,
    pub doctor_name: Option<String>,
    pub maps_link: Option<String>,
}

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Website,
    Email,
    Phone,
    PracticeName,
    Address,
}

impl FormField {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PracticeName => "practice name",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every failing field of a rejected form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    #[must_use]
    pub fn fields(&self) -> Vec<FormField> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl ContactForm {
    /// Check every field and build an [`AuditRequest`].
    ///
    /// All failing fields are reported together; nothing is fetched before
    /// this succeeds.
    pub fn validate(self) -> Result<AuditRequest, ValidationErrors> {
        let mut errors = Vec::new();
        let mut require = |field: FormField, value: &str| {
            if value.trim().is_empty() {
                errors.push(FieldError {
                    field,
                    message: "required",
                });
                false
            } else {
                true
            }
        };

        let has_website = require(FormField::Website, &self.website);
        let has_email = require(FormField::Email, &self.email);
        let has_phone = require(FormField::Phone, &self.phone);
        require(FormField::PracticeName, &self.practice_name);
        require(FormField::Address, &self.address);

        if has_email && !EMAIL_RE.is_match(self.email.trim()) {
            errors.push(FieldError {
                field: FormField::Email,
                message: "invalid email format",
            });
        }
        if has_phone && count_digits(&self.phone) < MIN_PHONE_DIGITS {
            errors.push(FieldError {
                field: FormField::Phone,
                message: "phone number needs at least 7 digits",
            });
        }
        let website = normalize_url(&self.website);
        if has_website && domain_of(&website).is_none() {
            errors.push(FieldError {
                field: FormField::Website,
                message: "not a valid website address",
            });
        }

        if !errors.is_empty() {
            errors.sort_by_key(|e| e.field as u8);
            return Err(ValidationErrors(errors));
        }

        Ok(AuditRequest {
            website,
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            practice_name: self.practice_name.trim().to_string(),
            address: self.address.trim().to_string(),
            doctor_name: non_blank(self.doctor_name),
            maps_link: non_blank(self.maps_link),
        })
    }
}

fn count_digits(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A validated, immutable audit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRequest {
    website: String,
    email: String,
    phone: String,
    practice_name: String,
    address: String,
    doctor_name: Option<String>,
    maps_link: Option<String>,
}

impl AuditRequest {
    /// Website URL, always with a scheme
    #[must_use]
    pub fn website(&self) -> &str {
        &self.website
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn practice_name(&self) -> &str {
        &self.practice_name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn doctor_name(&self) -> Option<&str> {
        self.doctor_name.as_deref()
    }

    #[must_use]
    pub fn maps_link(&self) -> Option<&str> {
        self.maps_link.as_deref()
    }

    /// Practice domain without `www.`
    #[must_use]
    pub fn domain(&self) -> Option<String> {
        domain_of(&self.website)
    }

    /// City guessed from the address: the second-to-last comma-separated part.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        let parts: Vec<&str> = self
            .address
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() >= 2 {
            Some(parts[parts.len() - 2])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            website: "brightsmiles.com".to_string(),
            email: "front@brightsmiles.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            practice_name: "Bright Smiles Dental".to_string(),
            address: "12 Main St, Springfield, IL 62701".to_string(),
            doctor_name: Some("  ".to_string()),
            maps_link: None,
        }
    }

    #[test]
    fn test_valid_form_normalizes_website() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.website(), "https://brightsmiles.com");
        assert_eq!(request.domain().as_deref(), Some("brightsmiles.com"));
        assert_eq!(request.doctor_name(), None);
    }

    #[test]
    fn test_non_web_website_is_rejected() {
        for website in ["mailto:front@brightsmiles.com", "ftp://brightsmiles.com", "localhost"] {
            let form = ContactForm {
                website: website.to_string(),
                ..valid_form()
            };
            let err = form.validate().unwrap_err();
            assert_eq!(err.fields(), vec![FormField::Website], "{website}");
        }
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let form = ContactForm {
            email: "not-an-email".to_string(),
            phone: "12-34".to_string(),
            practice_name: String::new(),
            ..valid_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(
            err.fields(),
            vec![FormField::Email, FormField::Phone, FormField::PracticeName]
        );
        let message = err.to_string();
        assert!(message.contains("email"), "{message}");
        assert!(message.contains("practice name: required"), "{message}");
    }

    #[test]
    fn test_empty_fields_report_required_once() {
        let err = ContactForm::default().validate().unwrap_err();
        assert_eq!(err.0.len(), 5);
        assert!(err.0.iter().all(|e| e.message == "required"));
    }

    #[test]
    fn test_phone_digits_are_counted_across_separators() {
        let form = ContactForm {
            phone: "+1 555 12 34".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_city_is_second_to_last_part() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.city(), Some("Springfield"));

        let single = ContactForm {
            address: "Somewhere".to_string(),
            ..valid_form()
        };
        assert_eq!(single.validate().unwrap().city(), None);
    }
}
