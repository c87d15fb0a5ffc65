//! Field-level validation of [`RegistrationForm`]s.
//!
//! Every rule runs; the caller gets all failures at once so a form can highlight each
//! offending field.

use crate::error::{RegistrationError, RegistrationErrorExt};
use chrono::NaiveDate;
use confhub_domain::{FormField, RegistrationForm};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::fmt;

pub const NAME_MIN_CHARS: usize = 3;

const EMAIL_PATTERN: &str = r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
const PHONE_PATTERN: &str = r"^\(\d{2}\) \d{5}-\d{4}$";
const DOCUMENT_PATTERN: &str = r"^\d{3}\.\d{3}\.\d{3}-\d{2}$";
const BIRTH_DATE_PATTERN: &str = r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/\d{4}$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: Cow<'static, str>,
}

/// Validation failures in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: FormField, message: impl Into<Cow<'static, str>>) {
        self.0.push(FieldError { field, message: message.into() });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message.as_ref())
    }

    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Compiled validation rules.
#[derive(Debug, Clone)]
pub struct Validator {
    email: Regex,
    phone: Regex,
    document: Regex,
    birth_date: Regex,
    require_profile: bool,
}

impl Validator {
    /// Compiles the rule set. With `require_profile` the document, birth date, profession
    /// and company become mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Pattern`] if a built-in pattern fails to compile.
    pub fn new(require_profile: bool) -> Result<Self, RegistrationError> {
        Ok(Self {
            email: RegexBuilder::new(EMAIL_PATTERN)
                .case_insensitive(true)
                .build()
                .context("Email pattern")?,
            phone: Regex::new(PHONE_PATTERN).context("Phone pattern")?,
            document: Regex::new(DOCUMENT_PATTERN).context("Document pattern")?,
            birth_date: Regex::new(BIRTH_DATE_PATTERN).context("Birth date pattern")?,
            require_profile,
        })
    }

    #[must_use]
    pub const fn requires_profile(&self) -> bool {
        self.require_profile
    }

    /// Checks `form` and collects every failure.
    ///
    /// Profile fields are format-checked whenever they are filled in, and must be present
    /// only when the profile is required. Expects a [`RegistrationForm::normalized`] form.
    #[must_use]
    pub fn check(&self, form: &RegistrationForm) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if form.name.is_empty() {
            errors.push(FormField::Name, "Name is required");
        } else if form.name.chars().count() < NAME_MIN_CHARS {
            errors.push(FormField::Name, "Name must be at least 3 characters");
        }

        if form.email.is_empty() {
            errors.push(FormField::Email, "Email is required");
        } else if !self.email.is_match(&form.email) {
            errors.push(FormField::Email, "Invalid email");
        }

        if form.phone.is_empty() {
            errors.push(FormField::Phone, "Phone is required");
        } else if !self.phone.is_match(&form.phone) {
            errors.push(FormField::Phone, "Phone format: (99) 99999-9999");
        }

        match form.document.as_deref() {
            None if self.require_profile => errors.push(FormField::Document, "Document is required"),
            Some(document) if !self.document.is_match(document) => {
                errors.push(FormField::Document, "Document format: 999.999.999-99");
            },
            _ => {},
        }

        match form.birth_date.as_deref() {
            None if self.require_profile => {
                errors.push(FormField::BirthDate, "Birth date is required");
            },
            Some(date) if !self.is_calendar_date(date) => {
                errors.push(FormField::BirthDate, "Invalid date (DD/MM/YYYY)");
            },
            _ => {},
        }

        if self.require_profile && form.profession.is_none() {
            errors.push(FormField::Profession, "Profession is required");
        }
        if self.require_profile && form.company.is_none() {
            errors.push(FormField::Company, "Company is required");
        }

        errors
    }

    /// Like [`Validator::check`], but failures become a [`RegistrationError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Validation`] carrying every field error.
    pub fn validate(&self, form: &RegistrationForm) -> Result<(), RegistrationError> {
        let errors = self.check(form);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(RegistrationError::Validation { errors, context: None })
        }
    }

    fn is_calendar_date(&self, date: &str) -> bool {
        self.birth_date.is_match(date) && NaiveDate::parse_from_str(date, "%d/%m/%Y").is_ok()
    }
}
