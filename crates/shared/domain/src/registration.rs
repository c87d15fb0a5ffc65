use crate::conference::ConferenceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendee data captured by the registration form.
///
/// Only `name`, `email` and `phone` are always required; the profile fields become required
/// when the registrar runs with the extended form enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
    /// National document number, formatted as `999.999.999-99`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// `DD/MM/YYYY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), phone: phone.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    #[must_use]
    pub fn with_dietary_restrictions(mut self, restrictions: impl Into<String>) -> Self {
        self.dietary_restrictions = Some(restrictions.into());
        self
    }

    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    #[must_use]
    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    #[must_use]
    pub fn with_profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }

    /// Trims surrounding whitespace and turns blank optional fields into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let optional = |value: Option<String>| {
            value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
        };

        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            company: optional(self.company),
            dietary_restrictions: optional(self.dietary_restrictions),
            document: optional(self.document),
            birth_date: optional(self.birth_date),
            profession: optional(self.profession),
        }
    }
}

/// Form field identifiers used to key validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Company,
    Document,
    BirthDate,
    Profession,
    DietaryRestrictions,
}

impl FormField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Document => "document",
            Self::BirthDate => "birthDate",
            Self::Profession => "profession",
            Self::DietaryRestrictions => "dietaryRestrictions",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub conference_id: ConferenceId,
    #[serde(flatten)]
    pub form: RegistrationForm,
    pub created_at: DateTime<Utc>,
}
