//! Contact details and their validation rules.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::countries;

/// Minimum local phone digits (country code stripped).
const PHONE_MIN_DIGITS: usize = 8;
/// Maximum local phone digits (country code stripped).
const PHONE_MAX_DIGITS: usize = 11;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
    })
}

/// A text field of the contact form, for single-field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    Nationality,
}

/// Visitor contact details collected on the contact step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Full phone number including the country dial code.
    pub phone: String,
    /// ISO 3166-1 alpha-2 code.
    pub nationality: String,
    #[serde(default)]
    pub newsletter: bool,
}

impl ContactDetails {
    /// Overwrite one text field, as each form input edits independently.
    pub fn set(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Nationality => &mut self.nationality,
        };
        *slot = value.to_string();
    }

    /// All required fields non-empty.
    pub fn has_required_fields(&self) -> bool {
        !(self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.phone.trim().is_empty()
            || self.nationality.trim().is_empty())
    }

    pub fn email_is_valid(&self) -> bool {
        email_regex().is_match(&self.email)
    }

    /// Phone digits with the selected nationality's dial code stripped.
    ///
    /// Unknown nationality codes validate the full number; the original
    /// widget behaves the same when a dial code cannot be resolved.
    pub fn local_phone_digits(&self) -> String {
        let dial_code = countries::dial_code_for(&self.nationality).unwrap_or("");
        let local = if !dial_code.is_empty() && self.phone.starts_with(dial_code) {
            &self.phone[dial_code.len()..]
        } else {
            self.phone.as_str()
        };
        local.chars().filter(char::is_ascii_digit).collect()
    }

    /// 8–11 digits after stripping the dial code.
    pub fn phone_is_valid(&self) -> bool {
        let digits = self.local_phone_digits();
        (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
    }

    /// Continue-gating for the contact step.
    pub fn is_complete(&self) -> bool {
        self.has_required_fields() && self.email_is_valid() && self.phone_is_valid()
    }
}
