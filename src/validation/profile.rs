//! Profile form validation.

use super::{FieldErrors, digits_only, national_id, required};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Minimum number of characters in a phone number.
pub const PHONE_MIN_LEN: usize = 6;

/// Raw profile form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// National ID ("carnet"), 11 digits starting with `YYMMDD`
    pub ci: String,
    pub email: String,
    pub phone: String,
}

/// A profile whose every field passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
}

impl ProfileForm {
    /// Validates every field of the form.
    ///
    /// # Errors
    /// Returns the first error of each failing field.
    pub fn validate(&self) -> Result<ValidatedProfile, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = parse_id(&self.id);
        errors.check("id", id.clone().map(|_| ()));
        errors.check(
            "first_name",
            required(&self.first_name, "First name is required"),
        );
        errors.check(
            "last_name",
            required(&self.last_name, "Last name is required"),
        );
        errors.check("ci", validate_national_id(&self.ci));
        errors.check("email", validate_email(&self.email));
        errors.check("phone", validate_phone(&self.phone));

        match id {
            Ok(id) if errors.is_empty() => Ok(ValidatedProfile {
                id,
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                national_id: self.ci.clone(),
                email: self.email.trim().to_string(),
                phone: self.phone.clone(),
            }),
            _ => Err(errors),
        }
    }
}

impl ValidatedProfile {
    /// Form representation sent over the wire.
    #[must_use]
    pub fn to_form(&self) -> ProfileForm {
        ProfileForm {
            id: self.id.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            ci: self.national_id.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

fn parse_id(id: &str) -> Result<i64, String> {
    required(id, "Profile id is required")?;
    id.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| "Profile id is not valid".to_string())
}

/// Length, then digits, then the embedded birth date.
fn validate_national_id(ci: &str) -> Result<(), String> {
    if ci.chars().count() != national_id::NATIONAL_ID_LEN {
        return Err("Must have 11 digits".to_string());
    }
    digits_only(ci, "Only digits allowed")?;
    national_id::check(ci).map(|_| ()).map_err(|e| e.to_string())
}

fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().validate_email() {
        Ok(())
    } else {
        Err("Invalid email".to_string())
    }
}

// Phone numbers are not national IDs: no birth date check here.
fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.chars().count() < PHONE_MIN_LEN {
        return Err("Phone number is not valid".to_string());
    }
    digits_only(phone, "Phone number must contain only digits")
}
