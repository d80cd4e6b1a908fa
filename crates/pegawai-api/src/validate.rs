//! Client-side input validation.
//!
//! Runs before any network call; a validation failure never reaches the
//! service layer. Messages match the ones users see in the app.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,13}$").expect("valid phone regex"));

/// Validates the login form: both fields present, email well-formed.
///
/// # Errors
/// Returns a validation error with the user-facing message.
pub fn login_input(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Email dan password harus diisi".to_string(),
        ));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(Error::Validation("Format email tidak valid".to_string()));
    }
    Ok(())
}

/// Validates a profile-form email.
///
/// # Errors
/// Returns a validation error with the user-facing message.
pub fn email(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Email harus diisi".to_string()));
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Err(Error::Validation("Format email tidak valid".to_string()));
    }
    Ok(())
}

/// Validates a full name: required, at least 3 characters.
///
/// # Errors
/// Returns a validation error with the user-facing message.
pub fn full_name(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Nama lengkap harus diisi".to_string()));
    }
    if trimmed.chars().count() < 3 {
        return Err(Error::Validation(
            "Nama lengkap minimal 3 karakter".to_string(),
        ));
    }
    Ok(())
}

/// Validates a phone number. Optional; when present it must be 10-13 digits
/// after stripping separators.
///
/// # Errors
/// Returns a validation error with the user-facing message.
pub fn phone(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !PHONE_RE.is_match(&digits) {
        return Err(Error::Validation(
            "format nomor telepon tidak valid".to_string(),
        ));
    }
    Ok(())
}

/// Validates the whole profile form, first failure wins.
///
/// # Errors
/// Returns a validation error with the user-facing message.
pub fn profile_form(form_email: &str, form_full_name: &str, form_phone: &str) -> Result<()> {
    email(form_email)?;
    full_name(form_full_name)?;
    phone(form_phone)?;
    Ok(())
}
