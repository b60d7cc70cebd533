use super::Field;
use crate::{stmt::Value, Result};

use regex::Regex;
use std::sync::OnceLock;

impl Field {
    pub(super) fn check_string<'a>(&self, value: &'a Value) -> Result<&'a str> {
        value
            .as_str()
            .ok_or_else(|| self.error("invalid string value", value.clone()))
    }

    pub(super) fn check_constraints(&self, value: &Value) -> Result<()> {
        for constraint in &self.constraints {
            constraint.check(self, value)?;
        }

        Ok(())
    }

    pub(super) fn check_email(&self, value: &str) -> Result<()> {
        static EMAIL: OnceLock<Regex> = OnceLock::new();

        let email = EMAIL.get_or_init(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("valid regex"));

        if !email.is_match(value) {
            return Err(self.error("invalid email value", value));
        }

        Ok(())
    }

    pub(super) fn check_phone(&self, value: &str) -> Result<()> {
        match phonenumber::parse(None, value) {
            Ok(number) if phonenumber::is_valid(&number) => Ok(()),
            _ => Err(self.error("invalid phone number", value)),
        }
    }

    /// Requires at least one digit, one lower case and one upper case
    /// character. The error lists every missing class.
    pub(super) fn check_password_strength(&self, value: &str) -> Result<()> {
        let mut missing = vec![];

        if !value.chars().any(|c| c.is_ascii_digit()) {
            missing.push("1 numbers");
        }

        if !value.chars().any(|c| c.is_ascii_lowercase()) {
            missing.push("1 lower case characters");
        }

        if !value.chars().any(|c| c.is_ascii_uppercase()) {
            missing.push("1 upper case characters");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(self.error(missing.join(", "), ""))
        }
    }

    pub(super) fn check_uuid(&self, value: &Value) -> Result<()> {
        match value.as_str() {
            Some(text) if text.chars().count() == 36 => Ok(()),
            _ => Err(self.error("invalid uuid value", value.clone())),
        }
    }
}
