//! Declarative field constraints.
//!
//! A [`Validator`] collects `(field, message)` pairs; an empty collection
//! means the input is valid. Rules for one field stop at the first failure,
//! so an empty title reports only that it is required.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinChars(usize),
    MaxChars(usize),
    ExactChars(usize),
    OneOf(&'static [&'static str]),
}

impl Rule {
    fn check(self, field: &str, value: &str) -> Option<String> {
        let chars = value.chars().count();
        match self {
            Self::Required if value.is_empty() => Some(format!("{field} is required")),
            Self::MinChars(min) if chars < min => {
                Some(format!("{field} must be at least {min} characters"))
            }
            Self::MaxChars(max) if chars > max => {
                Some(format!("{field} must be at most {max} characters"))
            }
            Self::ExactChars(len) if chars != len => {
                Some(format!("{field} must be exactly {len} characters"))
            }
            Self::OneOf(allowed) if !allowed.contains(&value) => {
                Some(format!("{field} must be one of: {}", allowed.join(" ")))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, field: &str, value: &str, rules: &[Rule]) -> &mut Self {
        if let Some(message) = rules.iter().find_map(|rule| rule.check(field, value)) {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Ids are required when zero or negative; a JSON body that omits the
    /// field deserializes to zero.
    pub fn required_id(&mut self, field: &str, value: i32) -> &mut Self {
        if value <= 0 {
            self.errors
                .push(FieldError::new(field, format!("{field} is required")));
        }
        self
    }

    #[must_use]
    pub fn finish(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }
}

/// Implemented by every input that must be checked before persistence.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_short_circuits_other_rules() {
        let errors = Validator::new()
            .text("title", "", &[Rule::Required, Rule::MinChars(3)])
            .finish();
        assert_eq!(errors, vec![FieldError::new("title", "title is required")]);
    }

    #[test]
    fn length_bounds_count_characters_not_bytes() {
        let errors = Validator::new()
            .text("title", "äöü", &[Rule::MinChars(3), Rule::MaxChars(3)])
            .finish();
        assert!(errors.is_empty());

        let errors = Validator::new()
            .text("title", "ab", &[Rule::MinChars(3)])
            .finish();
        assert_eq!(errors[0].message, "title must be at least 3 characters");
    }

    #[test]
    fn exact_length_and_membership() {
        let errors = Validator::new()
            .text("color", "#FFF", &[Rule::ExactChars(7)])
            .text("priority", "urgent", &[Rule::OneOf(&["low", "high"])])
            .finish();
        assert_eq!(
            errors,
            vec![
                FieldError::new("color", "color must be exactly 7 characters"),
                FieldError::new("priority", "priority must be one of: low high"),
            ]
        );
    }

    #[test]
    fn zero_id_is_missing() {
        let errors = Validator::new()
            .required_id("user_id", 0)
            .required_id("issue_id", 4)
            .finish();
        assert_eq!(errors, vec![FieldError::new("user_id", "user_id is required")]);
    }
}
