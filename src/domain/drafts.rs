//! Validated inputs for the write paths.

use super::validation::{FieldError, Rule, Validate, Validator};
use crate::entities::issues::Priority;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 255;
pub const ISSUE_DESCRIPTION_MAX: usize = 5000;
pub const COMMENT_MIN: usize = 1;
pub const COMMENT_MAX: usize = 2000;

/// Every field of an issue a caller controls, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    pub reporter_id: i32,
    pub assignee_id: Option<i32>,
    pub status_id: i32,
    pub title: String,
    pub description: String,
    pub priority: String,
}

impl IssueDraft {
    /// Only meaningful once [`Validate::validate`] returned no errors.
    #[must_use]
    pub fn priority(&self) -> Priority {
        Priority::parse(&self.priority).unwrap_or_default()
    }
}

impl Validate for IssueDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut v = Validator::new();
        v.required_id("reporter_id", self.reporter_id)
            .required_id("status_id", self.status_id)
            .text(
                "title",
                &self.title,
                &[
                    Rule::Required,
                    Rule::MinChars(TITLE_MIN),
                    Rule::MaxChars(TITLE_MAX),
                ],
            )
            .text(
                "description",
                &self.description,
                &[Rule::MaxChars(ISSUE_DESCRIPTION_MAX)],
            )
            .text(
                "priority",
                &self.priority,
                &[Rule::Required, Rule::OneOf(&Priority::NAMES)],
            );
        if let Some(assignee_id) = self.assignee_id {
            v.required_id("assignee_id", assignee_id);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub issue_id: i32,
    pub user_id: i32,
    pub content: String,
}

impl Validate for CommentDraft {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .required_id("issue_id", self.issue_id)
            .required_id("user_id", self.user_id)
            .text(
                "content",
                &self.content,
                &[
                    Rule::Required,
                    Rule::MinChars(COMMENT_MIN),
                    Rule::MaxChars(COMMENT_MAX),
                ],
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDraft {
    pub status_code: String,
    pub display_name: String,
    pub description: String,
    pub color: String,
    pub display_order: i32,
    pub is_active: bool,
}

impl Validate for StatusDraft {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .text(
                "status_code",
                &self.status_code,
                &[Rule::Required, Rule::MinChars(2), Rule::MaxChars(50)],
            )
            .text(
                "display_name",
                &self.display_name,
                &[Rule::Required, Rule::MinChars(2), Rule::MaxChars(100)],
            )
            .text("description", &self.description, &[Rule::MaxChars(1000)])
            .text("color", &self.color, &[Rule::Required, Rule::ExactChars(7)])
            .finish()
    }
}

/// A user or officer; both carry only a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub full_name: String,
}

impl Validate for PersonDraft {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .text(
                "full_name",
                &self.full_name,
                &[Rule::Required, Rule::MinChars(2), Rule::MaxChars(255)],
            )
            .finish()
    }
}
