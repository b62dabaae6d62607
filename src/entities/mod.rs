pub mod prelude;

pub mod comments;
pub mod issue_status_history;
pub mod issue_statuses;
pub mod issues;
pub mod officers;
pub mod users;
