pub use super::comments::Entity as Comments;
pub use super::issue_status_history::Entity as IssueStatusHistory;
pub use super::issue_statuses::Entity as IssueStatuses;
pub use super::issues::Entity as Issues;
pub use super::officers::Entity as Officers;
pub use super::users::Entity as Users;
