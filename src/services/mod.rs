pub mod error;
pub use error::ServiceError;

pub mod issue_service;
pub mod issue_service_impl;
pub use issue_service::{IssueInput, IssueService};
pub use issue_service_impl::SeaOrmIssueService;

pub mod status_transition_service;
pub mod status_transition_service_impl;
pub use status_transition_service::StatusTransitionService;
pub use status_transition_service_impl::SeaOrmStatusTransitionService;

pub mod comment_service;
pub mod comment_service_impl;
pub use comment_service::CommentService;
pub use comment_service_impl::SeaOrmCommentService;

pub mod officer_service;
pub use officer_service::{OfficerService, SeaOrmOfficerService};
