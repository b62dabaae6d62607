pub mod comment;
pub mod issue;
pub mod officer;
pub mod status;
pub mod user;
