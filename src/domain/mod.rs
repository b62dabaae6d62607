//! Domain types for the issue tracker with strong typing.
//!
//! Identifier newtypes keep issue, status, officer, user and comment ids from
//! being mixed up at service boundaries. Field validation lives in
//! [`validation`] and the validated inputs in [`drafts`].

pub mod drafts;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Primary key of an issue.
    IssueId
);
entity_id!(
    /// Primary key of a workflow status.
    StatusId
);
entity_id!(
    /// Primary key of an officer.
    OfficerId
);
entity_id!(
    /// Primary key of a reporting user.
    UserId
);
entity_id!(CommentId);

/// Relations to eager-load alongside an issue.
///
/// Each read path names exactly what it returns instead of loading every
/// relation by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct IssueIncludes {
    pub reporter: bool,
    pub assignee: bool,
    pub status: bool,
    pub status_history: bool,
    pub comments: bool,
}

impl IssueIncludes {
    pub const NONE: Self = Self {
        reporter: false,
        assignee: false,
        status: false,
        status_history: false,
        comments: false,
    };

    /// Listing and post-mutation responses.
    pub const SUMMARY: Self = Self {
        reporter: true,
        assignee: true,
        status: true,
        status_history: false,
        comments: true,
    };

    /// Single-issue reads.
    pub const DETAIL: Self = Self {
        status_history: true,
        ..Self::SUMMARY
    };
}
