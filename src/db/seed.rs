//! Starter rows so a fresh database is usable: one reporter, one officer and
//! the three default workflow statuses. Running it again inserts nothing.

use anyhow::{Result, bail};
use tracing::info;

use super::Store;
use crate::domain::drafts::{PersonDraft, StatusDraft};
use crate::domain::validation::Validate;

const DEFAULT_USER: &str = "John Doe";
const DEFAULT_OFFICER: &str = "Jane Smith";

const DEFAULT_STATUSES: [(&str, &str, &str, &str, i32); 3] = [
    ("open", "Open", "Issue is open and pending review", "#FF0000", 1),
    ("in-progress", "In Progress", "Issue is being worked on", "#FFA500", 2),
    ("closed", "Closed", "Issue is closed", "#00FF00", 3),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub officers: usize,
    pub statuses: usize,
}

impl SeedReport {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.users + self.officers + self.statuses
    }
}

pub async fn seed_defaults(store: &Store) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if store.find_user_by_name(DEFAULT_USER).await?.is_none() {
        let draft = PersonDraft {
            full_name: DEFAULT_USER.to_string(),
        };
        ensure_valid(&draft, "user")?;
        store.create_user(&draft).await?;
        report.users += 1;
    }

    if store.find_officer_by_name(DEFAULT_OFFICER).await?.is_none() {
        let draft = PersonDraft {
            full_name: DEFAULT_OFFICER.to_string(),
        };
        ensure_valid(&draft, "officer")?;
        store.create_officer(&draft).await?;
        report.officers += 1;
    }

    for (code, name, description, color, order) in DEFAULT_STATUSES {
        if store.get_status_by_code(code).await?.is_some() {
            continue;
        }
        let draft = StatusDraft {
            status_code: code.to_string(),
            display_name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            display_order: order,
            is_active: true,
        };
        ensure_valid(&draft, "status")?;
        store.create_status(&draft).await?;
        report.statuses += 1;
    }

    info!(
        users = report.users,
        officers = report.officers,
        statuses = report.statuses,
        "Seeded default data"
    );

    Ok(report)
}

fn ensure_valid(draft: &impl Validate, kind: &str) -> Result<()> {
    let errors = draft.validate();
    if let Some(first) = errors.first() {
        bail!("Invalid default {kind}: {}", first.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::temp_store;

    #[tokio::test]
    async fn seeding_twice_inserts_once() {
        let store = temp_store().await;

        let first = store.seed_defaults().await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                users: 1,
                officers: 1,
                statuses: 3
            }
        );

        let second = store.seed_defaults().await.unwrap();
        assert_eq!(second.total(), 0);

        for (code, order) in ["open", "in-progress", "closed"].into_iter().zip(1..) {
            let status = store.get_status_by_code(code).await.unwrap().unwrap();
            assert_eq!(status.display_order, order);
        }
    }
}
