//! Runtime configuration read from the environment
//!
//! | Variable | Effect |
//! |---|---|
//! | `GITLET_STAGE_CONFLICTS` | stage conflicted merge paths with their marker content |
//! | `GITLET_COMMIT_DATE` | fixed timestamp for new commits (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) |
//! | `NO_PAGER` | never page `log` output |

use chrono::{DateTime, FixedOffset, Local};

const STAGE_CONFLICTS_VAR: &str = "GITLET_STAGE_CONFLICTS";
const COMMIT_DATE_VAR: &str = "GITLET_COMMIT_DATE";
const NO_PAGER_VAR: &str = "NO_PAGER";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Stage conflicted files during a merge instead of leaving them unstaged
    pub stage_conflicts: bool,
    /// Overrides the wall clock for every non-root commit
    pub commit_date: Option<DateTime<FixedOffset>>,
    /// Page `log` and `global-log` output when stdout is a terminal
    pub use_pager: bool,
}

impl Config {
    pub fn load_from_env() -> Self {
        Self::load_from(|name| std::env::var(name).ok())
    }

    fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let stage_conflicts = lookup(STAGE_CONFLICTS_VAR)
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let commit_date = lookup(COMMIT_DATE_VAR).and_then(|date_str| {
            let parsed = DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok();
            if parsed.is_none() {
                tracing::warn!(value = %date_str, "ignoring unparseable {}", COMMIT_DATE_VAR);
            }
            parsed
        });

        Config {
            stage_conflicts,
            commit_date,
            use_pager: lookup(NO_PAGER_VAR).is_none(),
        }
    }

    /// Timestamp for a commit created now
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| Local::now().fixed_offset())
    }
}
