use std::time::Duration;

use crate::{parse_or, process_env};

/// Bounds applied to a batch run.
///
/// # Environment Variables
///
/// - `BATCH_MAX_CONCURRENCY`: students processed at once (default: `4`, minimum `1`)
/// - `FETCH_TIMEOUT_SECS`: timeout of a single provider call (default: `15`)
/// - `BATCH_DEADLINE_SECS`: deadline for the whole batch (default: `300`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    pub max_concurrency: usize,
    pub fetch_timeout: Duration,
    pub deadline: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            fetch_timeout: Duration::from_secs(15),
            deadline: Duration::from_secs(300),
        }
    }
}

impl BatchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_concurrency: parse_or(&lookup, "BATCH_MAX_CONCURRENCY", defaults.max_concurrency)
                .max(1),
            fetch_timeout: Duration::from_secs(parse_or(
                &lookup,
                "FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )),
            deadline: Duration::from_secs(parse_or(
                &lookup,
                "BATCH_DEADLINE_SECS",
                defaults.deadline.as_secs(),
            )),
        }
    }

    /// Strictly one student at a time.
    pub fn sequential() -> Self {
        Self {
            max_concurrency: 1,
            ..Self::default()
        }
    }
}
