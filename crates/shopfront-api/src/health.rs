//! Backend health report and the latency-based cache guess.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Body of `GET /health_check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub checks: BTreeMap<String, HealthCheck>,
    /// Top-level fields the client does not model (version, timestamp, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HealthReport {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        is_up_word(&self.status)
    }

    /// Names of sub-checks that report a non-healthy status.
    #[must_use]
    pub fn failing_checks(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|(_, check)| check.status.as_deref().is_some_and(|s| !is_up_word(s)))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// One named sub-check. Every field is optional; checks report whichever of
/// latency, pool usage or up/down they have.
///
/// A check may also be a bare status string (`"db": "up"`) or a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CheckRepr")]
pub struct HealthCheck {
    pub status: Option<String>,
    pub latency_ms: Option<f64>,
    pub pool: Option<PoolStats>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HealthCheck {
    fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            latency_ms: None,
            pool: None,
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CheckRepr {
    Status(String),
    Flag(bool),
    Detailed {
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        latency_ms: Option<f64>,
        #[serde(default)]
        pool: Option<PoolStats>,
        #[serde(flatten)]
        extra: BTreeMap<String, serde_json::Value>,
    },
}

impl From<CheckRepr> for HealthCheck {
    fn from(repr: CheckRepr) -> Self {
        match repr {
            CheckRepr::Status(status) => Self::with_status(status),
            CheckRepr::Flag(up) => Self::with_status(if up { "up" } else { "down" }),
            CheckRepr::Detailed {
                status,
                latency_ms,
                pool,
                extra,
            } => Self {
                status,
                latency_ms,
                pool,
                extra,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub checked_out: Option<u32>,
    #[serde(default)]
    pub utilization_percent: Option<f64>,
}

impl PoolStats {
    /// Reported utilization, or `checked_out / size` when only the raw
    /// counts are present.
    #[must_use]
    pub fn utilization(&self) -> Option<f64> {
        self.utilization_percent.or_else(|| match (self.checked_out, self.size) {
            (Some(used), Some(size)) if size > 0 => {
                Some(f64::from(used) / f64::from(size) * 100.0)
            }
            _ => None,
        })
    }
}

fn is_up_word(status: &str) -> bool {
    matches!(
        status.to_ascii_lowercase().as_str(),
        "ok" | "up" | "healthy" | "pass"
    )
}

/// Guess, from round-trip latency alone, whether a response came from a
/// backend cache. This is not a cache status signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheGuess {
    LikelyCached,
    LikelyUncached,
}

impl CacheGuess {
    #[must_use]
    pub fn from_latency(elapsed: Duration, threshold: Duration) -> Self {
        if elapsed < threshold {
            CacheGuess::LikelyCached
        } else {
            CacheGuess::LikelyUncached
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CacheGuess::LikelyCached => "likely cached",
            CacheGuess::LikelyUncached => "likely uncached",
        }
    }
}

/// A response paired with how long the request took.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    #[must_use]
    pub fn cache_guess(&self, threshold: Duration) -> CacheGuess {
        CacheGuess::from_latency(self.elapsed, threshold)
    }
}
