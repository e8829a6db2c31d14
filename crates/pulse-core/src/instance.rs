// File: crates/pulse-core/src/instance.rs
// Summary: Per-chart scoping token for generated definition ids (gradients, clip paths).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Unique per chart construction within the process. Every def id a chart
/// emits embeds this token so two charts in one document never share ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Short lowercase token, e.g. `c1f`.
    pub fn token(&self) -> String {
        format!("c{:x}", self.0)
    }

    /// Scoped id for a generated definition.
    pub fn scoped(&self, kind: &str, key: &str) -> String {
        let key: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if key.is_empty() {
            format!("pulse-{}-{}", self.token(), kind)
        } else {
            format!("pulse-{}-{}-{}", self.token(), kind, key)
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}
