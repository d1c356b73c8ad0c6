//! Synthesis metrics.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const PLANS_GENERATED_TOTAL: &str = "motion_plans_generated_total";
    pub const REMOTE_FAILURES_TOTAL: &str = "motion_remote_failures_total";
    pub const REMOTE_DURATION_SECONDS: &str = "motion_remote_duration_seconds";
    pub const INTERNAL_FAILURES_TOTAL: &str = "motion_internal_synthesis_failures_total";
    pub const BRIEFS_REJECTED_TOTAL: &str = "motion_briefs_rejected_total";
}

/// Record a plan returned to a caller, labelled by the path that produced it.
pub fn record_plan_generated(path: &'static str) {
    counter!(names::PLANS_GENERATED_TOTAL, "path" => path).increment(1);
}

/// Record a failed remote attempt.
pub fn record_remote_failure(reason: &'static str) {
    counter!(names::REMOTE_FAILURES_TOTAL, "reason" => reason).increment(1);
}

/// Record how long a remote attempt took, whatever its outcome.
pub fn record_remote_duration(duration_secs: f64) {
    histogram!(names::REMOTE_DURATION_SECONDS).record(duration_secs);
}

pub fn record_internal_failure() {
    counter!(names::INTERNAL_FAILURES_TOTAL).increment(1);
}

pub fn record_brief_rejected(kind: &'static str) {
    counter!(names::BRIEFS_REJECTED_TOTAL, "kind" => kind).increment(1);
}
