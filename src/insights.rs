use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct StabilitySnapshot {
    pub collected_at: DateTime<Utc>,
    pub instances_polled: usize,
    pub skipped_instances: Vec<String>,
    pub release_stability: Vec<JobStability>,
    pub unavailable_jobs: Vec<JobFailure>,
    pub unavailable_instances: Vec<InstanceFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStability {
    pub instance: String,
    pub job: String,
    pub job_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<WindowStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<WindowStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub success_count: usize,
    pub failure_count: usize,
    pub total_count: usize,
    pub success_rate: f64,
    pub failure_rate: f64,
}

/// A job whose builds could not be fetched; its counters are unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFailure {
    pub instance: String,
    pub job: String,
    pub reason: String,
}

/// An instance whose job list could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceFailure {
    pub instance: String,
    pub reason: String,
}
