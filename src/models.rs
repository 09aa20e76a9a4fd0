use std::fmt;

use url::Url;

use crate::auth::Credentials;

/// A configured CI server.
#[derive(Debug, Clone)]
pub struct Instance {
    pub name: String,
    pub base_url: Url,
    pub credentials: Credentials,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildResult {
    Success,
    Failure,
    /// No result reported yet.
    Building,
    Other(String),
}

impl BuildResult {
    pub fn from_remote(result: Option<&str>) -> Self {
        match result {
            None | Some("") => Self::Building,
            Some("SUCCESS") => Self::Success,
            Some("FAILURE") => Self::Failure,
            Some(other) => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
            Self::Building => write!(f, "Building"),
            Self::Other(result) => write!(f, "{result}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Build {
    pub number: u64,
    pub url: String,
    pub result: BuildResult,
    pub timestamp_ms: i64,
    pub duration_ms: u64,
    pub display_name: String,
    pub building: bool,
}

/// Every build fetched for one job of one instance.
#[derive(Debug, Clone)]
pub struct JobBuilds {
    pub instance: String,
    pub job: Job,
    pub builds: Vec<Build>,
}
