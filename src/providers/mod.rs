pub mod jenkins;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Build, Job};

#[async_trait]
pub trait CiProvider: Send + Sync {
    fn instance_name(&self) -> &str;

    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Fetch the visible build history of `job`, one detail record per build.
    async fn fetch_builds(&self, job: &Job) -> Result<Vec<Build>>;
}
