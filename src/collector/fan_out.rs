use futures::{stream, StreamExt};
use log::{info, warn};

use crate::error::Result;
use crate::models::{Build, Job};
use crate::providers::CiProvider;

#[derive(Debug)]
pub struct JobOutcome {
    pub job: Job,
    pub result: Result<Vec<Build>>,
}

/// Fetch the builds of every job with at most `max_concurrency` requests
/// in flight. Returns once every job has finished, in completion order.
pub async fn fan_out<P>(provider: &P, jobs: Vec<Job>, max_concurrency: usize) -> Vec<JobOutcome>
where
    P: CiProvider + ?Sized,
{
    let workers = jobs.len().min(max_concurrency).max(1);
    info!(
        "[{}] Fetching builds for {} jobs with {workers} workers",
        provider.instance_name(),
        jobs.len()
    );

    stream::iter(jobs)
        .map(|job| fetch_job(provider, job))
        .buffer_unordered(workers)
        .collect()
        .await
}

async fn fetch_job<P>(provider: &P, job: Job) -> JobOutcome
where
    P: CiProvider + ?Sized,
{
    let result = provider.fetch_builds(&job).await;
    if let Err(e) = &result {
        warn!(
            "[{}] Failed to fetch builds for {}: {e}",
            provider.instance_name(),
            job.name
        );
    }

    JobOutcome { job, result }
}
