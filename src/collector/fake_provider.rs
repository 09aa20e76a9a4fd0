use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, StabilityError};
use crate::models::{Build, BuildResult, Job};
use crate::providers::CiProvider;

enum Reply {
    Builds(Vec<Build>),
    Status(u16),
    Transport,
}

pub struct FakeJob {
    job: Job,
    reply: Reply,
    delay: Duration,
}

impl FakeJob {
    /// A job whose `count` builds all succeeded at epoch millisecond 0.
    pub fn ok(name: &str, count: u64) -> Self {
        let builds = (1..=count)
            .map(|number| Build {
                number,
                url: format!("http://fake/job/{name}/{number}/"),
                result: BuildResult::Success,
                timestamp_ms: 0,
                duration_ms: 0,
                display_name: format!("#{number}"),
                building: false,
            })
            .collect();
        Self::with_builds(name, builds)
    }

    pub fn with_builds(name: &str, builds: Vec<Build>) -> Self {
        Self::new(name, Reply::Builds(builds))
    }

    pub fn status(name: &str, status: u16) -> Self {
        Self::new(name, Reply::Status(status))
    }

    /// Fails with a real connection-refused error.
    pub fn unreachable(name: &str) -> Self {
        Self::new(name, Reply::Transport)
    }

    pub fn delay_ms(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub fn without_url(mut self) -> Self {
        self.job.url.clear();
        self
    }

    fn new(name: &str, reply: Reply) -> Self {
        Self {
            job: Job {
                name: name.to_string(),
                url: format!("http://fake/job/{name}/"),
            },
            reply,
            delay: Duration::ZERO,
        }
    }
}

/// In-memory `CiProvider` that records how many fetches overlap.
pub struct FakeProvider {
    name: String,
    jobs: Vec<FakeJob>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeProvider {
    pub fn new(name: &str, jobs: Vec<FakeJob>) -> Self {
        Self {
            name: name.to_string(),
            jobs,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.iter().map(|fake| fake.job.clone()).collect()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CiProvider for FakeProvider {
    fn instance_name(&self) -> &str {
        &self.name
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.jobs())
    }

    async fn fetch_builds(&self, job: &Job) -> Result<Vec<Build>> {
        let fake = self
            .jobs
            .iter()
            .find(|fake| fake.job.name == job.name)
            .ok_or_else(|| StabilityError::Config(format!("unknown job {}", job.name)))?;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(fake.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &fake.reply {
            Reply::Builds(builds) => Ok(builds.clone()),
            Reply::Status(status) => Err(StabilityError::Api {
                url: job.url.clone(),
                status: reqwest::StatusCode::from_u16(*status)
                    .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            }),
            Reply::Transport => Err(reqwest::get("http://127.0.0.1:1/").await.unwrap_err().into()),
        }
    }
}
