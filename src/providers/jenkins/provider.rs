use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};

use super::client::JenkinsClient;
use crate::error::Result;
use crate::models::{Build, Instance, Job};
use crate::providers::CiProvider;

pub struct JenkinsProvider {
    name: String,
    client: JenkinsClient,
}

impl JenkinsProvider {
    pub fn new(instance: &Instance, request_timeout: Duration) -> Result<Self> {
        let client = JenkinsClient::new(
            instance.base_url.clone(),
            instance.credentials.clone(),
            request_timeout,
        )?;

        Ok(Self {
            name: instance.name.clone(),
            client,
        })
    }
}

#[async_trait]
impl CiProvider for JenkinsProvider {
    fn instance_name(&self) -> &str {
        &self.name
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.client.fetch_jobs().await
    }

    async fn fetch_builds(&self, job: &Job) -> Result<Vec<Build>> {
        let build_refs = self.client.fetch_build_refs(&job.url).await?;
        debug!(
            "[{}] {} lists {} builds",
            self.name,
            job.name,
            build_refs.len()
        );

        // One detail request per build; any failure fails the whole job
        let mut builds = Vec::with_capacity(build_refs.len());
        for build_ref in &build_refs {
            let build = self.client.fetch_build(build_ref).await?;
            trace!(
                "[{}] {} #{} {} ({}): {}{} in {}ms",
                self.name,
                job.name,
                build.number,
                build.display_name,
                build.url,
                build.result,
                if build.building { " (running)" } else { "" },
                build.duration_ms
            );
            builds.push(build);
        }

        Ok(builds)
    }
}
