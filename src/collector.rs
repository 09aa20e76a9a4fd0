mod aggregate;
mod fan_out;

#[cfg(test)]
mod fake_provider;

use std::future::Future;

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, error, info, warn};

pub use aggregate::{aggregate, InstanceBuilds};
pub use fan_out::fan_out;

use crate::config::{FailurePolicy, Settings};
use crate::error::Result;
use crate::insights::{InstanceFailure, StabilitySnapshot};
use crate::metrics::{self, WindowBounds};
use crate::models::Instance;
use crate::providers::jenkins::JenkinsProvider;
use crate::providers::CiProvider;

pub struct Collector {
    settings: Settings,
}

impl Collector {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Build a snapshot whose windows end at `now`.
    ///
    /// `now` is read once here; every build of every instance is compared
    /// against the same bounds.
    pub fn collect<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> impl Future<Output = Result<StabilitySnapshot>> + '_ {
        let bounds = WindowBounds::at(now);
        let collected_at = now.with_timezone(&Utc);
        self.collect_within(bounds, collected_at)
    }

    async fn collect_within(
        &self,
        bounds: WindowBounds,
        collected_at: DateTime<Utc>,
    ) -> Result<StabilitySnapshot> {
        let instances = &self.settings.instances;
        info!("Collecting release stability from {} instances", instances.len());

        let mut records = Vec::new();
        let mut unavailable_jobs = Vec::new();
        let mut unavailable_instances = Vec::new();
        let mut skipped_instances = Vec::new();

        for instance in instances {
            let collected = match self.collect_from(instance).await {
                Ok(collected) => collected,
                Err(e) if self.settings.failure_policy == FailurePolicy::Isolate => {
                    error!("[{}] Instance unavailable: {e}", instance.name);
                    unavailable_instances.push(InstanceFailure {
                        instance: instance.name.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            match collected {
                Some(builds) => {
                    records.extend(builds.records);
                    unavailable_jobs.extend(builds.failures);
                }
                None => skipped_instances.push(instance.name.clone()),
            }
        }

        let counters = metrics::tally(&records, &bounds);
        if counters.is_empty() {
            info!("No builds fell into today or the current month");
        } else {
            debug!("Tallied builds for {} jobs", counters.len());
        }
        let release_stability = metrics::emit(&counters);

        info!(
            "Snapshot ready: {} jobs reported, {} unavailable, {} instances skipped, {} instances unavailable",
            release_stability.len(),
            unavailable_jobs.len(),
            skipped_instances.len(),
            unavailable_instances.len()
        );

        Ok(StabilitySnapshot {
            collected_at,
            instances_polled: instances.len(),
            skipped_instances,
            release_stability,
            unavailable_jobs,
            unavailable_instances,
        })
    }

    async fn collect_from(&self, instance: &Instance) -> Result<Option<InstanceBuilds>> {
        let provider = JenkinsProvider::new(instance, self.settings.request_timeout)?;

        collect_instance(
            &provider,
            self.settings.max_concurrency,
            self.settings.failure_policy,
        )
        .await
    }
}

/// Enumerate one instance's jobs, fetch their builds and merge the outcomes.
///
/// Returns `None` when the instance has nothing to aggregate: no jobs, or a
/// job listed without a URL.
pub async fn collect_instance<P>(
    provider: &P,
    max_concurrency: usize,
    policy: FailurePolicy,
) -> Result<Option<InstanceBuilds>>
where
    P: CiProvider + ?Sized,
{
    let name = provider.instance_name();
    info!("Fetching jobs from instance [{name}]...");

    let jobs = provider.list_jobs().await?;

    if jobs.is_empty() {
        warn!("Instance [{name}] lists no jobs, skipping");
        return Ok(None);
    }

    if let Some(job) = jobs.iter().find(|job| job.url.is_empty()) {
        warn!("Instance [{name}] lists job '{}' without a URL, skipping", job.name);
        return Ok(None);
    }

    let outcomes = fan_out(provider, jobs, max_concurrency).await;

    aggregate(name, outcomes, policy).map(Some)
}
