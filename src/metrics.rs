mod counter;
mod rate;
mod window;

pub use counter::{StabilityCounters, WindowCounter};
pub use window::WindowBounds;

use crate::insights::JobStability;
use crate::models::JobBuilds;

/// Fold every build into the windows its timestamp falls into.
pub fn tally(records: &[JobBuilds], bounds: &WindowBounds) -> StabilityCounters {
    let mut counters = StabilityCounters::default();

    for record in records {
        for build in &record.builds {
            for window in bounds.windows_containing(build.timestamp_ms) {
                counters.record(&record.instance, &record.job, window, &build.result);
            }
        }
    }

    counters
}

/// Flatten the counters into report rows, sorted by instance then job.
pub fn emit(counters: &StabilityCounters) -> Vec<JobStability> {
    counters
        .iter()
        .map(|(instance, job, job_counters)| JobStability {
            instance: instance.to_string(),
            job: job.to_string(),
            job_url: job_counters.job_url.clone(),
            today: job_counters.today.as_ref().map(WindowCounter::stats),
            month: job_counters.month.as_ref().map(WindowCounter::stats),
        })
        .collect()
}
