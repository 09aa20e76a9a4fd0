use log::error;

use super::fan_out::JobOutcome;
use crate::config::FailurePolicy;
use crate::error::Result;
use crate::insights::JobFailure;
use crate::models::JobBuilds;

#[derive(Debug, Default)]
pub struct InstanceBuilds {
    pub records: Vec<JobBuilds>,
    pub failures: Vec<JobFailure>,
}

/// Merge the outcomes of one instance's fan-out.
///
/// A job with no builds is a valid, empty record. A failed job either aborts
/// the instance (returning that job's error unchanged) or is reported as
/// unavailable, depending on `policy`.
pub fn aggregate(
    instance: &str,
    outcomes: Vec<JobOutcome>,
    policy: FailurePolicy,
) -> Result<InstanceBuilds> {
    let mut collected = InstanceBuilds::default();

    for JobOutcome { job, result } in outcomes {
        match (result, policy) {
            (Ok(builds), _) => collected.records.push(JobBuilds {
                instance: instance.to_string(),
                job,
                builds,
            }),
            (Err(e), FailurePolicy::Abort) => {
                error!("[{instance}] Aborting collection, job {} failed: {e}", job.name);
                return Err(e);
            }
            (Err(e), FailurePolicy::Isolate) => collected.failures.push(JobFailure {
                instance: instance.to_string(),
                job: job.name,
                reason: e.to_string(),
            }),
        }
    }

    collected.failures.sort_by(|a, b| a.job.cmp(&b.job));

    Ok(collected)
}
