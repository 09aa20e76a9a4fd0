use std::collections::BTreeMap;

use log::debug;

use super::rate::percentage;
use super::window::Window;
use crate::insights::WindowStats;
use crate::models::{BuildResult, Job};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowCounter {
    pub success_count: usize,
    pub failure_count: usize,
    pub total_count: usize,
}

impl WindowCounter {
    /// Count one build. Results other than success/failure are ignored.
    pub fn record(&mut self, result: &BuildResult) -> bool {
        match result {
            BuildResult::Success => self.success_count += 1,
            BuildResult::Failure => self.failure_count += 1,
            BuildResult::Building | BuildResult::Other(_) => return false,
        }

        self.total_count = self.success_count + self.failure_count;
        true
    }

    /// Rates are derived from the raw counts on every call.
    pub fn stats(&self) -> WindowStats {
        WindowStats {
            success_count: self.success_count,
            failure_count: self.failure_count,
            total_count: self.total_count,
            success_rate: percentage(self.success_count, self.total_count),
            failure_rate: percentage(self.failure_count, self.total_count),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCounters {
    pub job_url: String,
    pub today: Option<WindowCounter>,
    pub month: Option<WindowCounter>,
}

impl JobCounters {
    fn window_mut(&mut self, window: Window) -> &mut WindowCounter {
        let slot = match window {
            Window::Today => &mut self.today,
            Window::CurrentMonth => &mut self.month,
        };
        slot.get_or_insert_with(WindowCounter::default)
    }
}

/// Counters keyed by `(instance, job)`; iteration is sorted by that key.
#[derive(Debug, Clone, Default)]
pub struct StabilityCounters {
    jobs: BTreeMap<(String, String), JobCounters>,
}

impl StabilityCounters {
    /// Count a build for one window, creating the counter on first sight.
    pub fn record(&mut self, instance: &str, job: &Job, window: Window, result: &BuildResult) {
        let counters = self
            .jobs
            .entry((instance.to_string(), job.name.clone()))
            .or_insert_with(|| JobCounters {
                job_url: job.url.clone(),
                ..JobCounters::default()
            });

        if !counters.window_mut(window).record(result) {
            debug!(
                "Unknown result for job {} in instance {}: {result}",
                job.name, instance
            );
        }
    }

    #[cfg(test)]
    pub fn get(&self, instance: &str, job: &str) -> Option<&JobCounters> {
        self.jobs.get(&(instance.to_string(), job.to_string()))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &JobCounters)> {
        self.jobs
            .iter()
            .map(|((instance, job), counters)| (instance.as_str(), job.as_str(), counters))
    }
}
