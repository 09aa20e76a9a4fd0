use serde::Deserialize;

use super::JenkinsClient;
use crate::error::Result;
use crate::models::Job;
use crate::providers::jenkins::url_utils::api_json_url;

#[derive(Debug, Deserialize)]
pub struct JobListDto {
    #[serde(default)]
    pub jobs: Option<Vec<JobDto>>,
}

#[derive(Debug, Deserialize)]
pub struct JobDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl From<JobDto> for Job {
    fn from(dto: JobDto) -> Self {
        Self {
            name: dto.name,
            url: dto.url,
        }
    }
}

impl JenkinsClient {
    /// Fetch every job listed on the server's front page, in server order.
    pub async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        let url = api_json_url(self.base_url.as_str())?;
        let list: JobListDto = self.get_json(url).await?;

        Ok(list
            .jobs
            .unwrap_or_default()
            .into_iter()
            .map(Job::from)
            .collect())
    }
}
