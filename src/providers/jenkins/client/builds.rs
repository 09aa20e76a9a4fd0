use serde::Deserialize;

use super::JenkinsClient;
use crate::error::Result;
use crate::models::{Build, BuildResult};
use crate::providers::jenkins::url_utils::api_json_url;

#[derive(Debug, Deserialize)]
pub struct BuildListDto {
    #[serde(default)]
    pub builds: Option<Vec<BuildRefDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildRefDto {
    pub number: u64,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDetailDto {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub result: Option<String>,
    pub timestamp: i64,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub building: bool,
}

impl BuildDetailDto {
    /// Fields the detail record omits are taken from the job's build list.
    fn into_build(self, build_ref: &BuildRefDto) -> Build {
        let url = if self.url.is_empty() {
            build_ref.url.clone()
        } else {
            self.url
        };

        Build {
            number: self.number.unwrap_or(build_ref.number),
            url,
            result: BuildResult::from_remote(self.result.as_deref()),
            timestamp_ms: self.timestamp,
            duration_ms: self.duration,
            display_name: self.display_name,
            building: self.building,
        }
    }
}

impl JenkinsClient {
    /// Fetch the build references visible on a job page (no pagination).
    pub async fn fetch_build_refs(&self, job_url: &str) -> Result<Vec<BuildRefDto>> {
        let url = api_json_url(job_url)?;
        let list: BuildListDto = self.get_json(url).await?;
        Ok(list.builds.unwrap_or_default())
    }

    pub async fn fetch_build(&self, build_ref: &BuildRefDto) -> Result<Build> {
        let url = api_json_url(&build_ref.url)?;
        let detail: BuildDetailDto = self.get_json(url).await?;
        Ok(detail.into_build(build_ref))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::auth::{Credentials, Secret};
    use crate::error::StabilityError;

    fn client_for(server_url: &str) -> JenkinsClient {
        JenkinsClient::new(
            Url::parse(server_url).unwrap(),
            Credentials::new("alice", Secret::from("secret")),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_build_refs_lists_numbers_and_urls() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _mock = server
            .mock("GET", "/job/build-x/api/json")
            .with_status(200)
            .with_body(format!(
                r#"{{
                    "name": "build-x",
                    "builds": [
                        {{"_class": "hudson.model.FreeStyleBuild", "number": 2, "url": "{base}/job/build-x/2/"}},
                        {{"_class": "hudson.model.FreeStyleBuild", "number": 1, "url": "{base}/job/build-x/1/"}}
                    ]
                }}"#
            ))
            .create_async()
            .await;

        let refs = client_for(&base)
            .fetch_build_refs(&format!("{base}/job/build-x/"))
            .await
            .unwrap();

        let numbers: Vec<_> = refs.iter().map(|r| r.number).collect();
        assert_eq!(numbers, [2, 1]);
        assert_eq!(refs[1].url, format!("{base}/job/build-x/1/"));
    }

    #[tokio::test]
    async fn test_fetch_build_refs_for_never_built_job() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _mock = server
            .mock("GET", "/job/fresh/api/json")
            .with_status(200)
            .with_body(r#"{"name": "fresh", "builds": []}"#)
            .create_async()
            .await;

        let refs = client_for(&base)
            .fetch_build_refs(&format!("{base}/job/fresh/"))
            .await
            .unwrap();

        assert!(refs.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_build_maps_detail_record() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _mock = server
            .mock("GET", "/job/build-x/7/api/json")
            .with_status(200)
            .with_body(
                r#"{
                    "_class": "hudson.model.FreeStyleBuild",
                    "building": false,
                    "displayName": "[7] release",
                    "duration": 93512,
                    "number": 7,
                    "result": "FAILURE",
                    "timestamp": 1710504000000
                }"#,
            )
            .create_async()
            .await;

        let build_ref = BuildRefDto {
            number: 7,
            url: format!("{base}/job/build-x/7/"),
        };
        let build = client_for(&base).fetch_build(&build_ref).await.unwrap();

        assert_eq!(build.number, 7);
        assert_eq!(build.result, BuildResult::Failure);
        assert_eq!(build.timestamp_ms, 1_710_504_000_000);
        assert_eq!(build.duration_ms, 93_512);
        assert_eq!(build.display_name, "[7] release");
        assert!(!build.building);
        assert_eq!(build.url, build_ref.url);
    }

    #[tokio::test]
    async fn test_fetch_build_in_progress_has_building_result() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _mock = server
            .mock("GET", "/job/build-x/8/api/json")
            .with_status(200)
            .with_body(
                r#"{"building": true, "displayName": "8", "duration": 0, "number": 8, "result": null, "timestamp": 1710505000000}"#,
            )
            .create_async()
            .await;

        let build_ref = BuildRefDto {
            number: 8,
            url: format!("{base}/job/build-x/8/"),
        };
        let build = client_for(&base).fetch_build(&build_ref).await.unwrap();

        assert_eq!(build.result, BuildResult::Building);
        assert!(build.building);
    }

    #[tokio::test]
    async fn test_fetch_build_without_number_uses_listed_number() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _mock = server
            .mock("GET", "/job/build-x/11/api/json")
            .with_status(200)
            .with_body(r#"{"result": "SUCCESS", "timestamp": 1710505000000}"#)
            .create_async()
            .await;

        let build_ref = BuildRefDto {
            number: 11,
            url: format!("{base}/job/build-x/11/"),
        };
        let build = client_for(&base).fetch_build(&build_ref).await.unwrap();

        assert_eq!(build.number, 11);
        assert_eq!(build.result, BuildResult::Success);
    }

    #[tokio::test]
    async fn test_fetch_build_times_out_as_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _mock = server
            .mock("GET", "/job/build-x/12/api/json")
            .with_status(200)
            .with_chunked_body(|writer| {
                std::thread::sleep(Duration::from_millis(1500));
                writer.write_all(br#"{"number": 12, "timestamp": 1710505000000}"#)
            })
            .create_async()
            .await;

        let client = JenkinsClient::new(
            Url::parse(&base).unwrap(),
            Credentials::new("alice", Secret::from("secret")),
            Duration::from_millis(300),
        )
        .unwrap();
        let build_ref = BuildRefDto {
            number: 12,
            url: format!("{base}/job/build-x/12/"),
        };
        let err = client.fetch_build(&build_ref).await.unwrap_err();

        match err {
            StabilityError::Transport(e) => assert!(e.is_timeout(), "{e:?}"),
            other => panic!("expected a timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_build_missing_timestamp_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _mock = server
            .mock("GET", "/job/build-x/9/api/json")
            .with_status(200)
            .with_body(r#"{"number": 9, "result": "SUCCESS"}"#)
            .create_async()
            .await;

        let build_ref = BuildRefDto {
            number: 9,
            url: format!("{base}/job/build-x/9/"),
        };
        let err = client_for(&base).fetch_build(&build_ref).await.unwrap_err();

        match err {
            StabilityError::Decode { url, .. } => {
                assert_eq!(url, format!("{base}/job/build-x/9/api/json"));
            }
            other => panic!("expected a decode error, got {other:?}"),
        }
    }
}
