use url::Url;

use crate::error::{Result, StabilityError};

/// Resolve the JSON API endpoint of a Jenkins resource (server, job or build).
pub fn api_json_url(resource_url: &str) -> Result<Url> {
    let mut url = Url::parse(resource_url)
        .map_err(|e| StabilityError::InvalidUrl(format!("'{resource_url}': {e}")))?;

    // Jenkins resource URLs are directories; without the slash `join` drops the last segment
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.join("api/json")
        .map_err(|e| StabilityError::InvalidUrl(format!("API endpoint for '{resource_url}': {e}")))
}
