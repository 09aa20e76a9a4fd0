mod client;
mod provider;
mod url_utils;

pub use provider::JenkinsProvider;
