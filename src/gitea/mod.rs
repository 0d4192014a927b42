//! Gitea API module.
pub(crate) mod client;
pub(crate) mod response;

pub use client::{GiteaClient, Visibility};
pub use response::ApiResponse;

/// Prefix of every Gitea API route
const GITEA_API_PATH: &str = "api/v1";
