//! GitHub API module.
pub(crate) mod repo;
pub(crate) mod source;

pub use repo::SourceRepository;
pub use source::GithubSource;

/// GitHub API Header
const GITHUB_API_HEADER: &str = "X-GitHub-Api-Version";

/// GitHub API Version
const GITHUB_API_VERSION: &str = "2022-11-28";
