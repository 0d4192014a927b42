//! Gitea client
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::Serialize;
use urlencoding::encode;

use super::{
    response::{handle_response, ApiResponse},
    GITEA_API_PATH,
};
use crate::{credentials::Credential, errors::GitBackupError, utils::is_url};

/// Visibility of a new organization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone
    #[default]
    Public,
    /// Visible to members only
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Body of the organization creation
#[derive(Serialize, Debug)]
struct CreateOrgOption<'a> {
    /// Name of the organization
    username: &'a str,
    /// Visibility of the organization
    visibility: Visibility,
}

/// Body of the migration request
#[derive(Serialize, Debug)]
struct MigrateRepoOptions<'a> {
    /// Address gitea clones from
    clone_addr: &'a str,
    /// Name of the new repository
    repo_name: &'a str,
    /// Owner of the new repository
    repo_owner: &'a str,
    /// Keep the repository in sync with its origin
    mirror: bool,
    /// Make the repository private
    private: bool,
    /// Include the wiki
    wiki: bool,
}

/// Authenticated client for a Gitea instance
#[derive(Debug, Clone)]
pub struct GiteaClient {
    /// Base URL of the instance
    instance: String,

    /// Gitea token
    token: String,

    /// Reqwest client
    client: reqwest::Client,
}

impl GiteaClient {
    /// Create a new client for the instance of the credential
    /// # Errors
    /// Error if the instance or the token is empty, or if the http client can't be built
    pub fn new(credential: &Credential, user_agent: &str) -> Result<Self, GitBackupError> {
        if credential.instance_url.is_empty() {
            return Err("instance cannot be empty".into());
        }
        if credential.token.is_empty() {
            return Err("token cannot be empty".into());
        }
        let instance = if is_url(&credential.instance_url) {
            credential.instance_url.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", credential.instance_url.trim_end_matches('/'))
        };
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            instance,
            token: credential.token.clone(),
            client,
        })
    }

    /// Base URL of the instance
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Build the URL of an API route
    fn api_url(&self, route: &str) -> String {
        format!("{}/{GITEA_API_PATH}/{route}", self.instance)
    }

    /// Add the headers shared by every call
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request and read its body
    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, GitBackupError> {
        let response = self.authorized(request).send().await?;
        handle_response(response).await
    }

    /// Get an organization
    /// # Errors
    /// Error on transport failure
    pub async fn get_organization(&self, name: &str) -> Result<ApiResponse, GitBackupError> {
        let url = self.api_url(&format!("orgs/{}", encode(name)));
        self.send(self.client.get(url)).await
    }

    /// Create an organization
    /// # Errors
    /// Error on transport failure
    pub async fn create_organization(
        &self,
        name: &str,
        visibility: Visibility,
    ) -> Result<ApiResponse, GitBackupError> {
        let url = self.api_url("orgs");
        let body = CreateOrgOption {
            username: name,
            visibility,
        };
        self.send(self.client.post(url).json(&body)).await
    }

    /// Get a repository
    /// # Errors
    /// Error on transport failure
    pub async fn get_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<ApiResponse, GitBackupError> {
        let url = self.api_url(&format!("repos/{}/{}", encode(owner), encode(name)));
        self.send(self.client.get(url)).await
    }

    /// Get the user owning the token
    /// # Errors
    /// Error on transport failure
    pub async fn get_user(&self) -> Result<ApiResponse, GitBackupError> {
        let url = self.api_url("user");
        self.send(self.client.get(url)).await
    }

    /// Ask gitea to clone a remote repository
    /// # Errors
    /// Error on transport failure
    pub async fn migrate_repository(
        &self,
        clone_addr: &str,
        owner: &str,
        name: &str,
        private: bool,
        mirror: bool,
        wiki: bool,
    ) -> Result<ApiResponse, GitBackupError> {
        let url = self.api_url("repos/migrate");
        let body = MigrateRepoOptions {
            clone_addr,
            repo_name: name,
            repo_owner: owner,
            mirror,
            private,
            wiki,
        };
        self.send(self.client.post(url).json(&body)).await
    }
}
