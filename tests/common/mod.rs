#![allow(dead_code)]
use std::collections::VecDeque;

use git_backup::{Credential, GitBackupError, GiteaClient, GithubSource, Prompter};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "secret-token";
pub const USER_AGENT: &str = "git-backup-tests";

/// Prompter answering from a fixed list
#[derive(Debug, Default)]
pub struct Answers {
    pub answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl Answers {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: vec![],
        }
    }

    fn next(&mut self, message: &str) -> Result<String, GitBackupError> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => Err(format!("unexpected question: {message}").into()),
        }
    }
}

impl Prompter for Answers {
    fn input(&mut self, message: &str) -> Result<String, GitBackupError> {
        self.next(message)
    }

    fn password(&mut self, message: &str) -> Result<String, GitBackupError> {
        self.next(message)
    }

    fn confirm(&mut self, message: &str) -> Result<bool, GitBackupError> {
        Ok(self.next(message)? == "y")
    }
}

pub fn source(server: &MockServer) -> GithubSource {
    GithubSource::new(&server.uri(), USER_AGENT)
}

pub fn gitea(server: &MockServer) -> GiteaClient {
    let credential = Credential {
        instance_url: server.uri(),
        token: TOKEN.to_string(),
    };
    GiteaClient::new(&credential, USER_AGENT).unwrap()
}

pub fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "errors": null,
        "message": "The target couldn't be found.",
        "url": "http://localhost/api/swagger"
    }))
}

pub fn github_repos(owner: &str, names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(id, name)| {
                json!({
                    "id": id,
                    "name": name,
                    "full_name": format!("{owner}/{name}"),
                    "clone_url": format!("https://src/{owner}/{name}"),
                    "fork": false
                })
            })
            .collect(),
    )
}

pub fn list_mock(owner: &str, body: Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/users/{owner}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

pub fn get_org_mock(org: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/orgs/{org}")))
        .and(header("authorization", format!("token {TOKEN}").as_str()))
        .respond_with(response)
}

pub fn existing_org(org: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"id": 7, "username": org}))
}

pub fn create_org_mock(org: &str, visibility: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/v1/orgs"))
        .and(body_json(json!({"username": org, "visibility": visibility})))
        .respond_with(response)
}

pub fn get_repo_mock(org: &str, name: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/repos/{org}/{name}")))
        .respond_with(response)
}

pub fn existing_repo(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"id": 42, "name": name}))
}

pub fn migrate_body(owner: &str, org: &str, name: &str) -> Value {
    migrate_body_with(owner, org, name, false, false, false)
}

pub fn migrate_body_with(
    owner: &str,
    org: &str,
    name: &str,
    private: bool,
    mirror: bool,
    wiki: bool,
) -> Value {
    json!({
        "clone_addr": format!("https://src/{owner}/{name}"),
        "repo_name": name,
        "repo_owner": org,
        "mirror": mirror,
        "private": private,
        "wiki": wiki
    })
}

pub fn migrate_mock(body: Value, response: ResponseTemplate) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/migrate"))
        .and(body_json(body))
        .respond_with(response)
}

pub fn migrated(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({"id": 100, "name": name}))
}

/// Names of the repositories sent to the migrate endpoint, in order
pub async fn migrated_names(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/api/v1/repos/migrate")
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["repo_name"].as_str().unwrap_or_default().to_string()
        })
        .collect()
}
