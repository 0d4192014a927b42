//! Backup the repositories of an account into a gitea organization
use std::time::Duration;

use log::{error, info, warn};
use regex::Regex;

use crate::{
    cli::GitBackupCli,
    config::ConfigData,
    errors::{GitBackupError, GitBackupErrorKind},
    gitea::{ApiResponse, GiteaClient, Visibility},
    github::GithubSource,
    utils::Prompter,
};

/// Options of a backup run
#[derive(Debug, Clone, Default)]
pub struct BackupOptions {
    /// Name of the destination organization, defaults to the source account
    pub organization: Option<String>,

    /// Keep the repositories in sync with the source
    pub mirror: bool,

    /// Backup the wikis
    pub wiki: bool,

    /// Reuse an existing organization without asking
    pub yes: bool,

    /// Make the repositories private
    pub private: bool,

    /// Visibility of a created organization
    pub visibility: Visibility,

    /// Only repositories whose name matches are backed up
    pub include: Option<Regex>,

    /// Repositories whose name matches are skipped
    pub exclude: Option<Regex>,

    /// Pause after each migration
    pub delay: Duration,
}

/// Compile a filter matching from the start of the name
/// # Errors
/// Error if the pattern is not a valid regex
pub fn compile_filter(pattern: &str) -> Result<Regex, GitBackupError> {
    Ok(Regex::new(&format!("^(?:{pattern})"))?)
}

impl BackupOptions {
    /// Build the options from the command line and the config file
    /// # Errors
    /// Error if a filter is not a valid regex
    pub fn from_cli(args: &GitBackupCli, config: &ConfigData) -> Result<Self, GitBackupError> {
        Ok(Self {
            organization: args.organization.clone(),
            mirror: args.mirror,
            wiki: args.wiki,
            yes: args.yes,
            private: args.private,
            visibility: if args.private || args.internal {
                Visibility::Private
            } else {
                Visibility::Public
            },
            include: args.include.as_deref().map(compile_filter).transpose()?,
            exclude: args.exclude.as_deref().map(compile_filter).transpose()?,
            delay: config.delay(),
        })
    }

    /// Check the include and exclude filters
    fn filter(&self, name: &str) -> Option<&'static str> {
        if let Some(include) = &self.include {
            if !include.is_match(name) {
                return Some("does not match include filter");
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(name) {
                return Some("matches exclude filter");
            }
        }
        None
    }
}

/// What a backup run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupReport {
    /// Destination organization
    pub organization: String,

    /// Whether the organization was created by this run
    pub created_organization: bool,

    /// Whether the user declined to use the existing organization
    pub aborted: bool,

    /// Migrated repositories, in order
    pub migrated: Vec<String>,

    /// Repositories skipped by the include or exclude filter
    pub filtered: Vec<String>,

    /// Repositories already present in the organization
    pub existing: Vec<String>,
}

/// Turn an error message of the destination into a fatal error
fn api_error(message: &str) -> GitBackupError {
    error!("Error: {message}");
    GitBackupError::new(GitBackupErrorKind::Api).with_text(message)
}

/// Backup the repositories of `owner` into gitea
/// # Errors
/// Error if the listing fails, if the organization can't be created or if a migration fails
pub async fn backup(
    source: &GithubSource,
    gitea: &GiteaClient,
    prompter: &mut impl Prompter,
    owner: &str,
    options: &BackupOptions,
) -> Result<BackupReport, GitBackupError> {
    info!("Backing up {owner}'s repositories...");
    let repos = source.list_repositories(owner).await?;
    info!("Got {} repositories", repos.len());

    let organization = options.organization.as_deref().unwrap_or(owner);
    let mut report = BackupReport {
        organization: organization.to_string(),
        ..Default::default()
    };

    info!("Checking if organization exists in gitea...");
    if gitea.get_organization(organization).await?.has_id() {
        warn!("Organization {organization} exists in gitea");
        if !options.yes && !prompter.confirm("Clone repositories in existing organization?")? {
            info!("Aborting...");
            report.aborted = true;
            return Ok(report);
        }
    } else {
        let visibility = options.visibility;
        info!("Creating organization {organization} ({visibility}) in gitea...");
        if let ApiResponse::Error(message) =
            gitea.create_organization(organization, visibility).await?
        {
            return Err(api_error(&message));
        }
        report.created_organization = true;
    }

    info!("Cloning repositories...");
    let total = repos.len();
    for (index, repo) in repos.into_iter().enumerate() {
        info!("Cloning {} ({}/{total})...", repo.name, index + 1);
        if let Some(reason) = options.filter(&repo.name) {
            info!("Repository {} {reason}, skipping...", repo.name);
            report.filtered.push(repo.name);
            continue;
        }
        if gitea.get_repository(organization, &repo.name).await?.has_id() {
            info!("Repository {} exists in gitea, skipping...", repo.name);
            report.existing.push(repo.name);
            continue;
        }
        let result = gitea
            .migrate_repository(
                &repo.clone_url,
                organization,
                &repo.name,
                options.private,
                options.mirror,
                options.wiki,
            )
            .await?;
        if let ApiResponse::Error(message) = result {
            return Err(api_error(&message));
        }
        report.migrated.push(repo.name);
        tokio::time::sleep(options.delay).await;
    }
    Ok(report)
}
