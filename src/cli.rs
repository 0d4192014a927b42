//! Command line options for the git-backup tool
use crate::{
    backup::{backup, BackupOptions, BackupReport},
    config::GitBackupConfig,
    credentials::{forget_credentials, resolve_credentials, SecretServiceStore},
    errors::GitBackupError,
    gitea::{ApiResponse, GiteaClient},
    github::GithubSource,
    utils::{resolve_owner, TerminalPrompter},
};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// git-backup - Backup all repositories from a GitHub organization or user to Gitea
#[derive(Parser, Deserialize, Default, Clone, Debug)]
#[command(version)]
pub struct GitBackupCli {
    /// The account to backup (username or profile URL)
    #[arg(required_unless_present_any = ["show_config_path", "forget_credentials"])]
    pub repository: Option<String>,

    /// Keep the repository in sync with its source
    #[arg(short, long)]
    pub mirror: bool,

    /// Backup the wiki
    #[arg(short, long)]
    pub wiki: bool,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Make the repositories internal
    #[arg(short, long, conflicts_with = "private")]
    pub internal: bool,

    /// Make the repositories private
    #[arg(short, long)]
    pub private: bool,

    /// Include only repositories that match the given regex
    #[arg(long, conflicts_with = "exclude")]
    pub include: Option<String>,

    /// Exclude repositories that match the given regex
    #[arg(long)]
    pub exclude: Option<String>,

    /// The new name of the organization in gitea
    #[arg(short, long)]
    pub organization: Option<String>,

    /// Custom configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the current config path
    #[arg(long)]
    pub show_config_path: bool,

    /// Remove the stored gitea credentials and exit
    #[arg(long)]
    pub forget_credentials: bool,

    /// Verbose mode (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GitBackupCli {
    /// Log level matching the verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Run the git-backup tool with already parsed command line options
/// # Errors
/// Error if the configuration, the credentials, the source listing or a destination call fails
pub async fn git_backup_main(args: GitBackupCli) -> Result<Option<BackupReport>, GitBackupError> {
    let config = GitBackupConfig::try_new(args)?;
    let args = &config.cli_args;
    if args.show_config_path {
        println!("{}", config.config_path.display());
        return Ok(None);
    }
    if args.forget_credentials {
        let mut store = SecretServiceStore::new();
        if forget_credentials(&mut store).await? {
            log::info!("Removed the stored credentials");
        } else {
            log::info!("No stored credentials found");
        }
        return Ok(None);
    }
    let Some(repository) = args.repository.as_deref() else {
        return Err("Missing the account to backup".into());
    };
    let options = BackupOptions::from_cli(args, &config.config_data)?;
    let user_agent = config.config_data.user_agent();

    let mut prompter = TerminalPrompter;
    let credential = {
        let mut store = SecretServiceStore::new();
        resolve_credentials(&mut store, &mut prompter).await?
    };
    let gitea = GiteaClient::new(&credential, &user_agent)?;
    match gitea.get_user().await {
        Ok(ApiResponse::Success(user)) => log::debug!(
            "Authenticated on {} as {}",
            gitea.instance(),
            user.get("login").and_then(|l| l.as_str()).unwrap_or("?")
        ),
        Ok(ApiResponse::Error(message)) => {
            log::warn!("Unable to check the token on {}: {message}", gitea.instance())
        }
        Err(e) => log::warn!("Unable to check the token on {}: {e}", gitea.instance()),
    }

    let owner = resolve_owner(repository);
    let source = GithubSource::new(config.config_data.source_api_url(), &user_agent);
    let report = backup(&source, &gitea, &mut prompter, owner, &options).await?;
    Ok(Some(report))
}
