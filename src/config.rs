//! Configuration handling
use std::{
    fs::{create_dir_all, read_to_string, File},
    io::Write,
    path::PathBuf,
    time::Duration,
};

use home::home_dir;
use serde::Deserialize;

use crate::{cli::GitBackupCli, errors::GitBackupError};

/// Default GitHub API used to list the source repositories
pub const DEFAULT_SOURCE_API_URL: &str = "https://api.github.com";

/// Default pause between two migrations, in seconds
pub const DEFAULT_DELAY_SECS: u64 = 1;

/// Configuration data
#[derive(Deserialize, Default, Clone, Debug)]
pub struct GitBackupConfig {
    /// path to the configuration file
    pub config_path: PathBuf,

    /// actual configuration data
    pub config_data: ConfigData,

    /// CLI arguments
    pub cli_args: GitBackupCli,
}

/// Content of the configuration file
#[derive(Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ConfigData {
    /// Base URL of the source API
    pub source_api_url: Option<String>,

    /// Pause between two migrations, in seconds
    pub delay_secs: Option<u64>,

    /// User agent sent with every request
    pub user_agent: Option<String>,
}

impl ConfigData {
    /// Base URL of the source API, without trailing slash
    pub fn source_api_url(&self) -> &str {
        self.source_api_url
            .as_deref()
            .unwrap_or(DEFAULT_SOURCE_API_URL)
            .trim_end_matches('/')
    }

    /// Pause between two migrations
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs.unwrap_or(DEFAULT_DELAY_SECS))
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> String {
        match &self.user_agent {
            Some(agent) => agent.clone(),
            None => concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitBackupConfig {
    /// Create a new Config object from the CLI arguments
    /// # Errors
    /// Error if the config file can't be opened or parsed
    pub fn try_new(cli_args: GitBackupCli) -> Result<Self, GitBackupError> {
        let config_path = match cli_args.config.clone() {
            Some(p) => p,
            None => Self::get_config_path()?,
        };
        let contents = read_to_string(&config_path)
            .map_err(|e| GitBackupError::new_with_source("Unable to open config file", e))?;
        let config_data = toml::from_str(&contents)?;
        Ok(GitBackupConfig {
            config_path,
            cli_args,
            config_data,
        })
    }

    /// Get the path to the config file, creating an empty one if needed
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, GitBackupError> {
        let home_dir = match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err("Unable to get your home dir! home::home_dir() isn't working".into()),
        };
        let config_directory = home_dir.join(".config").join(".git-backup");
        let config_path = config_directory.join("config.toml");
        create_dir_all(config_directory)
            .map_err(|e| GitBackupError::new_with_source("Unable to create config dir", e))?;
        if !config_path.exists() {
            let mut file = File::create(&config_path)
                .map_err(|e| GitBackupError::new_with_source("Unable to create config file", e))?;
            file.write_all(b"")
                .map_err(|e| GitBackupError::new_with_source("Unable to write to config file", e))?;
        }
        Ok(config_path)
    }
}
