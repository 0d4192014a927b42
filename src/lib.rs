//! # git-backup
//!
//! Backup all repositories from a GitHub organization or user to Gitea
//!
//! ## Usage
//!
//! ```txt
//! Usage: git-backup [OPTIONS] [REPOSITORY]
//!
//! Arguments:
//!   [REPOSITORY]  The account to backup (username or profile URL)
//!
//! Options:
//!   -m, --mirror                       Keep the repository in sync with its source
//!   -w, --wiki                         Backup the wiki
//!   -y, --yes                          Skip confirmation
//!   -i, --internal                     Make the repositories internal
//!   -p, --private                      Make the repositories private
//!       --include <INCLUDE>            Include only repositories that match the given regex
//!       --exclude <EXCLUDE>            Exclude repositories that match the given regex
//!   -o, --organization <ORGANIZATION>  The new name of the organization in gitea
//!   -c, --config <CONFIG>              Custom configuration file path
//!       --show-config-path             Show the current config path
//!       --forget-credentials           Remove the stored gitea credentials and exit
//!   -v, --verbose...                   Verbose mode (-v, -vv)
//!   -h, --help                         Print help
//!   -V, --version                      Print version
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub(crate) mod backup;
pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod credentials;
pub(crate) mod errors;
pub(crate) mod gitea;
pub(crate) mod github;
pub(crate) mod utils;

pub use backup::{backup, compile_filter, BackupOptions, BackupReport};
pub use cli::{git_backup_main, GitBackupCli};
pub use config::{ConfigData, GitBackupConfig};
pub use credentials::{
    forget_credentials, normalize_instance, resolve_credentials, Credential, CredentialStore,
    SecretServiceStore, StoreFuture,
};
pub use errors::{GitBackupError, GitBackupErrorKind};
pub use gitea::{ApiResponse, GiteaClient, Visibility};
pub use github::{GithubSource, SourceRepository};
pub use utils::{is_url, owner_from_url, resolve_owner, Prompter, TerminalPrompter};
