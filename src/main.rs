use clap::Parser;
use git_backup::{git_backup_main, GitBackupCli};
use std::process::exit;

#[tokio::main]
async fn main() {
    let args = GitBackupCli::parse();
    env_logger::builder()
        .filter_level(args.log_level())
        .format_target(false)
        .format_timestamp(None)
        .init();
    match git_backup_main(args).await {
        Ok(_) => {
            exit(0);
        }
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };
}
