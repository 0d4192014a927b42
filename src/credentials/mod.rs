//! Gitea credentials, kept in a secret store
use std::{future::Future, pin::Pin};

use url::Url;

use crate::{
    errors::{GitBackupError, GitBackupErrorKind},
    utils::{is_url, Prompter},
};

pub(crate) mod secret_store;

pub use secret_store::SecretServiceStore;

/// Boxed future returned by the credential stores
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, GitBackupError>> + 'a>>;

/// Access to a Gitea instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Base URL of the instance
    pub instance_url: String,

    /// Access token
    pub token: String,
}

/// Storage of the credential between runs
pub trait CredentialStore {
    /// Look up the stored credential
    fn find(&mut self) -> StoreFuture<'_, Option<Credential>>;

    /// Store a credential, replacing any previous one
    fn save(&mut self, credential: &Credential) -> StoreFuture<'_, ()>;

    /// Remove the stored credential, returns whether one existed
    fn forget(&mut self) -> StoreFuture<'_, bool>;
}

/// Reduce an instance URL to `scheme://host[:port]`
/// # Errors
/// Error if the URL can't be parsed or has no host
pub fn normalize_instance(input: &str) -> Result<String, GitBackupError> {
    let input = input.trim();
    let url = if is_url(input) {
        Url::parse(input)?
    } else {
        Url::parse(&format!("https://{input}"))?
    };
    let Some(host) = url.host_str() else {
        return Err(GitBackupError::new(GitBackupErrorKind::Config)
            .with_text(&format!("No host in instance URL {input}")));
    };
    Ok(match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    })
}

/// Get the stored credential, asking for it on first run
/// # Errors
/// Error if the store fails or an empty value is entered
pub async fn resolve_credentials(
    store: &mut impl CredentialStore,
    prompter: &mut impl Prompter,
) -> Result<Credential, GitBackupError> {
    if let Some(credential) = store.find().await? {
        log::debug!("Using stored credentials for {}", credential.instance_url);
        return Ok(credential);
    }
    let instance_url = prompter.input("Insert your instance URL: ")?;
    if instance_url.trim().is_empty() {
        return Err(GitBackupError::new(GitBackupErrorKind::Config)
            .with_text("Instance URL cannot be empty"));
    }
    let instance_url = normalize_instance(&instance_url)?;
    let token = prompter.password("Insert your token: ")?;
    if token.is_empty() {
        return Err(GitBackupError::new(GitBackupErrorKind::Config).with_text("Token cannot be empty"));
    }
    let credential = Credential {
        instance_url,
        token,
    };
    store.save(&credential).await?;
    log::info!("Saved credentials for {}", credential.instance_url);
    Ok(credential)
}

/// Remove the stored credential
/// # Errors
/// Error if the store fails
pub async fn forget_credentials(store: &mut impl CredentialStore) -> Result<bool, GitBackupError> {
    store.forget().await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Store kept in memory
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        pub(crate) credential: Option<Credential>,
        pub(crate) saves: usize,
    }

    impl CredentialStore for MemoryStore {
        fn find(&mut self) -> StoreFuture<'_, Option<Credential>> {
            let found = self.credential.clone();
            Box::pin(async move { Ok::<_, GitBackupError>(found) })
        }

        fn save(&mut self, credential: &Credential) -> StoreFuture<'_, ()> {
            self.credential = Some(credential.clone());
            self.saves += 1;
            Box::pin(async { Ok::<_, GitBackupError>(()) })
        }

        fn forget(&mut self) -> StoreFuture<'_, bool> {
            let existed = self.credential.take().is_some();
            Box::pin(async move { Ok::<_, GitBackupError>(existed) })
        }
    }

    /// Prompter answering from a script
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedPrompter {
        pub(crate) answers: VecDeque<String>,
        pub(crate) asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub(crate) fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                asked: vec![],
            }
        }

        fn next(&mut self, message: &str) -> Result<String, GitBackupError> {
            self.asked.push(message.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| format!("unexpected question: {message}").into())
        }
    }

    impl Prompter for ScriptedPrompter {
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

    #[test]
    fn normalizes_instance() {
        assert_eq!(
            normalize_instance("https://git.example.org/user/settings").unwrap(),
            "https://git.example.org"
        );
        assert_eq!(
            normalize_instance("http://localhost:3000/").unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            normalize_instance("git.example.org").unwrap(),
            "https://git.example.org"
        );
    }

    #[tokio::test]
    async fn stored_credential_is_used() {
        let stored = Credential {
            instance_url: "https://git.example.org".into(),
            token: "abc".into(),
        };
        let mut store = MemoryStore {
            credential: Some(stored.clone()),
            saves: 0,
        };
        let mut prompter = ScriptedPrompter::default();
        let credential = resolve_credentials(&mut store, &mut prompter).await.unwrap();
        assert_eq!(credential, stored);
        assert!(prompter.asked.is_empty());
        assert_eq!(store.saves, 0);
    }

    #[tokio::test]
    async fn first_run_asks_and_saves() {
        let mut store = MemoryStore::default();
        let mut prompter = ScriptedPrompter::new(&["https://git.example.org/explore", "abc"]);
        let credential = resolve_credentials(&mut store, &mut prompter).await.unwrap();
        assert_eq!(credential.instance_url, "https://git.example.org");
        assert_eq!(credential.token, "abc");
        assert_eq!(store.credential, Some(credential));
        assert_eq!(store.saves, 1);
    }

    #[tokio::test]
    async fn empty_instance_aborts() {
        let mut store = MemoryStore::default();
        let mut prompter = ScriptedPrompter::new(&[""]);
        let err = resolve_credentials(&mut store, &mut prompter).await.unwrap_err();
        assert_eq!(err.kind(), &GitBackupErrorKind::Config);
        assert_eq!(prompter.asked.len(), 1);
        assert!(store.credential.is_none());
    }

    #[tokio::test]
    async fn empty_token_aborts() {
        let mut store = MemoryStore::default();
        let mut prompter = ScriptedPrompter::new(&["git.example.org", ""]);
        let err = resolve_credentials(&mut store, &mut prompter).await.unwrap_err();
        assert_eq!(err.kind(), &GitBackupErrorKind::Config);
        assert!(store.credential.is_none());
    }

    #[tokio::test]
    async fn forget_removes() {
        let mut store = MemoryStore {
            credential: Some(Credential::default()),
            saves: 0,
        };
        assert!(forget_credentials(&mut store).await.unwrap());
        assert!(!forget_credentials(&mut store).await.unwrap());
    }
}
