//! Credential store backed by the freedesktop Secret Service
use std::collections::HashMap;

use secret_service::{EncryptionType, SecretService};

use super::{Credential, CredentialStore, StoreFuture};
use crate::errors::{GitBackupError, GitBackupErrorKind};

/// Attribute tagging the items of this tool
const APPLICATION_ATTRIBUTE: &str = "application";

/// Attribute holding the instance URL
const INSTANCE_ATTRIBUTE: &str = "instance";

/// Value of the application attribute, shared with the items of the earlier gitbackup script
const APPLICATION: &str = "gitbackup";

/// Store using the default collection of the Secret Service
///
/// Every operation opens its own session, which is closed when it returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretServiceStore;

impl SecretServiceStore {
    /// Create a new store
    pub fn new() -> Self {
        Self
    }
}

/// Attributes used to find the stored item
fn search_attributes() -> HashMap<&'static str, &'static str> {
    HashMap::from([(APPLICATION_ATTRIBUTE, APPLICATION)])
}

/// Find the stored credential
async fn find_credential() -> Result<Option<Credential>, GitBackupError> {
    let service = SecretService::connect(EncryptionType::Dh).await?;
    let collection = service.get_default_collection().await?;
    if collection.is_locked().await? {
        collection.unlock().await?;
    }
    let items = collection.search_items(search_attributes()).await?;
    let Some(item) = items.first() else {
        return Ok(None);
    };
    if item.is_locked().await? {
        item.unlock().await?;
    }
    let attributes = item.get_attributes().await?;
    let Some(instance_url) = attributes.get(INSTANCE_ATTRIBUTE).cloned() else {
        return Err(GitBackupError::new(GitBackupErrorKind::SecretStore)
            .with_text("Stored credentials have no instance attribute"));
    };
    let secret = item.get_secret().await?;
    let token = String::from_utf8(secret)
        .map_err(|e| GitBackupError::with_source(GitBackupErrorKind::SecretStore, e))?;
    Ok(Some(Credential {
        instance_url,
        token,
    }))
}

/// Store the credential, replacing the previous item
async fn save_credential(credential: Credential) -> Result<(), GitBackupError> {
    let service = SecretService::connect(EncryptionType::Dh).await?;
    let collection = service.get_default_collection().await?;
    if collection.is_locked().await? {
        collection.unlock().await?;
    }
    let attributes = HashMap::from([
        (INSTANCE_ATTRIBUTE, credential.instance_url.as_str()),
        (APPLICATION_ATTRIBUTE, APPLICATION),
    ]);
    collection
        .create_item(
            APPLICATION,
            attributes,
            credential.token.as_bytes(),
            true,
            "text/plain",
        )
        .await?;
    Ok(())
}

/// Delete every stored item
async fn delete_credentials() -> Result<bool, GitBackupError> {
    let service = SecretService::connect(EncryptionType::Dh).await?;
    let collection = service.get_default_collection().await?;
    if collection.is_locked().await? {
        collection.unlock().await?;
    }
    let items = collection.search_items(search_attributes()).await?;
    for item in &items {
        item.delete().await?;
    }
    Ok(!items.is_empty())
}

impl CredentialStore for SecretServiceStore {
    fn find(&mut self) -> StoreFuture<'_, Option<Credential>> {
        Box::pin(find_credential())
    }

    fn save(&mut self, credential: &Credential) -> StoreFuture<'_, ()> {
        Box::pin(save_credential(credential.clone()))
    }

    fn forget(&mut self) -> StoreFuture<'_, bool> {
        Box::pin(delete_credentials())
    }
}
