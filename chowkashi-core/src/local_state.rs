use std::{collections::HashMap, io, sync::RwLock};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Persistent string storage on the local device.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("poisoned lock"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("poisoned lock"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("poisoned lock"))?;
        entries.remove(key);
        Ok(())
    }
}

pub const CUSTOM_CATEGORIES_KEY: &str = "customCategories";
pub const NOTIFICATION_PROMPT_DISMISSED_KEY: &str = "notification-prompt-dismissed";

pub fn reviews_key(listing_id: &str) -> String {
    format!("reviews_{listing_id}")
}

pub fn notes_key(listing_id: &str) -> String {
    format!("notes_{listing_id}")
}

/// A review kept on the device until it has been synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedReview {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Typed access to the values stored on the device.
///
/// Unreadable or corrupt values are logged and treated as absent.
#[derive(Debug)]
pub struct LocalState<S> {
    store: S,
}

impl<S: KeyValueStore> LocalState<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    log::warn!("Ignoring corrupt local data stored under '{key}': {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("Failed to read local data stored under '{key}': {err}");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }

    pub fn custom_categories(&self) -> Vec<String> {
        self.read_json(CUSTOM_CATEGORIES_KEY).unwrap_or_default()
    }

    pub fn save_custom_categories(&self, names: &[String]) -> Result<()> {
        self.write_json(CUSTOM_CATEGORIES_KEY, names)
    }

    pub fn cached_reviews(&self, listing_id: &str) -> Vec<CachedReview> {
        self.read_json(&reviews_key(listing_id)).unwrap_or_default()
    }

    pub fn cache_review(&self, listing_id: &str, review: CachedReview) -> Result<()> {
        let mut reviews = self.cached_reviews(listing_id);
        reviews.push(review);
        self.write_json(&reviews_key(listing_id), &reviews)
    }

    pub fn notes(&self, listing_id: &str) -> Vec<String> {
        self.read_json(&notes_key(listing_id)).unwrap_or_default()
    }

    pub fn add_note(&self, listing_id: &str, note: impl Into<String>) -> Result<()> {
        let mut notes = self.notes(listing_id);
        notes.push(note.into());
        self.write_json(&notes_key(listing_id), &notes)
    }

    /// Drops cached reviews and notes of a listing.
    pub fn forget_listing(&self, listing_id: &str) -> Result<()> {
        self.store.remove(&reviews_key(listing_id))?;
        self.store.remove(&notes_key(listing_id))
    }

    pub fn is_notification_prompt_dismissed(&self) -> bool {
        match self.store.get(NOTIFICATION_PROMPT_DISMISSED_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                log::warn!("Failed to read notification prompt state: {err}");
                false
            }
        }
    }

    pub fn dismiss_notification_prompt(&self) -> Result<()> {
        self.store.set(NOTIFICATION_PROMPT_DISMISSED_KEY, "true")
    }
}
