//! Local persistence for listening sessions and the user registry.
//!
//! Two independent entries live in a key-value store:
//! - `ns_users`: JSON array of user names, kept sorted.
//! - `ns_sessions`: JSON array of session objects in append order.
//!
//! Reads never fail. A missing, unreadable, or unparseable entry is treated as
//! an empty collection (and logged). Writes are whole-entry read-modify-write,
//! so the last writer wins.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, warn};

use super::scope::Scope;

pub const USERS_KEY: &str = "ns_users";
pub const SESSIONS_KEY: &str = "ns_sessions";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialise entry: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend rejected the operation: {0}")]
    Backend(String),
}

/// Raw string key-value medium (browser `localStorage`, a data directory, memory).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store used by tests and as a last resort when no medium exists.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry verbatim, bypassing serialisation (handy for corrupt-data cases).
    pub fn with_entry(self, key: &str, raw: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage`, resolved on every call so a missing window degrades to errors.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Backend(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Backend(format!("{err:?}")))
    }
}

/// One `<key>.json` file per entry under a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform data directory (`.../Tonelog/store`), or the temp dir if none can be resolved.
    pub fn default_location() -> Self {
        match directories::ProjectDirs::from("com", "Tonelog", "Tonelog") {
            Some(dirs) => Self::new(dirs.data_dir().join("store")),
            None => {
                let fallback = std::env::temp_dir().join("tonelog").join("store");
                warn!(path = %fallback.display(), "no platform data directory; using temp dir");
                Self::new(fallback)
            }
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = BrowserStorage;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

/// Track identifier a session belongs to.
///
/// Stored as a JSON number when the identifier is a plain integer (`432`), as a
/// string otherwise. Both forms are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for Category {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Category(n.to_string()),
            Raw::Float(n) => Category(n.to_string()),
            Raw::Text(s) => Category::new(s),
        })
    }
}

/// One completed listening session. On disk the fields use the short keys `date`, `freq`, `duration`, `before` and `after`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub id: String,
    #[serde(rename = "date")]
    pub created_at: String,
    pub user: String,
    #[serde(rename = "freq")]
    pub category: Category,
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    #[serde(rename = "before")]
    pub mood_before: f64,
    #[serde(rename = "after")]
    pub mood_after: f64,
    pub improvement: f64,
}

impl SessionRecord {
    /// Build a fresh record: moods are clamped to [0, 10] before the improvement is derived.
    pub fn new(
        user: impl Into<String>,
        category: Category,
        duration_seconds: u32,
        mood_before: f64,
        mood_after: f64,
    ) -> Self {
        let before = clamp_mood(mood_before);
        let after = clamp_mood(mood_after);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now_rfc3339(),
            user: user.into(),
            category,
            duration_seconds,
            mood_before: before,
            mood_after: after,
            improvement: clamp_improvement(after - before),
        }
    }

    pub fn parsed_created_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.created_at, &Rfc3339).ok()
    }
}

/// Clamp a mood rating into [0, 10]; non-numeric input counts as 0.
pub fn clamp_mood(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 10.0)
    }
}

pub fn clamp_improvement(delta: f64) -> f64 {
    if delta.is_nan() {
        0.0
    } else {
        delta.clamp(-10.0, 10.0)
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Owner of the serialised session list and user registry.
#[derive(Debug)]
pub struct SessionStore<S = PlatformStorage> {
    backend: S,
}

impl SessionStore<PlatformStorage> {
    /// Store over the platform's default medium.
    pub fn open() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(BrowserStorage)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(FileStorage::default_location())
        }
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn list_users(&self) -> Vec<String> {
        self.read_entries(USERS_KEY)
    }

    /// Insert `name` (trimmed) unless it is empty or already known. Returns whether it was added.
    pub fn add_user_if_absent(&self, name: &str) -> Result<bool, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        let mut users = self.list_users();
        if users.iter().any(|existing| existing == name) {
            return Ok(false);
        }

        users.push(name.to_string());
        users.sort();
        self.write_entries(USERS_KEY, &users)?;
        debug!(user = name, "registered user");
        Ok(true)
    }

    pub fn list_sessions(&self) -> Vec<SessionRecord> {
        self.read_entries(SESSIONS_KEY)
    }

    /// Sessions visible under `scope`, in append order.
    pub fn sessions_in(&self, scope: &Scope) -> Vec<SessionRecord> {
        let mut sessions = self.list_sessions();
        sessions.retain(|record| scope.includes(record));
        sessions
    }

    pub fn append_session(&self, record: SessionRecord) -> Result<(), StorageError> {
        let mut sessions = self.list_sessions();
        debug!(id = %record.id, user = %record.user, category = %record.category, "appending session");
        sessions.push(record);
        self.write_entries(SESSIONS_KEY, &sessions)
    }

    /// Remove the first session with `id`. Returns whether anything was removed.
    pub fn delete_session(&self, id: &str) -> Result<bool, StorageError> {
        let mut sessions = self.list_sessions();
        let Some(position) = sessions.iter().position(|record| record.id == id) else {
            return Ok(false);
        };
        sessions.remove(position);
        self.write_entries(SESSIONS_KEY, &sessions)?;
        debug!(id, "deleted session");
        Ok(true)
    }

    pub fn clear_all(&self) -> Result<(), StorageError> {
        self.backend.remove(USERS_KEY)?;
        self.backend.remove(SESSIONS_KEY)?;
        debug!("cleared all users and sessions");
        Ok(())
    }

    fn read_entries<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key, %err, "storage read failed; treating as empty");
                return Vec::new();
            }
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(err) => {
                warn!(key, %err, "stored entry is not a JSON array; treating as empty");
                return Vec::new();
            }
        };

        let total = values.len();
        let entries: Vec<T> = values
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();

        if entries.len() < total {
            warn!(key, skipped = total - entries.len(), "skipped malformed stored entries");
        }

        entries
    }

    fn write_entries<T: Serialize>(&self, key: &str, entries: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)?;
        self.backend.set(key, &raw)
    }
}
