//! Turns raw form input into a validated, persisted session record.

use thiserror::Error;
use tracing::info;

use super::storage::{Category, KeyValueStore, SessionRecord, SessionStore, StorageError};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("no active user; add or select a user first")]
    NoActiveUser,
    #[error("no listening time recorded; play the track first")]
    NoListeningTime,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Raw values gathered from the player form.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    /// `user` query parameter, if the page is scoped to one user.
    pub scope_user: Option<String>,
    /// Current value of the user picker.
    pub selected_user: Option<String>,
    pub category: Option<Category>,
    pub elapsed_seconds: i64,
    pub mood_before: f64,
    pub mood_after: f64,
}

impl SessionDraft {
    /// Scope parameter wins over the picker; blank values count as absent.
    pub fn active_user(&self) -> Option<&str> {
        fn non_blank(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|name| !name.is_empty())
        }
        non_blank(&self.scope_user).or_else(|| non_blank(&self.selected_user))
    }
}

/// Validate `draft`, then register its user and append the record.
///
/// Validation failures write nothing.
pub fn record_session<S: KeyValueStore>(
    store: &SessionStore<S>,
    draft: &SessionDraft,
    fallback_category: &Category,
) -> Result<SessionRecord, RecordError> {
    let user = draft.active_user().ok_or(RecordError::NoActiveUser)?;
    if draft.elapsed_seconds <= 0 {
        return Err(RecordError::NoListeningTime);
    }
    let duration = u32::try_from(draft.elapsed_seconds).unwrap_or(u32::MAX);

    let category = draft
        .category
        .clone()
        .unwrap_or_else(|| fallback_category.clone());

    let record = SessionRecord::new(
        user,
        category,
        duration,
        draft.mood_before,
        draft.mood_after,
    );

    store.append_session(record.clone())?;
    store.add_user_if_absent(user)?;
    info!(
        user,
        category = %record.category,
        duration,
        improvement = record.improvement,
        "session saved"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{KeyValueStore, MemoryStorage, StorageError, SESSIONS_KEY};

    /// Memory store whose session list cannot be written.
    #[derive(Default)]
    struct SessionsReadOnly(MemoryStorage);

    impl KeyValueStore for SessionsReadOnly {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == SESSIONS_KEY {
                return Err(StorageError::Unavailable);
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    fn draft() -> SessionDraft {
        SessionDraft {
            scope_user: None,
            selected_user: Some("Alice".into()),
            category: Some(Category::from(852)),
            elapsed_seconds: 42,
            mood_before: 4.0,
            mood_after: 7.0,
        }
    }

    #[test]
    fn scope_user_takes_precedence_over_picker() {
        let mut d = draft();
        d.scope_user = Some("Bob".into());
        assert_eq!(d.active_user(), Some("Bob"));

        d.scope_user = Some("  ".into());
        assert_eq!(d.active_user(), Some("Alice"));

        d.selected_user = None;
        assert_eq!(d.active_user(), None);
    }

    #[test]
    fn records_and_registers_user() {
        let store = SessionStore::new(MemoryStorage::new());
        let record = record_session(&store, &draft(), &Category::from(432)).unwrap();

        assert_eq!(record.user, "Alice");
        assert_eq!(record.duration_seconds, 42);
        assert_eq!(record.improvement, 3.0);
        assert_eq!(store.list_users(), vec!["Alice"]);
        assert_eq!(store.list_sessions(), vec![record]);
    }

    #[test]
    fn missing_user_and_missing_time_are_distinct_failures() {
        let store = SessionStore::new(MemoryStorage::new());

        let mut no_user = draft();
        no_user.selected_user = Some(String::new());
        assert!(matches!(
            record_session(&store, &no_user, &Category::from(432)),
            Err(RecordError::NoActiveUser)
        ));

        let mut no_time = draft();
        no_time.elapsed_seconds = 0;
        assert!(matches!(
            record_session(&store, &no_time, &Category::from(432)),
            Err(RecordError::NoListeningTime)
        ));

        assert!(store.list_sessions().is_empty());
        assert!(store.list_users().is_empty());
    }

    #[test]
    fn out_of_range_moods_are_clamped() {
        let store = SessionStore::new(MemoryStorage::new());
        let mut d = draft();
        d.mood_before = 12.0;
        d.mood_after = -3.0;
        let record = record_session(&store, &d, &Category::from(432)).unwrap();
        assert_eq!(record.mood_before, 10.0);
        assert_eq!(record.mood_after, 0.0);
        assert_eq!(record.improvement, -10.0);
    }

    #[test]
    fn missing_category_uses_fallback() {
        let store = SessionStore::new(MemoryStorage::new());
        let mut d = draft();
        d.category = None;
        let record = record_session(&store, &d, &Category::from(432)).unwrap();
        assert_eq!(record.category, Category::from(432));
    }

    #[test]
    fn failed_save_leaves_user_list_untouched() {
        let store = SessionStore::new(SessionsReadOnly::default());
        let result = record_session(&store, &draft(), &Category::from(432));

        assert!(matches!(result, Err(RecordError::Storage(StorageError::Unavailable))));
        assert!(store.list_users().is_empty());
        assert!(store.list_sessions().is_empty());
    }
}
