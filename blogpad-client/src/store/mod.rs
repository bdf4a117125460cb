//! Application state: pure reducers plus a store that applies their storage
//! effects.

pub mod auth;
pub mod optimistic;
pub mod posts;

pub use auth::{AuthAction, AuthState, StorageEffect};
pub use optimistic::{Identified, Optimistic, Overlay, SyncState};
pub use posts::{PostsAction, PostsState};

use crate::error::StorageError;
use crate::storage::{Storage, TOKEN_KEY};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub posts: PostsState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Posts(PostsAction),
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<PostsAction> for Action {
    fn from(action: PostsAction) -> Self {
        Action::Posts(action)
    }
}

pub fn reduce(state: AppState, action: &Action) -> (AppState, Option<StorageEffect>) {
    match action {
        Action::Auth(action) => {
            let (auth, effect) = auth::reduce(state.auth, action);
            (AppState { auth, ..state }, effect)
        }
        Action::Posts(action) => {
            let posts = posts::reduce(state.posts, action);
            (AppState { posts, ..state }, None)
        }
    }
}

pub struct Store {
    state: AppState,
    storage: Box<dyn Storage>,
}

impl Store {
    /// Build the store, reading the persisted token
    pub fn init(storage: Box<dyn Storage>) -> Result<Self, StorageError> {
        let token = storage.get(TOKEN_KEY)?;
        if token.is_some() {
            tracing::debug!("Restored auth token from storage");
        }
        Ok(Self {
            state: AppState {
                auth: AuthState { token },
                ..AppState::default()
            },
            storage,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.auth.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.auth.is_authenticated()
    }

    /// Apply an action. The in-memory transition always happens; a storage
    /// failure is reported afterwards.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<(), StorageError> {
        let action = action.into();
        let state = std::mem::take(&mut self.state);
        let (next, effect) = reduce(state, &action);
        self.state = next;

        match effect {
            Some(StorageEffect::Set { key, value }) => self.storage.set(key, &value),
            Some(StorageEffect::Remove { key }) => self.storage.remove(key),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &self.state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn init_reads_persisted_token() {
        let store = Store::init(Box::new(MemoryStorage::with(TOKEN_KEY, "saved"))).unwrap();
        assert_eq!(store.token(), Some("saved"));

        let store = Store::init(Box::new(MemoryStorage::new())).unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn auth_actions_write_through_to_storage() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = crate::storage::FileStorage::new(dir.path());

        let mut store = Store::init(Box::new(storage.clone())).unwrap();
        store.dispatch(AuthAction::SetToken("t1".into())).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));

        store.dispatch(AuthAction::Logout).unwrap();
        assert_eq!(store.token(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn posts_actions_leave_auth_alone() {
        let mut store = Store::init(Box::new(MemoryStorage::with(TOKEN_KEY, "t"))).unwrap();
        store
            .dispatch(PostsAction::PostRemoved("p1".into()))
            .unwrap();
        assert_eq!(store.token(), Some("t"));
    }
}
