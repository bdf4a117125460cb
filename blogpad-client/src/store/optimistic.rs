//! Optimistic overlay with explicit reconciliation.
//!
//! Every locally created entry starts `Pending` under a provisional id. The
//! server response moves it to `Confirmed` (the entry is replaced by the
//! server copy) or `Failed`. Once a server-fetched list contains a confirmed
//! entry, the local copy is superseded and dropped.

use crate::models::{Comment, Post};

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Comment {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Pending,
    Confirmed,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Optimistic<T> {
    /// Provisional id assigned on the client
    pub local_id: String,
    pub entry: T,
    pub state: SyncState,
}

impl<T> Optimistic<T> {
    pub fn is_pending(&self) -> bool {
        self.state == SyncState::Pending
    }

    pub fn is_confirmed(&self) -> bool {
        self.state == SyncState::Confirmed
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            SyncState::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay<T> {
    entries: Vec<Optimistic<T>>,
}

impl<T> Default for Overlay<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Identified + Clone> Overlay<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending entry. No deduplication.
    pub fn push_pending(&mut self, entry: T) {
        self.entries.push(Optimistic {
            local_id: entry.id().to_string(),
            entry,
            state: SyncState::Pending,
        });
    }

    pub fn confirm(&mut self, local_id: &str, server_entry: T) -> bool {
        match self.find_pending(local_id) {
            Some(item) => {
                item.entry = server_entry;
                item.state = SyncState::Confirmed;
                true
            }
            None => false,
        }
    }

    pub fn fail(&mut self, local_id: &str, reason: impl Into<String>) -> bool {
        match self.find_pending(local_id) {
            Some(item) => {
                item.state = SyncState::Failed {
                    reason: reason.into(),
                };
                true
            }
            None => false,
        }
    }

    /// Drop confirmed entries whose server id is in `server_ids`
    pub fn supersede<'a, I>(&mut self, server_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: Vec<&str> = server_ids.into_iter().collect();
        let before = self.entries.len();
        self.entries
            .retain(|item| !(item.is_confirmed() && ids.iter().any(|id| *id == item.entry.id())));
        before - self.entries.len()
    }

    /// Remove every entry (local or confirmed) with the given id
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|item| item.local_id != id && item.entry.id() != id);
        before - self.entries.len()
    }

    pub fn dismiss_failed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|item| item.failure().is_none());
        before - self.entries.len()
    }

    pub fn items(&self) -> &[Optimistic<T>] {
        &self.entries
    }

    /// Entries the server has not accounted for yet
    pub fn unsettled(&self) -> impl Iterator<Item = &Optimistic<T>> {
        self.entries.iter().filter(|item| !item.is_confirmed())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find_pending(&mut self, local_id: &str) -> Option<&mut Optimistic<T>> {
        self.entries
            .iter_mut()
            .find(|item| item.local_id == local_id && item.is_pending())
    }
}
