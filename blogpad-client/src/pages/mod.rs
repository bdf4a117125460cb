//! Page controllers. Each page owns its form state and drives the [`App`]:
//! validate, show a loading toast, run the mutation, then branch on the
//! result.
//!
//! [`App`]: crate::app::App

pub mod login;
pub mod post_detail;
pub mod post_form;
pub mod post_list;
pub mod register;

pub use login::LoginPage;
pub use post_detail::{CommentRow, PostDetailPage, PostDetailView, PostSource};
pub use post_form::{FormMode, PostFormPage};
pub use post_list::{PostListPage, PostListView, PostRow};
pub use register::RegisterPage;

use crate::error::ClientError;
use crate::router::Route;
use crate::store::SyncState;
use crate::validation::ValidationErrors;
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(ValidationErrors),
    /// Request succeeded; the app navigated to the route
    Succeeded(Route),
    /// Request failed; the page stays put
    Failed(ClientError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

/// Row origin in a merged server/overlay list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Server,
    Pending,
    Confirmed,
    Failed(String),
}

impl From<&SyncState> for RowStatus {
    fn from(state: &SyncState) -> Self {
        match state {
            SyncState::Pending => RowStatus::Pending,
            SyncState::Confirmed => RowStatus::Confirmed,
            SyncState::Failed { reason } => RowStatus::Failed(reason.clone()),
        }
    }
}

/// Provisional id for optimistic entries
pub(crate) fn local_id() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `Mar 1, 2024`; empty for blank or unparseable input
pub fn format_date(timestamp: &str) -> String {
    if timestamp.trim().is_empty() {
        return String::new();
    }
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => match chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(date) => date.format("%b %-d, %Y").to_string(),
            Err(_) => String::new(),
        },
    }
}
