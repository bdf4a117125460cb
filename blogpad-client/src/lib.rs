pub mod api;
pub mod app;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod notify;
pub mod pages;
pub mod pagination;
pub mod router;
pub mod storage;
pub mod store;
pub mod validation;

pub use app::App;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, StorageError};
pub use router::Route;
pub use storage::{FileStorage, MemoryStorage, Storage};
