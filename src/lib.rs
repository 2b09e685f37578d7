//! CloudStore - Personal Cloud Storage Backend
//!
//! An in-memory personal cloud storage service with a REST API, implemented in Rust.

pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod store;
pub mod web;

pub use config::Config;
pub use content::{decode_data_url, encode_data_url};
pub use error::{CloudStoreError, Result};
pub use store::{
    File, FileUpdate, Folder, FolderUpdate, MemStore, NewFile, NewFolder, NewUser, SharedStore,
    User, DEFAULT_STORAGE_LIMIT,
};
pub use web::WebServer;
