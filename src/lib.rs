pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AdminConfig;

pub use adapters::{console::ConsoleNotifier, firestore::FirestoreStore, memory::InMemoryStore};
pub use core::{editor::AdminContentEditor, icon_upload::IconUploader};
pub use utils::error::{AdminError, Result};
