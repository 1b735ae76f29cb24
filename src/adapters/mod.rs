// Adapters layer: concrete implementations for external systems (document store, image hosting, terminal).

pub mod console;
pub mod firestore;
pub mod image_host;
pub mod memory;
pub mod remove_bg;
