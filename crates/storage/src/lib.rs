//! Save-file persistence for settings and achievements.

pub mod error;
pub mod save;

pub use error::StorageError;
pub use save::{SaveFile, SaveState, Settings};
