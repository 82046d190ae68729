//! notepad-core - Core library for the notepad
//!
//! This crate contains the note models, the SQLite storage layer, the async
//! note store with live queries and the editor session used by the CLI.

pub mod db;
pub mod editor;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod stats;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteColor, NoteId};
pub use services::{LiveQuery, NoteStore};
