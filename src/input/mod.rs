pub mod handler;

pub use handler::{handle_key, is_edit_notes_key};
