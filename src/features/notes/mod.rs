//! Quick notes, newest first.

mod book;
mod store;

pub use book::{Note, NoteBook};
pub use store::NoteStore;
