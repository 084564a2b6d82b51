pub mod entities;
pub mod requests;

pub use entities::Note;
pub use requests::NoteRequest;
