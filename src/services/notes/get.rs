use super::NoteService;
use crate::errors::Result;
use crate::models::notes::Note;

pub async fn list_notes(service: &NoteService) -> Result<Vec<Note>> {
    let notes: Option<Vec<Note>> = service.client().get("/notes").await?;
    Ok(notes.unwrap_or_default())
}

pub async fn get_note(service: &NoteService, note_id: i64) -> Result<Note> {
    service.client().get(&format!("/notes/{note_id}")).await
}
