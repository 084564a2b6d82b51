use tracing::info;

use super::NoteService;
use crate::errors::{ClientError, Result};
use crate::models::notes::{Note, NoteRequest};
use crate::utils::validate::validate_required;

fn normalize(mut note_data: NoteRequest) -> Result<NoteRequest> {
    note_data.title = note_data.title.trim().to_string();
    validate_required(&note_data.title, "Please enter note title").map_err(ClientError::validation)?;
    Ok(note_data)
}

pub async fn create_note(service: &NoteService, note_data: NoteRequest) -> Result<Note> {
    let note_data = normalize(note_data)?;
    let note: Note = service.client().post("/notes", &note_data).await?;
    info!("Note {} created", note.id);
    Ok(note)
}

pub async fn update_note(service: &NoteService, note_id: i64, note_data: NoteRequest) -> Result<Note> {
    let note_data = normalize(note_data)?;
    service
        .client()
        .put(&format!("/notes/{note_id}"), &note_data)
        .await
}

pub async fn delete_note(service: &NoteService, note_id: i64) -> Result<()> {
    service
        .client()
        .delete::<Option<serde_json::Value>>(&format!("/notes/{note_id}"))
        .await?;
    info!("Note {} deleted", note_id);
    Ok(())
}
