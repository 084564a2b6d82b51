pub mod edit;
pub mod get;

use std::sync::Arc;

use crate::errors::Result;
use crate::http::ApiClient;
use crate::models::notes::{Note, NoteRequest};

/// 当前用户的笔记
pub struct NoteService {
    client: Arc<ApiClient>,
}

impl NoteService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        get::list_notes(self).await
    }

    pub async fn get_note(&self, note_id: i64) -> Result<Note> {
        get::get_note(self, note_id).await
    }

    pub async fn create_note(&self, note_data: NoteRequest) -> Result<Note> {
        edit::create_note(self, note_data).await
    }

    pub async fn update_note(&self, note_id: i64, note_data: NoteRequest) -> Result<Note> {
        edit::update_note(self, note_id, note_data).await
    }

    pub async fn delete_note(&self, note_id: i64) -> Result<()> {
        edit::delete_note(self, note_id).await
    }
}
