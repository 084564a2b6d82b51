use tracing::info;

use super::UserService;
use crate::errors::Result;

pub async fn delete_user(service: &UserService, user_id: i64) -> Result<()> {
    service
        .client()
        .delete::<Option<serde_json::Value>>(&format!("/users/{user_id}"))
        .await?;
    info!("User {} deleted", user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::http::HttpMethod;
    use crate::http::mock::{self, MockBackend};
    use crate::services::users::test_support::user_service;

    #[tokio::test]
    async fn test_delete_user() {
        let backend = Arc::new(MockBackend::new().reply("/users/3", mock::ok_empty()));
        let service = user_service(&backend).await;

        service.delete_user(3).await.unwrap();
        assert_eq!(backend.calls()[0].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let backend = Arc::new(MockBackend::new().reply("/users/3", mock::business(404, "User not found")));
        let service = user_service(&backend).await;

        let err = service.delete_user(3).await.unwrap_err();
        assert_eq!(err.message(), "User not found");
    }
}
