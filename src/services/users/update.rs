use tracing::warn;

use super::UserService;
use crate::errors::{ClientError, Result};
use crate::models::users::{UpdatePasswordRequest, UpdateUserRequest, UserProfile};
use crate::utils::validate::{validate_email, validate_password, validate_phone, validate_username};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
) -> Result<UserProfile> {
    if let Some(username) = &update_data.username {
        validate_username(username).map_err(ClientError::validation)?;
    }
    if let Some(email) = &update_data.email {
        validate_email(email).map_err(ClientError::validation)?;
    }
    if let Some(phone) = &update_data.phone {
        validate_phone(phone).map_err(ClientError::validation)?;
    }

    let updated: UserProfile = service
        .client()
        .put(&format!("/users/{user_id}"), &update_data)
        .await?;

    // 修改的是当前用户时同步本地缓存
    let session = service.client().session();
    if session.cached_profile().await.is_some_and(|p| p.id == updated.id)
        && let Err(e) = session.save_profile(&updated).await
    {
        warn!("Failed to cache updated profile: {}", e);
    }

    Ok(updated)
}

pub async fn update_password(service: &UserService, user_id: i64, new_password: &str) -> Result<()> {
    validate_password(new_password).map_err(ClientError::validation)?;

    let body = UpdatePasswordRequest {
        new_password: new_password.to_string(),
    };
    service
        .client()
        .put::<Option<serde_json::Value>, _>(&format!("/users/{user_id}/password"), &body)
        .await?;
    Ok(())
}
